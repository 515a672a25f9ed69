//! JSON and YAML output through serde

use super::registry::{FormatError, Formatter};
use crate::yg::ast::Program;

pub fn to_json(program: &Program) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(program)?)
}

pub fn to_yaml(program: &Program) -> Result<String, FormatError> {
    Ok(serde_yaml::to_string(program)?)
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn serialize(&self, program: &Program) -> Result<String, FormatError> {
        to_json(program)
    }

    fn description(&self) -> &'static str {
        "Pretty-printed JSON of the full tree, spans included"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn serialize(&self, program: &Program) -> Result<String, FormatError> {
        to_yaml(program)
    }

    fn description(&self) -> &'static str {
        "YAML of the full tree, spans included"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yg::testing::parse_ok;

    #[test]
    fn test_json_round_trips() {
        let program = parse_ok("grammar! G { 'g', }; r = @m.n(a ~ b,) | [x] #tag;");
        let json = to_json(&program).unwrap();
        let back: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(back, program);
    }

    #[test]
    fn test_json_shape() {
        let program = parse_ok("fragment! F");
        let value: serde_json::Value = serde_json::to_value(&program).unwrap();
        assert_eq!(value["statements"][0]["type"], "fragment");
        assert_eq!(value["statements"][0]["id"]["name"], "F");
        assert_eq!(value["span"]["end"], 11);
    }

    #[test]
    fn test_yaml_round_trips() {
        let program = parse_ok("a = b? ~ //i;");
        let yaml = to_yaml(&program).unwrap();
        let back: Program = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, program);
    }
}
