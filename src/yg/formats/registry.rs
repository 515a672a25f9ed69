//! Named output formats for parsed programs
//!
//! Every output format implements [`Formatter`]. The CLI and the tests never
//! call a formatter directly; they look one up by the name stored in
//! `output.format` through a [`FormatRegistry`], so a format added here is
//! immediately selectable from configuration.

use crate::yg::ast::Program;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a program could not be rendered
#[derive(Debug, Error)]
pub enum FormatError {
    /// No formatter is registered under the requested name
    #[error("unknown format `{name}` (available: {})", available.join(", "))]
    UnknownFormat {
        name: String,
        available: Vec<&'static str>,
    },
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Renders a whole [`Program`] as text
///
/// Names are static because they double as configuration values.
pub trait Formatter: Send + Sync {
    /// Registry key, e.g. `"sexp"` or `"treeviz"`
    fn name(&self) -> &'static str;

    fn serialize(&self, program: &Program) -> Result<String, FormatError>;

    /// One line shown by `yg formats`
    fn description(&self) -> &'static str {
        ""
    }
}

/// Formatters keyed by name, iterated in name order
///
/// `FormatRegistry::default()` is empty; [`FormatRegistry::with_defaults`]
/// holds the four built-in formats.
#[derive(Default)]
pub struct FormatRegistry {
    formatters: BTreeMap<&'static str, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// S-expression, tree view, JSON and YAML
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        registry.register(super::SexpFormatter);
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry
    }

    /// Add a formatter. A later registration under the same name wins.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters.insert(formatter.name(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    /// Render `program` with the formatter registered as `format`
    pub fn serialize(&self, program: &Program, format: &str) -> Result<String, FormatError> {
        match self.get(format) {
            Some(formatter) => formatter.serialize(program),
            None => Err(FormatError::UnknownFormat {
                name: format.to_string(),
                available: self.names().collect(),
            }),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.formatters.keys().copied()
    }

    /// `(name, description)` pairs in name order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.formatters
            .iter()
            .map(|(name, formatter)| (*name, formatter.description()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yg::testing::parse_ok;

    struct StatementCount;

    impl Formatter for StatementCount {
        fn name(&self) -> &'static str {
            "count"
        }

        fn serialize(&self, program: &Program) -> Result<String, FormatError> {
            Ok(program.statements.len().to_string())
        }
    }

    struct Shouting;

    impl Formatter for Shouting {
        fn name(&self) -> &'static str {
            "count"
        }

        fn serialize(&self, program: &Program) -> Result<String, FormatError> {
            Ok(format!("{}!", program.statements.len()))
        }
    }

    #[test]
    fn test_builtin_formats() {
        let registry = FormatRegistry::with_defaults();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["json", "sexp", "treeviz", "yaml"]);
        assert!(registry.entries().all(|(_, description)| !description.is_empty()));
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(FormatRegistry::default().names().count(), 0);
    }

    #[test]
    fn test_register_and_serialize() {
        let mut registry = FormatRegistry::default();
        registry.register(StatementCount);
        assert!(registry.get("count").is_some());
        let program = parse_ok("a = b; c = d;");
        assert_eq!(registry.serialize(&program, "count").ok().as_deref(), Some("2"));

        registry.register(Shouting);
        assert_eq!(registry.names().count(), 1);
        assert_eq!(registry.serialize(&program, "count").ok().as_deref(), Some("2!"));
    }

    #[test]
    fn test_unknown_format_lists_available() {
        let registry = FormatRegistry::with_defaults();
        let error = match registry.serialize(&parse_ok(""), "xml") {
            Err(error) => error,
            Ok(text) => panic!("xml rendered as {text:?}"),
        };
        assert!(matches!(&error, FormatError::UnknownFormat { name, .. } if name == "xml"));
        assert_eq!(
            error.to_string(),
            "unknown format `xml` (available: json, sexp, treeviz, yaml)"
        );
    }
}
