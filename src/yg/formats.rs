//! Output format implementations for parsed programs
//!
//! - `sexp` - tree-sitter style S-expressions with field labels
//! - `treeviz` - box-drawing tree view
//! - `serialized` - JSON and YAML through serde
//! - `registry` - lookup of the above by name

pub mod registry;
pub mod serialized;
pub mod sexp;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serialized::{to_json, to_yaml, JsonFormatter, YamlFormatter};
pub use sexp::{node_to_sexp, to_sexp, SexpFormatter};
pub use treeviz::{node_to_treeviz_str, to_treeviz_str, TreevizFormatter};
