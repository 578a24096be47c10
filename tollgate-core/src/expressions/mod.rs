mod path;
mod resolve;

pub use path::{is_expression, parse_path, ContextPath, ResolutionError};
pub use resolve::{resolve_all, resolve_expression, validate_value_expressions};
