//! Configuration utility types.
//!
//! | Module    | Purpose                                 |
//! |-----------|-----------------------------------------|
//! | `error`   | Configuration error types               |
//! | `field`   | Dotted field paths for diagnostics      |
//! | `pattern` | Regex patterns stored as TOML strings   |

mod error;
mod field;
mod pattern;

pub use error::{ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
pub use pattern::Pattern;
