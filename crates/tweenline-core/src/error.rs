//! Error types.
//!
//! The engine itself never faults during normal operation: binding
//! ambiguity and parse failures degrade to best-effort values (see the
//! binding resolver). The only `Result` in the public surface sits at the
//! style-adapter seam, where text values are parsed into (number, unit).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("empty style value")]
    Empty,

    #[error("no numeric component in style value '{raw}'")]
    NotNumeric { raw: String },
}
