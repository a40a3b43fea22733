//! Error types shared by the interpreter and the configuration layer.

use thiserror::Error;

/// Errors produced while configuring or interpreting an L-System.
#[derive(Debug, Error)]
pub enum Error {
    /// A branch-close symbol was reached with an empty state stack.
    ///
    /// The interpretation pass is aborted; primitives emitted before the failure
    /// are discarded along with it.
    #[error("malformed input: unmatched ']' at byte {index} ({emitted} primitives discarded)")]
    UnmatchedPop {
        /// Byte offset of the offending symbol in the command string.
        index: usize,
        /// Number of primitives emitted before the failure.
        emitted: usize,
    },

    /// Parameters rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text that is not valid TOML or does not match the expected shape.
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A configuration that cannot be written back as TOML.
    #[error("toml write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
