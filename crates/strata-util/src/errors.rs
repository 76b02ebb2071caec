use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Strata operations.
#[derive(Debug, Error, Diagnostic)]
pub enum StrataError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed resolution configuration.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check the resolution config TOML for syntax errors"))]
    Config { message: String },

    /// A graph visitor was driven outside of the start/visit/finish lifecycle.
    #[error("Graph traversal failed: {message}")]
    #[diagnostic(help(
        "The resolution engine must call start exactly once, then visit nodes and edges, then finish"
    ))]
    Traversal { message: String },

    /// A node index does not belong to the resolution graph.
    #[error("Node {index} is not part of the resolution graph")]
    MissingNode { index: usize },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl StrataError {
    pub fn traversal(message: impl Into<String>) -> Self {
        Self::Traversal {
            message: message.into(),
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type StrataResult<T> = miette::Result<T>;
