use thiserror::Error;

/// Location and description of the first syntax problem found in a file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{line}:{column}: {message}")]
pub struct SyntaxError {
    /// 1-based line
    pub line: usize,
    /// 1-based column, in bytes
    pub column: usize,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum DocError {
    #[error("Directory walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Package directory not found: {0}")]
    PackageNotFound(String),

    #[error("No Go source files in {0}")]
    NoSourceFiles(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse { path: String, source: SyntaxError },

    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DocError>;
