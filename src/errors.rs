use thiserror::Error;

/// Errors raised while building or querying a `Table`.
#[derive(Error, Debug, PartialEq)]
pub enum TableError {
    #[error("Table has no series")]
    Empty,

    #[error("Series '{name}' has {found} values, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Series '{0}' is defined more than once")]
    DuplicateSeries(String),

    #[error("Unknown series '{0}'")]
    UnknownSeries(String),
}

/// Errors raised while reading a table from a file or stdin.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Could not open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed reading input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid line regex: {0}")]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    Table(#[from] TableError),
}
