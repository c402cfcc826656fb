use thiserror::Error;

/// Failures while turning a URL query string into a `Query` and back
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Query string is empty")]
    Empty,

    #[error("Malformed query string: {0}")]
    Malformed(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Date range needs both start and end")]
    HalfOpenDates,

    #[error("Offset and count must be positive (offset={offset}, count={count})")]
    InvalidPagination { offset: u32, count: u32 },

    #[error("Failed to encode query: {0}")]
    Encode(String),
}

/// Failures surfaced by the search controller and the search API client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("No column registered at index {0}")]
    UnknownColumn(usize),

    #[error("Column {0} is not orderable")]
    ColumnNotOrderable(usize),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
