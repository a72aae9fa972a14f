use crate::types::column::Column;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while loading, deriving or exporting the table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    RemoteFetch {
        url:    String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered, but not with a success status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body could not be decoded into the expected shape.
    #[error("could not parse response from {url}: {source}")]
    Parse {
        url:    String,
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },

    #[error("book {key} has no author key to look up")]
    MissingAuthorKey { key: String },

    #[error("{0} is not a valid page size (choose 10, 25, 50 or 100)")]
    InvalidPageSize(u32),

    #[error("page numbers start at 1")]
    InvalidPage,

    #[error("already on the first page")]
    PreviousDisabled,

    #[error("no more pages")]
    NextDisabled,

    #[error("unknown column {0:?}")]
    UnknownColumn(String),

    #[error("no book with key {0:?} in the table")]
    UnknownRecord(String),

    #[error("no book is being edited")]
    NotEditing,

    #[error("{value:?} is not a valid value for {column}")]
    InvalidField { column: Column, value: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures that originate from talking to the remote service.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::RemoteFetch { .. } | Error::Status { .. } | Error::Parse { .. }
        )
    }
}
