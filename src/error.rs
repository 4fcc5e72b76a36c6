use crate::client::ClientError;

/// Errors raised while building a query or turning its response into a table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested granularity cannot be used with this operation.
    #[error("{0} granularity is not supported for this query")]
    UnsupportedGranularity(String),

    /// An argument was outside the set of values the API accepts.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A metric amount could not be parsed into the requested dtype.
    #[error("column '{column}' value '{value}' is not a valid {dtype}")]
    NumericConversion {
        column: String,
        value: String,
        dtype: String,
    },

    /// A response page is missing a field the flattener depends on.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Transport or auth failure from the client, passed through as-is.
    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, Error>;
