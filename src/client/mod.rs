mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpClient;

use crate::types::WireMap;

/// Failure reported by a [`CostExplorer`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("no AWS credentials found: set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY")]
    MissingCredentials,

    #[error("failed to sign request: {0}")]
    Signing(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Error document returned by the service.
    #[error("{code}: {message}")]
    Api { code: String, message: String },

    #[error("{0}")]
    Other(String),
}

/// Blocking access to the Cost Explorer actions.
///
/// `operation` is the API action name (`GetCostAndUsage`, `GetDimensionValues`,
/// `GetTags`) and `params` its request body.
pub trait CostExplorer {
    fn invoke(&self, operation: &str, params: &WireMap) -> Result<WireMap, ClientError>;
}

impl<T: CostExplorer + ?Sized> CostExplorer for &T {
    fn invoke(&self, operation: &str, params: &WireMap) -> Result<WireMap, ClientError> {
        (**self).invoke(operation, params)
    }
}

impl<T: CostExplorer + ?Sized> CostExplorer for Box<T> {
    fn invoke(&self, operation: &str, params: &WireMap) -> Result<WireMap, ClientError> {
        (**self).invoke(operation, params)
    }
}
