use thiserror::Error;

/// Errors raised while talking to the explorer API or decoding its payloads.
///
/// None of these are fatal to the process: a view turns them into an
/// `Unavailable` state for the region that issued the request.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned error status: {0}")]
    Status(u16),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Error decoding response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response carried neither data nor errors")]
    EmptyResponse,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid hex value `{0}`")]
    InvalidHex(String),

    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid network `{0}`")]
    InvalidNetwork(String),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
