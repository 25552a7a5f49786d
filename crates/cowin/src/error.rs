/// Errors raised by the CoWIN client.
#[derive(Debug, thiserror::Error)]
pub enum CowinError {
    /// The API answered with a non-success status.
    #[error("Unable to fetch data: HTTP {status}")]
    Transport {
        /// HTTP status code returned by the API.
        status: u16,
    },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not the expected JSON shape.
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}
