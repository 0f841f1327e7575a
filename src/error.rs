use thiserror::Error;

/// Errors surfaced by the config loaders, provider clients and routines.
///
/// Everything funnels into one of two kinds so the binaries can map any
/// failure to a single exit code with a readable message.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or incomplete configuration, including missing environment
    /// variables and names that do not belong to the configured domain.
    #[error("configuration error: {0}")]
    Config(String),

    /// A provider API call failed: transport error, non-success HTTP status,
    /// unusable response body, or a zero/ambiguous zone lookup.
    #[error("provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, Error>;
