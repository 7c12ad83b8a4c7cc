use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// An operation that needs a live session was called before a
    /// successful login.
    #[error("not logged in; call login() before this operation")]
    NotAuthenticated,

    /// A structurally required piece of markup is missing or unreadable.
    /// Per-panel and per-row failures are skipped instead; this variant is
    /// reserved for the fatal cases (own display name, own roster row,
    /// unparsable date line).
    #[error("required markup missing: {context}")]
    Extraction { context: String },

    /// A pagination/detail response body was not a valid `{html, count}`
    /// envelope.
    #[error("malformed response envelope: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Opaque transport failure surfaced by the session client. Never
    /// retried inside the core; the caller decides.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ScrapeError {
    pub fn extraction(context: impl Into<String>) -> Self {
        ScrapeError::Extraction {
            context: context.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ScrapeError::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
