/// StudyGen error types
#[derive(Debug, thiserror::Error)]
pub enum StudyGenError {
    /// Network failure or non-success HTTP status from the generation service
    #[error("{}", transport_message(.status, .body))]
    Transport {
        /// HTTP status, `None` when the request never got a response
        status: Option<u16>,
        /// Response body text, or the transport error description
        body: String,
    },

    /// Success response without generated text at the expected location
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Generated text could not be decoded into quiz questions
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn transport_message(status: &Option<u16>, body: &str) -> String {
    match status {
        Some(code) => format!("Transport error: HTTP {}\n{}", code, body),
        None => format!("Transport error: {}", body),
    }
}

impl StudyGenError {
    /// Create transport error for a non-success HTTP status
    pub fn http_status<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Transport {
            status: Some(status),
            body: body.into(),
        }
    }

    /// Create transport error for a request that got no response
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Transport {
            status: None,
            body: msg.into(),
        }
    }

    /// Create malformed response error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create decode error
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// HTTP status carried by a transport error
    pub fn transport_status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the quiz path may replace this error with the fallback question
    pub fn is_decode_stage(&self) -> bool {
        matches!(self, Self::MalformedResponse(_) | Self::Decode(_))
    }
}
