use serde_json::Value;
use thiserror::Error;

/// Failure of the HTTP exchange itself, before a GraphQL envelope could be read.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response body is not a GraphQL envelope: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum TwingateError {
    #[error("Credentials not found. Run 'twingate auth' or set TWINGATE_SUBDOMAIN and TWINGATE_API_KEY.")]
    CredentialsNotFound,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Transport error: {source}")]
    Transport {
        #[source]
        source: TransportError,
        item_index: usize,
    },

    #[error("GraphQL error: {message}")]
    GraphQLApi {
        message: String,
        envelope: Value,
        item_index: usize,
    },

    #[error("{message}")]
    BusinessRule { message: String, item_index: usize },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String, item_index: usize },

    #[error("Pagination of '{root_key}' stopped after {max_pages} pages")]
    PageLimitExceeded {
        root_key: String,
        max_pages: usize,
        item_index: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operation '{operation}' is not supported for resource '{resource}'")]
    UnsupportedOperation { resource: String, operation: String },

    #[error("Item {item_index}: {source}")]
    Item {
        item_index: usize,
        #[source]
        source: Box<TwingateError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type TwingateResult<T> = Result<T, TwingateError>;

impl TwingateError {
    pub(crate) fn transport(source: impl Into<TransportError>, item_index: usize) -> Self {
        TwingateError::Transport {
            source: source.into(),
            item_index,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>, item_index: usize) -> Self {
        TwingateError::MalformedResponse {
            message: message.into(),
            item_index,
        }
    }

    /// Index of the batch item that produced this error, when known.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            TwingateError::Transport { item_index, .. }
            | TwingateError::GraphQLApi { item_index, .. }
            | TwingateError::BusinessRule { item_index, .. }
            | TwingateError::MalformedResponse { item_index, .. }
            | TwingateError::PageLimitExceeded { item_index, .. }
            | TwingateError::Item { item_index, .. } => Some(*item_index),
            _ => None,
        }
    }

    /// Attach an item index to errors that don't carry one yet.
    pub fn at_item(self, item_index: usize) -> Self {
        if self.item_index().is_some() {
            return self;
        }
        TwingateError::Item {
            item_index,
            source: Box::new(self),
        }
    }
}

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> TwingateResult<T>;
    fn with_context<F>(self, f: F) -> TwingateResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> TwingateResult<T> {
        self.map_err(|e| TwingateError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> TwingateResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| TwingateError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> TwingateResult<T> {
        self.ok_or_else(|| TwingateError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> TwingateResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| TwingateError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! twingate_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::TwingateError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::TwingateError::$error_type(format!($fmt, $($arg)*))
    };
}
