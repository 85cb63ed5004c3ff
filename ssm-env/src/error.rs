use std::{error::Error, fmt, sync::Arc};

pub type BoxedSource = Arc<dyn Error + Send + Sync>;

#[derive(Debug, Clone)]
pub enum LoaderError {
    ConnectionConfig(String),
    /// A page request failed. `source` holds the store's own error when it
    /// has one, so callers can downcast to it.
    FetchPage {
        path: String,
        message: String,
        source: Option<BoxedSource>,
    },
    EnvironmentWrite { name: String, message: String },
    Cancelled,
}

impl LoaderError {
    pub fn fetch_page(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchPage {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn fetch_page_with_source<E>(
        path: impl Into<String>,
        message: impl Into<String>,
        source: E,
    ) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::FetchPage {
            path: path.into(),
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }
}

impl PartialEq for LoaderError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ConnectionConfig(a), Self::ConnectionConfig(b)) => a == b,
            (
                Self::FetchPage { path, message, .. },
                Self::FetchPage {
                    path: other_path,
                    message: other_message,
                    ..
                },
            ) => path == other_path && message == other_message,
            (
                Self::EnvironmentWrite { name, message },
                Self::EnvironmentWrite {
                    name: other_name,
                    message: other_message,
                },
            ) => name == other_name && message == other_message,
            (Self::Cancelled, Self::Cancelled) => true,
            _ => false,
        }
    }
}

impl Eq for LoaderError {}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionConfig(msg) => write!(f, "Parameter store configuration failed: {}", msg),
            Self::FetchPage { path, message, .. } => {
                write!(f, "Failed to fetch parameters under '{}': {}", path, message)
            }
            Self::EnvironmentWrite { name, message } => {
                write!(f, "Failed to set environment variable '{}': {}", name, message)
            }
            Self::Cancelled => write!(f, "Parameter load was cancelled"),
        }
    }
}

impl Error for LoaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FetchPage {
                source: Some(source),
                ..
            } => {
                let source: &(dyn Error + 'static) = source.as_ref();
                Some(source)
            }
            _ => None,
        }
    }
}
