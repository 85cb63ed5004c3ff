pub mod adapters;

use crate::error::LoaderError;

/// A single entry returned by the store. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameter {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterPage {
    pub parameters: Vec<Parameter>,
    pub next_token: Option<String>,
}

impl ParameterPage {
    /// An absent or empty continuation token ends the listing.
    pub fn has_more_pages(&self) -> bool {
        matches!(&self.next_token, Some(token) if !token.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParametersByPathRequest {
    pub path: String,
    pub with_decryption: bool,
    pub recursive: bool,
    pub max_results: Option<i32>,
}

impl ParametersByPathRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            with_decryption: true,
            recursive: false,
            max_results: None,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn max_results(mut self, max_results: Option<i32>) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Paginated "get parameters by path" source.
#[async_trait::async_trait]
pub trait ParameterStore: Send + Sync {
    /// Fetches one page. `next_token` is `None` for the first page and the
    /// previous page's token afterwards.
    async fn get_parameters_by_path(
        &self,
        request: &ParametersByPathRequest,
        next_token: Option<String>,
    ) -> Result<ParameterPage, LoaderError>;
}
