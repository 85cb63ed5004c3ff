use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    error::LoaderError,
    store::{Parameter, ParameterPage, ParameterStore, ParametersByPathRequest},
};

const DEFAULT_PAGE_SIZE: usize = 10;

/// In-memory parameter store. Pages through its entries using the entry
/// offset as the continuation token.
#[derive(Debug)]
pub struct LocalParameterStore {
    parameters: Vec<Parameter>,
    page_size: usize,
    filter_by_path: bool,
    fail_on_page: Option<(usize, String)>,
    requests: AtomicUsize,
}

impl LocalParameterStore {
    pub fn new() -> Self {
        Self::with_parameters(Vec::new())
    }

    pub fn with_parameters(parameters: Vec<Parameter>) -> Self {
        Self {
            parameters,
            page_size: DEFAULT_PAGE_SIZE,
            filter_by_path: true,
            fail_on_page: None,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Returns every entry regardless of the requested path.
    pub fn unfiltered(mut self) -> Self {
        self.filter_by_path = false;
        self
    }

    /// Makes the request for the 1-based `page` fail with `message`.
    pub fn fail_on_page(mut self, page: usize, message: impl Into<String>) -> Self {
        self.fail_on_page = Some((page, message.into()));
        self
    }

    /// Number of page requests served so far, including failed ones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn in_scope(&self, parameter: &Parameter, request: &ParametersByPathRequest) -> bool {
        if !self.filter_by_path {
            return true;
        }
        let Some(name) = parameter.name.as_deref() else {
            return true;
        };
        match name.strip_prefix(request.path.as_str()) {
            Some(rest) => request.recursive || !rest.contains('/'),
            None => false,
        }
    }
}

impl Default for LocalParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ParameterStore for LocalParameterStore {
    async fn get_parameters_by_path(
        &self,
        request: &ParametersByPathRequest,
        next_token: Option<String>,
    ) -> Result<ParameterPage, LoaderError> {
        let page_number = self.requests.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some((page, message)) = &self.fail_on_page {
            if *page == page_number {
                return Err(LoaderError::fetch_page(&request.path, message.clone()));
            }
        }

        let offset = match next_token {
            Some(token) => token.parse::<usize>().map_err(|_| {
                LoaderError::fetch_page(&request.path, format!("invalid next token '{}'", token))
            })?,
            None => 0,
        };

        let page_size = request
            .max_results
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(self.page_size);

        let matching: Vec<&Parameter> = self
            .parameters
            .iter()
            .filter(|p| self.in_scope(p, request))
            .collect();

        let end = (offset + page_size).min(matching.len());
        let parameters = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|p| (*p).clone())
            .collect();
        let next_token = (end < matching.len()).then(|| end.to_string());

        Ok(ParameterPage {
            parameters,
            next_token,
        })
    }
}
