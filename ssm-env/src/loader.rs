use std::future::Future;

use tracing::{debug, info};

use crate::{
    configs::{LoaderConfig, SsmConfig},
    environment::{Environment, ProcessEnvironment},
    error::LoaderError,
    store::{
        ParameterPage, ParameterStore, ParametersByPathRequest,
        adapters::ssm_store::SsmParameterStore,
    },
};

const PATH_SEPARATOR: char = '/';

/// Appends the path separator unless `path` already ends with it, so that
/// `/app` never matches keys under `/app2`.
pub fn normalize_path(path: &str) -> String {
    if path.ends_with(PATH_SEPARATOR) {
        path.to_string()
    } else {
        format!("{path}{PATH_SEPARATOR}")
    }
}

/// Strips `prefix` from a parameter's full name. Names outside the prefix
/// yield `None` rather than being used verbatim.
pub fn derive_env_name<'a>(prefix: &str, full_name: &'a str) -> Option<&'a str> {
    full_name.strip_prefix(prefix)
}

/// What a successful load did. Holds variable names only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub applied: Vec<String>,
    pub pages: usize,
}

/// Copies every parameter under a path prefix into an [`Environment`].
pub struct PathEnvironmentLoader<S, E> {
    store: S,
    environment: E,
    recursive: bool,
    page_size: Option<i32>,
}

impl<S, E> PathEnvironmentLoader<S, E>
where
    S: ParameterStore,
    E: Environment,
{
    pub fn new(store: S, environment: E) -> Self {
        Self {
            store,
            environment,
            recursive: false,
            page_size: None,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn page_size(mut self, page_size: Option<i32>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    /// Loads every parameter under `path`. An empty path is a no-op.
    ///
    /// Parameters without a name or value, or whose derived name or value is
    /// empty, are skipped. The first store or environment error aborts the
    /// load; variables set before it stay set.
    pub async fn load(&self, path: &str) -> Result<(), LoaderError> {
        self.load_with_report(path).await.map(|_| ())
    }

    #[deprecated(note = "use `load`")]
    pub async fn parse(&self, path: &str) -> Result<(), LoaderError> {
        self.load(path).await
    }

    /// Like [`load`](Self::load), but gives up with [`LoaderError::Cancelled`]
    /// as soon as `cancel` completes. The in-flight page request is dropped.
    pub async fn load_until<F>(&self, path: &str, cancel: F) -> Result<(), LoaderError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => Err(LoaderError::Cancelled),
            result = self.load(path) => result,
        }
    }

    pub async fn load_with_report(&self, path: &str) -> Result<LoadReport, LoaderError> {
        let mut report = LoadReport::default();
        if path.is_empty() {
            return Ok(report);
        }

        let prefix = normalize_path(path);
        let request = ParametersByPathRequest::new(prefix.as_str())
            .recursive(self.recursive)
            .max_results(self.page_size);

        info!("Loading parameters under {}", prefix);

        let mut next_token: Option<String> = None;
        loop {
            let page = self
                .store
                .get_parameters_by_path(&request, next_token.clone())
                .await?;
            report.pages += 1;
            debug!(page = report.pages, entries = page.parameters.len(), "Fetched parameter page");

            // A token equal to the one just sent would request the same page again.
            let has_more = page.has_more_pages() && page.next_token != next_token;
            let ParameterPage {
                parameters,
                next_token: page_token,
            } = page;

            for parameter in parameters {
                let (Some(name), Some(value)) = (parameter.name, parameter.value) else {
                    continue;
                };
                let Some(env_name) = derive_env_name(&prefix, &name) else {
                    continue;
                };
                if env_name.is_empty() || value.is_empty() {
                    continue;
                }

                self.environment.set(env_name, &value)?;
                report.applied.push(env_name.to_string());
            }

            if !has_more {
                break;
            }
            next_token = page_token;
        }

        info!(
            "Loaded {} variables from {} ({} pages)",
            report.applied.len(),
            prefix,
            report.pages
        );
        Ok(report)
    }
}

impl PathEnvironmentLoader<SsmParameterStore, ProcessEnvironment> {
    /// Builds a loader against AWS SSM and the real process environment.
    pub async fn from_config(
        ssm_config: &SsmConfig,
        loader_config: &LoaderConfig,
    ) -> Result<Self, LoaderError> {
        let store = SsmParameterStore::new(ssm_config).await?;
        Ok(Self::new(store, ProcessEnvironment::new())
            .recursive(loader_config.recursive)
            .page_size(loader_config.page_size))
    }
}

/// Loads every parameter under `path` from AWS SSM into the process
/// environment, using the default AWS credential chain.
///
/// An empty `path` returns immediately without contacting AWS.
pub async fn load(path: &str) -> Result<(), LoaderError> {
    if path.is_empty() {
        return Ok(());
    }
    let store = SsmParameterStore::from_env().await?;
    PathEnvironmentLoader::new(store, ProcessEnvironment::new())
        .load(path)
        .await
}

#[deprecated(note = "use `load`")]
pub async fn parse(path: &str) -> Result<(), LoaderError> {
    load(path).await
}

/// Blocking form of [`load`] for callers without an async runtime. Must not
/// be called from within a tokio runtime.
pub fn load_blocking(path: &str) -> Result<(), LoaderError> {
    if path.is_empty() {
        return Ok(());
    }
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| LoaderError::ConnectionConfig(format!("failed to create runtime: {}", e)))?;
    rt.block_on(load(path))
}
