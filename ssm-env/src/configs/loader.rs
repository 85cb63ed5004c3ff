use super::Configs;
use super::env_vars::{env_flag, env_or, optional_env};

/// SSM accepts between 1 and 10 results per `GetParametersByPath` page.
const MAX_PAGE_SIZE: i32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Path prefix to load; empty disables loading.
    pub path: String,
    pub recursive: bool,
    pub page_size: Option<i32>,
}

impl LoaderConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
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
}

pub fn parse_page_size(raw: &str) -> Result<i32, String> {
    let size = raw
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("Invalid page size '{raw}': {e}"))?;
    if !(1..=MAX_PAGE_SIZE).contains(&size) {
        return Err(format!("Page size must be between 1 and {MAX_PAGE_SIZE}, got {size}"));
    }
    Ok(size)
}

#[async_trait::async_trait]
impl Configs for LoaderConfig {
    async fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let page_size = optional_env("SSM_PAGE_SIZE")
            .map(|raw| parse_page_size(&raw))
            .transpose()?;

        Ok(LoaderConfig {
            path: env_or("SSM_PARAMETER_PATH", ""),
            recursive: env_flag("SSM_RECURSIVE")?,
            page_size,
        })
    }
}
