pub mod env_vars;
pub mod loader;
pub mod ssm;

pub use loader::LoaderConfig;
pub use ssm::SsmConfig;

#[async_trait::async_trait]
pub trait Configs: Sized {
    async fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Debug, Clone, Default)]
pub struct SsmEnvConfig {
    pub ssm_config: SsmConfig,
    pub loader_config: LoaderConfig,
}

#[async_trait::async_trait]
impl Configs for SsmEnvConfig {
    async fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self {
            ssm_config: SsmConfig::load().await?,
            loader_config: LoaderConfig::load().await?,
        })
    }
}
