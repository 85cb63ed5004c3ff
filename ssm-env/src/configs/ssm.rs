use super::Configs;
use super::env_vars::optional_env;

/// Overrides applied on top of the default AWS configuration chain. Unset
/// fields leave the SDK's own resolution in place.
#[derive(Debug, Clone, Default)]
pub struct SsmConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

#[async_trait::async_trait]
impl Configs for SsmConfig {
    async fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(SsmConfig {
            region: optional_env("AWS_REGION"),
            profile: optional_env("AWS_PROFILE"),
            endpoint_url: optional_env("AWS_ENDPOINT").or_else(|| optional_env("SSM_ENDPOINT")),
        })
    }
}
