use aws_config::BehaviorVersion;
use aws_sdk_ssm::{Client, error::DisplayErrorContext};
use aws_types::region::Region;
use tracing::debug;

use crate::{
    configs::SsmConfig,
    error::LoaderError,
    store::{Parameter, ParameterPage, ParameterStore, ParametersByPathRequest},
};

/// AWS SSM Parameter Store adapter.
#[derive(Clone)]
pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    /// Resolves credentials and region through the default AWS chain
    /// (environment, profile, instance metadata) with the overrides from
    /// `config` applied on top.
    pub async fn new(config: &SsmConfig) -> Result<Self, LoaderError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }

        if let Some(region) = config.region.clone() {
            loader = loader.region(Region::new(region));
        }

        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url.clone());
        }

        let shared_config = loader.load().await;
        if shared_config.region().is_none() {
            return Err(LoaderError::ConnectionConfig(
                "no AWS region could be resolved; set AWS_REGION or configure a profile"
                    .to_string(),
            ));
        }
        debug!(region = ?shared_config.region(), "AWS configuration resolved");

        Ok(Self::with_client(Client::new(&shared_config)))
    }

    pub async fn from_env() -> Result<Self, LoaderError> {
        Self::new(&SsmConfig::default()).await
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for SsmParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsmParameterStore").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameters_by_path(
        &self,
        request: &ParametersByPathRequest,
        next_token: Option<String>,
    ) -> Result<ParameterPage, LoaderError> {
        let output = self
            .client
            .get_parameters_by_path()
            .path(&request.path)
            .with_decryption(request.with_decryption)
            .recursive(request.recursive)
            .set_max_results(request.max_results)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                LoaderError::fetch_page_with_source(&request.path, message, e)
            })?;

        let parameters = output
            .parameters
            .unwrap_or_default()
            .into_iter()
            .map(|p| Parameter {
                name: p.name,
                value: p.value,
            })
            .collect();

        Ok(ParameterPage {
            parameters,
            next_token: output.next_token,
        })
    }
}
