//! Genesys Cloud client configuration

use vela_core::{DirectoryError, DirectoryResult};

pub const ENV_REGION: &str = "GENESYSCLOUD_REGION";
pub const ENV_CLIENT_ID: &str = "GENESYSCLOUD_OAUTHCLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "GENESYSCLOUD_OAUTHCLIENT_SECRET";

const DEFAULT_REGION: &str = "mypurecloud.com";

/// Credentials and region for a Genesys Cloud org
#[derive(Debug, Clone)]
pub struct GenesysConfig {
    /// AWS-region-qualified API domain (e.g. "mypurecloud.com",
    /// "usw2.pure.cloud")
    pub region: String,
    /// OAuth client-credentials grant client ID
    pub client_id: String,
    /// OAuth client-credentials grant client secret
    pub client_secret: String,
}

impl GenesysConfig {
    pub fn new(
        region: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read the configuration from the environment, using the same
    /// variables the Genesys Cloud tooling ecosystem uses. The region
    /// defaults to the US East production domain.
    pub fn from_env() -> DirectoryResult<Self> {
        let client_id = require_env(ENV_CLIENT_ID)?;
        let client_secret = require_env(ENV_CLIENT_SECRET)?;
        let region = std::env::var(ENV_REGION).unwrap_or_else(|_| DEFAULT_REGION.to_string());
        Ok(Self::new(region, client_id, client_secret))
    }

    /// Base URL of the public REST API for this region
    pub fn api_base(&self) -> String {
        format!("https://api.{}", self.region)
    }

    /// Base URL of the auth service for this region
    pub fn login_base(&self) -> String {
        format!("https://login.{}", self.region)
    }
}

fn require_env(name: &str) -> DirectoryResult<String> {
    std::env::var(name)
        .map_err(|_| DirectoryError::configuration(format!("missing environment variable {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_reads_all_variables() {
        temp_env::with_vars(
            [
                (ENV_REGION, Some("usw2.pure.cloud")),
                (ENV_CLIENT_ID, Some("client-id")),
                (ENV_CLIENT_SECRET, Some("client-secret")),
            ],
            || {
                let config = GenesysConfig::from_env().unwrap();
                assert_eq!(config.region, "usw2.pure.cloud");
                assert_eq!(config.api_base(), "https://api.usw2.pure.cloud");
                assert_eq!(config.login_base(), "https://login.usw2.pure.cloud");
            },
        );
    }

    #[test]
    fn region_defaults_when_unset() {
        temp_env::with_vars(
            [
                (ENV_REGION, None),
                (ENV_CLIENT_ID, Some("client-id")),
                (ENV_CLIENT_SECRET, Some("client-secret")),
            ],
            || {
                let config = GenesysConfig::from_env().unwrap();
                assert_eq!(config.region, "mypurecloud.com");
            },
        );
    }

    #[test]
    fn missing_credentials_are_a_configuration_error() {
        temp_env::with_vars(
            [
                (ENV_CLIENT_ID, None::<&str>),
                (ENV_CLIENT_SECRET, None),
            ],
            || {
                let err = GenesysConfig::from_env().unwrap_err();
                assert!(matches!(err, DirectoryError::Configuration(_)));
                assert!(err.to_string().contains(ENV_CLIENT_ID));
            },
        );
    }
}
