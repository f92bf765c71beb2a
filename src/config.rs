//! Endpoint address, deployment and credential for the forwarder

use serde::{Deserialize, Serialize};
use log::{debug, error};

pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";

pub const DEFAULT_API_VERSION: &str = "2023-05-15";

fn default_api_version() -> String
{   DEFAULT_API_VERSION.to_string()
}

/// Everything needed to reach one deployment.
/// Supplied from outside; nothing here is compiled in.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForwarderConfig
{   /// Base address, e.g. https://myresource.openai.azure.com/
    pub endpoint: String
  , /// Deployment / model name on the resource
    pub deployment: String
  , /// Credential sent as the `api-key` header
    pub api_key: String
  , /// `api-version` query parameter
    #[serde(default = "default_api_version")]
    pub api_version: String
}

// Hand-written so the key never lands in a log line.
impl std::fmt::Debug for ForwarderConfig
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.debug_struct("ForwarderConfig")
          .field("endpoint", &self.endpoint)
          .field("deployment", &self.deployment)
          .field("api_key", &"<redacted>")
          .field("api_version", &self.api_version)
          .finish()
    }
}

impl ForwarderConfig
{   pub fn new(
      endpoint: impl Into<String>
    , deployment: impl Into<String>
    , api_key: impl Into<String>
    ) -> Self
    {   ForwarderConfig
        {   endpoint: endpoint.into()
          , deployment: deployment.into()
          , api_key: api_key.into()
          , api_version: default_api_version()
        }
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from any name -> value lookup (environment, secret store)
    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where
      F: Fn(&str) -> Option<String>
    {   let required = |name: &str| {
          lookup(name).ok_or_else(|| {
            error!("{} not set", name);
            crate::error::Error::InvalidConfiguration(
              format!("{} not set", name)
            )
          })
        };

        let config = ForwarderConfig
        {   endpoint: required(ENV_ENDPOINT)?
          , deployment: required(ENV_DEPLOYMENT)?
          , api_key: required(ENV_API_KEY)?
          , api_version: lookup(ENV_API_VERSION)
              .unwrap_or_else(default_api_version)
        };
        config.validate()?;
        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<std::path::Path>)
      -> Result<Self, crate::error::Error>
    {   let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
          error!("Failed to read {}: {}", path.display(), e);
          crate::error::Error::InvalidConfiguration(
            format!("{}: {}", path.display(), e)
          )
        })?;
        let config: ForwarderConfig
          = serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse {}: {}", path.display(), e);
            crate::error::Error::InvalidConfiguration(
              format!("{}: {}", path.display(), e)
            )
          })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that can never produce a request
    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   let invalid = |msg: &str| {
          Err(crate::error::Error::InvalidConfiguration(
            msg.to_string()
          ))
        };
        if !(self.endpoint.starts_with("https://")
          || self.endpoint.starts_with("http://"))
        {   return invalid("endpoint must be an http(s) address");
        }
        if self.deployment.trim().is_empty()
        {   return invalid("deployment is empty");
        }
        if self.api_key.is_empty()
        {   return invalid("api key is empty");
        }
        if self.api_version.trim().is_empty()
        {   return invalid("api version is empty");
        }
        Ok(())
    }
}
