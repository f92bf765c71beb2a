use log::{debug, trace, error};

use crate::request::{ChatCompletions, ChatCompletionsOptions};

// ===== Azure OpenAI Client =====

/// HTTP client bound to one resource address and one credential.
/// Meant to live for a single call; it holds no pool shared with
/// other clients.
pub struct AzureOpenAiClient
{   endpoint: String
  , api_key: String
  , api_version: String
  , http_client: reqwest::Client
}

impl AzureOpenAiClient
{   pub fn new(
      endpoint: &str
    , api_key: &str
    , api_version: &str
    ) -> Self
    {   debug!("Creating AzureOpenAiClient for {}", endpoint);
        AzureOpenAiClient
        {   endpoint: endpoint.trim_end_matches('/').to_string()
          , api_key: api_key.to_string()
          , api_version: api_version.to_string()
          , http_client: reqwest::Client::new()
        }
    }

    pub fn from_config(config: &crate::config::ForwarderConfig) -> Self
    {   Self::new(
          &config.endpoint,
          &config.api_key,
          &config.api_version
        )
    }

    /// `{endpoint}/openai/deployments/{deployment}/chat/completions`
    pub fn chat_completions_url(&self, deployment: &str) -> String
    {   format!(
          "{}/openai/deployments/{}/chat/completions",
          self.endpoint,
          deployment
        )
    }

    /// One non-streaming chat completion round trip.
    /// Non-success statuses come back as `ApiError` with the
    /// endpoint's body unchanged.
    pub async fn get_chat_completions(
      &self
    , deployment: &str
    , options: &ChatCompletionsOptions
    ) -> Result<ChatCompletions, crate::error::Error>
    {   trace!("Chat completions request: {:?}", options);

        let response = self.http_client
          .post(self.chat_completions_url(deployment))
          .query(&[("api-version", self.api_version.as_str())])
          .header("api-key", &self.api_key)
          .json(options)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::HttpError(e.to_string())
          })?;

        let status = response.status();
        trace!("Chat completions response status: {}", status);

        if !status.is_success()
        {   let body = response.text().await
              .unwrap_or_else(|e| e.to_string());
            error!("Endpoint error {}: {}", status, body);
            return Err(crate::error::Error::ApiError
            {   status: status.as_u16()
              , body
            });
        }

        let completions: ChatCompletions
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        debug!(
          "Received {} choice(s) from {}",
          completions.choices.len(),
          deployment
        );
        Ok(completions)
    }
}
