//! Wire types for the chat completions endpoint

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Author of a chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole
{   System
  , User
  , Assistant
  , Tool
  , /// Any role this crate does not name, kept as sent
    #[serde(untagged)]
    Other(String)
}

/// Keeps an explicit `null` apart from an absent field:
/// absent stays `None`, `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>
, T: Deserialize<'de>
{   Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: ChatRole
  , #[serde(
      default,
      deserialize_with = "present",
      skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Option<String>>
  , #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>
}

impl ChatMessage
{   pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: ChatRole::User
          , content: Some(Some(content.into()))
          , extra: HashMap::new()
        }
    }

    /// Message text, if the field was present and not null
    pub fn text(&self) -> Option<&str>
    {   self.content.as_ref()?.as_deref()
    }
}

/// Sampling controls attached to every request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams
{   pub temperature: f32
  , pub max_tokens: u32
  , /// Nucleus sampling mass
    pub top_p: f32
  , pub frequency_penalty: f32
  , pub presence_penalty: f32
}

impl SamplingParams
{   /// The one configuration the forwarder sends
    pub const FIXED: SamplingParams = SamplingParams
    {   temperature: 0.7
      , max_tokens: 800
      , top_p: 0.95
      , frequency_penalty: 0.0
      , presence_penalty: 0.0
    };
}

/// Request body for `chat/completions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionsOptions
{   pub messages: Vec<ChatMessage>
  , pub temperature: f32
  , pub max_tokens: u32
  , pub top_p: f32
  , pub frequency_penalty: f32
  , pub presence_penalty: f32
  , pub stream: bool
}

impl ChatCompletionsOptions
{   /// Single user message, non-streaming
    pub fn single_user_message(
      user_message: String
    , sampling: SamplingParams
    ) -> Self
    {   ChatCompletionsOptions
        {   messages: vec![ChatMessage::user(user_message)]
          , temperature: sampling.temperature
          , max_tokens: sampling.max_tokens
          , top_p: sampling.top_p
          , frequency_penalty: sampling.frequency_penalty
          , presence_penalty: sampling.presence_penalty
          , stream: false
        }
    }
}

/// Response body for `chat/completions`.
/// Fields not modelled here are kept in `extra` untouched, and
/// modelled fields the endpoint left out are not written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletions
{   #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<u64>
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>
  , pub choices: Vec<ChatChoice>
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<CompletionsUsage>
  , #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>
}

impl ChatCompletions
{   /// Text of the first choice, if any
    pub fn first_text(&self) -> Option<&str>
    {   self.choices.first()
          .and_then(|c| c.message.as_ref())
          .and_then(|m| m.text())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice
{   #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ChatMessage>
  , #[serde(
      default,
      deserialize_with = "present",
      skip_serializing_if = "Option::is_none"
    )]
    pub finish_reason: Option<Option<String>>
  , #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionsUsage
{   pub prompt_tokens: u32
  , pub completion_tokens: u32
  , pub total_tokens: u32
  , #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>
}
