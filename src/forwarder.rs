use std::future::Future;
use std::sync::Arc;
use log::debug;

use crate::config::ForwarderConfig;
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::providers::AzureOpenAiClient;
use crate::request::{ChatCompletionsOptions, SamplingParams};

/// Caller-facing seam: one prompt in, one completion out
pub trait CompletionService
{   fn complete(
      &self
    , user_message: String
    ) -> impl Future<Output = crate::CompleteReply> + Send;
}

/// Forwards a prompt to one deployment and hands back the raw result.
///
/// Holds only configuration. Every call builds its own HTTP client,
/// so concurrent calls share nothing mutable.
#[derive(Clone)]
pub struct ChatService
{   config: ForwarderConfig
  , sink: Arc<dyn DiagnosticSink>
}

impl ChatService
{   /// Forwarder that logs prompts through `log`
    pub fn new(config: ForwarderConfig) -> Self
    {   Self::with_sink(config, Arc::new(LogSink))
    }

    pub fn with_sink(
      config: ForwarderConfig
    , sink: Arc<dyn DiagnosticSink>
    ) -> Self
    {   debug!("Creating ChatService for {:?}", config);
        ChatService
        {   config
          , sink
        }
    }

    pub fn config(&self) -> &ForwarderConfig
    {   &self.config
    }
}

impl CompletionService for ChatService
{   /// Sends `user_message` as the single user message with
    /// `SamplingParams::FIXED`. Failures come back unchanged; nothing
    /// is retried.
    fn complete(
      &self
    , user_message: String
    ) -> impl Future<Output = crate::CompleteReply> + Send
    {   async move {
          let client = AzureOpenAiClient::from_config(&self.config);

          self.sink.prompt(&user_message);

          let options = ChatCompletionsOptions::single_user_message(
            user_message,
            SamplingParams::FIXED
          );

          client
            .get_chat_completions(&self.config.deployment, &options)
            .await
        }
    }
}
