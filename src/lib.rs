pub mod error;
pub mod config;
pub mod diagnostics;
pub mod providers;
pub mod request;
pub mod forwarder;

/*

chatfwd: async prompt forwarder for a hosted chat completion
deployment (Azure OpenAI style). One prompt in, one raw completion
out. No queue, no retry, no conversation state.

chatfwd/
├── src/
│   ├── lib.rs          # Re-exports
│   ├── error.rs        # Error type
│   ├── config.rs       # Endpoint / deployment / credential
│   ├── diagnostics.rs  # Prompt sink (log facade by default)
│   ├── forwarder.rs    # ChatService
│   ├── request.rs      # Wire types
│   ├── providers/
│   │   └── azure_openai.rs
│   └── main.rs         # CLI caller
└── tests/

*/

/// CHATFWD API INTERFACE:

// ===== Complete =====

pub type CompleteReply
  = Result<crate::request::ChatCompletions, crate::error::Error>;

pub use config::ForwarderConfig;
pub use diagnostics::{DiagnosticSink, LogSink, NullSink};
pub use error::Error;
pub use forwarder::{ChatService, CompletionService};
pub use request::{
  ChatChoice, ChatCompletions, ChatCompletionsOptions, ChatMessage,
  ChatRole, CompletionsUsage, SamplingParams,
};
