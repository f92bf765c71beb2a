//! Where the raw prompt goes before it is sent

use log::info;

/// Receives each prompt just before it leaves the process
pub trait DiagnosticSink: Send + Sync
{   fn prompt(&self, user_message: &str);
}

/// Writes prompts through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink
{   fn prompt(&self, user_message: &str)
    {   info!(target: "chatfwd::prompt", "{}", user_message);
    }
}

/// Drops prompts
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink
{   fn prompt(&self, _user_message: &str) {}
}
