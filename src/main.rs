use std::io::Read;
use log::{debug, error};

use chatfwd::{ChatService, CompletionService, ForwarderConfig};

/// Usage: chatfwd [PROMPT...]
/// Reads the prompt from stdin when no arguments are given.
/// Endpoint and key come from AZURE_OPENAI_* variables.
#[tokio::main]
async fn main()
{   env_logger::init();

    if let Err(e) = run().await
    {   error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), chatfwd::Error>
{   let config = ForwarderConfig::from_env()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let prompt = if args.is_empty()
    {   debug!("Reading prompt from stdin");
        let mut buf = String::new();
        std::io::stdin()
          .read_to_string(&mut buf)
          .map_err(|e| chatfwd::Error::from(e.to_string()))?;
        buf
    } else
    {   args.join(" ")
    };

    let service = ChatService::new(config);
    let completions = service.complete(prompt).await?;

    let rendered = serde_json::to_string_pretty(&completions)
      .map_err(|e| chatfwd::Error::ParseError(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}
