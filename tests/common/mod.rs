// Mock completion endpoint and capturing sink shared by integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const TEST_DEPLOYMENT: &str = "test-deploy";
pub const TEST_KEY: &str = "test-key";

/// One request as the mock endpoint saw it
#[derive(Debug, Clone)]
pub struct CapturedRequest
{   pub method: String
  , pub target: String
  , pub headers: HashMap<String, String>
  , pub body: Vec<u8>
}

impl CapturedRequest
{   pub fn json(&self) -> Value
    {   serde_json::from_slice(&self.body).unwrap()
    }

    /// Content of the single message in the body
    pub fn message_content(&self) -> String
    {   let body = self.json();
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1, "expected one message");
        assert_eq!(messages[0]["role"], "user");
        messages[0]["content"].as_str().unwrap().to_string()
    }
}

type Handler = Arc<dyn Fn(&CapturedRequest) -> String + Send + Sync>;

/// Local HTTP endpoint answering every request through `handler`
pub struct MockEndpoint
{   pub url: String
  , requests: Arc<Mutex<Vec<CapturedRequest>>>
}

impl MockEndpoint
{   pub async fn start<F>(handler: F) -> Self
    where
      F: Fn(&CapturedRequest) -> (u16, String) + Send + Sync + 'static
    {   Self::start_raw(move |request| {
          let (status, body) = handler(request);
          http_response(status, &body, body.len())
        }).await
    }

    /// Handler writes the whole HTTP response itself
    pub async fn start_raw<F>(handler: F) -> Self
    where
      F: Fn(&CapturedRequest) -> String + Send + Sync + 'static
    {   let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Handler = Arc::new(handler);

        let captured = Arc::clone(&requests);
        tokio::spawn(async move {
          loop
          {   let Ok((stream, _)) = listener.accept().await else
              {   break;
              };
              let captured = Arc::clone(&captured);
              let handler = Arc::clone(&handler);
              tokio::spawn(async move {
                serve_one(stream, captured, handler).await;
              });
          }
        });

        MockEndpoint
        {   url: format!("http://{}", addr)
          , requests
        }
    }

    /// Always answers `status` with `body`
    pub async fn fixed(status: u16, body: impl Into<String>) -> Self
    {   let body = body.into();
        Self::start(move |_| (status, body.clone())).await
    }

    pub fn requests(&self) -> Vec<CapturedRequest>
    {   self.requests.lock().unwrap().clone()
    }

    pub fn config(&self) -> chatfwd::ForwarderConfig
    {   chatfwd::ForwarderConfig::new(
          self.url.clone(),
          TEST_DEPLOYMENT,
          TEST_KEY
        )
    }
}

async fn serve_one(
  mut stream: TcpStream
, captured: Arc<Mutex<Vec<CapturedRequest>>>
, handler: Handler
)
{   let Some(request) = read_request(&mut stream).await else
    {   return;
    };
    let response = handler(&request);
    captured.lock().unwrap().push(request);

    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Response text announcing `content_length` bytes of body
pub fn http_response(status: u16, body: &str, content_length: usize) -> String
{   let reason = match status
    {   200 => "OK"
      , 400 => "Bad Request"
      , 401 => "Unauthorized"
      , 429 => "Too Many Requests"
      , 500 => "Internal Server Error"
      , 503 => "Service Unavailable"
      , _ => "Unknown"
    };
    format!(
      "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
      status, reason, content_length, body
    )
}

async fn read_request(stream: &mut TcpStream) -> Option<CapturedRequest>
{   let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop
    {   let n = stream.read(&mut chunk).await.ok()?;
        if n == 0
        {   return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n")
        {   break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers: HashMap<String, String> = lines
      .filter_map(|l| l.split_once(':'))
      .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
      .collect();

    let content_length = headers
      .get("content-length")
      .and_then(|v| v.parse::<usize>().ok())
      .unwrap_or(0);

    while buf.len() < header_end + content_length
    {   let n = stream.read(&mut chunk).await.ok()?;
        if n == 0
        {   return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(CapturedRequest
    {   method
      , target
      , headers
      , body: buf[header_end..header_end + content_length].to_vec()
    })
}

/// Success payload in the endpoint's shape with one choice
pub fn completion_body(text: &str) -> String
{   json!({
      "id": "chatcmpl-test"
    , "object": "chat.completion"
    , "created": 1700000000
    , "model": "gpt-35-turbo"
    , "choices": [{
        "index": 0
      , "finish_reason": "stop"
      , "message": { "role": "assistant", "content": text }
      }]
    , "usage": {
        "prompt_tokens": 5
      , "completion_tokens": 7
      , "total_tokens": 12
      }
    }).to_string()
}

/// Sink that keeps every prompt it is handed
#[derive(Default)]
pub struct CaptureSink
{   pub prompts: Mutex<Vec<String>>
}

impl chatfwd::DiagnosticSink for CaptureSink
{   fn prompt(&self, user_message: &str)
    {   self.prompts.lock().unwrap().push(user_message.to_string());
    }
}
