use std::fmt;

/// Error type for chatfwd operations.
/// Implements Clone so a failed reply can cross task boundaries.
///
/// Every variant past configuration is a "remote call failed" case;
/// the cause is carried through as the transport or endpoint gave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Configuration missing or malformed
    InvalidConfiguration(String)
  , /// Transport failure (connect, TLS, body read)
    HttpError(String)
  , /// Endpoint answered with a non-success status
    ApiError
    {   status: u16
      , body: String
    }
  , /// Success status but the body did not decode
    ParseError(String)
  , /// Generic error
    Other(String)
}

impl Error
{   /// HTTP status reported by the endpoint, if it got that far
    pub fn status(&self) -> Option<u16>
    {   match self
        {   Error::ApiError { status, .. } => Some(*status)
          , _ => None
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ApiError { status, body } => {
              write!(f, "API error ({}): {}", status, body)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
