//! Authentication-relevant fields of a request envelope.
//!
//! Only what the checks need is read; the body is otherwise left to the
//! caller's own request handling.

use serde::Deserialize;

use crate::error::{AuthError, AuthResult};

/// Fields pulled from a JSON request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestClaims {
    pub request_id: Option<String>,
    pub request_type: Option<String>,
    pub timestamp: Option<String>,
    /// `session.application.applicationId`, falling back to
    /// `context.System.application.applicationId` (sessionless requests).
    pub application_id: Option<String>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    session: Option<Session>,
    #[serde(default)]
    context: Option<Context>,
    request: RequestPart,
}

#[derive(Deserialize)]
struct Session {
    #[serde(default)]
    application: Option<Application>,
}

#[derive(Deserialize)]
struct Context {
    #[serde(default, rename = "System")]
    system: Option<System>,
}

#[derive(Deserialize)]
struct System {
    #[serde(default)]
    application: Option<Application>,
}

#[derive(Deserialize)]
struct Application {
    #[serde(default, rename = "applicationId")]
    application_id: Option<String>,
}

#[derive(Deserialize)]
struct RequestPart {
    #[serde(default, rename = "requestId")]
    request_id: Option<String>,
    #[serde(default, rename = "type")]
    request_type: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
}

impl RequestClaims {
    /// Decode `raw_body`. Anything that is not a JSON object with a
    /// `request` object and the expected field types is
    /// [`AuthError::MalformedRequest`]; other missing fields are left as
    /// `None` for the individual checks to reject.
    pub fn from_body(raw_body: &[u8]) -> AuthResult<Self> {
        let envelope: Envelope =
            serde_json::from_slice(raw_body).map_err(|e| AuthError::MalformedRequest {
                message: format!("invalid request JSON: {}", e),
            })?;

        let session_app = envelope
            .session
            .and_then(|s| s.application)
            .and_then(|a| a.application_id);
        let context_app = envelope
            .context
            .and_then(|c| c.system)
            .and_then(|s| s.application)
            .and_then(|a| a.application_id);

        Ok(Self {
            request_id: envelope.request.request_id,
            request_type: envelope.request.request_type,
            timestamp: envelope.request.timestamp,
            application_id: session_app.or(context_app),
        })
    }
}
