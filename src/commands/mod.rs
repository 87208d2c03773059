//! Endpoint Command Wrappers
//!
//! Frontend bindings to the backend RPC endpoints, organized by endpoint.
//! Every call is a JSON `POST /{prefix}/{Endpoint}/{method}` raced against
//! the configured request timeout.

mod todo;
mod contact;

use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, Response};

use crate::config::ClientConfig;
use crate::models::ValidationViolation;

// Re-export all public items
pub use todo::*;
pub use contact::*;

/// Failure of a backend call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EndpointError {
    /// Structured constraint violations from a save
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        violations: Vec<ValidationViolation>,
    },
    #[error("endpoint error ({status}): {message}")]
    Endpoint { status: u16, message: String },
    #[error("access denied")]
    Unauthorized,
    #[error("no response after {after_ms} ms")]
    Timeout { after_ms: u32 },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Error body written by the endpoint layer
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    validation_error_data: Option<Vec<ValidationViolation>>,
}

impl EndpointError {
    /// Classify a non-success response from its status and body text
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 || status == 403 {
            return EndpointError::Unauthorized;
        }
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => {
                let message = parsed.message.unwrap_or_default();
                let is_validation = parsed
                    .kind
                    .as_deref()
                    .map_or(false, |kind| kind.ends_with("EndpointValidationException"));
                match parsed.validation_error_data {
                    Some(violations) if is_validation || !violations.is_empty() => {
                        EndpointError::Validation { message, violations }
                    }
                    _ => EndpointError::Endpoint { status, message },
                }
            }
            Err(_) => EndpointError::Endpoint {
                status,
                message: body.trim().to_string(),
            },
        }
    }

    fn from_js(value: JsValue) -> Self {
        let text = value
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{:?}", value));
        EndpointError::Network(text)
    }
}

/// Decode a success body; an empty body reads as JSON `null`
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, EndpointError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| EndpointError::Decode(e.to_string()))
}

/// Call an endpoint method and decode its result
async fn call<A, T>(config: &ClientConfig, endpoint: &str, method: &str, args: &A) -> Result<T, EndpointError>
where
    A: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let body = serde_json::to_string(args).map_err(|e| EndpointError::Decode(e.to_string()))?;
    let url = config.endpoint_url(endpoint, method);
    log::debug!("[Endpoint] POST {}", url);

    let request = Box::pin(post_json(config, &url, &body));
    let timeout = TimeoutFuture::new(config.request_timeout_ms);
    let text = match select(request, timeout).await {
        Either::Left((result, _)) => result?,
        Either::Right(_) => {
            log::error!("[Endpoint] {} timed out", url);
            return Err(EndpointError::Timeout { after_ms: config.request_timeout_ms });
        }
    };
    decode_body(&text)
}

async fn post_json(config: &ClientConfig, url: &str, body: &str) -> Result<String, EndpointError> {
    let window = web_sys::window().ok_or_else(|| EndpointError::Network("no window".to_string()))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_credentials(RequestCredentials::SameOrigin);
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &init).map_err(EndpointError::from_js)?;
    let headers = request.headers();
    headers.set("Content-Type", "application/json").map_err(EndpointError::from_js)?;
    headers.set("Accept", "application/json").map_err(EndpointError::from_js)?;
    if let Some(token) = &config.csrf_token {
        headers.set(&config.csrf_header, token).map_err(EndpointError::from_js)?;
    }

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(EndpointError::from_js)?
        .dyn_into()
        .map_err(EndpointError::from_js)?;

    let text = JsFuture::from(response.text().map_err(EndpointError::from_js)?)
        .await
        .map_err(EndpointError::from_js)?
        .as_string()
        .unwrap_or_default();

    if response.ok() {
        Ok(text)
    } else {
        Err(EndpointError::from_response(response.status(), &text))
    }
}
