//! Client Configuration
//!
//! Runtime settings read once at startup from `<meta>` tags in the host page.

use std::str::FromStr;

const DEFAULT_ENDPOINT_PREFIX: &str = "connect";
const DEFAULT_PAGE_SIZE: u32 = 25;
const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 30_000;
const DEFAULT_REVEAL_DELAY_MS: u32 = 100;
const DEFAULT_CSRF_HEADER: &str = "X-CSRF-Token";

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Path segment in front of `/{Endpoint}/{method}`
    pub endpoint_prefix: String,
    /// Contacts per picker page
    pub page_size: u32,
    pub request_timeout_ms: u32,
    /// Delay before scrolling the highlighted contact into view
    pub reveal_delay_ms: u32,
    pub csrf_header: String,
    pub csrf_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint_prefix: DEFAULT_ENDPOINT_PREFIX.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            csrf_header: DEFAULT_CSRF_HEADER.to_string(),
            csrf_token: None,
        }
    }
}

impl ClientConfig {
    /// Build from a key lookup; missing or invalid values keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            endpoint_prefix: text("todo:endpoint-prefix")
                .map(|p| p.trim_matches('/').to_string())
                .unwrap_or(defaults.endpoint_prefix),
            page_size: positive(&lookup, "todo:page-size", defaults.page_size),
            request_timeout_ms: positive(&lookup, "todo:request-timeout-ms", defaults.request_timeout_ms),
            reveal_delay_ms: parsed(&lookup, "todo:reveal-delay-ms", defaults.reveal_delay_ms),
            csrf_header: text("_csrf_header").unwrap_or(defaults.csrf_header),
            csrf_token: text("_csrf"),
        }
    }

    /// Read `<meta name=... content=...>` tags from the current document
    pub fn from_document() -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        Self::from_lookup(|name| {
            let document = document.as_ref()?;
            let selector = format!("meta[name=\"{}\"]", name);
            document
                .query_selector(&selector)
                .ok()
                .flatten()
                .and_then(|meta| meta.get_attribute("content"))
        })
    }

    /// Full URL path for an endpoint method
    pub fn endpoint_url(&self, endpoint: &str, method: &str) -> String {
        if self.endpoint_prefix.is_empty() {
            format!("/{}/{}", endpoint, method)
        } else {
            format!("/{}/{}/{}", self.endpoint_prefix, endpoint, method)
        }
    }
}

fn parsed<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("[Config] Ignoring invalid value {:?} for {}", raw, key);
            default
        }),
        None => default,
    }
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u32) -> u32 {
    match parsed(lookup, key, default) {
        0 => {
            log::warn!("[Config] {} must be positive, using {}", key, default);
            default
        }
        value => value,
    }
}
