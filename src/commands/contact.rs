//! Contact Commands
//!
//! Frontend bindings for `ContactEndpoint`.

use serde::Serialize;

use crate::config::ClientConfig;
use crate::models::ContactPage;
use super::{call, EndpointError};

const ENDPOINT: &str = "ContactEndpoint";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageArgs<'a> {
    page: u32,
    page_size: u32,
    filter: &'a str,
}

/// One zero-indexed page of contacts matching `filter`
pub async fn get_contact_page(
    config: &ClientConfig,
    page: u32,
    page_size: u32,
    filter: &str,
) -> Result<ContactPage, EndpointError> {
    let result: Option<ContactPage> = call(config, ENDPOINT, "getPage", &PageArgs { page, page_size, filter }).await?;
    Ok(result.unwrap_or_default())
}
