//! Cursor pagination shared by every Codacy list/search endpoint.
//!
//! Each response has the shape `{"data": [...], "pagination": {"cursor": "..."}}`.
//! The fetcher re-issues the same request with the returned cursor until a
//! page arrives without one.

use pipeline::TransportError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::transport::{ApiRequest, Method, Transport};

/// The request repeated for every page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

impl PageRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Some(body),
        }
    }

    fn to_api_request(&self, page_size: u32, cursor: Option<&str>) -> ApiRequest {
        let mut query = vec![("limit".to_string(), page_size.to_string())];
        if let Some(cursor) = cursor {
            query.push(("cursor".to_string(), cursor.to_string()));
        }
        ApiRequest {
            method: self.method,
            url: self.url.clone(),
            query,
            body: self.body.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    data: Option<Vec<T>>,
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    cursor: Option<String>,
}

/// Follows cursors until the last page and concatenates every page's items.
#[derive(Debug)]
pub struct PaginatedFetcher<T> {
    transport: T,
    page_size: u32,
}

impl<T> PaginatedFetcher<T>
where
    T: Transport,
{
    pub fn new(transport: T, page_size: u32) -> Self {
        Self {
            transport,
            page_size,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches every page of `request`.
    ///
    /// Items keep page order, then in-page order. The first failed or
    /// undecodable page aborts the whole fetch and nothing is returned.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn fetch_all<I>(&self, request: &PageRequest) -> Result<Vec<I>, TransportError>
    where
        I: DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let response = self
                .transport
                .send(request.to_api_request(self.page_size, cursor.as_deref()))
                .await?;
            if !response.is_success() {
                return Err(TransportError::Status {
                    status: response.status,
                    url: request.url.clone(),
                    body: response.body.to_string(),
                });
            }

            let page: Page<I> =
                serde_json::from_value(response.body).map_err(|e| TransportError::Decode {
                    url: request.url.clone(),
                    message: e.to_string(),
                })?;
            pages += 1;
            items.extend(page.data.unwrap_or_default());

            cursor = page
                .pagination
                .and_then(|p| p.cursor)
                .filter(|c| !c.is_empty());
            debug!(pages, items = items.len(), more = cursor.is_some(), "Fetched page");

            if cursor.is_none() {
                break;
            }
        }

        Ok(items)
    }
}
