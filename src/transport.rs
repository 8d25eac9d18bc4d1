//! HTTP transport seam

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Response handed back by a [`Transport`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Raw `Content-Type` header, if any
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Issues a GET request and returns the full response body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url) -> Result<HttpResponse>;
}

/// Default transport backed by `reqwest`
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();
        debug!(status = status.as_u16(), ?content_type, bytes = body.len(), "response received");

        Ok(HttpResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}
