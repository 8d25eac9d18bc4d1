//! Wolfram|Alpha v2 query client

use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::model::QueryResult;
use crate::transport::{HttpResponse, HttpTransport, Transport};
use crate::xml::ParseConfig;

const EXPECTED_MEDIA_TYPE: &str = "text/xml";
const EXPECTED_CHARSET: &str = "utf-8";

/// Query client. Holds only the immutable credential and endpoint, so
/// concurrent queries share no mutable state.
#[derive(Clone, Debug)]
pub struct Client<T = HttpTransport> {
    app_id: String,
    endpoint: Url,
    parse: ParseConfig,
    transport: T,
}

impl Client<HttpTransport> {
    /// Client for the public endpoint with default settings
    pub fn new(app_id: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(app_id)?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            app_id: config.app_id,
            endpoint: config.endpoint,
            parse: config.parse,
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Request URL: `params`, then `input`, then `appid`, then `overrides`.
    /// Repeated keys are sent as-is; the server decides precedence.
    pub fn request_url(
        &self,
        input: &str,
        params: &[(&str, &str)],
        overrides: &[(&str, &str)],
    ) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("input", input)
            .append_pair("appid", &self.app_id)
            .extend_pairs(overrides);
        url
    }

    /// Run a query and decode the response.
    ///
    /// Transport failures are returned unchanged. The response is rejected
    /// before parsing unless it is `text/xml` in `utf-8`.
    #[instrument(skip(self, params, overrides), fields(endpoint = %self.endpoint))]
    pub async fn query(
        &self,
        input: &str,
        params: &[(&str, &str)],
        overrides: &[(&str, &str)],
    ) -> Result<QueryResult> {
        let url = self.request_url(input, params, overrides);
        debug!(params = params.len(), overrides = overrides.len(), "sending query");

        let response = self.transport.get(url).await?;
        decode(&response, self.parse)
    }

    /// Query with an `assumption` parameter chosen from a previous result
    pub async fn query_with_assumption(&self, input: &str, assumption: &str) -> Result<QueryResult> {
        self.query(input, &[], &[("assumption", assumption)]).await
    }
}

fn decode(response: &HttpResponse, parse: ParseConfig) -> Result<QueryResult> {
    check_content_type(response.content_type.as_deref())?;
    QueryResult::parse(&response.body, parse)
}

/// Accept only `text/xml` with `charset=utf-8`
pub fn check_content_type(header: Option<&str>) -> Result<()> {
    let header = header.unwrap_or_default();
    let mut parts = header.split(';').map(str::trim);

    let media_type = parts.next().unwrap_or_default();
    if media_type != EXPECTED_MEDIA_TYPE {
        warn!(media_type, "rejecting response");
        return Err(Error::ContentType {
            found: media_type.to_string(),
        });
    }

    let charset = parts
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"'))
        .unwrap_or_default();
    if charset != EXPECTED_CHARSET {
        warn!(charset, "rejecting response");
        return Err(Error::Charset {
            found: charset.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_accepted() -> Result<()> {
        check_content_type(Some("text/xml;charset=utf-8"))?;
        check_content_type(Some("text/xml; charset=\"utf-8\""))?;
        Ok(())
    }

    #[test]
    fn test_content_type_rejected() {
        assert!(matches!(
            check_content_type(Some("text/html;charset=utf-8")),
            Err(Error::ContentType { found }) if found == "text/html"
        ));
        assert!(matches!(
            check_content_type(None),
            Err(Error::ContentType { .. })
        ));
    }

    #[test]
    fn test_charset_rejected() {
        assert!(matches!(
            check_content_type(Some("text/xml;charset=ISO-8859-1")),
            Err(Error::Charset { found }) if found == "ISO-8859-1"
        ));
        assert!(matches!(
            check_content_type(Some("text/xml")),
            Err(Error::Charset { found }) if found.is_empty()
        ));
        assert!(matches!(
            check_content_type(Some("text/xml;charset=UTF-8")),
            Err(Error::Charset { .. })
        ));
    }
}
