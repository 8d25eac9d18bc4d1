//! Client configuration

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::xml::ParseConfig;

/// Query endpoint of the v2 API
pub const DEFAULT_ENDPOINT: &str = "https://api.wolframalpha.com/v2/query";

/// Environment variable holding the app id
pub const APP_ID_ENV: &str = "WOLFRAMALPHA_APP_ID";

/// Environment variable overriding the endpoint
pub const ENDPOINT_ENV: &str = "WOLFRAMALPHA_ENDPOINT";

/// Configuration for [`Client`](crate::Client)
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// API credential sent as `appid`
    pub app_id: String,
    pub endpoint: Url,
    /// Request timeout for the default HTTP transport (`None` means no timeout)
    pub timeout: Option<Duration>,
    pub parse: ParseConfig,
}

impl ClientConfig {
    pub fn new(app_id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            app_id: app_id.into(),
            endpoint: Url::parse(DEFAULT_ENDPOINT)?,
            timeout: Some(Duration::from_secs(30)),
            parse: ParseConfig::default(),
        })
    }

    /// Read the app id and optional endpoint from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`ClientConfig::from_env`], resolving variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_id = lookup(APP_ID_ENV)
            .filter(|app_id| !app_id.is_empty())
            .ok_or_else(|| Error::Config(format!("{APP_ID_ENV} is not set")))?;
        let config = Self::new(app_id)?;
        match lookup(ENDPOINT_ENV) {
            Some(endpoint) => config.with_endpoint(&endpoint),
            None => Ok(config),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.endpoint = Url::parse(endpoint)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_parse_config(mut self, parse: ParseConfig) -> Self {
        self.parse = parse;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() -> Result<()> {
        let config = ClientConfig::new("DEMO")?;
        assert_eq!(config.app_id, "DEMO");
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.parse, ParseConfig::default());
        Ok(())
    }

    #[test]
    fn test_builder_methods() -> Result<()> {
        let config = ClientConfig::new("DEMO")?
            .with_endpoint("http://localhost:8080/v2/query")?
            .with_timeout(None)
            .with_parse_config(ParseConfig::unlimited());
        assert_eq!(config.endpoint.host_str(), Some("localhost"));
        assert_eq!(config.timeout, None);
        assert_eq!(config.parse.max_depth, 0);
        Ok(())
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        }
    }

    #[test]
    fn test_lookup_app_id_only() -> Result<()> {
        let config = ClientConfig::from_lookup(vars(&[(APP_ID_ENV, "ENV-ID")]))?;
        assert_eq!(config.app_id, "ENV-ID");
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        Ok(())
    }

    #[test]
    fn test_lookup_endpoint_override() -> Result<()> {
        let config = ClientConfig::from_lookup(vars(&[
            (APP_ID_ENV, "ENV-ID"),
            (ENDPOINT_ENV, "http://127.0.0.1:9000/v2/query"),
        ]))?;
        assert_eq!(config.endpoint.port(), Some(9000));
        Ok(())
    }

    #[test]
    fn test_lookup_requires_app_id() {
        let missing = ClientConfig::from_lookup(vars(&[(ENDPOINT_ENV, DEFAULT_ENDPOINT)]));
        assert!(matches!(missing, Err(Error::Config(msg)) if msg.contains(APP_ID_ENV)));

        let blank = ClientConfig::from_lookup(vars(&[(APP_ID_ENV, "")]));
        assert!(matches!(blank, Err(Error::Config(_))));
    }

    #[test]
    fn test_lookup_invalid_endpoint() {
        let err = ClientConfig::from_lookup(vars(&[(APP_ID_ENV, "ID"), (ENDPOINT_ENV, "::")]));
        assert!(matches!(err, Err(Error::Url(_))));
    }

    #[test]
    fn test_invalid_endpoint() -> Result<()> {
        let err = ClientConfig::new("DEMO")?.with_endpoint("not a url");
        assert!(matches!(err, Err(Error::Url(_))));
        Ok(())
    }
}
