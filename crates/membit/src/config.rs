use membit_core::MembitError;

pub const DEFAULT_API_BASE: &str = "https://api.membit.ai/v1";
pub const DEFAULT_PROXY_BASE: &str = "http://localhost:8080";
pub const PROXY_PATH_PREFIX: &str = "/api/membit";

pub const ENV_API_BASE: &str = "MEMBIT_API_BASE";
pub const ENV_API_KEY: &str = "MEMBIT_API_KEY";
pub const ENV_PROXY_BASE: &str = "MEMBIT_PROXY_BASE";

/// Which upstream a [`TransportConfig`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    /// Membit REST API, authenticated with a bearer key.
    Direct,
    /// A server-side proxy that holds the key itself.
    Proxy,
}

/// Where requests go and how they are authenticated.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub kind: UpstreamKind,
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Bearer key. Required for [`UpstreamKind::Direct`], never sent to a proxy.
    pub api_key: Option<String>,
    /// Path inserted between the base URL and the endpoint name.
    pub path_prefix: String,
}

impl TransportConfig {
    /// Direct Membit API at the default base URL.
    ///
    /// A missing key is accepted here and reported when a search is made.
    pub fn direct(api_key: Option<String>) -> Self {
        Self {
            kind: UpstreamKind::Direct,
            base_url: DEFAULT_API_BASE.to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            path_prefix: String::new(),
        }
    }

    /// Proxy at `base_url`, reached under `/api/membit`.
    pub fn proxy(base_url: impl Into<String>) -> Self {
        Self {
            kind: UpstreamKind::Proxy,
            base_url: trim_base(base_url.into()),
            api_key: None,
            path_prefix: PROXY_PATH_PREFIX.to_string(),
        }
    }

    /// Override the base URL (useful for testing with a mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = trim_base(url.into());
        self
    }

    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    /// Build a config from `MEMBIT_PROXY_BASE`, or failing that from
    /// `MEMBIT_API_BASE` and `MEMBIT_API_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(proxy) = get(ENV_PROXY_BASE) {
            return Self::proxy(proxy);
        }

        let config = Self::direct(get(ENV_API_KEY));
        match get(ENV_API_BASE) {
            Some(base) => config.with_base_url(base),
            None => config,
        }
    }

    /// Full URL for an endpoint such as `search-posts`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_url, self.path_prefix, path)
    }

    /// Headers for a request, failing when a direct call has no key.
    pub fn headers(&self) -> Result<Vec<(String, String)>, MembitError> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if self.kind == UpstreamKind::Direct {
            let key = self.api_key.as_deref().ok_or_else(|| {
                MembitError::Configuration(format!("{ENV_API_KEY} is not set in the environment"))
            })?;
            headers.push(("Authorization".to_string(), format!("Bearer {key}")));
        }
        Ok(headers)
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn direct_endpoints() {
        let config = TransportConfig::direct(Some("k".into()));
        assert_eq!(
            config.endpoint("search-posts"),
            "https://api.membit.ai/v1/search-posts"
        );
    }

    #[test]
    fn proxy_endpoints_trim_trailing_slash() {
        let config = TransportConfig::proxy("http://localhost:8080/");
        assert_eq!(
            config.endpoint("search-clusters"),
            "http://localhost:8080/api/membit/search-clusters"
        );
    }

    #[test]
    fn custom_path_prefix() {
        let config = TransportConfig::proxy("http://gateway").with_path_prefix("/membit");
        assert_eq!(config.endpoint("search-posts"), "http://gateway/membit/search-posts");
    }

    #[test]
    fn direct_headers_carry_bearer() {
        let headers = TransportConfig::direct(Some("secret".into()))
            .headers()
            .unwrap();
        assert!(headers.contains(&("Authorization".to_string(), "Bearer secret".to_string())));
    }

    #[test]
    fn direct_without_key_is_configuration_error() {
        let err = TransportConfig::direct(None).headers().unwrap_err();
        assert!(matches!(err, MembitError::Configuration(_)));
        assert!(err.to_string().contains("MEMBIT_API_KEY"));
    }

    #[test]
    fn empty_key_counts_as_missing() {
        assert!(TransportConfig::direct(Some(String::new())).api_key.is_none());
    }

    #[test]
    fn proxy_headers_have_no_credential() {
        let headers = TransportConfig::proxy(DEFAULT_PROXY_BASE).headers().unwrap();
        assert!(headers.iter().all(|(k, _)| k != "Authorization"));
    }

    #[test]
    fn lookup_prefers_proxy() {
        let config = TransportConfig::from_lookup(lookup(&[
            (ENV_PROXY_BASE, "http://proxy.local"),
            (ENV_API_KEY, "k"),
        ]));
        assert_eq!(config.kind, UpstreamKind::Proxy);
        assert_eq!(config.base_url, "http://proxy.local");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn lookup_direct_with_base_override() {
        let config = TransportConfig::from_lookup(lookup(&[
            (ENV_API_BASE, "https://staging.membit.ai/v1/"),
            (ENV_API_KEY, "k"),
        ]));
        assert_eq!(config.kind, UpstreamKind::Direct);
        assert_eq!(config.base_url, "https://staging.membit.ai/v1");
        assert_eq!(config.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn lookup_blank_proxy_falls_back_to_direct() {
        let config = TransportConfig::from_lookup(lookup(&[(ENV_PROXY_BASE, "  ")]));
        assert_eq!(config.kind, UpstreamKind::Direct);
        assert_eq!(config.base_url, DEFAULT_API_BASE);
        assert!(config.api_key.is_none());
    }
}
