//! Per-request proxy descriptors.
//!
//! A [`ProxyConfig`] is handed to a single search call and turned into a
//! `reqwest` proxy for that request only; nothing is pooled or retained.

use std::fmt;
use std::str::FromStr;

use reqwest::header::HeaderValue;
use reqwest::Proxy as ReqwestProxy;
use url::Url;

use crate::{Result, SearchError};

/// Proxy protocol type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxyProtocol {
    /// HTTP proxy
    #[default]
    Http,
    /// HTTPS proxy
    Https,
    /// SOCKS5 proxy
    Socks5,
}

impl ProxyProtocol {
    fn scheme(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::Socks5 => "socks5",
        }
    }

    fn default_port(self) -> u16 {
        match self {
            Self::Http | Self::Https => 8080,
            Self::Socks5 => 1080,
        }
    }
}

/// How credentials are presented to the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProxyAuth {
    /// Let the client choose. The HTTP client only speaks Basic, so this
    /// sends Basic credentials when both username and password are set.
    #[default]
    Any,
    /// Always send Basic credentials when a username is set.
    Basic,
    /// Send this exact `Proxy-Authorization` header value.
    Custom(String),
}

/// A single proxy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Proxy host (IP or domain)
    pub host: String,
    /// Proxy port
    pub port: u16,
    /// Proxy protocol
    pub protocol: ProxyProtocol,
    /// Authentication scheme
    pub auth: ProxyAuth,
    /// Optional username for authentication
    pub username: Option<String>,
    /// Optional password for authentication
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Creates a new HTTP proxy configuration.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            protocol: ProxyProtocol::Http,
            auth: ProxyAuth::Any,
            username: None,
            password: None,
        }
    }

    /// Sets the proxy protocol.
    pub fn with_protocol(mut self, protocol: ProxyProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Sets authentication credentials.
    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the authentication scheme.
    pub fn with_auth_scheme(mut self, auth: ProxyAuth) -> Self {
        self.auth = auth;
        self
    }

    /// Returns the proxy URL without credentials.
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol.scheme(), self.host, self.port)
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.auth, self.username.as_deref(), self.password.as_deref()) {
            (ProxyAuth::Any, Some(user), Some(pass)) => Some((user, pass)),
            (ProxyAuth::Basic, Some(user), pass) => Some((user, pass.unwrap_or_default())),
            _ => None,
        }
    }

    /// Builds the `reqwest` proxy routing all traffic through this proxy.
    pub fn to_reqwest(&self) -> Result<ReqwestProxy> {
        let proxy_err = |e: &dyn fmt::Display| SearchError::Proxy(format!("{}: {}", self, e));

        if self.protocol == ProxyProtocol::Socks5 {
            // SOCKS credentials only travel inside the URL.
            let mut url = Url::parse(&self.url()).map_err(|e| proxy_err(&e))?;
            if let Some((user, pass)) = self.credentials() {
                url.set_username(user).map_err(|_| proxy_err(&"bad username"))?;
                url.set_password(Some(pass)).map_err(|_| proxy_err(&"bad password"))?;
            }
            return ReqwestProxy::all(url.as_str()).map_err(|e| proxy_err(&e));
        }

        let mut proxy = ReqwestProxy::all(self.url()).map_err(|e| proxy_err(&e))?;
        if let ProxyAuth::Custom(value) = &self.auth {
            let value = HeaderValue::from_str(value).map_err(|e| proxy_err(&e))?;
            proxy = proxy.custom_http_auth(value);
        } else if let Some((user, pass)) = self.credentials() {
            proxy = proxy.basic_auth(user, pass);
        }
        Ok(proxy)
    }
}

impl fmt::Display for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

impl FromStr for ProxyConfig {
    type Err = SearchError;

    /// Parses `scheme://[user[:pass]@]host[:port]`.
    fn from_str(s: &str) -> Result<Self> {
        let url = Url::parse(s)?;

        let protocol = match url.scheme() {
            "http" => ProxyProtocol::Http,
            "https" => ProxyProtocol::Https,
            "socks5" => ProxyProtocol::Socks5,
            scheme => {
                return Err(SearchError::Proxy(format!(
                    "Unsupported proxy protocol: {}",
                    scheme
                )))
            }
        };

        let host = url
            .host_str()
            .ok_or_else(|| SearchError::Proxy("Missing proxy host".to_string()))?;
        // `Url::port` hides a port equal to the scheme default (":80" on http).
        let port = url
            .port()
            .or_else(|| written_port(s))
            .unwrap_or(protocol.default_port());

        let mut config = ProxyConfig::new(host, port).with_protocol(protocol);

        let decode = |part: &str| {
            urlencoding::decode(part)
                .map(|p| p.into_owned())
                .map_err(|e| SearchError::Proxy(e.to_string()))
        };
        if !url.username().is_empty() {
            config.username = Some(decode(url.username())?);
        }
        if let Some(password) = url.password() {
            config.password = Some(decode(password)?);
        }

        Ok(config)
    }
}

/// Port spelled out in the authority of `s`, if any.
fn written_port(s: &str) -> Option<u16> {
    let rest = s.split_once("://").map_or(s, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    let (_, port) = host_port.rsplit_once(':')?;
    // "[::1]" has colons but no port.
    if port.ends_with(']') {
        return None;
    }
    port.parse().ok()
}
