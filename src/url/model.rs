//! Composed URL object: scheme, authority, path, query, fragment.

use std::fmt;
use std::str::FromStr;

use super::error::UrlError;
use super::path::Path;
use super::query::Query;
use super::split::{split_url, unsplit_url};

/// Ports inferred from the scheme when none is explicit.
const DEFAULT_PORTS: &[(&str, u16)] = &[("ftp", 21), ("ssh", 22), ("http", 80), ("https", 443)];

/// Default port for `scheme`, if it has one.
pub fn default_port(scheme: &str) -> Option<u16> {
    DEFAULT_PORTS.iter().find(|(s, _)| *s == scheme).map(|(_, port)| *port)
}

/// True for a textual port in 1..=65535.
fn is_valid_port(port: &str) -> bool {
    !port.is_empty()
        && port.bytes().all(|b| b.is_ascii_digit())
        && matches!(port.parse::<u32>(), Ok(1..=65535))
}

/// A mutable URL of the form
/// `scheme://[user[:pass]@]host[:port]/path?query#fragment`.
///
/// The port is stored only when explicit in the input or set by the caller;
/// [`Url::port`] falls back to the scheme's default, so inference never
/// fails. An unmutated URL stringifies back to a semantically equivalent
/// form (component re-encoding may differ from the input).
#[derive(Debug, Clone, Default)]
pub struct Url {
    scheme: String,
    username: Option<String>,
    password: Option<String>,
    host: String,
    port: Option<u16>,
    path: Path,
    query: Query,
    fragment: String,
}

impl Url {
    /// Parses a URL string.
    ///
    /// The scheme is lower-cased; path and query parsing are delegated to
    /// [`Path`] and [`Query`]. Fails only on an invalid explicit port.
    pub fn parse(url: &str) -> Result<Self, UrlError> {
        let parts = split_url(url);
        let (username, password, host, port) = parse_netloc(&parts.netloc)?;
        let mut path = Path::new();
        path.load(&parts.path);
        let mut query = Query::new();
        query.load(parts.query.as_str());
        Ok(Self {
            scheme: parts.scheme,
            username,
            password,
            host,
            port,
            path,
            query,
            fragment: parts.fragment,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Sets the scheme (stored lower-cased).
    pub fn set_scheme(&mut self, scheme: &str) {
        self.scheme = scheme.to_ascii_lowercase();
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_host(&mut self, host: &str) {
        self.host = host.to_string();
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// The explicit port if any, else the scheme default
    /// (ftp 21, ssh 22, http 80, https 443).
    pub fn port(&self) -> Option<u16> {
        self.port.or_else(|| default_port(&self.scheme))
    }

    /// True when the port was explicit in the input or set by the caller.
    pub fn has_explicit_port(&self) -> bool {
        self.port.is_some()
    }

    /// Sets an explicit port; zero is rejected.
    pub fn set_port(&mut self, port: u16) -> Result<(), UrlError> {
        if port == 0 {
            return Err(UrlError::InvalidPort("0".to_string()));
        }
        self.port = Some(port);
        Ok(())
    }

    /// The authority component as a string; the port appears only when
    /// explicit.
    pub fn netloc(&self) -> String {
        let mut out = String::new();
        if let Some(username) = &self.username {
            out.push_str(username);
            if let Some(password) = &self.password {
                out.push(':');
                out.push_str(password);
            }
            out.push('@');
        }
        out.push_str(&self.host);
        if let Some(port) = self.port {
            out.push(':');
            out.push_str(&port.to_string());
        }
        out
    }

    /// Replaces the whole authority component.
    pub fn set_netloc(&mut self, netloc: &str) -> Result<(), UrlError> {
        let (username, password, host, port) = parse_netloc(netloc)?;
        self.username = username;
        self.password = password;
        self.host = host;
        self.port = port;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_mut(&mut self) -> &mut Path {
        &mut self.path
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn set_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_string();
    }
}

/// Decomposes `[user[:pass]@]host[:port]`; bracketed IPv6 hosts keep their
/// brackets and only take a port after `]`.
fn parse_netloc(
    netloc: &str,
) -> Result<(Option<String>, Option<String>, String, Option<u16>), UrlError> {
    let (userinfo, hostport) = match netloc.rsplit_once('@') {
        Some((userinfo, hostport)) => (Some(userinfo), hostport),
        None => (None, netloc),
    };

    let (username, password) = match userinfo {
        Some(info) => match info.split_once(':') {
            Some((user, pass)) => (Some(user.to_string()), Some(pass.to_string())),
            None => (Some(info.to_string()), None),
        },
        None => (None, None),
    };

    let (host, port_text) = if hostport.starts_with('[') {
        match hostport.find(']') {
            Some(end) => {
                let tail = &hostport[end + 1..];
                match tail.strip_prefix(':') {
                    Some(port) => (&hostport[..end + 1], Some(port)),
                    None => (&hostport[..end + 1], None),
                }
            }
            None => (hostport, None),
        }
    } else {
        match hostport.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (hostport, None),
        }
    };

    let port = match port_text {
        Some(port) if !port.is_empty() => {
            if !is_valid_port(port) {
                return Err(UrlError::InvalidPort(port.to_string()));
            }
            port.parse::<u16>()
                .map(Some)
                .map_err(|_| UrlError::InvalidPort(port.to_string()))?
        }
        _ => None,
    };

    Ok((username, password, host.to_string(), port))
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&unsplit_url(
            &self.scheme,
            &self.netloc(),
            &self.path.to_string(),
            &self.query.encode(),
            &self.fragment,
        ))
    }
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        Self::parse(url)
    }
}
