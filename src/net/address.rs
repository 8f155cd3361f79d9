//! Symbolic internet addresses: a hostname and a service.

use crate::error::AddressParseError;

use std::fmt;
use std::str::FromStr;

/// A hostname paired with a port or service name, not yet resolved.
///
/// The host may be a DNS name, a numeric IPv4/IPv6 literal, or empty. An empty
/// host asks a passive resolver for the wildcard address.
///
/// # Example
/// ```ignore
/// let address: InternetAddress = "[::1]:1080".parse()?;
/// assert_eq!(address.host(), "::1");
/// assert_eq!(address.service(), "1080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InternetAddress {
    host: String,
    service: String,
}

impl InternetAddress {
    pub fn new(host: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            service: service.into(),
        }
    }

    pub fn from_port(host: impl Into<String>, port: u16) -> Self {
        Self::new(host, port.to_string())
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn service(&self) -> &str {
        &self.service
    }
}

impl FromStr for InternetAddress {
    type Err = AddressParseError;

    /// Parses `host:service`, `[ipv6]:service` or `:service`.
    fn from_str(address: &str) -> Result<Self, Self::Err> {
        let (host, service) = if let Some(rest) = address.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| AddressParseError::UnterminatedBracket(address.to_string()))?;
            let service = tail
                .strip_prefix(':')
                .ok_or_else(|| AddressParseError::MissingSeparator(address.to_string()))?;

            (host, service)
        } else {
            address
                .rsplit_once(':')
                .ok_or_else(|| AddressParseError::MissingSeparator(address.to_string()))?
        };

        if service.is_empty() {
            return Err(AddressParseError::EmptyService(address.to_string()));
        }

        Ok(Self::new(host, service))
    }
}

impl fmt::Display for InternetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.service)
        } else {
            write!(f, "{}:{}", self.host, self.service)
        }
    }
}
