//! Resolution hints: address family, socket type and protocol.
//!
//! A [`Config`] is an immutable triple validated on construction. The resolver
//! narrows it per candidate so the family always matches the resolved address.
//!
//! # Example
//!
//! ```ignore
//! use sockmux::net::config::{AddressFamily, Config, ProtocolType, SocketType};
//!
//! let config = Config::new(AddressFamily::Inet, SocketType::Stream, ProtocolType::Tcp)?;
//! assert_eq!(config.address_family(), AddressFamily::Inet);
//! ```

use crate::error::ConfigError;

use libc::{
    AF_INET, AF_INET6, AF_UNSPEC, IPPROTO_TCP, IPPROTO_UDP, SOCK_DGRAM, SOCK_STREAM, c_int,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressFamily {
    /// Let the resolver return any family.
    #[default]
    Unspecified,
    /// IPv4.
    Inet,
    /// IPv6.
    Inet6,
}

impl AddressFamily {
    pub fn as_raw(self) -> c_int {
        match self {
            AddressFamily::Unspecified => AF_UNSPEC,
            AddressFamily::Inet => AF_INET,
            AddressFamily::Inet6 => AF_INET6,
        }
    }

    /// Maps a raw `AF_*` value onto a concrete family.
    ///
    /// Returns `None` for anything other than `AF_INET` and `AF_INET6`;
    /// `AF_UNSPEC` is never the family of a resolved address.
    pub fn from_raw(raw: c_int) -> Option<Self> {
        match raw {
            AF_INET => Some(AddressFamily::Inet),
            AF_INET6 => Some(AddressFamily::Inet6),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SocketType {
    #[default]
    Stream,
    Datagram,
}

impl SocketType {
    pub fn as_raw(self) -> c_int {
        match self {
            SocketType::Stream => SOCK_STREAM,
            SocketType::Datagram => SOCK_DGRAM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolType {
    #[default]
    Unspecified,
    Tcp,
    Udp,
}

impl ProtocolType {
    pub fn as_raw(self) -> c_int {
        match self {
            ProtocolType::Unspecified => 0,
            ProtocolType::Tcp => IPPROTO_TCP,
            ProtocolType::Udp => IPPROTO_UDP,
        }
    }
}

/// Validated resolution hints.
///
/// Constructed through [`Config::new`], the shorthands [`Config::tcp`] and
/// [`Config::udp`], or [`ConfigBuilder`](crate::builder::ConfigBuilder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    family: AddressFamily,
    socket_type: SocketType,
    protocol: ProtocolType,
}

impl Config {
    /// Creates a configuration, rejecting protocols that cannot run over the
    /// requested socket type.
    ///
    /// # Errors
    /// [`ConfigError::IncompatibleProtocol`] for stream + UDP and datagram + TCP.
    pub fn new(
        family: AddressFamily,
        socket_type: SocketType,
        protocol: ProtocolType,
    ) -> Result<Self, ConfigError> {
        match (socket_type, protocol) {
            (SocketType::Stream, ProtocolType::Udp) | (SocketType::Datagram, ProtocolType::Tcp) => {
                Err(ConfigError::IncompatibleProtocol {
                    socket_type,
                    protocol,
                })
            }
            _ => Ok(Self {
                family,
                socket_type,
                protocol,
            }),
        }
    }

    /// TCP over a stream socket, any family.
    pub fn tcp() -> Self {
        Self {
            family: AddressFamily::Unspecified,
            socket_type: SocketType::Stream,
            protocol: ProtocolType::Tcp,
        }
    }

    /// UDP over a datagram socket, any family.
    pub fn udp() -> Self {
        Self {
            family: AddressFamily::Unspecified,
            socket_type: SocketType::Datagram,
            protocol: ProtocolType::Udp,
        }
    }

    pub fn address_family(&self) -> AddressFamily {
        self.family
    }

    pub fn socket_type(&self) -> SocketType {
        self.socket_type
    }

    pub fn protocol(&self) -> ProtocolType {
        self.protocol
    }

    /// Returns a copy of this configuration pinned to `resolved`.
    ///
    /// Socket type and protocol carry over unchanged.
    ///
    /// # Errors
    /// [`ConfigError::FamilyMismatch`] if this configuration already asked for a
    /// concrete family and `resolved` is a different one.
    pub fn narrowed(&self, resolved: AddressFamily) -> Result<Self, ConfigError> {
        if self.family != AddressFamily::Unspecified && self.family != resolved {
            return Err(ConfigError::FamilyMismatch {
                requested: self.family,
                resolved,
            });
        }

        Self::new(resolved, self.socket_type, self.protocol)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::tcp()
    }
}
