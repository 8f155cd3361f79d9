//! Fluent builders for resolution hints and resolvers.
//!
//! Provides builder pattern interfaces for [`Config`] and [`Resolver`].

use crate::error::ConfigError;
use crate::net::config::{AddressFamily, Config, ProtocolType, SocketType};
use crate::net::resolver::Resolver;

use libc::{AI_NUMERICHOST, AI_NUMERICSERV, AI_PASSIVE};

/// Builder for [`Config`] values.
///
/// Starts from an unspecified family, a stream socket and an unspecified
/// protocol. The combination is validated when [`Self::build`] is called.
///
/// # Example
/// ```ignore
/// let config = ConfigBuilder::new()
///     .family(AddressFamily::Inet6)
///     .socket_type(SocketType::Datagram)
///     .protocol(ProtocolType::Udp)
///     .build()?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigBuilder {
    family: AddressFamily,
    socket_type: SocketType,
    protocol: ProtocolType,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family(mut self, family: AddressFamily) -> Self {
        self.family = family;
        self
    }

    pub fn socket_type(mut self, socket_type: SocketType) -> Self {
        self.socket_type = socket_type;
        self
    }

    pub fn protocol(mut self, protocol: ProtocolType) -> Self {
        self.protocol = protocol;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    /// [`ConfigError::IncompatibleProtocol`] if the protocol cannot run over the socket type.
    pub fn build(self) -> Result<Config, ConfigError> {
        Config::new(self.family, self.socket_type, self.protocol)
    }
}

/// Builder for [`Resolver`] instances.
///
/// Resolvers are passive by default, so an empty host resolves to the
/// wildcard address.
///
/// # Example
/// ```ignore
/// let resolver = ResolverBuilder::new().numeric_host().build();
/// let candidates = resolver.resolve(&"127.0.0.1:80".parse()?, &Config::tcp())?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResolverBuilder {
    passive: bool,
    numeric_host: bool,
    numeric_service: bool,
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self {
            passive: true,
            numeric_host: false,
            numeric_service: false,
        }
    }

    /// Sets whether resolved addresses are meant for binding (`true`) or connecting.
    pub fn passive(mut self, passive: bool) -> Self {
        self.passive = passive;
        self
    }

    /// Only accept numeric host literals; never query DNS.
    pub fn numeric_host(mut self) -> Self {
        self.numeric_host = true;
        self
    }

    /// Only accept numeric ports; never look up service names.
    pub fn numeric_service(mut self) -> Self {
        self.numeric_service = true;
        self
    }

    pub fn build(self) -> Resolver {
        let mut flags = 0;

        if self.passive {
            flags |= AI_PASSIVE;
        }
        if self.numeric_host {
            flags |= AI_NUMERICHOST;
        }
        if self.numeric_service {
            flags |= AI_NUMERICSERV;
        }

        Resolver::with_flags(flags)
    }
}
