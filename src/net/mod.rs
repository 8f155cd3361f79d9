//! Address types and name resolution.
//!
//! This module turns symbolic addresses into concrete socket addresses:
//! - [`address`]: [`InternetAddress`], a hostname plus a port or service
//! - [`config`]: resolution hints ([`Config`], [`AddressFamily`], [`SocketType`], [`ProtocolType`])
//! - [`resolved`]: [`ResolvedInternetAddress`], an owned IPv4 or IPv6 `sockaddr`
//! - [`resolver`]: [`Resolver`] and the [`resolve`] shorthand
//!
//! # Example
//!
//! ```ignore
//! use sockmux::net::{Config, InternetAddress, resolve};
//!
//! let candidates = resolve(&"localhost:8080".parse()?, &Config::tcp())?;
//! let (address, config) = &candidates[0];
//! println!("{} via {:?}", address, config.address_family());
//! ```
//!
//! [`InternetAddress`]: address::InternetAddress
//! [`Config`]: config::Config
//! [`AddressFamily`]: config::AddressFamily
//! [`SocketType`]: config::SocketType
//! [`ProtocolType`]: config::ProtocolType
//! [`ResolvedInternetAddress`]: resolved::ResolvedInternetAddress
//! [`Resolver`]: resolver::Resolver
//! [`resolve`]: resolver::resolve

pub mod address;
pub mod config;
pub mod resolved;
pub mod resolver;

pub use address::InternetAddress;
pub use config::{AddressFamily, Config, ProtocolType, SocketType};
pub use resolved::ResolvedInternetAddress;
pub use resolver::{Candidate, Resolver, resolve};
