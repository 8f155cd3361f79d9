//! Socket readiness multiplexing and address resolution.
//!
//! This crate provides the two OS-facing primitives that socket setup code is
//! built on: waiting for descriptors to become ready, and turning a hostname
//! plus service into concrete socket addresses.
//!
//! # Architecture
//!
//! - **Multiplexer**: single-shot `select(2)` wait over read/write/error descriptor lists
//! - **WaitPrimitive**: trait seam for the blocking wait; [`Select`] on Unix, fakes in tests
//! - **Timeout**: explicit `Never` / `After(duration)` wait bound
//! - **Resolver**: `getaddrinfo(3)` lookup returning owned, family-tagged addresses
//! - **Config**: validated resolution hints, narrowed per resolved candidate
//! - **Builders**: fluent construction of [`Config`] and [`Resolver`]
//!
//! Neither component keeps state between calls, and neither closes a
//! descriptor it was given.

pub mod builder;
pub mod error;
pub mod multiplexer;
pub mod net;

pub use builder::{ConfigBuilder, ResolverBuilder};
pub use error::{AddressParseError, ConfigError, MultiplexError, ResolutionError};
pub use multiplexer::{Multiplexer, ReadinessResult, Select, Timeout, WaitPrimitive, wait};
pub use net::{
    AddressFamily, Candidate, Config, InternetAddress, ProtocolType, ResolvedInternetAddress,
    Resolver, SocketType, resolve,
};
