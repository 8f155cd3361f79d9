//! Error types for the multiplexer and the resolver.
//!
//! Every failure is returned to the immediate caller. Nothing in this crate
//! retries or swallows an error.

use crate::net::config::{AddressFamily, ProtocolType, SocketType};

use std::io;
use std::os::unix::io::RawFd;
use thiserror::Error;

/// Failure of a single [`wait`](crate::multiplexer::wait) call.
#[derive(Debug, Error)]
pub enum MultiplexError {
    /// The wait primitive reported an error.
    ///
    /// The three descriptor lists the caller passed in are handed back so the
    /// caller can decide whether (and with what) to retry.
    #[error(
        "wait failed on {} read, {} write and {} error descriptors: {source}",
        .reads.len(),
        .writes.len(),
        .errors.len()
    )]
    WaitFailed {
        reads: Vec<RawFd>,
        writes: Vec<RawFd>,
        errors: Vec<RawFd>,
        #[source]
        source: io::Error,
    },

    /// The descriptor cannot be stored in a descriptor set.
    #[error("descriptor {0} is outside the descriptor set capacity")]
    DescriptorOutOfRange(RawFd),
}

/// An invalid combination of resolution hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("protocol {protocol:?} cannot be used with socket type {socket_type:?}")]
    IncompatibleProtocol {
        socket_type: SocketType,
        protocol: ProtocolType,
    },

    #[error("resolved family {resolved:?} does not match requested family {requested:?}")]
    FamilyMismatch {
        requested: AddressFamily,
        resolved: AddressFamily,
    },
}

/// Failure of a single [`resolve`](crate::net::resolver::resolve) call.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The platform rejected the host, service or hint combination.
    #[error("address validation failed: {0}")]
    ValidationFailed(String),

    /// The platform reported success but the candidate list was empty or malformed.
    #[error("address resolution returned no usable candidates")]
    ResolutionFailed,

    /// A candidate carried an address family other than IPv4 or IPv6.
    #[error("unsupported address family {0}")]
    UnsupportedFamily(i32),

    /// A candidate's hints could not be narrowed to its resolved family.
    #[error("invalid candidate configuration: {0}")]
    InvalidCandidate(#[from] ConfigError),
}

/// Failure to parse an [`InternetAddress`](crate::net::address::InternetAddress).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    #[error("missing ':' separator between host and service in '{0}'")]
    MissingSeparator(String),

    #[error("unterminated '[' in '{0}'")]
    UnterminatedBracket(String),

    #[error("empty service in '{0}'")]
    EmptyService(String),
}
