//! Hostname and service resolution over `getaddrinfo(3)`.
//!
//! The OS hands back a linked list it owns. [`AddrInfoList`] wraps that list so
//! it is freed exactly once when the guard drops, whichever way [`Resolver::resolve`]
//! returns. Every node's payload is copied into a [`ResolvedInternetAddress`]
//! while the list is still alive.
//!
//! # Example
//!
//! ```ignore
//! use sockmux::net::address::InternetAddress;
//! use sockmux::net::config::Config;
//! use sockmux::net::resolver::resolve;
//!
//! let candidates = resolve(&InternetAddress::from_port("127.0.0.1", 1080), &Config::tcp())?;
//! for (address, config) in &candidates {
//!     assert_eq!(address.address_family(), config.address_family());
//! }
//! ```

use crate::builder::ResolverBuilder;
use crate::error::ResolutionError;
use crate::net::address::InternetAddress;
use crate::net::config::Config;
use crate::net::resolved::ResolvedInternetAddress;

use libc::{AI_PASSIVE, EAI_SYSTEM, addrinfo, c_int, freeaddrinfo, gai_strerror, getaddrinfo};
use std::ffi::{CStr, CString};
use std::io;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use tracing::debug;

/// One resolved candidate: the address and the hints narrowed to its family.
pub type Candidate = (ResolvedInternetAddress, Config);

const UNKNOWN_ERROR: &str = "unknown resolution error";

/// Resolves [`InternetAddress`]es into concrete socket addresses.
///
/// The default resolver runs in passive mode (`AI_PASSIVE`), so an empty host
/// yields the wildcard address suitable for binding. Use [`ResolverBuilder`]
/// to change the lookup flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    flags: c_int,
}

impl Resolver {
    pub fn new() -> Self {
        Self { flags: AI_PASSIVE }
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    pub(crate) fn with_flags(flags: c_int) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> c_int {
        self.flags
    }

    /// Resolves `address` using `config` as hints.
    ///
    /// Candidates are returned in the order the platform produced them. Each
    /// paired [`Config`] carries the candidate's family along with the socket
    /// type and protocol of `config`.
    ///
    /// # Errors
    /// - [`ResolutionError::ValidationFailed`] if the platform rejects the lookup
    /// - [`ResolutionError::ResolutionFailed`] if the list is empty or a node has no address
    /// - [`ResolutionError::UnsupportedFamily`] if a node is neither IPv4 nor IPv6
    /// - [`ResolutionError::InvalidCandidate`] if a node's family contradicts `config`
    pub fn resolve(
        &self,
        address: &InternetAddress,
        config: &Config,
    ) -> Result<Vec<Candidate>, ResolutionError> {
        let host = optional_c_string("hostname", address.host())?;
        let service = optional_c_string("service", address.service())?;

        let mut hints: addrinfo = unsafe { mem::zeroed() };
        hints.ai_family = config.address_family().as_raw();
        hints.ai_socktype = config.socket_type().as_raw();
        hints.ai_protocol = config.protocol().as_raw();
        hints.ai_flags = self.flags;

        let list = AddrInfoList::lookup(host.as_deref(), service.as_deref(), &hints)?;

        let candidates = unsafe { collect_candidates(list.nodes(), config) }?;

        debug!(
            address = %address,
            candidates = candidates.len(),
            "resolved address"
        );

        Ok(candidates)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves `address` with a default passive [`Resolver`].
pub fn resolve(
    address: &InternetAddress,
    config: &Config,
) -> Result<Vec<Candidate>, ResolutionError> {
    Resolver::new().resolve(address, config)
}

fn optional_c_string(what: &str, value: &str) -> Result<Option<CString>, ResolutionError> {
    if value.is_empty() {
        return Ok(None);
    }

    CString::new(value)
        .map(Some)
        .map_err(|_| ResolutionError::ValidationFailed(format!("{what} contains NUL byte")))
}

/// Copies every node into an owned candidate, stopping at the first bad node.
///
/// # Safety
/// Each non-null `ai_addr` must point to at least `ai_addrlen` readable bytes.
unsafe fn collect_candidates<'a>(
    nodes: impl IntoIterator<Item = &'a addrinfo>,
    config: &Config,
) -> Result<Vec<Candidate>, ResolutionError> {
    let mut candidates = Vec::new();

    for node in nodes {
        if node.ai_addr.is_null() {
            return Err(ResolutionError::ResolutionFailed);
        }

        let resolved =
            unsafe { ResolvedInternetAddress::copy_from_raw(node.ai_addr, node.ai_addrlen) }?;
        let narrowed = config.narrowed(resolved.address_family())?;

        candidates.push((resolved, narrowed));
    }

    Ok(candidates)
}

/// Owner of a list returned by `getaddrinfo`.
struct AddrInfoList {
    head: NonNull<addrinfo>,
}

impl AddrInfoList {
    fn lookup(
        host: Option<&CStr>,
        service: Option<&CStr>,
        hints: &addrinfo,
    ) -> Result<Self, ResolutionError> {
        let mut head: *mut addrinfo = ptr::null_mut();

        let code = unsafe {
            getaddrinfo(
                host.map_or(ptr::null(), CStr::as_ptr),
                service.map_or(ptr::null(), CStr::as_ptr),
                hints,
                &mut head,
            )
        };

        if code != 0 {
            let os_error = (code == EAI_SYSTEM).then(io::Error::last_os_error);
            let reason = describe(code, os_error);
            debug!(code, reason = %reason, "getaddrinfo rejected lookup");

            return Err(ResolutionError::ValidationFailed(reason));
        }

        NonNull::new(head)
            .map(|head| Self { head })
            .ok_or(ResolutionError::ResolutionFailed)
    }

    fn nodes(&self) -> Nodes<'_> {
        Nodes {
            next: self.head.as_ptr(),
            _list: PhantomData,
        }
    }
}

impl Drop for AddrInfoList {
    fn drop(&mut self) {
        unsafe { freeaddrinfo(self.head.as_ptr()) };
    }
}

struct Nodes<'a> {
    next: *const addrinfo,
    _list: PhantomData<&'a AddrInfoList>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a addrinfo;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_null() {
            return None;
        }

        // Nodes live as long as the list that `_list` borrows.
        let node = unsafe { &*self.next };
        self.next = node.ai_next;

        Some(node)
    }
}

fn describe(code: c_int, os_error: Option<io::Error>) -> String {
    let message = unsafe { gai_strerror(code) };

    let reason = if message.is_null() {
        UNKNOWN_ERROR.to_string()
    } else {
        unsafe { CStr::from_ptr(message) }
            .to_string_lossy()
            .into_owned()
    };

    match os_error {
        Some(error) => format!("{reason}: {error}"),
        None => reason,
    }
}
