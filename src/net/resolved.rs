//! Owned, family-tagged socket addresses produced by the resolver.

use crate::error::ResolutionError;
use crate::net::config::AddressFamily;

use libc::{AF_INET, AF_INET6, c_int, sockaddr, sockaddr_in, sockaddr_in6, socklen_t};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::ptr;

#[derive(Clone, Copy)]
enum Payload {
    V4(sockaddr_in),
    V6(sockaddr_in6),
}

/// A concrete socket address copied out of the platform's resolution result.
///
/// The payload is held by value, so the address stays valid after the OS list
/// it came from has been freed. It can be handed straight to `bind(2)` or
/// `connect(2)` through [`Self::as_sockaddr_ptr`] and [`Self::socklen`].
#[derive(Clone, Copy)]
pub struct ResolvedInternetAddress {
    payload: Payload,
}

impl ResolvedInternetAddress {
    /// Copies the `sockaddr` at `address` into an owned value.
    ///
    /// The family header is read once and checked before any variant-specific
    /// read happens.
    ///
    /// # Safety
    /// `address` must be non-null and point to at least `length` readable bytes.
    pub(crate) unsafe fn copy_from_raw(
        address: *const sockaddr,
        length: socklen_t,
    ) -> Result<Self, ResolutionError> {
        let raw_family = unsafe { (*address).sa_family } as c_int;
        let length = length as usize;

        let payload = match raw_family {
            AF_INET if length >= mem::size_of::<sockaddr_in>() => {
                Payload::V4(unsafe { ptr::read_unaligned(address.cast::<sockaddr_in>()) })
            }
            AF_INET6 if length >= mem::size_of::<sockaddr_in6>() => {
                Payload::V6(unsafe { ptr::read_unaligned(address.cast::<sockaddr_in6>()) })
            }
            AF_INET | AF_INET6 => return Err(ResolutionError::ResolutionFailed),
            other => return Err(ResolutionError::UnsupportedFamily(other)),
        };

        Ok(Self { payload })
    }

    pub fn address_family(&self) -> AddressFamily {
        match self.payload {
            Payload::V4(_) => AddressFamily::Inet,
            Payload::V6(_) => AddressFamily::Inet6,
        }
    }

    pub fn port(&self) -> u16 {
        match &self.payload {
            Payload::V4(address) => u16::from_be(address.sin_port),
            Payload::V6(address) => u16::from_be(address.sin6_port),
        }
    }

    /// Converts the raw payload into a standard library address.
    pub fn to_socket_addr(&self) -> SocketAddr {
        match &self.payload {
            Payload::V4(address) => {
                let ip = Ipv4Addr::from(u32::from_be(address.sin_addr.s_addr));

                SocketAddr::V4(SocketAddrV4::new(ip, u16::from_be(address.sin_port)))
            }
            Payload::V6(address) => {
                let ip = Ipv6Addr::from(address.sin6_addr.s6_addr);

                SocketAddr::V6(SocketAddrV6::new(
                    ip,
                    u16::from_be(address.sin6_port),
                    address.sin6_flowinfo,
                    address.sin6_scope_id,
                ))
            }
        }
    }

    /// Pointer to the payload, valid for [`Self::socklen`] bytes while `self` lives.
    pub fn as_sockaddr_ptr(&self) -> *const sockaddr {
        match &self.payload {
            Payload::V4(address) => (address as *const sockaddr_in).cast(),
            Payload::V6(address) => (address as *const sockaddr_in6).cast(),
        }
    }

    pub fn socklen(&self) -> socklen_t {
        let size = match self.payload {
            Payload::V4(_) => mem::size_of::<sockaddr_in>(),
            Payload::V6(_) => mem::size_of::<sockaddr_in6>(),
        };

        size as socklen_t
    }
}

impl fmt::Debug for ResolvedInternetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedInternetAddress")
            .field("family", &self.address_family())
            .field("address", &self.to_socket_addr())
            .finish()
    }
}

impl fmt::Display for ResolvedInternetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_socket_addr().fmt(f)
    }
}

impl PartialEq for ResolvedInternetAddress {
    fn eq(&self, other: &Self) -> bool {
        self.to_socket_addr() == other.to_socket_addr()
    }
}

impl Eq for ResolvedInternetAddress {}

impl Hash for ResolvedInternetAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_socket_addr().hash(state);
    }
}

impl From<ResolvedInternetAddress> for SocketAddr {
    fn from(address: ResolvedInternetAddress) -> Self {
        address.to_socket_addr()
    }
}
