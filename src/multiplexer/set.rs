use crate::error::MultiplexError;

use libc::{FD_CLR, FD_ISSET, FD_SET, FD_SETSIZE, FD_ZERO, fd_set};
use std::fmt;
use std::mem::MaybeUninit;
use std::os::unix::io::RawFd;

/// Bitset of descriptors for a single wait call.
///
/// Wraps the platform `fd_set`. Capacity is fixed at `FD_SETSIZE`; descriptors
/// outside `0..FD_SETSIZE` are rejected on insert rather than written past the
/// end of the set.
pub struct DescriptorSet(fd_set);

impl DescriptorSet {
    pub fn new() -> Self {
        let mut set = MaybeUninit::<fd_set>::uninit();

        unsafe {
            FD_ZERO(set.as_mut_ptr());
            Self(set.assume_init())
        }
    }

    /// Number of distinct descriptor values the set can hold.
    pub const fn capacity() -> usize {
        FD_SETSIZE as usize
    }

    pub fn insert(&mut self, descriptor: RawFd) -> Result<(), MultiplexError> {
        if !Self::in_range(descriptor) {
            return Err(MultiplexError::DescriptorOutOfRange(descriptor));
        }

        unsafe { FD_SET(descriptor, &mut self.0) };

        Ok(())
    }

    pub fn remove(&mut self, descriptor: RawFd) {
        if Self::in_range(descriptor) {
            unsafe { FD_CLR(descriptor, &mut self.0) };
        }
    }

    pub fn contains(&self, descriptor: RawFd) -> bool {
        Self::in_range(descriptor) && unsafe { FD_ISSET(descriptor, &self.0) }
    }

    pub fn clear(&mut self) {
        unsafe { FD_ZERO(&mut self.0) };
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut fd_set {
        &mut self.0
    }

    fn in_range(descriptor: RawFd) -> bool {
        descriptor >= 0 && (descriptor as usize) < Self::capacity()
    }
}

impl Default for DescriptorSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DescriptorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members =
            (0..Self::capacity() as RawFd).filter(|&descriptor| self.contains(descriptor));

        f.debug_set().entries(members).finish()
    }
}
