//! The blocking wait primitive behind the multiplexer.
//!
//! [`WaitPrimitive`] is the seam between the portable multiplexer and the OS.
//! [`Select`] is the implementation used on Unix; tests plug in their own.

use crate::multiplexer::set::DescriptorSet;
use crate::multiplexer::timeout::Timeout;

use libc::{c_int, select, timeval};
use std::io;
use std::ptr;

/// A single-shot, blocking readiness wait over three descriptor sets.
pub trait WaitPrimitive {
    /// Blocks until a descriptor in one of the sets is ready or `timeout` elapses.
    ///
    /// On return each set holds only the descriptors found ready.
    ///
    /// # Arguments
    /// * `upper_bound` - One past the highest descriptor present in any set
    /// * `reads` - Descriptors to check for read readiness
    /// * `writes` - Descriptors to check for write readiness
    /// * `errors` - Descriptors to check for exceptional conditions
    /// * `timeout` - How long to block
    ///
    /// # Returns
    /// The number of ready descriptors, `0` when the timeout elapsed first.
    fn wait(
        &self,
        upper_bound: c_int,
        reads: &mut DescriptorSet,
        writes: &mut DescriptorSet,
        errors: &mut DescriptorSet,
        timeout: Timeout,
    ) -> io::Result<usize>;
}

/// `select(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Select;

impl WaitPrimitive for Select {
    fn wait(
        &self,
        upper_bound: c_int,
        reads: &mut DescriptorSet,
        writes: &mut DescriptorSet,
        errors: &mut DescriptorSet,
        timeout: Timeout,
    ) -> io::Result<usize> {
        let mut tv = timeout.to_timeval();
        let tv_ptr = tv
            .as_mut()
            .map_or(ptr::null_mut(), |tv| tv as *mut timeval);

        let ready = unsafe {
            select(
                upper_bound,
                reads.as_mut_ptr(),
                writes.as_mut_ptr(),
                errors.as_mut_ptr(),
                tv_ptr,
            )
        };

        if ready < 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(ready as usize)
    }
}
