use crate::error::MultiplexError;
use crate::multiplexer::primitive::{Select, WaitPrimitive};
use crate::multiplexer::set::DescriptorSet;
use crate::multiplexer::timeout::Timeout;

use libc::c_int;
use std::os::unix::io::RawFd;
use tracing::trace;

/// Descriptors found ready by one wait call.
///
/// Each list is the subset of the matching input list whose descriptors were
/// ready, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadinessResult {
    pub reads: Vec<RawFd>,
    pub writes: Vec<RawFd>,
    pub errors: Vec<RawFd>,
}

impl ReadinessResult {
    pub fn is_empty(&self) -> bool {
        self.reads.is_empty() && self.writes.is_empty() && self.errors.is_empty()
    }
}

/// Stateless readiness multiplexer.
///
/// Nothing is registered between calls: every [`Self::wait`] encodes its
/// descriptor sets from scratch and discards them afterwards. Suited to a
/// handful of descriptors, not to large fan-out.
///
/// # Example
/// ```ignore
/// use sockmux::multiplexer::{Multiplexer, Timeout};
/// use std::time::Duration;
///
/// let multiplexer = Multiplexer::new();
/// let ready = multiplexer.wait(&[listener_fd], &[], &[], Timeout::from(Duration::from_secs(1)))?;
/// if ready.reads.contains(&listener_fd) {
///     // accept(2) will not block
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Multiplexer<P = Select> {
    primitive: P,
}

impl Multiplexer<Select> {
    pub fn new() -> Self {
        Self { primitive: Select }
    }
}

impl<P: WaitPrimitive> Multiplexer<P> {
    /// Creates a multiplexer on top of a custom wait primitive.
    pub fn with_primitive(primitive: P) -> Self {
        Self { primitive }
    }

    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    /// Waits until any listed descriptor is ready or `timeout` elapses.
    ///
    /// The three lists may overlap and may be empty.
    ///
    /// # Returns
    /// The ready subset of each list. All three are empty if the timeout elapsed.
    ///
    /// # Errors
    /// - [`MultiplexError::DescriptorOutOfRange`] if a descriptor cannot be placed in a set
    /// - [`MultiplexError::WaitFailed`] if the primitive fails, carrying the three input lists
    pub fn wait(
        &self,
        reads: &[RawFd],
        writes: &[RawFd],
        errors: &[RawFd],
        timeout: Timeout,
    ) -> Result<ReadinessResult, MultiplexError> {
        let mut read_set = encode(reads)?;
        let mut write_set = encode(writes)?;
        let mut error_set = encode(errors)?;

        let upper_bound = reads
            .iter()
            .chain(writes)
            .chain(errors)
            .copied()
            .max()
            .map_or(0, |highest: c_int| highest + 1);

        trace!(
            reads = reads.len(),
            writes = writes.len(),
            errors = errors.len(),
            upper_bound,
            ?timeout,
            "waiting for readiness"
        );

        let ready = self
            .primitive
            .wait(
                upper_bound,
                &mut read_set,
                &mut write_set,
                &mut error_set,
                timeout,
            )
            .map_err(|source| MultiplexError::WaitFailed {
                reads: reads.to_vec(),
                writes: writes.to_vec(),
                errors: errors.to_vec(),
                source,
            })?;

        trace!(ready, "wait returned");

        if ready == 0 {
            return Ok(ReadinessResult::default());
        }

        Ok(ReadinessResult {
            reads: retain_ready(reads, &read_set),
            writes: retain_ready(writes, &write_set),
            errors: retain_ready(errors, &error_set),
        })
    }
}

/// Waits on `reads`, `writes` and `errors` with the platform's `select(2)`.
///
/// See [`Multiplexer::wait`].
pub fn wait(
    reads: &[RawFd],
    writes: &[RawFd],
    errors: &[RawFd],
    timeout: Timeout,
) -> Result<ReadinessResult, MultiplexError> {
    Multiplexer::new().wait(reads, writes, errors, timeout)
}

fn encode(descriptors: &[RawFd]) -> Result<DescriptorSet, MultiplexError> {
    let mut set = DescriptorSet::new();
    for &descriptor in descriptors {
        set.insert(descriptor)?;
    }

    Ok(set)
}

fn retain_ready(descriptors: &[RawFd], set: &DescriptorSet) -> Vec<RawFd> {
    descriptors
        .iter()
        .copied()
        .filter(|&descriptor| set.contains(descriptor))
        .collect()
}
