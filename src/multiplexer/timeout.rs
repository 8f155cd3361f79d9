//! How long a wait may block.

use libc::{suseconds_t, time_t, timeval};
use std::time::Duration;

/// Upper bound on how long [`wait`](crate::multiplexer::wait) blocks.
///
/// `Never` blocks until a descriptor is ready. `After` gives up once the
/// duration has elapsed; the OS only sees microsecond granularity, so anything
/// finer is truncated.
///
/// # Example
/// ```ignore
/// use sockmux::multiplexer::Timeout;
/// use std::time::Duration;
///
/// let poll = Timeout::immediate();
/// let bounded = Timeout::from(Duration::from_millis(250));
/// let forever = Timeout::from(None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timeout {
    #[default]
    Never,
    After(Duration),
}

impl Timeout {
    /// A zero timeout: report current readiness without blocking.
    pub const fn immediate() -> Self {
        Timeout::After(Duration::ZERO)
    }

    /// Builds a timeout from whole seconds plus microseconds.
    ///
    /// Saturates at `Duration::MAX`.
    pub fn from_parts(seconds: u64, microseconds: u32) -> Self {
        let duration = Duration::from_secs(seconds)
            .checked_add(Duration::from_micros(microseconds as u64))
            .unwrap_or(Duration::MAX);

        Timeout::After(duration)
    }

    pub(crate) fn to_timeval(self) -> Option<timeval> {
        match self {
            Timeout::Never => None,
            Timeout::After(duration) => {
                let seconds = duration.as_secs().min(time_t::MAX as u64);

                Some(timeval {
                    tv_sec: seconds as time_t,
                    tv_usec: duration.subsec_micros() as suseconds_t,
                })
            }
        }
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        Timeout::After(duration)
    }
}

impl From<Option<Duration>> for Timeout {
    fn from(duration: Option<Duration>) -> Self {
        duration.map_or(Timeout::Never, Timeout::After)
    }
}
