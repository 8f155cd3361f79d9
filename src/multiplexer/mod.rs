//! Readiness multiplexing over descriptor sets.
//!
//! This module wraps the platform's `select(2)`:
//! - [`core`](self::core): [`Multiplexer`], [`ReadinessResult`] and the [`wait`] shorthand
//! - [`primitive`]: the [`WaitPrimitive`] seam and its [`Select`] implementation
//! - [`set`]: [`DescriptorSet`], the per-call `fd_set` encoding
//! - [`timeout`]: [`Timeout`], block forever or for a bounded duration
//!
//! The multiplexer never opens or closes a descriptor.
//!
//! # Example
//!
//! ```ignore
//! use sockmux::multiplexer::{Timeout, wait};
//!
//! let ready = wait(&[socket_fd], &[socket_fd], &[], Timeout::immediate())?;
//! println!("readable: {:?}, writable: {:?}", ready.reads, ready.writes);
//! ```

pub mod core;
pub mod primitive;
pub mod set;
pub mod timeout;

pub use self::core::{Multiplexer, ReadinessResult, wait};
pub use primitive::{Select, WaitPrimitive};
pub use set::DescriptorSet;
pub use timeout::Timeout;
