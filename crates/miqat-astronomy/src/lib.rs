//! Solar geometry, prayer times and next-prayer resolution for miqat.
//!
//! Everything here is pure: the same inputs always give the same outputs and
//! nothing reads the clock.

pub mod next;
pub mod prayer;
pub mod solar;

pub use next::{carried_over, format_countdown, next_prayer, resolve_next};
pub use prayer::{calculate_default, calculate_prayer_times};
