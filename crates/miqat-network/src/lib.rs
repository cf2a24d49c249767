//! Network module for remote prayer data.
//!
//! Fetches days from an Aladhan-compatible HTTP API into a [`Timetable`],
//! which implements [`miqat_core::PrayerSource`] and can stand in for the
//! local engine.

pub mod aladhan;
pub mod config;
pub mod timetable;

pub use aladhan::{AladhanClient, RemoteDay};
pub use config::NetworkConfig;
pub use timetable::Timetable;
