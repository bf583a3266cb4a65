//! # helios-calendar
//!
//! Day-of-year arithmetic for the 365-day no-leap calendar used by the
//! Helios analysis pipeline.
//!
//! Gridded climate products carry real Gregorian time axes, but the
//! threshold climatology is keyed by a 365-entry day-of-year index.
//! [`Doy`] is that key: Feb 29 observations are folded into the Feb 28
//! bucket so that every Gregorian date maps to exactly one of 365 keys.

mod doy;
mod error;

pub use doy::Doy;
pub use error::CalendarError;
