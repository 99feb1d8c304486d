//! City clock and weather widget.
//!
//! Shows the local time, current conditions, and a map viewport for one
//! city out of a small built-in catalog. The clock advances every second,
//! the weather refreshes every ten minutes, and the chosen city and
//! temperature unit persist across runs.

pub mod app;
pub mod catalog;
pub mod clock;
pub mod map;
pub mod settings;
pub mod surface;
pub mod weather;
