//! Domain model for Clearday.
//!
//! - [`log`]: daily check-in logs and moods
//! - [`streak`] and [`engine`]: streak records and the rules that advance them
//! - [`settings`]: per-user costs and quit date
//! - [`insights`]: savings, health timeline and calendar views
//! - [`store`]: the [`store::TrackerStore`] trait backends implement
//!
//! No HTTP or database code lives here.

pub mod engine;
pub mod error;
pub mod insights;
pub mod log;
pub mod settings;
pub mod store;
pub mod streak;
pub mod user;

pub use error::{Error, Result};
