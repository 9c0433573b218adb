//! Shared building blocks for the counter simulation model.
//!
//! This crate provides the fixed-width signal helpers, trigger vectors used by
//! the evaluation regions, interned scope/signal names, and clock frequencies.

#![warn(missing_docs)]

pub mod frequency;
pub mod ident;
pub mod trigger;
pub mod width;

pub use frequency::{Frequency, ParseFrequencyError, FS_PER_SECOND};
pub use ident::{Ident, Interner};
pub use trigger::TriggerVec;
pub use width::{fit, mask};
