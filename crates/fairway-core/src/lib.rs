//! Core abstractions for Fairway, a golf round tracker.
//!
//! This crate defines the domain types ([`Round`], [`NewRound`]), the
//! [`RoundStore`] storage trait with in-memory and JSON-file backends,
//! the handicap index calculation, and [`HandicapService`], which ties
//! storage and calculation together behind a memoizing facade.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod handicap;
pub mod round;
pub mod service;
pub mod store;

pub use error::{Error, Result};
pub use handicap::{differential, handicap_index, STANDARD_SLOPE};
pub use round::{NewRound, Round, RoundId};
pub use service::HandicapService;
pub use store::{JsonStore, MemoryStore, RoundStore};
