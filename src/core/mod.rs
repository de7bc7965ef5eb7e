//! Core types, run configuration, numbering and randomness.
//!
//! Everything the generation and payment engines share lives here: the
//! invoice and payment records, the validated run configuration, the
//! run-wide invoice numbering scheme and the injectable random source.

mod config;
mod error;
pub mod names;
mod numbering;
pub mod random;
mod types;

pub use config::*;
pub use error::*;
pub use names::normalize_party_name;
pub use numbering::*;
pub use random::{RandomSource, SeededRandom};
pub use types::*;
