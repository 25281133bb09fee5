//! Domain models for the hero roster.
//!
//! - [`Hero`]: the record listed, edited and deleted through `api/heroes`.
//!   The server owns the authoritative copy; views only hold snapshots.

mod hero;

pub use hero::*;
