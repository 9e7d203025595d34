//! Freightline contract engine library.
//!
//! Exposes the map dataset and graph traversal, city valuation, contract
//! generation, and snapshot decoding for use by integration tests and the
//! simulation binary.

pub mod config;
pub mod contract;
pub mod error;
pub mod geo;
pub mod map;
pub mod protocol;
pub mod simulate;
pub mod state;
pub mod value;
