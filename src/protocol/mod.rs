//! External data formats.
//!
//! Game-state snapshots arrive as JSON with string keys for cities,
//! commodities, and regions; this module resolves them to typed ids and
//! encodes generated contracts back to the same shape.

pub mod snapshot;

pub use snapshot::{decode_snapshot, encode_contract, parse_snapshot, ContractJson, PlayerJson, SnapshotError, SnapshotJson};
