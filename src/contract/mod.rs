//! Contract model and generation.
//!
//! Generation runs against an immutable `GameMap` and a read-only
//! `GameState` snapshot, drawing randomness from a caller-supplied `Rng`.

pub mod buckets;
pub mod draw;
pub mod generate;
pub mod model;

pub use buckets::DirectionBuckets;
pub use draw::{pick_uniform, pick_weighted, weighted_index};
pub use generate::{
    generate_market_contract, generate_private_contract_offers, generate_private_contract_spec,
    generate_starting_contract, offer_count, OfferBatch,
};
pub use model::{Contract, ContractKind, ContractSpec};
