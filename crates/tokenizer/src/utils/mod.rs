//! Utility helpers.

pub mod ids;

pub use ids::parse_token_ids;
