//! Token Provider: owns one cached token and decides when to mint another.

pub mod generator;
pub mod token_provider;

pub use generator::{GenerateFn, TokenGenerator};
pub use token_provider::TokenProvider;
