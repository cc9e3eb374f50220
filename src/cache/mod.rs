pub mod cache_entry;
pub mod timings;
pub mod token;

pub use cache_entry::{CacheEntry, TokenState};
pub use timings::TokenTimings;
pub use token::{has_token_prefix, GeneratedToken, IdentityParams, Token};
