//! The user's professional profile: source material for every generation.

pub mod handlers;
pub mod store;
