//! CV generation: cache-keyed orchestration of the LLM pipeline.

pub mod cache_key;
pub mod generator;
pub mod handlers;
