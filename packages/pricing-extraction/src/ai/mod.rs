//! Model client implementations.

pub mod anthropic;

pub use anthropic::Anthropic;
