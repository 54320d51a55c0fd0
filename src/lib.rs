//! Falling blocks (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` so hosts and integration
//! tests can reach everything through `falling_blocks::{core,input,settings,term,types}`.

pub use falling_blocks_core as core;
pub use falling_blocks_input as input;
pub use falling_blocks_settings as settings;
pub use falling_blocks_term as term;
pub use falling_blocks_types as types;
