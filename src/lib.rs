//! SUMSTACK (workspace facade crate).
//!
//! Exposes `sumstack::{core,engine,input,term,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use sumstack_core as core;
pub use sumstack_engine as engine;
pub use sumstack_input as input;
pub use sumstack_term as term;
pub use sumstack_types as types;
