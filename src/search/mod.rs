//! Two-mode search orchestration

pub mod engine;
pub use engine::*;
pub mod state;
pub use state::*;
