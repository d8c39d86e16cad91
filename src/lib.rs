#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod arxiv;
pub use arxiv::*;
pub mod error;
pub use error::*;
pub mod resolve;
pub use resolve::*;
pub mod scholar;
pub use scholar::*;
pub mod search;
pub use search::*;
pub mod ss;
pub use ss::*;
pub mod terms;
pub use terms::*;
