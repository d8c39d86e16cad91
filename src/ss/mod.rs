//! Semantic Scholar Graph API

pub(crate) const BASE_URL: &str = "https://api.semanticscholar.org/graph/v1";

pub mod citations;
pub use citations::*;
pub mod client;
pub use client::*;
pub mod title;
pub use title::*;
