//! arXiv export API

pub mod client;
pub use client::*;
pub mod feed;
pub use feed::*;
