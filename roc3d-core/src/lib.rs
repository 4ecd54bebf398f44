//! Shared primitives for the roc3d detector-evaluation crates.
//!
//! - **Error types** — [`Roc3dError`] and [`Result`] for structured error handling
//! - **Traits** — [`Summarizable`] for one-line result summaries

pub mod error;
pub mod traits;

pub use error::{Roc3dError, Result};
pub use traits::*;
