//! Shared utilities for falcon-mirror integration tests.
//!
//! - `fixtures`: process and cluster documents as the server returns them
//! - `builders`: UI models built programmatically
//! - `store`: an in-memory `EntityStore`

pub mod builders;
pub mod fixtures;
pub mod store;

pub use builders::*;
