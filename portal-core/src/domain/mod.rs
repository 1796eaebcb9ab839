//! Core domain types
//!
//! This module contains the domain structures shared across the portal crates.
//! The server persists them, the CLI reads them directly for maintenance work.

pub mod payload;
pub mod portal;
pub mod stats;
