//! Repository Module
//!
//! Data access layer for the portal service.

pub mod portal;

// Re-export for convenience
pub use portal as portal_repository;
