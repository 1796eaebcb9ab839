//! Service Module
//!
//! Business logic layer for the portal service.
//! Services sit between the HTTP handlers and the repository, storage and
//! upstream APIs.

pub mod music;
pub mod portal;
pub mod promo;
pub mod upload;

// Re-export for convenience
pub use music as music_service;
pub use portal as portal_service;
pub use upload as upload_service;
