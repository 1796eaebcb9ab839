//! Portal Server
//!
//! HTTP API for the celebration portal: portal save/load with optional
//! password protection, file uploads to object storage, a music search proxy
//! and promo code checks. The `db` and `repository` modules are also used
//! directly by the maintenance CLI.

pub mod api;
pub mod config;
pub mod db;
pub mod repository;
pub mod service;
pub mod state;
pub mod storage;

pub use state::AppState;
