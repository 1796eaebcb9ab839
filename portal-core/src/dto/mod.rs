//! Data Transfer Objects for the HTTP API
//!
//! Request and response bodies exchanged between the server and its clients.
//! Field names follow the JSON the web frontend already sends and expects.

pub mod error;
pub mod music;
pub mod portal;
pub mod promo;
pub mod upload;
