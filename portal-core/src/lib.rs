//! Portal Core
//!
//! Core types and helpers for the celebration portal service.
//!
//! This crate contains:
//! - Domain types: the portal record, its payload accessors and aggregate stats
//! - DTOs: request/response bodies shared by the server, client and CLI
//! - Passcode hashing, upload decoding and portal id generation

pub mod domain;
pub mod dto;
pub mod id;
pub mod passcode;
pub mod upload;
