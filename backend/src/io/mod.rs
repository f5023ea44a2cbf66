//! # IO Module
//!
//! The adapter layer between the site and the domain services. Requests
//! arrive as JSON over HTTP, are mapped onto domain commands, and domain
//! results are mapped back onto the DTOs in the `shared` crate.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: REST endpoints under `/api`
//! - **Error Translation**: validation failures become `400` with a JSON body
//! - **Downloads**: the CSV export is returned as an attachment

pub mod rest;
