//! # API REST
//!
//! REST API implementation for the CHD risk application.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - The embedded single-page form
//!
//! All inference logic lives in `chd-core`; this crate is presentation glue.

#![warn(rust_2018_idioms)]

pub mod page;

pub use chd_core::CoreConfig;
