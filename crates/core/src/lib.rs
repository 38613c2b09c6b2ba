//! Core library for bookmeta
//!
//! This crate implements the **Functional Core** of the bookmeta application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`bookmeta_core`** (this crate): Pure transformation functions with zero I/O
//! - **`bookmeta`**: HTTP calls, rate limiting, CLI and rendering (the Imperative Shell)
//!
//! Everything here is deterministic: request parameters are derived from a
//! [`query::SearchRequest`], provider responses are plain serde types, and
//! normalization turns them into [`record::BookRecord`]s without touching the
//! network. Even the rate limiter's accounting takes the current instant as an
//! argument so it can be driven by a simulated clock.
//!
//! # Module Organization
//!
//! - [`record`]: The canonical book record and its placeholder defaults
//! - [`query`]: Validated search requests and match modes
//! - [`config`]: Provider kinds, base URLs and quotas
//! - [`google`]: Google Books request parameters and normalization
//! - [`open_library`]: Open Library request parameters and normalization
//! - [`rate_limit`]: Sliding-window call accounting
//!
//! # Example Usage
//!
//! ```rust
//! use bookmeta_core::google::{normalize, GoogleVolumesResponse};
//!
//! let response: GoogleVolumesResponse = serde_json::from_str(
//!     r#"{"items": [{"volumeInfo": {"title": "Dune"}}]}"#,
//! ).unwrap();
//!
//! let records = normalize(response);
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].title(), "Dune");
//! assert_eq!(records[0].authors(), &["Author not available".to_string()]);
//! ```

pub mod config;
pub mod error;
pub mod google;
pub mod open_library;
pub mod query;
pub mod rate_limit;
pub mod record;

pub use error::Error;
