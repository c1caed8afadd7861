//! This crate provides the Floodcast backend, an HTTP API over a pre-computed
//! rainfall-risk dataset. It loads historical rainfall records, district-wise
//! rainfall normals and an externally produced risk analysis document into an
//! in-memory store, and answers read queries by filtering and reshaping that
//! data. Risk computation itself happens in an external pipeline; this server
//! only serves its output.
//!
//! The original functional prototype was a Flask application; this is a
//! performant rewrite on top of a number of open source components.
//!
//! * [Tokio](tokio), the most popular asynchronous Rust runtime.
//! * [Axum](axum) web framework, built by the Tokio team on top of various
//!   popular components, including the [hyper] HTTP library.
//! * [Serde](serde) performs (de)serialisation of JSON request and response data.
//! * [csv] parses the header-labelled source CSV files.

pub mod app;
pub mod app_state;
pub mod cli;
pub mod error;
pub mod metrics;
pub mod models;
pub mod query;
pub mod server;
pub mod store;
#[cfg(test)]
pub mod test_utils;
pub mod tracing;
pub mod validated_json;
