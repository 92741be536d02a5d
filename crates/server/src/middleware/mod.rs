//! # HTTP Middleware
//!
//! Middleware for the Synapse API server.

pub mod auth;
