//! HTTP adapter for the license service console.
//!
//! Construct a [`Session`] (base URL + optional token), hand it to
//! [`ApiClient`], and optionally inject an on-unauthorized hook. All
//! calls are blocking request/response round trips; errors come back
//! as [`licctl_core::ApiError`].

pub mod endpoints;
pub mod http;
pub mod session;

pub use http::ApiClient;
pub use session::Session;
