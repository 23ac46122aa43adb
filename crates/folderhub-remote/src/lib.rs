//! # folderhub-remote
//!
//! HTTP implementation of [`folderhub_core::traits::RemoteBackend`] for the
//! image folder API.

pub mod http;
pub mod response;

pub use http::HttpBackend;
