//! HTTP client module
//!
//! Thin request layer shared by both backend clients.
//!
//! # Features
//!
//! - **Base URL joining**: endpoints are given as paths
//! - **Authentication**: headers from the auth module on every request
//! - **Timeouts**: one configurable timeout per client

mod client;

pub use client::{
    status_error, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig,
};
