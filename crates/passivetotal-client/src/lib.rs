//! HTTP client for the PassiveTotal and Illuminate APIs.
//!
//! This crate provides the main [`PassiveTotalClient`] for interacting with the API,
//! one accessor per endpoint family, and the [`collect_pages`] pagination helper.

#![doc(html_root_url = "https://docs.rs/passivetotal-client/2.0.0")]

mod client;
mod config;
mod pagination;
pub mod api;

pub use client::{PassiveTotalClient, PassiveTotalClientBuilder};
pub use config::*;
pub use pagination::{collect_pages, DEFAULT_MAX_PAGES};
pub use passivetotal_core::{PassiveTotalError, Result};
