//! Core types and errors for the PassiveTotal API client.
//!
//! This crate provides the foundational types used across the PassiveTotal library:
//!
//! - **Types**: Strongly-typed representations of the PassiveTotal and Illuminate API responses
//! - **Errors**: Comprehensive error handling with [`PassiveTotalError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use passivetotal_core::{PassiveDnsResults, Result};
//!
//! fn print_resolutions(pdns: &PassiveDnsResults) -> Result<()> {
//!     for record in &pdns.results {
//!         println!("{} -> {}", pdns.query_value.as_deref().unwrap_or("?"), record.resolve);
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/passivetotal-core/2.0.0")]

mod error;
pub mod types;

pub use error::{PassiveTotalError, Result};
pub use types::*;
