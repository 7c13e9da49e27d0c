//! Rust client for the PassiveTotal and Illuminate threat-intelligence APIs.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use passivetotal::PassiveTotalClient;
//!
//! #[tokio::main]
//! async fn main() -> passivetotal::Result<()> {
//!     let client = PassiveTotalClient::new("analyst@example.org", "your-api-key");
//!
//!     // Passive DNS for a hostname
//!     let pdns = client.dns().passive("example.org").send().await?;
//!     println!("Resolutions: {}", pdns.results.len());
//!
//!     // Current WHOIS record
//!     let whois = client.whois().details("example.org").send().await?;
//!     println!("Registrar: {:?}", whois.registrar);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Analyzer
//!
//! ```rust,ignore
//! use passivetotal::Analyzer;
//!
//! #[tokio::main]
//! async fn main() -> passivetotal::Result<()> {
//!     let analyzer = Analyzer::from_env()?;
//!     let host = analyzer.hostname("example.org")?;
//!
//!     for ip in &host.ips().await? {
//!         println!("{ip} reputation {}", ip.reputation().await?.score);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS and enables the analyzer
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS
//! - `analyzer` - Memoized hostname, IP, certificate and Illuminate objects

#![doc(html_root_url = "https://docs.rs/passivetotal/2.0.0")]

// Re-export core types
pub use passivetotal_core::*;

// Re-export client
pub use passivetotal_client::{
    api, collect_pages, Credentials, PassiveTotalClient, PassiveTotalClientBuilder,
    RateLimitConfig, RetryConfig,
};

// Re-export the analyzer if enabled
#[cfg(feature = "analyzer")]
pub use passivetotal_analyzer::{
    Analyzer, AnalyzerObject, Article, AttackSurface, CacheStats, Certificate, Hostname,
    IntelProfile, IpAddress, RecordList,
};

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
