//! Memoized, pivotable objects over the PassiveTotal and Illuminate APIs.
//!
//! An [`Analyzer`] hands out [`Hostname`], [`IpAddress`], [`Certificate`]
//! and Illuminate objects. Each object fetches a relationship the first
//! time it is asked for and keeps the result, so walking from a hostname
//! to its IPs, from those IPs to their certificates and back costs one
//! request per relationship.
//!
//! ```no_run
//! use passivetotal_analyzer::Analyzer;
//!
//! # async fn run() -> passivetotal_core::Result<()> {
//! let analyzer = Analyzer::from_env()?;
//! let host = analyzer.hostname("example.org")?;
//!
//! for ip in host.ips().await?.iter() {
//!     let services = ip.services().await?;
//!     println!("{ip}: {} services", services.len());
//! }
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/passivetotal-analyzer/2.0.0")]

mod analyzer;
mod article;
mod certificate;
mod hostname;
mod illuminate;
mod ip;
mod memo;
mod object;
mod records;
mod relations;

pub use analyzer::{Analyzer, CacheStats};
pub use article::Article;
pub use certificate::Certificate;
pub use hostname::Hostname;
pub use illuminate::{AttackSurface, IntelProfile};
pub use ip::IpAddress;
pub use object::AnalyzerObject;
pub use records::RecordList;
