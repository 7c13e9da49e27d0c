mod account;
mod actions;
mod articles;
mod attributes;
mod cards;
mod common;
mod dns;
mod enrichment;
mod illuminate;
mod project;
mod ssl;
mod whois;

pub use account::*;
pub use actions::*;
pub use articles::*;
pub use attributes::*;
pub use cards::*;
pub use common::*;
pub use dns::*;
pub use enrichment::*;
pub use illuminate::*;
pub use project::*;
pub use ssl::*;
pub use whois::*;
