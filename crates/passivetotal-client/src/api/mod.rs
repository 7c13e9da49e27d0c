//! API endpoint modules.

mod account;
mod actions;
mod articles;
mod artifact;
mod attack_surface;
mod attributes;
mod cards;
mod dns;
mod enrichment;
mod intel;
mod monitor;
mod project;
mod reputation;
mod services;
mod ssl;
mod vuln;
mod whois;

pub use account::AccountApi;
pub use actions::ActionsApi;
pub use articles::ArticlesApi;
pub use artifact::ArtifactApi;
pub use attack_surface::AttackSurfaceApi;
pub use attributes::{AttributeRequestBuilder, AttributesApi};
pub use cards::CardsApi;
pub use dns::{DnsApi, PassiveDnsRequestBuilder};
pub use enrichment::EnrichmentApi;
pub use intel::IntelApi;
pub use monitor::{AlertScope, MonitorApi};
pub use project::ProjectApi;
pub use reputation::ReputationApi;
pub use services::ServicesApi;
pub use ssl::SslApi;
pub use vuln::VulnIntelApi;
pub use whois::{WhoisApi, WhoisRequestBuilder};

/// Records requested per page on Illuminate endpoints
pub const PAGE_SIZE: u32 = 400;

pub(crate) fn page_params(page: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("size", PAGE_SIZE.to_string())]
}

/// Percent-encode a value for use as a single path segment
pub(crate) fn segment(value: &str) -> String {
    // form encoding writes spaces as '+' and escapes a literal '+'
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
