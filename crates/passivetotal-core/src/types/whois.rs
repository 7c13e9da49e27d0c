use super::common::parse_optional_timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// WHOIS registration record for a domain or IP
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisRecord {
    /// Registered domain
    #[serde(default)]
    pub domain: Option<String>,

    /// Registrar name
    #[serde(default)]
    pub registrar: Option<String>,

    /// WHOIS server that answered
    #[serde(default)]
    pub whois_server: Option<String>,

    /// Registration date
    #[serde(default)]
    pub registered: Option<String>,

    /// Expiration date
    #[serde(default)]
    pub expires_at: Option<String>,

    /// Last registry update
    #[serde(default)]
    pub registry_updated_at: Option<String>,

    /// When the record was last loaded by the service
    #[serde(default)]
    pub last_loaded_at: Option<String>,

    /// Primary contact email
    #[serde(default)]
    pub contact_email: Option<String>,

    /// Authoritative name servers
    #[serde(default)]
    pub name_servers: Vec<String>,

    /// Registrant name
    #[serde(default)]
    pub name: Option<String>,

    /// Registrant organization
    #[serde(default)]
    pub organization: Option<String>,

    /// Registrant telephone
    #[serde(default)]
    pub telephone: Option<String>,

    /// Registrant contact
    #[serde(default)]
    pub registrant: Contact,

    /// Administrative contact
    #[serde(default)]
    pub admin: Contact,

    /// Technical contact
    #[serde(default)]
    pub tech: Contact,

    /// Billing contact
    #[serde(default)]
    pub billing: Contact,

    /// Unparsed WHOIS response
    #[serde(default)]
    pub raw_text: Option<String>,
}

impl WhoisRecord {
    /// Parsed registration date
    #[must_use]
    pub fn registered_at(&self) -> Option<NaiveDateTime> {
        parse_optional_timestamp(self.registered.as_deref())
    }

    /// Parsed expiration date
    #[must_use]
    pub fn expires(&self) -> Option<NaiveDateTime> {
        parse_optional_timestamp(self.expires_at.as_deref())
    }

    /// Age of the registration in days at `now`
    #[must_use]
    pub fn age_days(&self, now: NaiveDateTime) -> Option<i64> {
        self.registered_at().map(|r| (now - r).num_days())
    }

    /// Every distinct email address in the record
    #[must_use]
    pub fn emails(&self) -> Vec<&str> {
        let mut emails: Vec<&str> = std::iter::once(self.contact_email.as_deref())
            .chain(self.contacts().map(|c| c.email.as_deref()))
            .flatten()
            .filter(|e| !e.is_empty())
            .collect();
        emails.sort_unstable();
        emails.dedup();
        emails
    }

    /// Registrant, admin, tech and billing contacts
    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        [&self.registrant, &self.admin, &self.tech, &self.billing].into_iter()
    }
}

/// WHOIS contact block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Contact name
    #[serde(default)]
    pub name: Option<String>,

    /// Contact organization
    #[serde(default)]
    pub organization: Option<String>,

    /// Contact email
    #[serde(default)]
    pub email: Option<String>,

    /// Street address
    #[serde(default)]
    pub street: Option<String>,

    /// City
    #[serde(default)]
    pub city: Option<String>,

    /// State or province
    #[serde(default)]
    pub state: Option<String>,

    /// Country
    #[serde(default)]
    pub country: Option<String>,

    /// Postal code
    #[serde(default)]
    pub postal_code: Option<String>,

    /// Telephone number
    #[serde(default)]
    pub telephone: Option<String>,
}

impl Contact {
    /// Returns true if no field is populated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// WHOIS search results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhoisSearchResults {
    /// Matching records
    #[serde(default)]
    pub results: Vec<WhoisRecord>,
}

/// Field used for WHOIS search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhoisField {
    /// Contact email
    Email,
    /// Domain name
    Domain,
    /// Contact name
    Name,
    /// Contact organization
    Organization,
    /// Street address
    Address,
    /// Telephone number
    Phone,
    /// Name server
    Nameserver,
}

impl WhoisField {
    /// Field name as expected by the API
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Domain => "domain",
            Self::Name => "name",
            Self::Organization => "organization",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Nameserver => "nameserver",
        }
    }
}

impl std::fmt::Display for WhoisField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whois_record() {
        let json = r#"{
            "domain": "riskiq.net",
            "registrar": "MarkMonitor Inc.",
            "registered": "2006-03-01T00:00:00.000-0800",
            "expiresAt": "2030-03-01 00:00:00",
            "contactEmail": "domains@riskiq.com",
            "nameServers": ["ns1.riskiq.net", "ns2.riskiq.net"],
            "registrant": {"name": "Domain Admin", "email": "domains@riskiq.com"},
            "admin": {"email": "admin@riskiq.com"},
            "tech": {}
        }"#;
        let record: WhoisRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.registrar.as_deref(), Some("MarkMonitor Inc."));
        assert_eq!(record.name_servers.len(), 2);
        assert!(record.tech.is_empty());
        assert!(record.billing.is_empty());
        assert_eq!(record.emails(), vec!["admin@riskiq.com", "domains@riskiq.com"]);
        assert!(record.expires().is_some());
    }

    #[test]
    fn test_whois_field_names() {
        assert_eq!(WhoisField::Nameserver.as_str(), "nameserver");
        assert_eq!(WhoisField::Email.to_string(), "email");
    }
}
