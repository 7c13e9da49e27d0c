use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Account profile information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account username (email)
    #[serde(default)]
    pub username: Option<String>,

    /// First name
    #[serde(default)]
    pub first_name: Option<String>,

    /// Last name
    #[serde(default)]
    pub last_name: Option<String>,

    /// Organization the account belongs to
    #[serde(default)]
    pub organization: Option<String>,

    /// Account type (e.g. "free", "enterprise")
    #[serde(default)]
    pub account_type: Option<String>,

    /// Last activity
    #[serde(default)]
    pub last_active: Option<String>,

    /// First activity
    #[serde(default)]
    pub first_active: Option<String>,
}

/// Past searches made by the account or organization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountHistory {
    /// History entries, most recent first
    #[serde(default)]
    pub history: Vec<HistoryItem>,
}

/// A single history or teamstream entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryItem {
    /// User who performed the action
    #[serde(default)]
    pub username: Option<String>,

    /// Value the action concerned
    #[serde(default)]
    pub focus: Option<String>,

    /// Interface used (web, api)
    #[serde(default)]
    pub source: Option<String>,

    /// Action type (search, tag, classify, ...)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// When it happened
    #[serde(default, alias = "dt")]
    pub date: Option<String>,

    /// Extra context for the action
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

/// Values monitored by the account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Monitors {
    /// Monitored values
    #[serde(default)]
    pub results: Vec<MonitoredValue>,
}

/// A single monitored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoredValue {
    /// Value being monitored
    #[serde(default)]
    pub focus: Option<String>,

    /// Kind of value
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Who enabled monitoring
    #[serde(default)]
    pub username: Option<String>,
}

/// Organization details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Organization id
    #[serde(default)]
    pub id: Option<String>,

    /// Organization name
    #[serde(default)]
    pub name: Option<String>,

    /// Subscription status
    #[serde(default)]
    pub status: Option<String>,

    /// Licensed seats
    #[serde(default)]
    pub seats: Option<u32>,

    /// Administrator usernames
    #[serde(default)]
    pub admins: Vec<String>,

    /// Active member usernames
    #[serde(default)]
    pub active_members: Vec<String>,
}

impl Organization {
    /// Returns true if the user is an admin
    #[must_use]
    pub fn is_admin(&self, username: &str) -> bool {
        self.admins.iter().any(|a| a == username)
    }

    /// Returns true if the user is an active member (including admins)
    #[must_use]
    pub fn is_member(&self, username: &str) -> bool {
        self.active_members.iter().any(|m| m == username) || self.is_admin(username)
    }
}

/// Organization activity feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Teamstream {
    /// Feed entries
    #[serde(default)]
    pub teamstream: Vec<HistoryItem>,
}

/// Data source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfigs {
    /// Configured sources
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// A single data source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source name
    #[serde(default)]
    pub source: Option<String>,

    /// Whether the source is enabled
    #[serde(default)]
    pub active: bool,

    /// Source-specific settings
    #[serde(default)]
    pub configuration: Option<serde_json::Value>,
}

/// Query quota for the user and organization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quota {
    /// Personal quota
    #[serde(default)]
    pub user: QuotaCounts,

    /// Organization quota
    #[serde(default)]
    pub organization: QuotaCounts,
}

/// Usage counts and limits keyed by quota name (e.g. `search_api`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotaCounts {
    /// Units used this period
    #[serde(default)]
    pub counts: HashMap<String, u64>,

    /// Units allowed this period
    #[serde(default)]
    pub limits: HashMap<String, u64>,

    /// When the period resets
    #[serde(default)]
    pub next_reset: Option<String>,
}

impl QuotaCounts {
    /// Units left for `name`, if a limit is defined
    #[must_use]
    pub fn remaining(&self, name: &str) -> Option<u64> {
        let limit = *self.limits.get(name)?;
        let used = self.counts.get(name).copied().unwrap_or(0);
        Some(limit.saturating_sub(used))
    }

    /// Search API units left
    #[must_use]
    pub fn remaining_searches(&self) -> Option<u64> {
        self.remaining("search_api")
    }
}
