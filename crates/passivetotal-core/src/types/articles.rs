use super::common::{parse_optional_timestamp, Paginated};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Threat-intelligence article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Article id
    #[serde(default)]
    pub guid: String,

    /// Headline
    #[serde(default)]
    pub title: String,

    /// Short summary
    #[serde(default)]
    pub summary: Option<String>,

    /// Article type (public, private)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Link to the article
    #[serde(default)]
    pub link: Option<String>,

    /// Categories
    #[serde(default)]
    pub categories: Vec<String>,

    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Indicators grouped by type
    #[serde(default)]
    pub indicators: Vec<ArticleIndicator>,

    /// Publication date
    #[serde(default)]
    pub published_date: Option<String>,

    /// Creation date
    #[serde(default)]
    pub created_date: Option<String>,
}

impl Article {
    /// Parsed publication date
    #[must_use]
    pub fn published(&self) -> Option<NaiveDateTime> {
        parse_optional_timestamp(self.published_date.as_deref())
    }

    /// Indicator values of one type (e.g. "domain", "ip")
    #[must_use]
    pub fn indicator_values(&self, kind: &str) -> Vec<&str> {
        self.indicators
            .iter()
            .filter(|i| i.kind.eq_ignore_ascii_case(kind))
            .flat_map(|i| i.values.iter().map(String::as_str))
            .collect()
    }

    /// Total number of indicators
    #[must_use]
    pub fn indicator_count(&self) -> u64 {
        self.indicators.iter().map(|i| i.count).sum()
    }
}

/// Indicators of one type mentioned in an article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleIndicator {
    /// Indicator type
    #[serde(default, rename = "type")]
    pub kind: String,

    /// Number of indicators
    #[serde(default)]
    pub count: u64,

    /// Indicator values
    #[serde(default)]
    pub values: Vec<String>,

    /// Where the indicators came from
    #[serde(default)]
    pub source: Option<String>,
}

/// Article list response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesResults {
    /// Articles across all pages, when reported
    #[serde(default)]
    pub total_records: Option<u64>,

    /// Articles on this page
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Paginated for ArticlesResults {
    type Item = Article;

    fn total(&self) -> Option<usize> {
        self.total_records.and_then(|t| usize::try_from(t).ok())
    }

    fn into_items(self) -> Vec<Article> {
        self.articles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_values_by_type() {
        let json = r#"{
            "guid": "abc",
            "title": "Campaign",
            "publishedDate": "2021-06-01T10:00:00.000+00:00",
            "indicators": [
                {"type": "domain", "count": 2, "values": ["a.example", "b.example"]},
                {"type": "ip", "count": 1, "values": ["1.2.3.4"]}
            ]
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.indicator_values("DOMAIN"), vec!["a.example", "b.example"]);
        assert_eq!(article.indicator_values("ip"), vec!["1.2.3.4"]);
        assert_eq!(article.indicator_count(), 3);
        assert!(article.published().is_some());
    }
}
