use chrono::NaiveDate;
use passivetotal_client::api::AlertScope;
use passivetotal_client::{Credentials, PassiveTotalClient, PassiveTotalError, RetryConfig};
use passivetotal_core::{
    ArtifactType, Classification, CreateArtifactRequest, CreateProjectRequest, DateRange,
    HostPairDirection, InsightPriority, ProjectVisibility, WhoisField,
};
use serde_json::json;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PassiveTotalClient {
    PassiveTotalClient::builder(Credentials::new("analyst@example.com", "secret"))
        .base_url(server.uri())
        .retry(RetryConfig::disabled())
        .build()
}

#[tokio::test]
async fn test_passive_dns_sends_auth_and_range() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dns/passive"))
        .and(basic_auth("analyst@example.com", "secret"))
        .and(query_param("query", "example.org"))
        .and(query_param("start", "2024-01-01"))
        .and(query_param("end", "2024-02-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRecords": 2,
            "queryValue": "example.org",
            "results": [
                {"value": "example.org", "resolve": "93.184.216.34", "resolveType": "ip",
                 "recordType": "A", "firstSeen": "2024-01-02 00:00:00", "lastSeen": "2024-01-20 10:00:00"},
                {"value": "example.org", "resolve": "93.184.216.34", "resolveType": "ip",
                 "recordType": "A", "firstSeen": "2024-01-03 00:00:00", "lastSeen": "2024-01-21 10:00:00"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let range = DateRange::between(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
    );
    let results = client_for(&server)
        .dns()
        .passive("example.org")
        .date_range(range)
        .send()
        .await
        .unwrap();

    assert_eq!(results.total_records, 2);
    assert_eq!(results.unique_resolves(), vec!["93.184.216.34"]);
}

#[tokio::test]
async fn test_whois_search_uses_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/whois/search"))
        .and(query_param("field", "email"))
        .and(query_param("query", "admin@example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"domain": "example.org"}, {"domain": "example.net"}]
        })))
        .mount(&server)
        .await;

    let results = client_for(&server)
        .whois()
        .search(WhoisField::Email, "admin@example.org")
        .await
        .unwrap();

    assert_eq!(results.results.len(), 2);
    assert_eq!(results.results[1].domain.as_deref(), Some("example.net"));
}

#[tokio::test]
async fn test_certificate_missing_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ssl-certificate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .ssl()
        .certificate("deadbeef")
        .await
        .unwrap_err();

    assert!(matches!(err, PassiveTotalError::NotFound { .. }));
}

#[tokio::test]
async fn test_error_status_mapping() {
    let server = MockServer::start().await;

    Mock::given(path("/account"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(path("/account/quota"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"error": {"message": "Quota exceeded for search_api"}})),
        )
        .mount(&server)
        .await;
    Mock::given(path("/account/history"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;
    Mock::given(path("/account/monitors"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.account().info().await.unwrap_err();
    assert!(err.is_auth_error());

    let err = client.account().quota().await.unwrap_err();
    assert!(matches!(err, PassiveTotalError::QuotaExceeded { ref message } if message.contains("search_api")));

    let err = client.account().history().await.unwrap_err();
    assert!(matches!(
        err,
        PassiveTotalError::RateLimited {
            retry_after: Some(7)
        }
    ));

    let err = client.account().monitors().await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn test_retries_after_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(path("/cards/summary"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/cards/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "example.org",
            "type": "hostname",
            "data_summary": {"resolutions": {"count": 12, "link": "https://example.test"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PassiveTotalClient::builder(Credentials::new("u", "k"))
        .base_url(server.uri())
        .retry(
            RetryConfig::new()
                .max_retries(2)
                .initial_backoff(Duration::from_millis(1)),
        )
        .build();

    let summary = assert_ok!(client.cards().summary("example.org").await);
    assert_eq!(summary.name.as_deref(), Some("example.org"));
}

#[tokio::test]
async fn test_disabled_retry_surfaces_first_error() {
    let server = MockServer::start().await;

    Mock::given(path("/reputation"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).reputation().get("example.org").await;
    assert_err!(result);
}

#[tokio::test]
async fn test_host_pairs_collects_all_pages() {
    let server = MockServer::start().await;

    Mock::given(path("/host-attributes/pairs"))
        .and(query_param("direction", "children"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRecords": 3,
            "results": [{"parent": "example.org", "child": "cdn.example.net", "cause": "redirect"}]
        })))
        .mount(&server)
        .await;
    Mock::given(path("/host-attributes/pairs"))
        .and(query_param("direction", "children"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRecords": 3,
            "results": [
                {"parent": "example.org", "child": "a.example.net", "cause": "iframe"},
                {"parent": "example.org", "child": "b.example.net", "cause": "iframe"}
            ]
        })))
        .mount(&server)
        .await;

    let pairs = client_for(&server)
        .attributes()
        .host_pairs("example.org", HostPairDirection::Children)
        .all()
        .await
        .unwrap();

    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[2].child.as_deref(), Some("cdn.example.net"));
}

#[tokio::test]
async fn test_tags_post_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/actions/tags"))
        .and(body_json(json!({"query": "example.org", "tags": ["phish", "kit"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": ["phish", "kit"]})))
        .expect(1)
        .mount(&server)
        .await;

    let tags = client_for(&server)
        .actions()
        .add_tags("example.org", &["phish", "kit"])
        .await
        .unwrap();

    assert_eq!(tags.tags, vec!["phish", "kit"]);
}

#[tokio::test]
async fn test_bulk_classification_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/actions/bulk/classification"))
        .and(body_json(json!({
            "query": ["a.example", "b.example"],
            "classification": "malicious"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(
        client_for(&server)
            .actions()
            .set_bulk_classification(&["a.example", "b.example"], Classification::Malicious)
            .await
    );
}

#[tokio::test]
async fn test_monitor_alerts_for_artifact() {
    let server = MockServer::start().await;

    Mock::given(path("/monitor"))
        .and(query_param("artifact", "art-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRecords": 1,
            "results": [{"artifact": "art-1", "query": "example.org", "type": "resolution", "value": "198.51.100.7"}]
        })))
        .mount(&server)
        .await;

    let alerts = client_for(&server)
        .monitor()
        .alerts(AlertScope::Artifact("art-1"), DateRange::unbounded())
        .await
        .unwrap();

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].value.as_deref(), Some("198.51.100.7"));
}

#[tokio::test]
async fn test_attack_surface_insights_path() {
    let server = MockServer::start().await;

    Mock::given(path("/attack-surface/88256/insights/high"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "priorityLevel": "HIGH",
            "insights": [
                {"name": "Expired certificate", "observationCount": 4},
                {"name": "Open RDP", "observationCount": 0}
            ]
        })))
        .mount(&server)
        .await;

    let insights = client_for(&server)
        .attack_surface()
        .insights(88256, InsightPriority::High)
        .await
        .unwrap();

    assert_eq!(insights.insights.len(), 2);
    assert_eq!(insights.active().len(), 1);
}

#[tokio::test]
async fn test_intel_indicators_pages_with_size() {
    let server = MockServer::start().await;

    Mock::given(path("/intel-profiles/apt33/indicators"))
        .and(query_param("page", "0"))
        .and(query_param("size", "400"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalCount": 2,
            "results": [
                {"artifactType": "domain", "value": "bad.example"},
                {"artifactType": "ip", "value": "203.0.113.9"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let indicators = client_for(&server)
        .intel()
        .all_indicators("apt33")
        .await
        .unwrap();

    assert_eq!(indicators.len(), 2);
}

#[tokio::test]
async fn test_project_tag_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/project/tag"))
        .and(body_json(json!({"project": "proj-1", "tags": ["apt", "phish"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": ["apt", "phish"]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/project/tag"))
        .and(body_json(json!({"project": "proj-1", "tags": ["phish"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": ["apt"]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let added = client
        .projects()
        .add_tags("proj-1", &["apt", "phish"])
        .await
        .unwrap();
    assert_eq!(added.tags, vec!["apt", "phish"]);

    let remaining = client.projects().remove_tags("proj-1", &["phish"]).await.unwrap();
    assert_eq!(remaining.tags, vec!["apt"]);
}

#[tokio::test]
async fn test_artifact_tag_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/artifact/tag"))
        .and(body_json(json!({"artifact": "art-9", "tags": ["c2"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": ["c2", "watch"]})))
        .expect(1)
        .mount(&server)
        .await;

    let tags = client_for(&server)
        .artifacts()
        .add_tags("art-9", &["c2"])
        .await
        .unwrap();
    assert_eq!(tags.tags, vec!["c2", "watch"]);
}

#[tokio::test]
async fn test_project_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/project"))
        .and(body_json(json!({
            "name": "Phishing kits",
            "visibility": "analyst",
            "featured": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "guid": "proj-1", "name": "Phishing kits", "visibility": "analyst"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/project"))
        .and(query_param("project", "proj-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"guid": "proj-1", "name": "Phishing kits", "tags": ["kits"]}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/project"))
        .and(body_json(json!({"project": "proj-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .projects()
        .create(&CreateProjectRequest {
            name: "Phishing kits".into(),
            visibility: ProjectVisibility::Analyst,
            description: None,
            tags: Vec::new(),
            featured: false,
        })
        .await
        .unwrap();
    assert_eq!(created.visibility, ProjectVisibility::Analyst);

    let fetched = client.projects().get("proj-1").await.unwrap();
    assert_eq!(fetched.tags, vec!["kits"]);

    assert_ok!(client.projects().delete("proj-1").await);
}

#[tokio::test]
async fn test_artifact_bulk_create_and_missing() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/artifact/bulk"))
        .and(body_json(json!({"artifacts": [
            {"project": "proj-1", "query": "bad.example"},
            {"project": "proj-1", "query": "203.0.113.9", "type": "ip"}
        ]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"artifacts": [
            {"guid": "a1", "query": "bad.example", "type": "domain"},
            {"guid": "a2", "query": "203.0.113.9", "type": "ip"}
        ]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/artifact"))
        .and(query_param("artifact", "nope"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"artifacts": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .artifacts()
        .bulk_create(vec![
            CreateArtifactRequest {
                project: "proj-1".into(),
                query: "bad.example".into(),
                kind: None,
                tags: Vec::new(),
            },
            CreateArtifactRequest {
                project: "proj-1".into(),
                query: "203.0.113.9".into(),
                kind: Some(ArtifactType::Ip),
                tags: Vec::new(),
            },
        ])
        .await
        .unwrap();
    assert_eq!(created.artifacts.len(), 2);
    assert_eq!(created.artifacts[1].kind, Some(ArtifactType::Ip));

    let missing = client.artifacts().get("nope").await;
    assert!(matches!(missing, Err(PassiveTotalError::NotFound { .. })));
}

#[tokio::test]
async fn test_ssl_history_by_ip() {
    let server = MockServer::start().await;

    Mock::given(path("/ssl-certificate/history"))
        .and(query_param("query", "198.51.100.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "sha1": "3b8f2c1d0e9a7b6c5d4e3f2a1b0c9d8e7f6a5b4c",
                "ipAddresses": ["198.51.100.7", "not-an-ip"],
                "firstSeen": "2023-05-01", "lastSeen": "2024-05-01"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let history = client_for(&server).ssl().history("198.51.100.7").await.unwrap();
    assert_eq!(history.results.len(), 1);
    assert_eq!(history.results[0].ips().len(), 1);
}

#[tokio::test]
async fn test_vuln_intel_article_and_observations() {
    let server = MockServer::start().await;

    Mock::given(path("/vuln-intel/cves/CVE-2024-3400"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cveId": "CVE-2024-3400",
            "priorityScore": 99.0,
            "description": "Command injection in GlobalProtect"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/vuln-intel/cves/CVE-2024-3400/observations"))
        .and(query_param("page", "2"))
        .and(query_param("size", "400"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalCount": 801,
            "assets": [{"type": "HOST", "name": "vpn.example.org"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let article = client.vuln_intel().article("CVE-2024-3400").await.unwrap();
    assert_eq!(article.cve_id, "CVE-2024-3400");
    assert_eq!(article.priority_score, Some(99.0));

    let page = client
        .vuln_intel()
        .observations("CVE-2024-3400", 2)
        .await
        .unwrap();
    assert_eq!(page.results[0].name, "vpn.example.org");
}

#[tokio::test]
async fn test_article_by_id_and_indicator() {
    let server = MockServer::start().await;

    Mock::given(path("/articles/a1b2c3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "guid": "a1b2c3",
            "title": "New loader campaign",
            "indicators": [{"type": "domain", "count": 1, "values": ["bad.example"]}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/articles/indicators"))
        .and(query_param("query", "bad.example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRecords": 1,
            "articles": [{"guid": "a1b2c3", "title": "New loader campaign"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let article = client.articles().get("a1b2c3").await.unwrap();
    assert_eq!(article.indicator_values("domain"), vec!["bad.example"]);

    let listed = client.articles().for_indicator("bad.example").await.unwrap();
    assert_eq!(listed.articles[0].guid, "a1b2c3");
}

#[tokio::test]
async fn test_enrichment_single_and_bulk() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/enrichment"))
        .and(query_param("query", "example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "queryValue": "example.org",
            "tld": ".org"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/enrichment/bulk"))
        .and(body_json(json!({"query": ["example.org", "example.net"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {
                "example.org": {"queryValue": "example.org"},
                "example.net": {"queryValue": "example.net"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let single = client.enrichment().data("example.org").await.unwrap();
    assert_eq!(single.tld.as_deref(), Some(".org"));

    let bulk = client
        .enrichment()
        .bulk(&["example.org", "example.net"])
        .await
        .unwrap();
    assert_eq!(bulk.results.len(), 2);
    assert!(bulk.results.contains_key("example.net"));
}

#[tokio::test]
async fn test_services_for_ip() {
    let server = MockServer::start().await;

    Mock::given(path("/services"))
        .and(query_param("query", "198.51.100.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": "198.51.100.7",
            "totalCount": 2,
            "results": [
                {"portNumber": 443, "protocol": "TCP", "status": "open"},
                {"portNumber": 22, "protocol": "TCP", "status": "open"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let services = client_for(&server)
        .services()
        .services("198.51.100.7")
        .await
        .unwrap();
    assert_eq!(services.results.len(), 2);
    assert_eq!(services.results[0].port_number, 443);
}

#[tokio::test]
async fn test_path_values_are_percent_encoded() {
    let server = MockServer::start().await;

    Mock::given(path("/cookies/name/sess%3Fid%23x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRecords": 1,
            "results": [{"hostname": "example.org", "cookieName": "sess?id#x"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/intel-profiles/apt%2F33"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "apt/33", "title": "APT33"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cookies = client
        .attributes()
        .cookie_hosts_by_name("sess?id#x")
        .await
        .unwrap();
    assert_eq!(cookies.results.len(), 1);

    let profile = client.intel().profile("apt/33").await.unwrap();
    assert_eq!(profile.title, "APT33");
}
