use chrono::NaiveDate;
use passivetotal_analyzer::{Analyzer, AnalyzerObject};
use passivetotal_client::{Credentials, PassiveTotalClient, RetryConfig};
use passivetotal_core::{DateRange, InsightPriority, PassiveTotalError, SslField};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHA1: &str = "3b8f2c1d0e9a7b6c5d4e3f2a1b0c9d8e7f6a5b4c";

fn analyzer_for(server: &MockServer) -> Analyzer {
    let client = PassiveTotalClient::builder(Credentials::new("analyst", "secret"))
        .base_url(server.uri())
        .retry(RetryConfig::disabled())
        .build();
    Analyzer::new(client)
}

fn pdns_body() -> serde_json::Value {
    json!({
        "totalRecords": 3,
        "queryValue": "example.org",
        "results": [
            {"value": "example.org", "resolve": "93.184.216.34", "resolveType": "ip", "recordType": "A",
             "firstSeen": "2023-01-01 00:00:00", "lastSeen": "2024-01-01 00:00:00"},
            {"value": "example.org", "resolve": "2606:2800:220:1::1", "resolveType": "ip", "recordType": "AAAA",
             "firstSeen": "2023-02-01 00:00:00", "lastSeen": "2024-02-01 00:00:00"},
            {"value": "example.org", "resolve": "mail.example.org", "resolveType": "domain", "recordType": "MX",
             "firstSeen": "2022-01-01 00:00:00", "lastSeen": "2024-03-01 00:00:00"}
        ]
    })
}

#[tokio::test]
async fn test_resolutions_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dns/passive"))
        .and(query_param("query", "example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pdns_body()))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let host = analyzer.hostname("Example.ORG").unwrap();

    let first = host.resolutions().await.unwrap();
    let second = analyzer.hostname("example.org").unwrap().resolutions().await.unwrap();

    assert!(first.ptr_eq(&second));
    assert_eq!(first.len(), 3);
    assert_eq!(first.record_types(), vec!["A", "AAAA", "MX"]);
}

#[tokio::test]
async fn test_ips_pivot_shares_objects() {
    let server = MockServer::start().await;
    Mock::given(path("/dns/passive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pdns_body()))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let host = analyzer.hostname("example.org").unwrap();

    let ips = host.ips().await.unwrap();
    assert_eq!(ips.len(), 2);

    let direct = analyzer.ip("93.184.216.34").unwrap();
    assert!(ips.iter().any(|ip| ip.ptr_eq(&direct)));

    // ips() reuses the memoized resolutions
    assert_ok!(host.resolutions().await);
}

#[tokio::test]
async fn test_date_range_sent_with_relationships() {
    let server = MockServer::start().await;
    Mock::given(path("/host-attributes/trackers"))
        .and(query_param("query", "example.org"))
        .and(query_param("start", "2024-01-01"))
        .and(query_param("end", "2024-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRecords": 1,
            "results": [{"hostname": "example.org", "attributeType": "GoogleAnalyticsTrackingId",
                         "attributeValue": "UA-12345-1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    analyzer.set_date_range(DateRange::between(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    ));

    let trackers = analyzer.hostname("example.org").unwrap().trackers().await.unwrap();
    assert_eq!(
        trackers.first().and_then(|t| t.attribute_value.as_deref()),
        Some("UA-12345-1")
    );
}

#[tokio::test]
async fn test_reset_refetches() {
    let server = MockServer::start().await;
    Mock::given(path("/whois"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "domain": "example.org",
            "registrar": "Example Registrar, Inc."
        })))
        .expect(2)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let host = analyzer.hostname("example.org").unwrap();

    let whois = host.whois().await.unwrap();
    assert_eq!(whois.registrar.as_deref(), Some("Example Registrar, Inc."));
    assert_ok!(host.whois().await);

    host.reset().await;
    assert_ok!(host.whois().await);
}

#[tokio::test]
async fn test_failures_are_not_memoized() {
    let server = MockServer::start().await;
    Mock::given(path("/enrichment"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(path("/enrichment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "queryValue": "198.51.100.20",
            "autonomousSystemNumber": 64500,
            "country": "NL"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let ip = analyzer.ip("198.51.100.20").unwrap();

    assert!(ip.enrichment().await.is_err());
    let enrichment = ip.enrichment().await.unwrap();
    assert_eq!(enrichment.autonomous_system_number, Some(64500));
}

#[tokio::test]
async fn test_certificate_details_are_lazy() {
    let server = MockServer::start().await;
    Mock::given(path("/ssl-certificate"))
        .and(query_param("query", SHA1))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "sha1": SHA1,
                "subjectCommonName": "example.org",
                "subjectAlternativeNames": ["example.org", "www.example.org"],
                "expirationDate": "Jan 01 00:00:00 2020 GMT"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let cert = analyzer.certificate(&SHA1.to_ascii_uppercase()).unwrap();
    assert!(!cert.is_fetched().await);

    let sans = cert.subject_alternative_names().await.unwrap();
    assert_eq!(sans, vec!["example.org", "www.example.org"]);
    assert!(cert.is_fetched().await);

    let now = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert!(cert.is_expired(now).await.unwrap());
}

#[tokio::test]
async fn test_certificate_search_seeds_details() {
    let server = MockServer::start().await;
    Mock::given(path("/ssl-certificate/search"))
        .and(query_param("field", "subjectAlternativeName"))
        .and(query_param("query", "example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"sha1": SHA1, "subjectAlternativeNames": ["example.org"]}]
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(path("/ssl-certificate"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let certs = analyzer
        .search_certificates(SslField::SubjectAlternativeName, "example.org")
        .await
        .unwrap();

    let cert = certs.first().unwrap();
    assert!(cert.is_fetched().await);
    assert!(cert.ptr_eq(&analyzer.certificate(SHA1).unwrap()));
    assert_ok!(cert.details().await);

    let via_host = analyzer.hostname("example.org").unwrap().certificates().await.unwrap();
    assert!(via_host.first().unwrap().ptr_eq(cert));
}

#[tokio::test]
async fn test_reputations_fan_out() {
    let server = MockServer::start().await;
    Mock::given(path("/reputation"))
        .and(query_param("query", "bad.example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "score": 92,
            "classification": "MALICIOUS",
            "rules": [{"name": "Known C2", "severity": 5}]
        })))
        .mount(&server)
        .await;
    Mock::given(path("/reputation"))
        .and(query_param("query", "203.0.113.77"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let objects: Vec<AnalyzerObject> = vec![
        analyzer.object("bad.example").unwrap(),
        analyzer.object("203.0.113.77").unwrap(),
    ];

    let results = analyzer.reputations(&objects).await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().score, 92);
    assert!(matches!(results[1], Err(PassiveTotalError::NotFound { .. })));
}

#[tokio::test]
async fn test_objects_fail_after_analyzer_dropped() {
    let server = MockServer::start().await;
    let analyzer = analyzer_for(&server);
    let host = analyzer.hostname("example.org").unwrap();
    drop(analyzer);

    assert!(matches!(
        host.summary().await,
        Err(PassiveTotalError::AnalyzerDropped)
    ));
}

#[tokio::test]
async fn test_attack_surface_relationships() {
    let server = MockServer::start().await;
    Mock::given(path("/attack-surface"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 88256,
            "name": "Example Corp",
            "priorities": {
                "high": {"insightCount": 2, "observationCount": 7},
                "medium": {"insightCount": 1, "observationCount": 1},
                "low": {"insightCount": 0, "observationCount": 0}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/attack-surface/88256/insights/high"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "priorityLevel": "high",
            "insights": [{"name": "Expired certificate", "observationCount": 7}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/attack-surface/88256/cves"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalCount": 1,
            "cves": [{"cveId": "CVE-2021-44228", "priorityScore": 100.0, "observationCount": 3}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let surface = analyzer.attack_surface().await.unwrap();
    assert!(surface.ptr_eq(&analyzer.attack_surface().await.unwrap()));
    assert_eq!(surface.name(), "Example Corp");
    assert_eq!(surface.priorities().high.observation_count, 7);

    for _ in 0..2 {
        let insights = surface.insights(InsightPriority::High).await.unwrap();
        assert_eq!(insights.active().len(), 1);
        assert_eq!(surface.cves().await.unwrap().len(), 1);
    }

    let by_id = analyzer.attack_surface_by_id(88256).await.unwrap();
    assert!(by_id.ptr_eq(&surface));
}

#[tokio::test]
async fn test_article_indicator_pivots() {
    let server = MockServer::start().await;
    Mock::given(path("/articles/a1b2c3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "guid": "a1b2c3",
            "title": "Phishing kit targets banks",
            "indicators": [
                {"type": "domain", "count": 2, "values": ["login-bank.example", "not a host"]},
                {"type": "ip", "count": 1, "values": ["198.51.100.9"]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let article = analyzer.article("a1b2c3").await.unwrap();
    assert_eq!(article.title(), "Phishing kit targets banks");

    let hosts = article.indicator_hostnames().await.unwrap();
    assert_eq!(hosts.len(), 1);
    assert!(hosts
        .first()
        .unwrap()
        .ptr_eq(&analyzer.hostname("login-bank.example").unwrap()));

    let ips = article.indicator_ips().await.unwrap();
    assert_eq!(ips.first().map(ToString::to_string).as_deref(), Some("198.51.100.9"));
}

#[tokio::test]
async fn test_intel_profile_indicators_memoized() {
    let server = MockServer::start().await;
    Mock::given(path("/intel-profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalCount": 1,
            "results": [{"id": "apt33", "title": "APT33", "aliases": ["Elfin"]}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/intel-profiles/apt33/indicators"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalCount": 1,
            "results": [{"artifactType": "domain", "value": "bad.example", "osint": true}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let profiles = analyzer.intel_profiles().await.unwrap();
    let profile = profiles.first().unwrap();
    assert_eq!(profile.aliases(), ["Elfin".to_string()]);
    assert!(profile.ptr_eq(&analyzer.intel_profile("apt33").await.unwrap()));

    assert_eq!(profile.indicators().await.unwrap().len(), 1);
    assert_eq!(profile.indicators().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_ip_hostnames_pivot_shares_objects() {
    let server = MockServer::start().await;
    Mock::given(path("/dns/passive"))
        .and(query_param("query", "93.184.216.34"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"value": "93.184.216.34", "resolve": "www.example.org", "resolveType": "domain", "recordType": "A"},
                {"value": "93.184.216.34", "resolve": "WWW.example.org", "resolveType": "domain", "recordType": "A"},
                {"value": "93.184.216.34", "resolve": "cdn.example.net", "resolveType": "domain", "recordType": "A"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let ip = analyzer.ip("93.184.216.34").unwrap();
    let hostnames = ip.hostnames().await.unwrap();

    assert_eq!(hostnames.len(), 2);
    let www = hostnames.first().unwrap();
    assert_eq!(www.name(), "www.example.org");
    assert!(www.ptr_eq(&analyzer.hostname("www.example.org").unwrap()));

    let again = ip.hostnames().await.unwrap();
    assert!(again.ptr_eq(&hostnames));
}

#[tokio::test]
async fn test_ip_certificates_and_services() {
    let server = MockServer::start().await;
    Mock::given(path("/ssl-certificate/history"))
        .and(query_param("query", "198.51.100.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"sha1": SHA1, "ipAddresses": ["198.51.100.7"]},
                {"sha1": SHA1.to_uppercase(), "ipAddresses": ["198.51.100.7"]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/services"))
        .and(query_param("query", "198.51.100.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": "198.51.100.7",
            "totalCount": 1,
            "results": [{"portNumber": 8443, "protocol": "TCP", "status": "open"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let ip = analyzer.ip("198.51.100.7").unwrap();

    let certs = ip.certificates().await.unwrap();
    assert_eq!(certs.len(), 1);
    assert!(certs
        .first()
        .unwrap()
        .ptr_eq(&analyzer.certificate(SHA1).unwrap()));
    assert_ok!(ip.certificates().await);

    let services = ip.services().await.unwrap();
    assert_eq!(services.first().unwrap().port_number, 8443);
    assert!(services.ptr_eq(&ip.services().await.unwrap()));
}

#[tokio::test]
async fn test_hostname_subdomains_pivot() {
    let server = MockServer::start().await;
    Mock::given(path("/enrichment/subdomains"))
        .and(query_param("query", "example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "queryValue": "example.org",
            "primaryDomain": "example.org",
            "subdomains": ["www", "mail"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let host = analyzer.hostname("example.org").unwrap();
    let subdomains = host.subdomains().await.unwrap();

    let names: Vec<&str> = subdomains.iter().map(|h| h.name()).collect();
    assert_eq!(names, vec!["www.example.org", "mail.example.org"]);
    assert!(subdomains
        .first()
        .unwrap()
        .ptr_eq(&analyzer.hostname("www.example.org").unwrap()));
    assert!(subdomains.ptr_eq(&host.subdomains().await.unwrap()));
}

#[tokio::test]
async fn test_certificate_ips_from_history() {
    let server = MockServer::start().await;
    Mock::given(path("/ssl-certificate/history"))
        .and(query_param("query", SHA1))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"sha1": SHA1, "ipAddresses": ["203.0.113.5", "203.0.113.6"],
                 "firstSeen": "2023-01-01", "lastSeen": "2023-06-01"},
                {"sha1": SHA1, "ipAddresses": ["203.0.113.5", "garbage"],
                 "firstSeen": "2023-07-01", "lastSeen": "2024-01-01"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let cert = analyzer.certificate(SHA1).unwrap();
    let ips = cert.ips().await.unwrap();

    assert_eq!(ips.len(), 2);
    assert!(ips
        .first()
        .unwrap()
        .ptr_eq(&analyzer.ip("203.0.113.5").unwrap()));
    assert_eq!(cert.history().await.unwrap().len(), 2);
}
