use nsprobe_application::use_cases::{
    CheckTxtPropagationUseCase, DiscoverAuthoritativeZoneUseCase, TxtOutcome,
};
use nsprobe_domain::{DomainError, NameServerTarget, RecordType};
use std::sync::Arc;
use std::time::Duration;

mod helpers;
use helpers::{at, build_pool, ip, MockExchange};

const RECORD: &str = "_acme-challenge.example.com";
const TOKEN: &str = "LoqXcYV8q5ONbJQxbmR7SCTNo3tiAXDfowyjxAjEuX0";

async fn two_server_zone() -> Arc<MockExchange> {
    let exchange = MockExchange::new();
    exchange
        .delegate(
            NameServerTarget::System,
            "example.com",
            &[
                ("ns1.example.com", ip("192.0.2.1")),
                ("ns2.example.com", ip("192.0.2.2")),
            ],
        )
        .await;
    exchange
}

#[tokio::test]
async fn test_record_visible_at_every_server() {
    let exchange = two_server_zone().await;
    exchange.set_txt(at("192.0.2.1"), RECORD, &[TOKEN]).await;
    exchange
        .set_txt(at("192.0.2.2"), RECORD, &["stale-token", TOKEN])
        .await;
    let use_case = CheckTxtPropagationUseCase::new(build_pool(Arc::clone(&exchange), &[]));

    let report = use_case.execute(RECORD, TOKEN, 0).await.unwrap();

    assert_eq!(&*report.zone, "example.com");
    assert_eq!(report.servers.len(), 2);
    assert_eq!(report.found_count(), 2);
    assert!(report.is_visible());
}

#[tokio::test]
async fn test_record_missing_at_one_server() {
    let exchange = two_server_zone().await;
    exchange.set_txt(at("192.0.2.1"), RECORD, &[TOKEN]).await;
    exchange
        .set_txt(at("192.0.2.2"), RECORD, &["stale-token"])
        .await;
    let use_case = CheckTxtPropagationUseCase::new(build_pool(Arc::clone(&exchange), &[]));

    let report = use_case.execute(RECORD, TOKEN, 0).await.unwrap();

    assert!(!report.is_visible());
    assert_eq!(report.found_count(), 1);
    let lagging = report
        .servers
        .iter()
        .find(|s| s.target == at("192.0.2.2"))
        .unwrap();
    assert_eq!(
        lagging.outcome,
        TxtOutcome::Missing(vec!["stale-token".to_string()])
    );
}

#[tokio::test]
async fn test_unreachable_server_is_reported_as_failed() {
    let exchange = two_server_zone().await;
    exchange.set_txt(at("192.0.2.1"), RECORD, &[TOKEN]).await;
    exchange
        .fail_times(at("192.0.2.2"), RECORD, RecordType::TXT, u32::MAX)
        .await;
    let use_case = CheckTxtPropagationUseCase::new(build_pool(Arc::clone(&exchange), &[]));

    let report = use_case.execute(RECORD, TOKEN, 0).await.unwrap();

    assert!(!report.is_visible());
    assert!(report
        .servers
        .iter()
        .any(|s| matches!(s.outcome, TxtOutcome::Failed(_))));
}

#[tokio::test]
async fn test_wait_until_visible_retries_with_next_round() {
    let exchange = two_server_zone().await;
    exchange.set_txt(at("192.0.2.1"), RECORD, &[TOKEN]).await;
    exchange.set_txt(at("192.0.2.2"), RECORD, &[TOKEN]).await;
    // Two full rounds of retries fail before the record shows up.
    exchange
        .fail_times(at("192.0.2.2"), RECORD, RecordType::TXT, 6)
        .await;
    let use_case = CheckTxtPropagationUseCase::new(build_pool(Arc::clone(&exchange), &[]));

    let report = use_case
        .wait_until_visible(RECORD, TOKEN, 5, Duration::from_millis(1))
        .await
        .unwrap();

    assert!(report.is_visible());
    assert_eq!(report.round, 2);
}

#[tokio::test]
async fn test_wait_until_visible_returns_last_report_when_never_visible() {
    let exchange = two_server_zone().await;
    exchange.set_txt(at("192.0.2.1"), RECORD, &[TOKEN]).await;
    let use_case = CheckTxtPropagationUseCase::new(build_pool(Arc::clone(&exchange), &[]));

    let report = use_case
        .wait_until_visible(RECORD, TOKEN, 3, Duration::from_millis(1))
        .await
        .unwrap();

    assert!(!report.is_visible());
    assert_eq!(report.round, 2);
    assert_eq!(report.found_count(), 1);
}

#[tokio::test]
async fn test_wait_until_visible_surfaces_discovery_error() {
    let use_case = CheckTxtPropagationUseCase::new(build_pool(MockExchange::new(), &[]));

    let err = use_case
        .wait_until_visible(RECORD, TOKEN, 2, Duration::from_millis(1))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NoAuthoritativeServer(_)));
}

#[tokio::test]
async fn test_discover_many_keeps_order_and_isolates_failures() {
    let exchange = two_server_zone().await;
    let use_case = DiscoverAuthoritativeZoneUseCase::new(build_pool(Arc::clone(&exchange), &[]));

    let domains = vec![
        "www.example.com".to_string(),
        "www.unknown.org".to_string(),
        "not a domain".to_string(),
    ];
    let results = use_case.execute_many(&domains, 0).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].0, "www.example.com");
    assert_eq!(
        results[0].1.as_ref().unwrap().addresses(),
        vec![ip("192.0.2.1"), ip("192.0.2.2")]
    );
    assert!(matches!(
        results[1].1,
        Err(DomainError::NoAuthoritativeServer(_))
    ));
    assert!(matches!(results[2].1, Err(DomainError::InvalidDomainName(_))));
}
