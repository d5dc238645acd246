//! End-to-end failover cycles against mock health and DNS upstreams.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use dns_failover::controller::{ControllerOutcome, Scheduler};
use dns_failover::dns::DnsError;
use dns_failover::health::HealthError;
use dns_failover::lifecycle::Shutdown;

mod common;

#[tokio::test]
async fn test_healthy_majority_makes_no_dns_call() {
    let (health_addr, health_log) = common::start_programmable_upstream(|_| {
        (200, common::observations_body(&["Success", "Failure", "Success"]))
    })
    .await;
    let (dns_addr, dns_log) =
        common::start_programmable_upstream(|_| (200, common::accepted_body())).await;

    let outcome = common::controller(&common::config(health_addr, dns_addr)).run().await;

    assert!(matches!(outcome, ControllerOutcome::NoActionHealthy { .. }), "{outcome:?}");
    assert_eq!(outcome.exit_code(), 0);

    let health_requests = health_log.lock().unwrap().clone();
    assert_eq!(health_requests.len(), 1);
    assert_eq!(health_requests[0].method, "GET");
    assert_eq!(
        health_requests[0].path,
        "/2013-04-01/healthcheck/c136e72f-472e-4b71-890c-b95b57583097/status"
    );
    assert!(dns_log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_half_failing_submits_both_upserts_in_one_batch() {
    let (health_addr, _) = common::start_programmable_upstream(|_| {
        (200, common::observations_body(&["Failure", "Failure", "Success", "Success"]))
    })
    .await;
    let (dns_addr, dns_log) =
        common::start_programmable_upstream(|_| (200, common::accepted_body())).await;

    let outcome = common::controller(&common::config(health_addr, dns_addr)).run().await;

    match &outcome {
        ControllerOutcome::FailoverTriggered { verdict, change } => {
            assert_eq!(verdict.unhealthy_count(), 2);
            assert_eq!(verdict.total_count, 4);
            assert_eq!(change.id, "/change/C2682N5HXP0BZ4");
            assert_eq!(change.status, "PENDING");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let requests = dns_log.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/2013-04-01/hostedzone/Z0123456789/rrset");

    let body: Value = serde_json::from_str(&requests[0].body).unwrap();
    let changes = body["ChangeBatch"]["Changes"].as_array().unwrap();
    assert_eq!(changes.len(), 2);
    assert_eq!(
        body["ChangeBatch"]["Comment"],
        "Failover triggered: switching to secondary"
    );

    let primary = &changes[0]["ResourceRecordSet"];
    assert_eq!(changes[0]["Action"], "UPSERT");
    assert_eq!(primary["Failover"], "PRIMARY");
    assert_eq!(primary["SetIdentifier"], "primary");
    assert_eq!(primary["ResourceRecords"][0]["Value"], "52.66.201.244");
    assert_eq!(primary["HealthCheckId"], "c136e72f-472e-4b71-890c-b95b57583097");

    let secondary = &changes[1]["ResourceRecordSet"];
    assert_eq!(changes[1]["Action"], "UPSERT");
    assert_eq!(secondary["Failover"], "SECONDARY");
    assert_eq!(secondary["ResourceRecords"][0]["Value"], "15.207.109.242");
    assert!(secondary.get("HealthCheckId").is_none());
    assert_eq!(primary["TTL"], secondary["TTL"]);
    assert_eq!(primary["Name"], secondary["Name"]);
}

#[tokio::test]
async fn test_unreachable_health_service_is_evaluation_failure() {
    let health_addr = common::unused_addr().await;
    let (dns_addr, dns_log) =
        common::start_programmable_upstream(|_| (200, common::accepted_body())).await;

    let outcome = common::controller(&common::config(health_addr, dns_addr)).run().await;

    assert!(matches!(
        outcome,
        ControllerOutcome::EvaluationFailed { error: HealthError::Upstream(_) }
    ));
    assert_eq!(outcome.exit_code(), 2);
    assert!(dns_log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_service_error_status_is_evaluation_failure() {
    let (health_addr, _) = common::start_programmable_upstream(|_| {
        (404, r#"{"Error":{"Code":"NoSuchHealthCheck","Message":"not found"}}"#.to_string())
    })
    .await;
    let (dns_addr, dns_log) =
        common::start_programmable_upstream(|_| (200, common::accepted_body())).await;

    let outcome = common::controller(&common::config(health_addr, dns_addr)).run().await;

    match outcome {
        ControllerOutcome::EvaluationFailed { error: HealthError::Status { status, body } } => {
            assert_eq!(status, 404);
            assert!(body.contains("NoSuchHealthCheck"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(dns_log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_observation_list_never_passes() {
    let (health_addr, _) =
        common::start_programmable_upstream(|_| (200, common::observations_body(&[]))).await;
    let (dns_addr, dns_log) =
        common::start_programmable_upstream(|_| (200, common::accepted_body())).await;

    let outcome = common::controller(&common::config(health_addr, dns_addr)).run().await;

    assert!(matches!(
        outcome,
        ControllerOutcome::EvaluationFailed { error: HealthError::NoObservations { .. } }
    ));
    assert!(!outcome.is_success());
    assert!(dns_log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_batch_is_failover_failure() {
    let (health_addr, _) = common::start_programmable_upstream(|_| {
        (200, common::observations_body(&["Failure", "Failure", "Success"]))
    })
    .await;
    let (dns_addr, dns_log) = common::start_programmable_upstream(|_| {
        (
            400,
            r#"{"Error":{"Code":"InvalidChangeBatch","Message":"RRSet with DNS name app.example.com. is not permitted in zone"}}"#
                .to_string(),
        )
    })
    .await;

    let outcome = common::controller(&common::config(health_addr, dns_addr)).run().await;

    match &outcome {
        ControllerOutcome::FailoverAttemptedButFailed {
            error: DnsError::Rejected { code, .. },
            ..
        } => assert_eq!(code, "InvalidChangeBatch"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(outcome.exit_code(), 3);
    assert_eq!(dns_log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_watch_fails_over_once_primary_degrades() {
    let degraded = Arc::new(AtomicBool::new(false));
    let flag = degraded.clone();
    let (health_addr, _) = common::start_programmable_upstream(move |_| {
        if flag.load(Ordering::SeqCst) {
            (200, common::observations_body(&["Failure", "Failure", "Success"]))
        } else {
            (200, common::observations_body(&["Success", "Success", "Success"]))
        }
    })
    .await;
    let (dns_addr, dns_log) =
        common::start_programmable_upstream(|_| (200, common::accepted_body())).await;

    let controller = Arc::new(common::controller(&common::config(health_addr, dns_addr)));
    let scheduler = Scheduler::new(controller, Duration::from_millis(50));
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(scheduler.run(shutdown.subscribe()));

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(dns_log.lock().unwrap().is_empty(), "healthy primary must not be switched");

    degraded.store(true, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(300)).await;
    shutdown.trigger();
    let report = handle.await.unwrap();

    assert!(report.no_action_healthy >= 1, "{report:?}");
    assert!(report.failover_triggered >= 1, "{report:?}");
    assert_eq!(report.failover_triggered, dns_log.lock().unwrap().len());
    assert_eq!(report.evaluation_failed, 0);
}
