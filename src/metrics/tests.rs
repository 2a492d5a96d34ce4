use super::*;
use crate::http::DispatchOutcome;
use std::future::Future;
use std::time::Duration;
use tempfile::tempdir;
use tokio::time::Instant;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn metric(latency_ms: u64, outcome: DispatchOutcome) -> Metrics {
    Metrics {
        start: Instant::now(),
        response_time: Duration::from_millis(latency_ms),
        outcome,
    }
}

fn sample_aggregate() -> Result<RunAggregate, String> {
    let mut aggregate = RunAggregate::new().map_err(|err| err.to_string())?;
    let samples = [
        metric(10, DispatchOutcome::Status(201)),
        metric(20, DispatchOutcome::Status(200)),
        metric(30, DispatchOutcome::Status(409)),
        metric(40, DispatchOutcome::TimedOut),
        metric(50, DispatchOutcome::TransportError),
    ];
    for sample in &samples {
        aggregate.record(sample).map_err(|err| err.to_string())?;
    }
    Ok(aggregate)
}

#[test]
fn aggregate_classifies_outcomes() -> Result<(), String> {
    let summary = sample_aggregate()?.finish(Duration::from_secs(1));
    if summary.total_requests != 5 {
        return Err(format!("Unexpected total: {}", summary.total_requests));
    }
    if summary.successful_requests != 2 {
        return Err(format!(
            "Unexpected successes: {}",
            summary.successful_requests
        ));
    }
    if summary.http_error_requests != 1 {
        return Err("Expected one non-2xx response".to_owned());
    }
    if summary.timeout_requests != 1 || summary.transport_error_requests != 1 {
        return Err("Expected one timeout and one transport error".to_owned());
    }
    Ok(())
}

#[test]
fn aggregate_computes_latency_and_rates() -> Result<(), String> {
    let summary = sample_aggregate()?.finish(Duration::from_secs(2));
    if summary.min_latency_ms != 10 || summary.max_latency_ms != 50 {
        return Err(format!(
            "Unexpected min/max: {}/{}",
            summary.min_latency_ms, summary.max_latency_ms
        ));
    }
    if summary.avg_latency_ms != 30 {
        return Err(format!("Unexpected avg: {}", summary.avg_latency_ms));
    }
    if summary.p50_latency_ms != 30 {
        return Err(format!("Unexpected p50: {}", summary.p50_latency_ms));
    }
    // 5 requests over 2s
    if summary.avg_rps_x100 != 250 {
        return Err(format!("Unexpected rps x100: {}", summary.avg_rps_x100));
    }
    // 2 of 5
    if summary.success_rate_x100 != 4000 {
        return Err(format!(
            "Unexpected success rate x100: {}",
            summary.success_rate_x100
        ));
    }
    Ok(())
}

#[test]
fn empty_aggregate_reports_zeroes() -> Result<(), String> {
    let aggregate = RunAggregate::new().map_err(|err| err.to_string())?;
    let summary = aggregate.finish(Duration::ZERO);
    if summary != RunSummary::default() {
        return Err(format!("Unexpected empty summary: {:?}", summary));
    }
    Ok(())
}

#[test]
fn summary_lines_format_fixed_point() -> Result<(), String> {
    let summary = sample_aggregate()?.finish(Duration::from_secs(2));
    let lines = summary_lines(&summary);
    if !lines.iter().any(|line| line == "Avg RPS: 2.50") {
        return Err(format!("Missing RPS line: {:?}", lines));
    }
    if !lines
        .iter()
        .any(|line| line == "Successful (2xx): 2 (40.00%)")
    {
        return Err(format!("Missing success line: {:?}", lines));
    }
    Ok(())
}

#[test]
fn write_summary_json_is_readable() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("summary.json");
    let summary = sample_aggregate()?.finish(Duration::from_secs(1));
    write_summary_json(&path, &summary).map_err(|err| err.to_string())?;

    let content = std::fs::read_to_string(&path).map_err(|err| err.to_string())?;
    let decoded: RunSummary = serde_json::from_str(&content).map_err(|err| err.to_string())?;
    if decoded != summary {
        return Err(format!("Unexpected decoded summary: {:?}", decoded));
    }
    Ok(())
}

#[test]
fn collector_drains_until_senders_close() -> Result<(), String> {
    run_async_test(async {
        let (metrics_tx, metrics_rx) = tokio::sync::mpsc::channel(4);
        let handle = setup_metrics_collector(metrics_rx);
        for _ in 0..10 {
            metrics_tx
                .send(metric(5, DispatchOutcome::Status(200)))
                .await
                .map_err(|err| format!("send failed: {}", err))?;
        }
        drop(metrics_tx);

        let aggregate = handle
            .await
            .map_err(|err| format!("join failed: {}", err))?
            .map_err(|err| err.to_string())?;
        if aggregate.total_requests() != 10 {
            return Err(format!(
                "Unexpected total: {}",
                aggregate.total_requests()
            ));
        }
        Ok(())
    })
}
