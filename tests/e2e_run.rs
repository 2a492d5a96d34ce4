mod support;

use std::fs;

use tempfile::tempdir;

use howlite_loadtest::metrics::RunSummary;

use support::{is_token_path, run_loadtest, spawn_recording_server_or_skip};

const EXPECTED_BODY: &str = r#"{"key1":"value1","key2":"value2"}"#;

fn failure(output: &std::process::Output) -> String {
    format!(
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

fn read_summary(path: &std::path::Path) -> Result<RunSummary, String> {
    let content =
        fs::read_to_string(path).map_err(|err| format!("read summary failed: {}", err))?;
    serde_json::from_str(&content).map_err(|err| format!("parse summary failed: {}", err))
}

#[test]
fn e2e_run_exports_summary() -> Result<(), String> {
    let Some((url, server)) = spawn_recording_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let export = dir.path().join("summary.json");
    let export_arg = export.to_string_lossy().into_owned();

    let output = run_loadtest([
        "-u",
        url.as_str(),
        "-d",
        "1s",
        "-r",
        "5",
        "-c",
        "2",
        "--summary-export",
        export_arg.as_str(),
    ])?;
    if !output.status.success() {
        return Err(failure(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Total Requests:") {
        return Err(failure(&output));
    }

    let summary = read_summary(&export)?;
    if summary.total_requests == 0 || summary.total_requests > 5 {
        return Err(format!("Unexpected request count: {:?}", summary));
    }
    if summary.successful_requests != summary.total_requests {
        return Err(format!("Expected only 2xx responses: {:?}", summary));
    }

    let recorded = server.recorded()?;
    let recorded_count = u64::try_from(recorded.len()).unwrap_or(u64::MAX);
    if recorded_count < summary.total_requests {
        return Err(format!(
            "Server saw {} requests, summary reports {}",
            recorded_count, summary.total_requests
        ));
    }
    if let Some(bad) = recorded.iter().find(|request| {
        request.method != "POST" || !is_token_path(&request.path, 30) || request.body != EXPECTED_BODY
    }) {
        return Err(format!("Unexpected request: {:?}", bad));
    }
    Ok(())
}

#[test]
fn e2e_config_file_supplies_options() -> Result<(), String> {
    let Some((url, server)) = spawn_recording_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let export = dir.path().join("summary.json");
    let config_path = dir.path().join("howlite-loadtest.toml");
    let config = format!(
        "target = \"{}\"\npath_length = 12\nsummary_export = \"{}\"\n\n[options]\nduration = \"1s\"\nrps = 3\nvus = 1\n",
        url,
        export.to_string_lossy().replace('\\', "\\\\")
    );
    fs::write(&config_path, config).map_err(|err| format!("write config failed: {}", err))?;

    let config_arg = config_path.to_string_lossy().into_owned();
    let output = run_loadtest(["--config", config_arg.as_str()])?;
    if !output.status.success() {
        return Err(failure(&output));
    }

    let summary = read_summary(&export)?;
    if summary.total_requests == 0 || summary.total_requests > 3 {
        return Err(format!("Unexpected request count: {:?}", summary));
    }
    let recorded = server.recorded()?;
    if let Some(bad) = recorded
        .iter()
        .find(|request| !is_token_path(&request.path, 12))
    {
        return Err(format!("Unexpected path: {}", bad.path));
    }
    Ok(())
}

#[test]
fn e2e_dump_requests_sends_nothing() -> Result<(), String> {
    let output = run_loadtest([
        "--dump-requests",
        "3",
        "-u",
        "http://howlite-resources:8080",
    ])?;
    if !output.status.success() {
        return Err(failure(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    if lines.len() != 3 {
        return Err(failure(&output));
    }
    for line in lines {
        let mut parts = line.splitn(3, ' ');
        let (Some(method), Some(url), Some(body)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("Malformed line: {}", line));
        };
        if method != "POST" || body != EXPECTED_BODY {
            return Err(format!("Malformed line: {}", line));
        }
        let Some(path) = url.strip_prefix("http://howlite-resources:8080") else {
            return Err(format!("Unexpected host: {}", url));
        };
        if !is_token_path(path, 30) {
            return Err(format!("Unexpected path: {}", path));
        }
    }
    Ok(())
}

#[test]
fn e2e_rejects_invalid_target() -> Result<(), String> {
    let output = run_loadtest(["-u", "ftp://howlite-resources", "-d", "1s"])?;
    if output.status.success() {
        return Err("Expected a non-http target to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_rejects_zero_vus() -> Result<(), String> {
    let output = run_loadtest(["-c", "0", "-d", "1s"])?;
    if output.status.success() {
        return Err("Expected zero virtual users to be rejected".to_owned());
    }
    Ok(())
}
