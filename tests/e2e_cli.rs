
use std::fs;

use tempfile::tempdir;

use support_cli::{describe, run_benchload, spawn_http_server};

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn e2e_get_run_reports_totals() -> Result<(), String> {
    let (url, server) = spawn_http_server("200 OK")?;
    let output = run_benchload([url.as_str(), "5", "--no-color"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stdout = stdout_of(&output);
    for expected in [
        "Total Requests: 5",
        "Successful Requests: 5",
        "Failed Requests: 0",
        "Average response time:",
        "Chart: Response time (ms) per 1 requests",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("missing '{}'\n{}", expected, describe(&output)));
        }
    }
    if stdout.contains("Failed requests log:") || stdout.contains('\u{1b}') {
        return Err(format!("unexpected output\n{}", describe(&output)));
    }

    let seen = server.seen()?;
    if seen.len() != 5 || seen.iter().any(|request| request.method != "GET") {
        return Err(format!("expected 5 GETs, got {:?}", seen));
    }
    Ok(())
}

#[test]
fn e2e_single_payload_is_reused() -> Result<(), String> {
    let (url, server) = spawn_http_server("200 OK")?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    fs::write(dir.path().join("user.json"), br#"{"user":"a"}"#)
        .map_err(|err| format!("write payload failed: {}", err))?;
    let folder = dir.path().to_string_lossy().into_owned();

    let output = run_benchload([url.as_str(), "10", folder.as_str(), "--no-color"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let seen = server.seen()?;
    if seen.len() != 10 {
        return Err(format!("expected 10 requests, got {}", seen.len()));
    }
    if seen
        .iter()
        .any(|request| request.method != "POST" || request.body != br#"{"user":"a"}"#)
    {
        return Err(format!("expected identical POSTs, got {:?}", seen));
    }
    if seen.iter().any(|request| request.authorization.is_some()) {
        return Err("folder must not be sent as a token".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_payloads_cover_leading_indices_then_get() -> Result<(), String> {
    let (url, server) = spawn_http_server("200 OK")?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    for name in ["a.json", "b.json", "c.json"] {
        fs::write(dir.path().join(name), format!("{{\"file\":\"{}\"}}", name))
            .map_err(|err| format!("write payload failed: {}", err))?;
    }
    let folder = dir.path().to_string_lossy().into_owned();

    let output = run_benchload([
        url.as_str(),
        "5",
        "secret",
        folder.as_str(),
        "--mode",
        "windowed",
        "--window-size",
        "1",
        "--no-color",
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let seen = server.seen()?;
    let posts = seen.iter().filter(|request| request.method == "POST").count();
    let gets = seen.iter().filter(|request| request.method == "GET").count();
    if posts != 3 || gets != 2 {
        return Err(format!("expected 3 POSTs and 2 GETs, got {:?}", seen));
    }
    let bodies: Vec<String> = seen
        .iter()
        .filter(|request| request.method == "POST")
        .map(|request| String::from_utf8_lossy(&request.body).into_owned())
        .collect();
    if bodies != ["{\"file\":\"a.json\"}", "{\"file\":\"b.json\"}", "{\"file\":\"c.json\"}"] {
        return Err(format!("payloads out of order: {:?}", bodies));
    }
    if seen
        .iter()
        .any(|request| request.authorization.as_deref() != Some("Bearer secret"))
    {
        return Err(format!("expected bearer auth on every request: {:?}", seen));
    }
    Ok(())
}

#[test]
fn e2e_server_errors_are_listed_once() -> Result<(), String> {
    let (url, _server) = spawn_http_server("500 Internal Server Error")?;
    let output = run_benchload([url.as_str(), "4", "--mode", "concurrent", "--no-color"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stdout = stdout_of(&output);
    if !stdout.contains("Failed Requests: 4") || !stdout.contains("Successful Requests: 0") {
        return Err(describe(&output));
    }
    if stdout
        .matches("Failed request reason: InternalServerError")
        .count()
        != 1
    {
        return Err(format!("reason should appear once\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_bandwidth_chart_is_optional() -> Result<(), String> {
    let (url, _server) = spawn_http_server("200 OK")?;
    let output = run_benchload([url.as_str(), "3", "--bandwidth", "--no-color"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    if !stdout_of(&output).contains("Chart: Bandwidth (MB) per 1 requests") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_invalid_url_is_rejected() -> Result<(), String> {
    let output = run_benchload(["not-a-url", "5"])?;
    if output.status.success() {
        return Err(describe(&output));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("not-a-url") || !stderr.contains("Usage") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_zero_requests_is_rejected() -> Result<(), String> {
    let output = run_benchload(["http://127.0.0.1:9/api", "0"])?;
    if output.status.success() {
        return Err(describe(&output));
    }
    if !String::from_utf8_lossy(&output.stderr).contains("'0'") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_empty_payload_folder_is_fatal() -> Result<(), String> {
    let (url, server) = spawn_http_server("200 OK")?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    fs::write(dir.path().join("notes.txt"), b"not json")
        .map_err(|err| format!("write file failed: {}", err))?;
    let folder = dir.path().to_string_lossy().into_owned();

    let output = run_benchload([url.as_str(), "2", "", folder.as_str()])?;
    if output.status.success() {
        return Err(describe(&output));
    }
    if !String::from_utf8_lossy(&output.stderr).contains("No JSON files found") {
        return Err(describe(&output));
    }
    if !server.seen()?.is_empty() {
        return Err("no request should be sent".to_owned());
    }
    Ok(())
}
