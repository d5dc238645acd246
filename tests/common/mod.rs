//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use dns_failover::config::{FailoverConfig, RecordConfig};
use dns_failover::controller::Controller;
use dns_failover::dns::RecordType;

/// A request as seen by a mock upstream.
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Requests received by a mock upstream, in arrival order.
pub type RequestLog = Arc<Mutex<Vec<MockRequest>>>;

/// Start a programmable mock upstream on an ephemeral port.
///
/// Every request is recorded, then answered with the handler's status and JSON body.
pub async fn start_programmable_upstream<F>(handler: F) -> (SocketAddr, RequestLog)
where
    F: Fn(&MockRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::default();
    let handler = Arc::new(handler);

    let requests = log.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    let requests = requests.clone();
                    tokio::spawn(async move {
                        serve_one(socket, handler.as_ref(), &requests).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

/// Address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn serve_one<F>(mut socket: TcpStream, handler: &F, log: &RequestLog)
where
    F: Fn(&MockRequest) -> (u16, String),
{
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    let (status, body) = handler(&request);
    log.lock().unwrap().push(request);

    let status_text = match status {
        200 => "200 OK",
        400 => "400 Bad Request",
        403 => "403 Forbidden",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Option<MockRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(MockRequest {
        method,
        path,
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    })
}

/// Health check service payload with one observation per status.
pub fn observations_body(statuses: &[&str]) -> String {
    let observations: Vec<_> = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            serde_json::json!({
                "Region": format!("region-{i}"),
                "IPAddress": format!("15.177.0.{i}"),
                "StatusReport": {"Status": status, "CheckedTime": "2024-05-01T12:00:00Z"}
            })
        })
        .collect();
    serde_json::json!({ "HealthCheckObservations": observations }).to_string()
}

pub fn accepted_body() -> String {
    serde_json::json!({
        "ChangeInfo": {"Id": "/change/C2682N5HXP0BZ4", "Status": "PENDING", "SubmittedAt": "2024-05-01T12:00:01Z"}
    })
    .to_string()
}

/// A valid configuration pointing at the given upstreams.
pub fn config(health: SocketAddr, dns: SocketAddr) -> FailoverConfig {
    let mut config = FailoverConfig::default();
    config.health_check.id = "c136e72f-472e-4b71-890c-b95b57583097".into();
    config.health_check.endpoint = format!("http://{}", health);
    config.dns.endpoint = format!("http://{}", dns);
    config.dns.hosted_zone_id = "Z0123456789".into();
    config.record = RecordConfig {
        name: "app.example.com.".into(),
        record_type: RecordType::A,
        ttl: 60,
        primary_address: "52.66.201.244".into(),
        secondary_address: "15.207.109.242".into(),
        primary_set_identifier: "primary".into(),
        secondary_set_identifier: "secondary".into(),
    };
    config.controller.cycle_timeout_secs = 5;
    config
}

/// Controller over plain HTTP, bypassing any proxy settings of the environment.
pub fn controller(config: &FailoverConfig) -> Controller {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    Controller::with_http_client(config, client)
}
