//! `GET /health` — process health, uptime, and memory usage.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health report body. `status` is always `"ok"` when the process can
/// answer at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Fixed `"ok"`.
    pub status: String,
    /// Time the report was produced.
    pub timestamp: DateTime<Utc>,
    /// Seconds since process start.
    pub uptime_secs: u64,
    /// Process memory usage.
    pub memory: MemoryUsage,
}

/// Resident and virtual memory of the process, read from
/// `/proc/self/status`. Fields are null on platforms without procfs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryUsage {
    /// Resident set size in bytes.
    pub rss_bytes: Option<u64>,
    /// Virtual memory size in bytes.
    pub vm_bytes: Option<u64>,
}

/// Report process status, uptime, and memory usage.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        memory: read_memory_usage(),
    })
}

fn read_memory_usage() -> MemoryUsage {
    let status = std::fs::read_to_string("/proc/self/status").unwrap_or_default();
    MemoryUsage {
        rss_bytes: parse_kib_line(&status, "VmRSS:"),
        vm_bytes: parse_kib_line(&status, "VmSize:"),
    }
}

/// Extract a `kB` quantity from a `/proc/self/status` line, as bytes.
fn parse_kib_line(status: &str, prefix: &str) -> Option<u64> {
    status.lines().find_map(|line| {
        let rest = line.strip_prefix(prefix)?;
        let kib: u64 = rest.trim().strip_suffix("kB")?.trim().parse().ok()?;
        Some(kib * 1024)
    })
}
