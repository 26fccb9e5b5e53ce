// Transient measurement models and unit conversions

use serde::{Deserialize, Serialize};

/// One-time read of host CPU/RAM/disk state. Read exactly once per run,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSnapshot {
    pub cpu_cores: u32,
    pub ram_bytes: u64,
    pub disk_free_bytes: u64,
}

/// OS identity for the informational banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    pub os_name: String,
    pub os_version: String,
}

/// Identity of the measurement server the collaborator selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub name: String,
    pub sponsor: String,
    pub country: String,
}

/// One-time set of download/upload/latency samples plus the server used
/// to obtain them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMeasurement {
    pub server: ServerInfo,
    pub download_bytes_per_sec: f64,
    pub upload_bytes_per_sec: f64,
    pub ping_ms: f64,
}

const BYTES_PER_GB: f64 = (1024u64 * 1024 * 1024) as f64;

/// Binary-unit gigabytes (b / 1024^3). Raw value; round only for display.
pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

/// Decimal-unit megabits-equivalent throughput (B/s / 1_000_000).
/// Raw value; round only for display.
pub fn bytes_per_sec_to_mbps(bytes_per_sec: f64) -> f64 {
    bytes_per_sec / 1_000_000.0
}
