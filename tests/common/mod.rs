// Shared test helpers: fixed probes and a recording mock speedtest

#![allow(dead_code)]

use std::sync::Mutex;

use preflight::config::Thresholds;
use preflight::error::CheckError;
use preflight::models::{HostInfo, ResourceSnapshot, ServerInfo};
use preflight::speedtest::SpeedtestProvider;
use preflight::sysinfo_repo::ResourceProbe;

pub const GB: u64 = 1024 * 1024 * 1024;

pub fn test_thresholds() -> Thresholds {
    Thresholds {
        min_cores: 4,
        min_ram_gb: 16.0,
        min_disk_gb: 300.0,
        min_download_mbps: 40.0,
        min_upload_mbps: 10.0,
        max_ping_ms: 250.0,
    }
}

pub fn snapshot(cores: u32, ram_gb: u64, disk_gb: u64) -> ResourceSnapshot {
    ResourceSnapshot {
        cpu_cores: cores,
        ram_bytes: ram_gb * GB,
        disk_free_bytes: disk_gb * GB,
    }
}

/// Resource probe returning a fixed snapshot instead of reading the OS.
pub struct FixedProbe {
    pub snapshot: ResourceSnapshot,
}

impl ResourceProbe for FixedProbe {
    async fn resource_snapshot(&self) -> anyhow::Result<ResourceSnapshot> {
        Ok(self.snapshot.clone())
    }

    async fn host_info(&self) -> anyhow::Result<HostInfo> {
        Ok(HostInfo {
            os_name: "TestOS".into(),
            os_version: "1.0".into(),
        })
    }
}

/// Mock measurement backend with fixed samples. Records which operations
/// ran so tests can assert fail-fast ordering.
pub struct MockSpeedtest {
    pub download_bytes_per_sec: f64,
    pub upload_bytes_per_sec: f64,
    pub ping_ms: f64,
    pub fail_server_selection: bool,
    pub calls: Mutex<Vec<&'static str>>,
}

impl MockSpeedtest {
    pub fn new(download_mbps: f64, upload_mbps: f64, ping_ms: f64) -> Self {
        Self {
            download_bytes_per_sec: download_mbps * 1_000_000.0,
            upload_bytes_per_sec: upload_mbps * 1_000_000.0,
            ping_ms,
            fail_server_selection: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl SpeedtestProvider for MockSpeedtest {
    async fn select_best_server(&self) -> Result<ServerInfo, CheckError> {
        self.calls.lock().unwrap().push("server");
        if self.fail_server_selection {
            return Err(CheckError::ServerSelection(anyhow::anyhow!(
                "no reachable server"
            )));
        }
        Ok(ServerInfo {
            name: "Amsterdam".into(),
            sponsor: "TestNet".into(),
            country: "NL".into(),
        })
    }

    async fn measure_download(&self) -> Result<f64, CheckError> {
        self.calls.lock().unwrap().push("download");
        Ok(self.download_bytes_per_sec)
    }

    async fn measure_upload(&self) -> Result<f64, CheckError> {
        self.calls.lock().unwrap().push("upload");
        Ok(self.upload_bytes_per_sec)
    }

    async fn measure_ping(&self) -> Result<f64, CheckError> {
        self.calls.lock().unwrap().push("ping");
        Ok(self.ping_ms)
    }
}
