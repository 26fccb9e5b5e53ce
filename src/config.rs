use serde::Deserialize;

/// Minimum/maximum acceptable values the checkers compare against.
/// Immutable for the whole run; tests construct their own instead of
/// relying on `Default`.
#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    pub min_cores: u32,
    pub min_ram_gb: f64,
    pub min_disk_gb: f64,
    pub min_download_mbps: f64,
    pub min_upload_mbps: f64,
    /// Upper bound: the run fails when measured ping exceeds this.
    pub max_ping_ms: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_cores: 4,
            min_ram_gb: 16.0,
            min_disk_gb: 300.0,
            min_download_mbps: 40.0,
            min_upload_mbps: 10.0,
            max_ping_ms: 250.0,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.min_cores > 0,
            "min_cores must be > 0, got {}",
            self.min_cores
        );
        anyhow::ensure!(
            self.min_ram_gb > 0.0,
            "min_ram_gb must be > 0, got {}",
            self.min_ram_gb
        );
        anyhow::ensure!(
            self.min_disk_gb > 0.0,
            "min_disk_gb must be > 0, got {}",
            self.min_disk_gb
        );
        anyhow::ensure!(
            self.min_download_mbps > 0.0,
            "min_download_mbps must be > 0, got {}",
            self.min_download_mbps
        );
        anyhow::ensure!(
            self.min_upload_mbps > 0.0,
            "min_upload_mbps must be > 0, got {}",
            self.min_upload_mbps
        );
        anyhow::ensure!(
            self.max_ping_ms > 0.0,
            "max_ping_ms must be > 0, got {}",
            self.max_ping_ms
        );
        Ok(())
    }
}
