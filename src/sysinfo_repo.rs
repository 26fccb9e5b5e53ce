// Host resource reads via sysinfo

use crate::models::{HostInfo, ResourceSnapshot};
use std::sync::Arc;
use sysinfo::{Disks, System};
use tracing::instrument;

/// OS resource query seam. The real implementation reads the host via
/// sysinfo; tests substitute fixed snapshots.
pub trait ResourceProbe {
    fn resource_snapshot(
        &self,
    ) -> impl Future<Output = anyhow::Result<ResourceSnapshot>> + Send;

    fn host_info(&self) -> impl Future<Output = anyhow::Result<HostInfo>> + Send;
}

pub struct SysinfoRepo {
    sys: Arc<std::sync::Mutex<System>>,
    disks: Arc<std::sync::Mutex<Disks>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let disks = Disks::new_with_refreshed_list();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            disks: Arc::new(std::sync::Mutex::new(disks)),
        }
    }
}

impl ResourceProbe for SysinfoRepo {
    /// One-shot read of logical core count, total RAM, and free space on
    /// the root filesystem.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "resource_snapshot"))]
    async fn resource_snapshot(&self) -> anyhow::Result<ResourceSnapshot> {
        let sys = self.sys.clone();
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();
            let cpu_cores = sys.cpus().len() as u32;
            let ram_bytes = sys.total_memory();

            let mut disks_guard = disks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
            disks_guard.refresh(false);
            let disk_free_bytes = root_free_bytes(&disks_guard)?;

            Ok(ResourceSnapshot {
                cpu_cores,
                ram_bytes,
                disk_free_bytes,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// OS name and release for the banner line.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "host_info"))]
    async fn host_info(&self) -> anyhow::Result<HostInfo> {
        tokio::task::spawn_blocking(move || {
            let os_name = System::name().unwrap_or_else(|| std::env::consts::OS.into());
            let os_version = System::os_version().unwrap_or_default();
            Ok(HostInfo {
                os_name,
                os_version,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}

/// Free bytes on the primary filesystem: the partition mounted at `/`,
/// falling back to the largest partition on hosts without a `/` mount
/// (e.g. Windows).
fn root_free_bytes(disks: &Disks) -> anyhow::Result<u64> {
    let list = disks.list();
    if let Some(root) = list
        .iter()
        .find(|d| d.mount_point() == std::path::Path::new("/"))
    {
        return Ok(root.available_space());
    }
    list.iter()
        .max_by_key(|d| d.total_space())
        .map(|d| d.available_space())
        .ok_or_else(|| anyhow::anyhow!("no mounted filesystems reported"))
}
