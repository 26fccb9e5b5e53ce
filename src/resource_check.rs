// Resource Checker: CPU -> RAM -> Disk, fail-fast

use std::io::Write;

use crate::config::Thresholds;
use crate::error::{CheckError, ResourceDimension};
use crate::models::{ResourceSnapshot, bytes_to_gb};
use crate::sysinfo_repo::ResourceProbe;

/// Pure comparison core. Checks run in the fixed order CPU -> RAM -> Disk
/// and the first violation aborts the rest; callers depend on receiving
/// the first blocking reason.
pub fn evaluate(snapshot: &ResourceSnapshot, thresholds: &Thresholds) -> Result<(), CheckError> {
    if snapshot.cpu_cores < thresholds.min_cores {
        return Err(CheckError::ResourceInsufficient {
            dimension: ResourceDimension::Cpu,
            detected: snapshot.cpu_cores as f64,
            required: thresholds.min_cores as f64,
        });
    }

    let ram_gb = bytes_to_gb(snapshot.ram_bytes);
    if ram_gb < thresholds.min_ram_gb {
        return Err(CheckError::ResourceInsufficient {
            dimension: ResourceDimension::Ram,
            detected: ram_gb,
            required: thresholds.min_ram_gb,
        });
    }

    let disk_free_gb = bytes_to_gb(snapshot.disk_free_bytes);
    if disk_free_gb < thresholds.min_disk_gb {
        return Err(CheckError::ResourceInsufficient {
            dimension: ResourceDimension::Disk,
            detected: disk_free_gb,
            required: thresholds.min_disk_gb,
        });
    }

    Ok(())
}

/// Queries the host once, runs the comparisons, and narrates the outcome.
pub async fn check_system_requirements<P: ResourceProbe, W: Write>(
    probe: &P,
    thresholds: &Thresholds,
    out: &mut W,
) -> Result<ResourceSnapshot, CheckError> {
    writeln!(out, "Checking system resources...").ok();
    let snapshot = probe
        .resource_snapshot()
        .await
        .map_err(CheckError::Probe)?;
    evaluate(&snapshot, thresholds)?;

    writeln!(out, "System resource check passed.").ok();
    writeln!(
        out,
        "  Cores: {}, RAM: {:.2} GB, Free disk: {:.2} GB",
        snapshot.cpu_cores,
        bytes_to_gb(snapshot.ram_bytes),
        bytes_to_gb(snapshot.disk_free_bytes)
    )
    .ok();
    Ok(snapshot)
}
