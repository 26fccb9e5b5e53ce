// Network Checker: server selection, then download -> upload -> ping, fail-fast

use std::io::Write;

use crate::config::Thresholds;
use crate::error::{CheckError, NetworkDimension};
use crate::models::{NetworkMeasurement, bytes_per_sec_to_mbps};
use crate::speedtest::SpeedtestProvider;

/// Runs the three network sub-checks against the collaborator's selected
/// server. Comparisons use the raw converted values; rounding to two
/// decimals is display-only. A failing step prevents the later
/// measurements from ever running.
pub async fn run_speed_test<P: SpeedtestProvider, W: Write>(
    provider: &P,
    thresholds: &Thresholds,
    out: &mut W,
) -> Result<NetworkMeasurement, CheckError> {
    writeln!(out, "\nInitializing speed test...").ok();
    let server = provider.select_best_server().await?;
    writeln!(
        out,
        "Using server: {} ({}, {})",
        server.sponsor, server.name, server.country
    )
    .ok();

    writeln!(out, "Testing download speed...").ok();
    let download_bytes_per_sec = provider.measure_download().await?;
    let download_mbps = bytes_per_sec_to_mbps(download_bytes_per_sec);
    if download_mbps < thresholds.min_download_mbps {
        return Err(CheckError::NetworkInsufficient {
            dimension: NetworkDimension::Download,
            detected: download_mbps,
            required: thresholds.min_download_mbps,
        });
    }

    writeln!(out, "Testing upload speed...").ok();
    let upload_bytes_per_sec = provider.measure_upload().await?;
    let upload_mbps = bytes_per_sec_to_mbps(upload_bytes_per_sec);
    if upload_mbps < thresholds.min_upload_mbps {
        return Err(CheckError::NetworkInsufficient {
            dimension: NetworkDimension::Upload,
            detected: upload_mbps,
            required: thresholds.min_upload_mbps,
        });
    }

    writeln!(out, "Testing ping...").ok();
    let ping_ms = provider.measure_ping().await?;
    // Upper-bound check: equality passes, only "too high" fails.
    if ping_ms > thresholds.max_ping_ms {
        return Err(CheckError::NetworkInsufficient {
            dimension: NetworkDimension::Ping,
            detected: ping_ms,
            required: thresholds.max_ping_ms,
        });
    }

    writeln!(out, "Internet checks passed.").ok();
    writeln!(out, "\n=== Internet Speed Test Results ===").ok();
    writeln!(out, "Ping (latency): {ping_ms:.2} ms").ok();
    writeln!(out, "Download speed: {download_mbps:.2} Mbps").ok();
    writeln!(out, "Upload speed:   {upload_mbps:.2} Mbps").ok();
    writeln!(out, "===================================").ok();

    Ok(NetworkMeasurement {
        server,
        download_bytes_per_sec,
        upload_bytes_per_sec,
        ping_ms,
    })
}
