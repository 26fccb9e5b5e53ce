// Entry sequencer: banner, resource phase, network phase, elapsed time

use std::io::Write;
use std::time::Instant;

use crate::config::Thresholds;
use crate::error::CheckError;
use crate::models::{NetworkMeasurement, ResourceSnapshot};
use crate::network_check;
use crate::resource_check;
use crate::speedtest::SpeedtestProvider;
use crate::sysinfo_repo::ResourceProbe;
use crate::version;

/// Result of a full preflight run, for callers embedding this as a
/// library (the binary maps it to an exit code).
#[derive(Debug)]
pub enum RunOutcome {
    Passed {
        resources: ResourceSnapshot,
        network: NetworkMeasurement,
    },
    Failed(CheckError),
}

impl RunOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, RunOutcome::Passed { .. })
    }
}

/// Runs the whole check sequence. The network phase never runs when the
/// resource phase fails; either failure is reported as a single error
/// line; the elapsed-time line is printed on every path.
///
/// `provider` is the outcome of constructing the measurement backend:
/// when the capability is unavailable the resource phase still runs and
/// the capability error is reported in its place.
pub async fn run<R, P, W>(
    probe: &R,
    provider: Result<P, CheckError>,
    thresholds: &Thresholds,
    out: &mut W,
) -> RunOutcome
where
    R: ResourceProbe,
    P: SpeedtestProvider,
    W: Write,
{
    let started = Instant::now();

    writeln!(out, "{} v{}", version::NAME, version::VERSION).ok();
    match probe.host_info().await {
        Ok(info) => {
            writeln!(out, "Platform: {} {}\n", info.os_name, info.os_version).ok();
        }
        Err(e) => {
            tracing::warn!(error = %e, "platform identification unavailable");
            writeln!(out).ok();
        }
    }

    let result = check_phases(probe, provider, thresholds, out).await;
    let outcome = match result {
        Ok((resources, network)) => RunOutcome::Passed { resources, network },
        Err(e) => {
            writeln!(out, "Error: {e}").ok();
            RunOutcome::Failed(e)
        }
    };

    writeln!(
        out,
        "\nCompleted in {:.2} seconds.",
        started.elapsed().as_secs_f64()
    )
    .ok();
    outcome
}

async fn check_phases<R, P, W>(
    probe: &R,
    provider: Result<P, CheckError>,
    thresholds: &Thresholds,
    out: &mut W,
) -> Result<(ResourceSnapshot, NetworkMeasurement), CheckError>
where
    R: ResourceProbe,
    P: SpeedtestProvider,
    W: Write,
{
    let resources = resource_check::check_system_requirements(probe, thresholds, out).await?;
    let provider = provider?;
    let network = network_check::run_speed_test(&provider, thresholds, out).await?;
    Ok((resources, network))
}
