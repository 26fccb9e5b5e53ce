use preflight::*;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let thresholds = config::Thresholds::default();
    if let Err(e) = thresholds.validate() {
        tracing::error!(error = %e, "invalid thresholds");
        return ExitCode::FAILURE;
    }

    let repo = sysinfo_repo::SysinfoRepo::new();
    let provider = speedtest::CloudflareSpeedtest::connect();

    let mut stdout = std::io::stdout();
    let outcome = runner::run(&repo, provider, &thresholds, &mut stdout).await;

    if outcome.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
