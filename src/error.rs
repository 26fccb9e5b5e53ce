// Typed check failures so embedding callers can branch on kind

use std::fmt;

use thiserror::Error;

/// Which resource comparison failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceDimension {
    Cpu,
    Ram,
    Disk,
}

impl fmt::Display for ResourceDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceDimension::Cpu => write!(f, "cpu"),
            ResourceDimension::Ram => write!(f, "ram"),
            ResourceDimension::Disk => write!(f, "disk"),
        }
    }
}

/// Which network comparison failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkDimension {
    Download,
    Upload,
    Ping,
}

impl fmt::Display for NetworkDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkDimension::Download => write!(f, "download"),
            NetworkDimension::Upload => write!(f, "upload"),
            NetworkDimension::Ping => write!(f, "ping"),
        }
    }
}

/// Terminal failure for the current run. Nothing here is retried: the
/// first violation wins and aborts the remaining checks.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{}", resource_message(*dimension, *detected, *required))]
    ResourceInsufficient {
        dimension: ResourceDimension,
        detected: f64,
        required: f64,
    },

    #[error("{}", network_message(*dimension, *detected, *required))]
    NetworkInsufficient {
        dimension: NetworkDimension,
        detected: f64,
        required: f64,
    },

    /// The measurement collaborator could not select a server.
    #[error("speed test server selection failed: {0}")]
    ServerSelection(#[source] anyhow::Error),

    /// A transfer measurement itself failed (not a threshold violation).
    #[error("speed test measurement failed: {0}")]
    Measurement(#[source] anyhow::Error),

    /// The speed-measurement backend cannot be constructed at all.
    /// Resource checks can still run without it.
    #[error("network measurement capability unavailable: {0}")]
    CapabilityUnavailable(#[source] anyhow::Error),

    /// The OS resource query itself failed (not a threshold violation).
    #[error("host resource query failed: {0}")]
    Probe(#[source] anyhow::Error),
}

fn resource_message(dimension: ResourceDimension, detected: f64, required: f64) -> String {
    match dimension {
        ResourceDimension::Cpu => format!(
            "Insufficient CPU cores: {} detected, {} required.",
            detected as u32, required as u32
        ),
        ResourceDimension::Ram => format!(
            "Insufficient RAM: {detected:.2} GB detected, {required} GB required."
        ),
        ResourceDimension::Disk => format!(
            "Insufficient disk space: {detected:.2} GB free, {required} GB required."
        ),
    }
}

fn network_message(dimension: NetworkDimension, detected: f64, required: f64) -> String {
    match dimension {
        NetworkDimension::Download => format!(
            "Slow download speed: {detected:.2} Mbps, {required} Mbps recommended."
        ),
        NetworkDimension::Upload => format!(
            "Slow upload speed: {detected:.2} Mbps, {required} Mbps recommended."
        ),
        NetworkDimension::Ping => format!(
            "High latency detected: {detected:.2} ms, less than {required} ms recommended."
        ),
    }
}

impl CheckError {
    /// True for threshold violations (as opposed to measurement or
    /// capability failures).
    pub fn is_threshold_violation(&self) -> bool {
        matches!(
            self,
            CheckError::ResourceInsufficient { .. } | CheckError::NetworkInsufficient { .. }
        )
    }
}
