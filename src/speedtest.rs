// Network speed-measurement collaborator

use std::time::{Duration, Instant};

use futures_util::StreamExt;
use serde::Deserialize;
use tracing::debug;

use crate::error::CheckError;
use crate::models::ServerInfo;

/// Measurement backend seam. Each method performs a single attempt; there
/// is no retry on transient failures. Alternate backends (or mocks in
/// tests) substitute here without touching the checkers.
pub trait SpeedtestProvider {
    /// Discover and select the best-available measurement server.
    fn select_best_server(
        &self,
    ) -> impl Future<Output = Result<ServerInfo, CheckError>> + Send;

    /// Download throughput sample, bytes per second.
    fn measure_download(&self) -> impl Future<Output = Result<f64, CheckError>> + Send;

    /// Upload throughput sample, bytes per second.
    fn measure_upload(&self) -> impl Future<Output = Result<f64, CheckError>> + Send;

    /// Round-trip latency sample, milliseconds.
    fn measure_ping(&self) -> impl Future<Output = Result<f64, CheckError>> + Send;
}

impl<T: SpeedtestProvider + Sync> SpeedtestProvider for &T {
    async fn select_best_server(&self) -> Result<ServerInfo, CheckError> {
        (**self).select_best_server().await
    }

    async fn measure_download(&self) -> Result<f64, CheckError> {
        (**self).measure_download().await
    }

    async fn measure_upload(&self) -> Result<f64, CheckError> {
        (**self).measure_upload().await
    }

    async fn measure_ping(&self) -> Result<f64, CheckError> {
        (**self).measure_ping().await
    }
}

const BASE_URL: &str = "https://speed.cloudflare.com";
const DOWNLOAD_BYTES: u64 = 50_000_000;
const UPLOAD_BYTES: usize = 20_000_000;
const PING_SAMPLES: u32 = 8;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Measurement backend over speed.cloudflare.com. Anycast routes each
/// request to the nearest edge, so the reachable edge is the selected
/// server; `/meta` reports its identity.
pub struct CloudflareSpeedtest {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaResponse {
    colo: Option<String>,
    city: Option<String>,
    country: Option<String>,
}

impl CloudflareSpeedtest {
    /// Constructor-time capability check: a host without working TLS/HTTP
    /// tooling fails here, before any measurement runs.
    pub fn connect() -> Result<Self, CheckError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CheckError::CapabilityUnavailable(e.into()))?;
        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    async fn timed_download(&self, bytes: u64) -> anyhow::Result<(u64, Duration)> {
        let url = format!("{}/__down?bytes={}", self.base_url, bytes);
        let started = Instant::now();
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let mut received: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            received += chunk?.len() as u64;
        }
        Ok((received, started.elapsed()))
    }
}

impl SpeedtestProvider for CloudflareSpeedtest {
    async fn select_best_server(&self) -> Result<ServerInfo, CheckError> {
        let url = format!("{}/meta", self.base_url);
        let meta: MetaResponse = async {
            let response = self.client.get(&url).send().await?.error_for_status()?;
            Ok::<_, anyhow::Error>(response.json().await?)
        }
        .await
        .map_err(CheckError::ServerSelection)?;

        let name = meta
            .city
            .or(meta.colo)
            .unwrap_or_else(|| "unknown".into());
        let country = meta.country.unwrap_or_else(|| "unknown".into());
        debug!(server = %name, country = %country, "selected measurement server");
        Ok(ServerInfo {
            name,
            sponsor: "Cloudflare".into(),
            country,
        })
    }

    async fn measure_download(&self) -> Result<f64, CheckError> {
        let (received, elapsed) = self
            .timed_download(DOWNLOAD_BYTES)
            .await
            .map_err(CheckError::Measurement)?;
        if received == 0 || elapsed.is_zero() {
            return Err(CheckError::Measurement(anyhow::anyhow!(
                "download transfer returned no data"
            )));
        }
        let rate = received as f64 / elapsed.as_secs_f64();
        debug!(bytes = received, secs = elapsed.as_secs_f64(), rate, "download sample");
        Ok(rate)
    }

    async fn measure_upload(&self) -> Result<f64, CheckError> {
        let url = format!("{}/__up", self.base_url);
        let payload = bytes::Bytes::from(vec![0u8; UPLOAD_BYTES]);
        let started = Instant::now();
        let result = async {
            self.client
                .post(&url)
                .body(payload)
                .send()
                .await?
                .error_for_status()?;
            Ok::<_, anyhow::Error>(())
        }
        .await;
        result.map_err(CheckError::Measurement)?;
        let elapsed = started.elapsed();
        if elapsed.is_zero() {
            return Err(CheckError::Measurement(anyhow::anyhow!(
                "upload transfer finished with zero elapsed time"
            )));
        }
        let rate = UPLOAD_BYTES as f64 / elapsed.as_secs_f64();
        debug!(bytes = UPLOAD_BYTES, secs = elapsed.as_secs_f64(), rate, "upload sample");
        Ok(rate)
    }

    async fn measure_ping(&self) -> Result<f64, CheckError> {
        // Minimum of several zero-byte requests; the minimum is the best
        // estimate of path latency without transfer noise.
        let mut best: Option<f64> = None;
        for _ in 0..PING_SAMPLES {
            let (_, elapsed) = self
                .timed_download(0)
                .await
                .map_err(CheckError::Measurement)?;
            let ms = elapsed.as_secs_f64() * 1000.0;
            best = Some(match best {
                Some(b) => b.min(ms),
                None => ms,
            });
        }
        let ping = best.unwrap_or(f64::MAX);
        debug!(samples = PING_SAMPLES, ping_ms = ping, "ping sample");
        Ok(ping)
    }
}
