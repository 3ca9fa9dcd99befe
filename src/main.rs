//! Naholos - Ukrainian stress-aware TTS service
//!
//! Composition root: configuration, logging, device selection, asset
//! bootstrap, adapter wiring, optional telemetry worker and the HTTP server
//! with graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use naholos::application::ports::{Device, SynthesisModelPort};
use naholos::application::{OrchestratorConfig, SynthesisOrchestrator};
use naholos::config::{load_config, print_config};
use naholos::domain::stress::{StressDictionary, StressResolver};
use naholos::domain::voice::SpeakerTable;
use naholos::infrastructure::adapters::{
    HeuristicStressPredictor, HttpAssetFetcher, HttpAssetFetcherConfig, HttpModelClient,
    HttpModelClientConfig, HttpTelemetrySink, HttpTelemetrySinkConfig, WavEncoder,
};
// use naholos::infrastructure::adapters::{FakeModelClient, FakeModelClientConfig};
use naholos::infrastructure::assets::{AssetCache, AssetCacheConfig};
use naholos::infrastructure::http::{AppState, HttpServer, ServerConfig};
use naholos::infrastructure::telemetry::{
    TelemetryQueue, TelemetryWorker, TelemetryWorkerConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // load configuration (priority: env > config file > defaults)
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // initialize logging
    let log_filter = format!(
        "{},naholos={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Naholos - Ukrainian stress-aware TTS service");
    print_config(&config);

    // compute device: explicit override, else autodetect; chosen once here
    // and never re-selected per request
    let device = config
        .synthesis
        .device
        .as_deref()
        .and_then(Device::parse)
        .unwrap_or_else(Device::detect);
    tracing::info!(device = %device, "Compute device selected");

    // one-time asset bootstrap; fatal on any failure
    let fetcher = HttpAssetFetcher::new(HttpAssetFetcherConfig {
        timeout_secs: config.assets.download_timeout_secs,
    })
    .map_err(|e| anyhow::anyhow!("Failed to build asset fetcher: {}", e))?;
    let asset_cache = AssetCache::new(AssetCacheConfig {
        cache_dir: config.assets.cache_dir.clone(),
        release_url: config.assets.release_url.clone(),
    });
    let assets = asset_cache
        .ensure(&fetcher)
        .await
        .context("Asset bootstrap failed")?;

    // speaker embedding table, read-only from here on
    let speakers_json = tokio::fs::read_to_string(&assets.speakers)
        .await
        .with_context(|| format!("Failed to read {}", assets.speakers.display()))?;
    let speakers =
        SpeakerTable::from_json_str(&speakers_json).context("Failed to load speaker table")?;
    tracing::info!(
        voices = speakers.len(),
        dimension = speakers.dimension(),
        "Speaker table loaded"
    );

    // stress dictionary, loaded exactly once
    let dictionary = match &config.stress.dictionary_path {
        Some(path) => {
            let source = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            StressDictionary::from_tsv_str(&source).context("Failed to load stress dictionary")?
        }
        None => StressDictionary::bundled().context("Failed to load bundled dictionary")?,
    };
    tracing::info!(
        entries = dictionary.len(),
        version = dictionary.version().unwrap_or("unversioned"),
        "Stress dictionary loaded"
    );

    let resolver = StressResolver::new(Arc::new(dictionary))
        .with_predictor(Arc::new(HeuristicStressPredictor::new()));

    // synthesis backend client
    let model_config = HttpModelClientConfig::new(config.synthesis.model_url.clone())
        .with_timeout(config.synthesis.timeout_secs)
        .with_device(device);
    let model = Arc::new(
        HttpModelClient::new(model_config)
            .map_err(|e| anyhow::anyhow!("Failed to build model client: {}", e))?,
    );

    // // fake backend (for running without a model server; always returns a
    // // generated tone)
    // let model = Arc::new(FakeModelClient::new(FakeModelClientConfig::default()));

    if !model.health_check().await {
        tracing::warn!("Synthesis backend health check failed; requests may error");
    }

    let default_spec = config
        .audio
        .audio_spec()
        .context("Invalid audio format/subtype configuration")?;

    let mut orchestrator = SynthesisOrchestrator::new(
        OrchestratorConfig {
            text_limit: config.synthesis.text_limit,
            default_spec,
        },
        resolver,
        speakers,
        model,
        Arc::new(WavEncoder::new()),
    );

    // telemetry runs only when a delivery credential is configured
    let mut worker_handle = None;
    if config.telemetry.enabled() {
        let token = config.telemetry.token.clone().unwrap_or_default();
        let sink = HttpTelemetrySink::new(HttpTelemetrySinkConfig::new(
            config.telemetry.endpoint.clone(),
            token,
        ))
        .map_err(|e| anyhow::anyhow!("Failed to build telemetry sink: {}", e))?;

        let queue = Arc::new(TelemetryQueue::new());
        let worker = TelemetryWorker::new(
            TelemetryWorkerConfig {
                flush_interval: std::time::Duration::from_secs(
                    config.telemetry.flush_interval_secs,
                ),
            },
            queue.clone(),
            Arc::new(sink),
        );
        worker_handle = Some(worker.spawn());
        orchestrator = orchestrator.with_telemetry(queue);
    }

    // HTTP server
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(Arc::new(orchestrator));
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    // stop the flush worker after the server drains; one final flush runs
    if let Some(handle) = worker_handle {
        handle.shutdown().await;
    }

    tracing::info!("Server shutdown complete");

    Ok(())
}
