// # tudnsd - Traefik → UniFi DNS Daemon
//
// Thin integration layer: reads configuration, wires the UniFi clients, the
// Traefik route source and the interface address source into a
// `tudns_core::Reconciler`, and runs it on a `Scheduler` until a shutdown
// signal arrives. All sync logic lives in tudns-core.
//
// ## Configuration
//
// The base configuration is a JSON `SyncConfig` file:
//
// - `TUDNS_CONFIG_FILE`: Path to the JSON configuration file
//
// Individual settings may be overridden from the environment:
//
// - `TUDNS_UPDATE_INTERVAL`: Interval between passes (e.g., "5m", "1h30m")
// - `TUDNS_TRAEFIK_API_URL`: Traefik API base URL
// - `TUDNS_INSECURE_SKIP_VERIFY_TLS`: Skip TLS verification (true/false)
// - `TUDNS_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Example
//
// ```json
// {
//   "devices": [
//     {"host": "192.168.1.1", "username": "dns", "password": "...",
//      "pattern": "\\.home\\.lan$", "insecureSkipVerifyTLS": true}
//   ],
//   "updateInterval": "5m",
//   "traefikApiUrl": "http://traefik:8080"
// }
// ```
//
// ```bash
// export TUDNS_CONFIG_FILE=/etc/tudns/config.json
// tudnsd
// ```

use anyhow::{Context, Result};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use tudns_core::{DeviceRouter, Reconciler, Scheduler, SyncConfig};
use tudns_ip_interface::InterfaceAddressSource;
use tudns_provider_unifi::UniFiFactory;
use tudns_routes_traefik::TraefikRouteSource;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// How long a running pass may take to finish after a shutdown signal
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum TudnsExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<TudnsExitCode> for ExitCode {
    fn from(code: TudnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Daemon configuration
#[derive(Debug)]
struct DaemonConfig {
    sync: SyncConfig,
    log_level: String,
}

impl DaemonConfig {
    /// Load configuration from the process environment
    fn from_env() -> Result<Self> {
        Self::load(|key| env::var(key).ok())
    }

    /// Load configuration through a variable lookup
    fn load(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut sync = match var("TUDNS_CONFIG_FILE") {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {}", path))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse config file {}", path))?
            }
            None => SyncConfig::default(),
        };

        if let Some(interval) = var("TUDNS_UPDATE_INTERVAL") {
            sync.update_interval = interval;
        }
        if let Some(url) = var("TUDNS_TRAEFIK_API_URL") {
            sync.traefik_api_url = url;
        }
        if let Some(flag) = var("TUDNS_INSECURE_SKIP_VERIFY_TLS") {
            sync.insecure_skip_verify_tls = parse_flag(&flag).with_context(|| {
                format!("TUDNS_INSECURE_SKIP_VERIFY_TLS '{}' is not a boolean", flag)
            })?;
        }

        Ok(Self {
            sync,
            log_level: var("TUDNS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.sync.devices.is_empty() {
            anyhow::bail!(
                "At least one device is required. \
                Add a \"devices\" list to the file named by TUDNS_CONFIG_FILE"
            );
        }

        self.sync.validate()?;
        self.level()?;
        Ok(())
    }

    fn level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "TUDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => anyhow::bail!("expected true or false, got '{}'", other),
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match DaemonConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return TudnsExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return TudnsExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = config.level().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return TudnsExitCode::ConfigError.into();
    }

    info!("Starting tudnsd daemon");
    info!(
        "Configuration loaded: {} device(s), interval {}",
        config.sync.devices.len(),
        config.sync.update_interval
    );
    if config.sync.insecure_skip_verify_tls {
        warn!("TLS verification is disabled for all devices and the Traefik API");
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return TudnsExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        let (reconciler, interval) = match build(&config.sync) {
            Ok(parts) => parts,
            Err(e) => {
                error!("Startup error: {:#}", e);
                return TudnsExitCode::ConfigError;
            }
        };

        match run_daemon(reconciler, interval).await {
            Ok(()) => TudnsExitCode::CleanShutdown,
            Err(e) => {
                error!("Daemon error: {:#}", e);
                TudnsExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Construct the reconciler and pass interval from validated configuration
fn build(config: &SyncConfig) -> Result<(Arc<Reconciler>, Duration)> {
    let interval = config.interval()?;

    let router = DeviceRouter::from_config(
        &config.devices,
        &UniFiFactory,
        config.insecure_skip_verify_tls,
    )
    .context("failed to create DNS clients")?;

    let routes = TraefikRouteSource::new(
        &config.traefik_api_url,
        config.marker.clone(),
        config.insecure_skip_verify_tls,
    )
    .context("failed to create Traefik client")?;

    let reconciler = Reconciler::new(
        Box::new(InterfaceAddressSource::new()),
        Box::new(routes),
        router,
    );

    Ok((Arc::new(reconciler), interval))
}

/// Run passes until a shutdown signal arrives
async fn run_daemon(reconciler: Arc<Reconciler>, interval: Duration) -> Result<()> {
    let cancel = CancellationToken::new();
    let scheduler = Scheduler::start(reconciler, interval, cancel.clone()).await;

    info!("Daemon initialized successfully");

    let signal = wait_for_shutdown().await?;
    info!("Received shutdown signal: {}", signal);
    info!("Shutting down daemon");

    scheduler.cancel();
    tokio::time::timeout(SHUTDOWN_TIMEOUT, scheduler.join())
        .await
        .map_err(|_| anyhow::anyhow!("Shutdown timeout after {:?}", SHUTDOWN_TIMEOUT))?;

    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
