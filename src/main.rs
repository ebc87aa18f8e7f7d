//! Composition root: loads configuration, establishes the cluster and
//! broker connections, starts the per-kind controllers and the orphan
//! collector, and drives graceful shutdown on SIGINT/SIGTERM (spec §5's
//! cancellation model).

use hass_crds_controller::config::{GcConfig, MqttConfig};
use hass_crds_controller::mqtt_client::{ClientConfig, MqttClient};
use hass_crds_controller::{gc, reconcile};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mqtt_config = match MqttConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };
    let gc_config = GcConfig::from_env();

    let client = match kube::Client::try_default().await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to build kube client");
            std::process::exit(1);
        }
    };

    let cancel = CancellationToken::new();

    let mqtt = match MqttClient::connect(ClientConfig::from(mqtt_config), cancel.clone()).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to mqtt broker");
            std::process::exit(1);
        }
    };

    info!("hass-crds-controller starting");

    let mut handles = reconcile::controllers::run_all(client.clone(), mqtt.clone(), cancel.clone());

    let gc_cancel = cancel.clone();
    let gc_mqtt = mqtt.clone();
    let gc_client = client.clone();
    handles.push(tokio::spawn(async move {
        gc::run(gc_client, gc_mqtt, gc_config, gc_cancel).await;
    }));

    wait_for_shutdown_signal().await;
    info!("shutdown signal received, draining");
    cancel.cancel();

    for handle in handles {
        let _ = handle.await;
    }

    if let Err(e) = mqtt.disconnect().await {
        warn!(error = %e, "error while disconnecting mqtt client");
    }

    info!("hass-crds-controller stopped");
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
    tokio::select! {
        _ = sigterm.recv() => {}
        _ = sigint.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
