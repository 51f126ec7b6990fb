use anyhow::{Result, anyhow};
use pos_energy::{Config, EnergyMetricsController, RefreshTask};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    config.validate()?;

    pos_energy::logging::init_logging(&config.logging)?;
    info!(
        "pos-energy {} starting up; refreshing every {}s",
        env!("APP_VERSION"),
        config.refresh.interval_secs
    );

    let controller = Arc::new(EnergyMetricsController::from_config(&config)?);
    let refresh = RefreshTask::start(controller.clone(), config.refresh.interval())?;

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let web_controller = controller.clone();
    let web = config.web.clone();
    let mut web_task = tokio::spawn(async move {
        let shutdown = async move {
            let _ = stop_rx.await;
        };
        pos_energy::web::serve(web_controller, &web.host, web.port, shutdown).await
    });

    // Set when the web server ends on its own, which is always fatal
    let web_failure = tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
            None
        }
        res = &mut web_task => {
            let reason = match res {
                Ok(Ok(())) => "stopped unexpectedly".to_string(),
                Ok(Err(e)) => e.to_string(),
                Err(e) => format!("task failed: {}", e),
            };
            error!("Web server exited: {}; shutting down", reason);
            Some(reason)
        }
    };

    let launched = refresh.stop().await;
    let _ = stop_tx.send(());
    if !web_task.is_finished() {
        match web_task.await {
            Ok(Err(e)) => error!("Web server error during shutdown: {}", e),
            Err(e) => error!("Web server task failed: {}", e),
            Ok(Ok(())) => {}
        }
    }

    info!("Shutdown complete after {} refreshes", launched);
    match web_failure {
        Some(reason) => Err(anyhow!("web server exited: {}", reason)),
        None => Ok(()),
    }
}
