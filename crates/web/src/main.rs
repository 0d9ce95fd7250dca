use std::error::Error;
use std::sync::Arc;

use bare_http::server::Server;
use bare_web::Site;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

const PORT: u16 = 42069;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let site = Site::new()?;
    let server = Server::builder().address(("0.0.0.0", PORT)).bind().await?;

    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown signal received");
                shutdown.shutdown();
            }
            Err(e) => error!(cause = %e, "failed to listen for ctrl-c"),
        }
    });

    info!(port = PORT, "server started");
    server.serve(Arc::new(site)).await;
    info!("server gracefully stopped");
    Ok(())
}
