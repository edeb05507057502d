use anyhow::{Context, Result};
use std::net::SocketAddr;
use tonic::transport::Server;

use polls::polls::polls_server::PollsServer;
use polls::{PollsAPI, QuestionStore, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Settings::new()?;
    simple_logger::init_with_level(cfg.log_level)?;
    log::info!("Config: {:?}", cfg);
    let addr = cfg
        .listen_addr
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid listen_addr {:?}", cfg.listen_addr))?;
    let db = cfg.sled_config().open()?;
    log::info!("Database opened: {}", &cfg.database_name);
    log::info!("Database was recovered: {}", db.was_recovered());
    log::info!("Database checksum: {}", db.checksum()?);
    let store = QuestionStore::new(db)?;
    log::info!("Questions on disk: {}", store.len());
    let local_polls = PollsAPI::new(store.clone()).with_index_limit(cfg.index_limit);
    log::info!("Listening on {}", addr);
    Server::builder()
        .add_service(PollsServer::new(local_polls))
        .serve_with_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Couldn't listen for ctrl-c: {}", e);
            }
        })
        .await?;
    log::info!("Shutting down, flushed {} bytes", store.database().flush()?);
    Ok(())
}
