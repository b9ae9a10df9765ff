//! SqlQuest - validation service for SQL learning challenges.

use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use sql_quest::backend::RestBackend;
use sql_quest::cli::Cli;
use sql_quest::config::Config;
use sql_quest::judge::{HttpJudgeClient, JudgeClientConfig};
use sql_quest::logging;
use sql_quest::server::{router, AppState};
use sql_quest::validator::QueryValidator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse_args();

    // Resolve configuration: file, then environment, then CLI flags.
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    config.apply_env_overrides();
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    config.validate()?;

    let judge = HttpJudgeClient::new(JudgeClientConfig::from(&config.judge))?;
    let backend = RestBackend::new(config.backend.clone())?;
    let validator = Arc::new(QueryValidator::new(Arc::new(judge), Arc::new(backend)));

    let app = router(AppState::new(validator));

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!("Listening on {}", config.server.bind);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
