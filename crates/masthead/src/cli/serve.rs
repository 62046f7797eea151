//! `masthead serve`: run the HTTP action server.

use crate::audit::ledger::RunLedger;
use crate::cli::output::{self, Styled};
use crate::config::Config;
use crate::server::{self, AppState};
use anyhow::Result;
use tracing::info;

pub async fn run(config: Config) -> Result<()> {
    let s = Styled::new();
    let bind = config.bind.clone();
    let ledger = match &config.ledger_path {
        Some(path) => Some(RunLedger::open(path)?),
        None => None,
    };
    let db_path = config.db_path.clone();
    let pipeline = super::open_pipeline(config)?;

    info!("starting masthead v{}", env!("CARGO_PKG_VERSION"));
    if !output::is_quiet() {
        output::print_header(&s);
        output::print_check(s.ok_sym(), "Database", &db_path.display().to_string());
        output::print_check(
            if pipeline.categorizer.is_some() { s.ok_sym() } else { s.info_sym() },
            "AI categorizer",
            if pipeline.categorizer.is_some() { "configured" } else { "rules only" },
        );
        output::print_check(s.ok_sym(), "Listening", &bind);
        eprintln!();
    }

    let state = AppState::new(pipeline, ledger);
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("received shutdown signal");
    };
    tokio::select! {
        result = server::serve(state, &bind) => result,
        _ = shutdown => Ok(()),
    }
}
