use anyhow::Result;
use clap::{Parser, Subcommand};
use masthead::cli::{self, categorize_cmd, contacts_cmd, scrape_cmd, serve, verify_cmd};
use masthead::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Find, verify and profile the journalists behind a media outlet.
#[derive(Parser)]
#[command(name = "masthead")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// SQLite database path (overrides MASTHEAD_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP action server
    Serve {
        /// Address to bind (overrides MASTHEAD_BIND)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Scrape an outlet's staff pages into contacts
    Scrape {
        /// Outlet URL, e.g. https://www.example-news.com
        url: String,

        #[arg(short, long)]
        tenant: String,
    },

    /// Verify contacts and record their confidence scores
    Verify {
        #[arg(short, long)]
        tenant: String,

        /// Contact ids to verify
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Categorize contacts and record intelligence
    Categorize {
        #[arg(short, long)]
        tenant: String,

        /// Contact ids to categorize
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// List stored contacts
    Contacts {
        #[arg(short, long)]
        tenant: String,

        /// Only contacts of this outlet
        #[arg(long)]
        outlet: Option<String>,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("masthead=info"));
    let json = std::env::var("MASTHEAD_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Output helpers read these flags from the environment.
    if cli.json {
        std::env::set_var("MASTHEAD_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("MASTHEAD_QUIET", "1");
    }
    if cli.no_color {
        std::env::set_var("MASTHEAD_NO_COLOR", "1");
    }

    init_tracing();

    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            serve::run(config).await
        }
        Commands::Scrape { url, tenant } => {
            let pipeline = cli::open_pipeline(config)?;
            scrape_cmd::run(&pipeline, &url, &tenant).await
        }
        Commands::Verify { tenant, ids } => {
            let pipeline = cli::open_pipeline(config)?;
            verify_cmd::run(&pipeline, &ids, &tenant).await
        }
        Commands::Categorize { tenant, ids } => {
            let pipeline = cli::open_pipeline(config)?;
            categorize_cmd::run(&pipeline, &ids, &tenant).await
        }
        Commands::Contacts { tenant, outlet } => {
            let pipeline = cli::open_pipeline(config)?;
            contacts_cmd::run(&pipeline, &tenant, outlet.as_deref())
        }
    }
}
