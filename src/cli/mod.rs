pub mod report;
pub mod shutdown;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use report::{render_report, render_users, ReportKind};
use tokio_util::sync::CancellationToken;
use tracing::{error, level_filters::LevelFilter};

use crate::{
    server,
    storage::{
        cache::{DatasetCache, DEFAULT_CACHE_KEY},
        entities::UserId,
        loader::{CsvDatasetLoader, DatasetLoader},
    },
    utils::{
        clock::DefaultClock,
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX, SERVER_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Presence analyzer", version, long_about = None)]
#[command(about = "Weekday presence statistics over clock-in/clock-out logs", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Print logs to the console")]
    log: bool,
    #[arg(long = "log-filter", help = "Log level. Defaults to $RUST_LOG or debug")]
    log_filter: Option<LevelFilter>,
    #[arg(
        long,
        help = "Application directory used for logs. By default $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Serve presence statistics as a JSON API")]
    Serve {
        #[arg(long, help = "Presence file with user_id,date,start,end rows")]
        data: PathBuf,
        #[arg(long, default_value = "127.0.0.1:5000", help = "Address to listen on")]
        bind: SocketAddr,
        #[arg(
            long = "cache-ttl",
            default_value_t = 3600,
            help = "Seconds a loaded presence file is reused before it's read again"
        )]
        cache_ttl: u32,
    },
    #[command(about = "List users present in the data")]
    Users {
        #[arg(long, help = "Presence file with user_id,date,start,end rows")]
        data: PathBuf,
    },
    #[command(about = "Print a weekday report for a single user")]
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
        user_id: UserId,
        #[arg(long, help = "Presence file with user_id,date,start,end rows")]
        data: PathBuf,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let prefix = match args.commands {
        Commands::Serve { .. } => SERVER_PREFIX,
        Commands::Users { .. } | Commands::Report { .. } => CLI_PREFIX,
    };
    let app_dir = args.dir.map_or_else(create_application_default_path, Ok)?;
    enable_logging(prefix, &app_dir.join("logs"), args.log_filter, args.log)?;

    match args.commands {
        Commands::Serve {
            data,
            bind,
            cache_ttl,
        } => {
            let cache = DatasetCache::new(
                DEFAULT_CACHE_KEY,
                chrono::Duration::seconds(cache_ttl.into()),
                Box::new(CsvDatasetLoader::new(data)),
                Box::new(DefaultClock),
            );
            let shutdown_token = CancellationToken::new();

            let (_, serve_result) = tokio::join!(
                shutdown::detect_shutdown(shutdown_token.clone()),
                async {
                    let result = server::serve(bind, Arc::new(cache), shutdown_token.clone()).await;
                    // Stops the signal listener when the server couldn't start.
                    shutdown_token.cancel();
                    result
                },
            );
            serve_result.inspect_err(|e| error!("Server got an error {e:?}"))
        }
        Commands::Users { data } => {
            let dataset = CsvDatasetLoader::new(data).load().await?;
            for line in render_users(&dataset) {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Report {
            kind,
            user_id,
            data,
        } => {
            let dataset = CsvDatasetLoader::new(data).load().await?;
            for line in render_report(&dataset, kind, user_id) {
                println!("{line}");
            }
            Ok(())
        }
    }
}
