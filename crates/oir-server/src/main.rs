use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use oir_server::{routes, AppState, ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    Command::new("oir-server")
        .version(oir_server::VERSION)
        .about("Office of the Industrial Registrar records service")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_parser(value_parser!(u16))
                .help("Port to listen on (overrides config and PORT)"),
        )
        .arg(
            Arg::new("storage-root")
                .long("storage-root")
                .value_parser(value_parser!(PathBuf))
                .help("Directory for uploaded documents"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .action(ArgAction::SetTrue)
                .help("Load the sample unions, members and workflows"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
}

fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let config_path = matches.get_one::<PathBuf>("config");
    let mut config = ServerConfig::load(config_path.map(PathBuf::as_path))
        .context("failed to load configuration")?;
    if let Some(port) = matches.get_one::<u16>("port") {
        config = config.with_port(*port);
    }
    if let Some(root) = matches.get_one::<PathBuf>("storage-root") {
        config = config.with_storage_root(root.clone());
    }
    if matches.get_flag("seed") {
        config = config.with_seed(true);
    }
    if matches.get_flag("json") {
        config.log_json = true;
    }

    init_tracing(&config);

    tokio::fs::create_dir_all(&config.storage_root)
        .await
        .with_context(|| format!("failed to create {}", config.storage_root.display()))?;
    let state = AppState::from_config(&config).context("failed to build registry")?;

    let addr = config.socket_addr();
    tracing::info!(
        %addr,
        storage = %config.storage_root.display(),
        seeded = config.seed,
        unions = state.registry.unions().len(),
        "server starting"
    );

    let (_, server) = warp::serve(routes(state, config.body_limit))
        .try_bind_with_graceful_shutdown(addr, async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown requested");
        })
        .with_context(|| format!("failed to bind {addr}"))?;
    server.await;
    Ok(())
}
