use anyhow::Context;
use lifeware::cli::{commands, init, output::Output, Cli, Commands, DonorCommands};
use lifeware::gateway::DonorGateway;
use lifeware::utils::toml_config::{ConfigError, LifewareConfig, LifewareConfigManager};
use lifeware::{build_app, AppState, SupabaseClient};
use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command {
        Some(Commands::Init {
            path,
            force,
            provider,
            host,
            port,
        }) => {
            let result = init::run(
                init::InitConfig {
                    path,
                    force,
                    provider,
                    host,
                    port,
                },
                &output,
            );
            Ok(match result {
                init::InitResult::Success => ExitCode::SUCCESS,
                init::InitResult::AlreadyExists | init::InitResult::Error(_) => ExitCode::FAILURE,
            })
        }

        Some(Commands::Config { full, validate }) => {
            Ok(match commands::show_config(&cli.config, full, validate, &output) {
                Ok(()) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            })
        }

        Some(Commands::Donors(command)) => {
            let level = if cli.verbose { "debug" } else { "warn" };
            init_tracing(level, "pretty");

            let config = load_or_default(&cli.config)?.config();
            let gateway = DonorGateway::new(Arc::new(SupabaseClient::from_config(&config)?));

            match command {
                DonorCommands::List {
                    query,
                    blood_group,
                    location,
                } => {
                    let query = match commands::donor_query(query, blood_group, location) {
                        Ok(query) => query,
                        Err(e) => {
                            output.error(&e.to_string());
                            return Ok(ExitCode::FAILURE);
                        }
                    };
                    commands::list_donors(&gateway, query, &output).await;
                }
                DonorCommands::Count => commands::count_donors(&gateway, &output).await,
            }
            Ok(ExitCode::SUCCESS)
        }

        None => {
            serve(&cli.config, cli.verbose, &output).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load the config file, or fall back to defaults when it doesn't exist.
fn load_or_default(path: &Path) -> anyhow::Result<LifewareConfigManager> {
    match LifewareConfigManager::new(path) {
        Ok(manager) => Ok(manager),
        Err(ConfigError::FileNotFound(missing)) => {
            tracing::warn!(
                "{} not found, using built-in defaults (run `lifeware-server init` to create it)",
                missing.display()
            );
            Ok(LifewareConfigManager::from_config(LifewareConfig::default()))
        }
        Err(e) => Err(e).with_context(|| format!("Failed to load {}", path.display())),
    }
}

fn init_tracing(default_level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "lifeware={level},lifeware_server={level},tower_http={level}",
            level = default_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn serve(config_path: &Path, verbose: bool, output: &Output) -> anyhow::Result<()> {
    // Peek at the file for logging settings before the subscriber exists
    let startup = LifewareConfig::load(config_path).unwrap_or_default();
    let level = if verbose {
        "debug"
    } else {
        startup.server.log_level.as_str()
    };
    init_tracing(level, &startup.server.log_format);

    output.banner();

    let mut config_manager = load_or_default(config_path)?;
    if config_manager.config_path().exists() {
        if let Err(e) = config_manager.start_watching() {
            tracing::warn!("Configuration hot reload disabled: {}", e);
        }
    }
    let config_manager = Arc::new(config_manager);
    let config = config_manager.config();

    for warning in config
        .validate_with_warnings()
        .context("Invalid configuration")?
    {
        tracing::warn!("{}", warning);
    }

    let state = AppState::from_config(config_manager.clone())?;
    let app = build_app(state);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.bind_address()))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Lifeware listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    config_manager.stop_watching();
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}
