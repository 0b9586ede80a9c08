//! Application startup
//!
//! Parses the command line, loads the configuration file, starts logging and
//! hands the selected subcommand to [`CommandContext`].

use super::cli::args::Args;
use super::cli::commands::CommandContext;
use super::cli::config::AppConfig;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::core::shutdown::{install_interrupt_handler, CancellationFlag};
use crate::core::version::{build_time, get_api_version, git_hash};
use crate::execution::AlgorithmExecutor;
use crate::plugin::api::{AlgorithmRegistry, PluginAnalyzer};
use std::sync::Arc;

/// Run the application and return the process exit code
pub async fn startup() -> i32 {
    let argv: Vec<String> = std::env::args().collect();
    let args = match Args::parse_from_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            // help and version requests also end up here
            let _ = e.print();
            return e.exit_code();
        }
    };

    // Logging is not up yet, so configuration errors go straight to stderr
    let config = match AppConfig::load(args.config_file.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let use_color = args.use_color(config.color);
    let log_file = args
        .log_file
        .as_ref()
        .or(config.log_file.as_ref())
        .map(|path| path.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        args.log_level.as_deref().or(config.log_level.as_deref()),
        args.log_format.as_deref().or(config.log_format.as_deref()),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error initializing logging: {}", e);
        return 1;
    }
    log::debug!(
        "algohost {} (algorithm API {}, {} built {})",
        env!("CARGO_PKG_VERSION"),
        get_api_version(),
        git_hash(),
        build_time()
    );

    let cancellation = CancellationFlag::new();
    install_interrupt_handler(cancellation.clone());

    let registry = AlgorithmRegistry::with_builtins();
    log::debug!("{} algorithms registered", registry.len());
    let executor = AlgorithmExecutor::new(Arc::new(registry), Arc::new(PluginAnalyzer::new()))
        .with_catalog(Arc::new(config.connections.clone()))
        .with_cancellation(cancellation);

    let context = CommandContext {
        executor: Arc::new(executor),
        config,
        use_color,
    };

    // unlocked handles; worker threads log to stderr while runs are awaited
    let (mut out, mut err) = (std::io::stdout(), std::io::stderr());
    match context.dispatch(&args.command, &mut out, &mut err).await {
        Ok(()) => 0,
        Err(e) => {
            log_error_with_context(&e, "Command failed");
            1
        }
    }
}
