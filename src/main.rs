// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Inis | Backends | Entry | Ls | Log | Diff | Cat
//!
//! Ctrl+C --> CancellationToken --> running svn process is killed
//! ```

use std::process::ExitCode;

use scm_adapter::cli::global::{DEFAULT_CONFIG_FILE, GlobalOptions};
use scm_adapter::cli::{self, Command};
use scm_adapter::cmd::config::{run_backends_command, run_inis_command, run_options_command};
use scm_adapter::cmd::repo::{Lookup, run_repo_command};
use scm_adapter::config::Config;
use scm_adapter::config::loader::ConfigLoader;
use scm_adapter::error::Result;
use scm_adapter::logging::init_logging;
use scm_adapter::logging::{LogConfig, LogLevel};
use scm_adapter::scm::registry::AdapterRegistry;

use mimalloc::MiMalloc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "SCM";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    // Logging settings may come from config files, so a broken config is
    // reported before logging exists.
    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&cli.global, &config);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    dispatch_command(cli, &config, cancel).await
}

fn build_log_config(global: &GlobalOptions, config: &Config) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(config.global.output_log_level);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(config.global.file_log_level);

    let log_file = global
        .log_file
        .as_ref()
        .or(config.global.log_file.as_ref())
        .cloned();

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(log_file)
        .with_json_file(config.global.json_log)
        .build()
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping running tool");
            cancel.cancel();
        }
    });
}

async fn dispatch_command(cli: cli::Cli, config: &Config, cancel: CancellationToken) -> ExitCode {
    let result = match cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Backends) => {
            run_backends_command(&AdapterRegistry::builtin());
            Ok(())
        }
        Some(Command::Repo(command)) => match run_repo_command(command, config, cancel).await {
            Ok(Lookup::Found) => Ok(()),
            Ok(Lookup::Absent) => {
                eprintln!("not found");
                return ExitCode::FAILURE;
            }
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    let mut loader = build_config_loader(global);
    for option in global.to_config_overrides() {
        loader = loader.set_option(&option)?;
    }
    let config = loader.build()?;
    debug!(repositories = config.repositories.len(), "configuration loaded");
    Ok(config)
}
