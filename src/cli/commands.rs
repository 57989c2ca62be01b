//! CLI command implementations
//!
//! Configuration is read from the environment (after `.env`); command-line
//! flags override it.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Runtime;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_response};
use crate::bot;
use crate::calc::{CalcOutcome, CalcRequest};
use crate::config::AppConfig;
use crate::http_server::{AppState, HttpServer};
use crate::observability::init_logging;

/// Main CLI entry point
///
/// Loads `.env`, installs logging, parses arguments and dispatches.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let config = AppConfig::from_env().map_err(|e| CliError::config_error(e.to_string()))?;

    match cmd {
        Command::Serve { port, data_dir } => {
            serve(apply_overrides(config, port, data_dir))
        }
        Command::Bot { data_dir } => run_bot(apply_overrides(config, None, data_dir)),
        Command::Calc => calc(),
    }
}

fn apply_overrides(mut config: AppConfig, port: Option<u16>, data_dir: Option<PathBuf>) -> AppConfig {
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(data_dir) = data_dir {
        config = config.with_data_dir(data_dir);
    }
    config
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new().map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Start the HTTP server and block until it stops
pub fn serve(config: AppConfig) -> CliResult<()> {
    let state = AppState::new(&config)
        .map_err(|e| CliError::boot_failed(format!("Failed to create model client: {}", e)))?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        analyzer = state.materials.analyzer_source(),
        "starting tgcnc server"
    );

    let server = HttpServer::with_state(config.http.clone(), Arc::new(state));

    let rt = runtime()?;
    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Start the Telegram bot and block until Ctrl-C
pub fn run_bot(config: AppConfig) -> CliResult<()> {
    let rt = runtime()?;
    rt.block_on(bot::run(&config)).map_err(|e| match e {
        bot::BotError::Config(e) => CliError::config_error(e.to_string()),
        e => CliError::bot_failed(e.to_string()),
    })
}

/// One-shot calculation: request on stdin, result on stdout
pub fn calc() -> CliResult<()> {
    let input = read_request()?;
    let outcome = calc_from_slice(&input)?;
    write_response(&outcome)
}

/// Evaluate a calculation request body without the allow-list or history
pub fn calc_from_slice(input: &[u8]) -> CliResult<CalcOutcome> {
    let request = CalcRequest::from_slice(input).map_err(|e| CliError::invalid_request(e.to_string()))?;
    Ok(request.evaluate())
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_calc_from_slice() {
        let input = json!({
            "user_id": 1,
            "tool_type": "mill",
            "tool_material": "carbide",
            "diameter": 10,
            "teeth": 4,
            "material_properties": {"machinability_index": 1}
        });

        let outcome = calc_from_slice(input.to_string().as_bytes()).unwrap();
        assert_eq!(outcome.calculation.n, 5793.0);
    }

    #[test]
    fn test_calc_reports_missing_fields() {
        let err = calc_from_slice(br#"{"user_id": 1}"#).unwrap_err();

        assert_eq!(err.code(), &CliErrorCode::InvalidRequest);
        assert_eq!(
            err.message(),
            "Отсутствуют поля: tool_type, tool_material, diameter, teeth, material_properties"
        );
    }

    #[test]
    fn test_overrides() {
        let config = apply_overrides(AppConfig::default(), Some(9000), Some(PathBuf::from("data")));
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("data"));

        let config = apply_overrides(AppConfig::default(), None, None);
        assert_eq!(config.http.port, 5000);
    }
}
