use clap::Parser;
use log::debug;
use metrics2json::{cli::Cli, error_chain, Config, RunError, Settings};
use std::process::ExitCode;

fn load_settings(cli: &Cli) -> Result<Settings, RunError> {
    let base = match &cli.config {
        Some(path) => Settings::from(Config::load(path)?),
        None => Settings::default(),
    };
    Ok(base.merge(cli.settings()))
}

async fn scrape(cli: &Cli) -> Result<String, RunError> {
    let settings = load_settings(cli)?;
    let metrics = metrics2json::run(&settings).await?;
    Ok(metrics.to_json()?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging, stdout is reserved for the JSON record
    let default_filter = std::env::var("M2J_LOG_LEVEL").unwrap_or("warn".to_string());
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    let cli = Cli::parse();

    match scrape(&cli).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let message = error_chain(&e);
            debug!("Scrape failed: {:?}", e);
            // printed regardless of the log filter
            eprintln!("{}", message);
            ExitCode::from(1)
        }
    }
}
