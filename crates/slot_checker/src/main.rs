//! Command line entry point for the vaccine slot checker.
//! Runs a single check for the requested location and emails any open slots.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cowin::{CowinClient, CowinConfig};
use notification_services::{EmailService, SesEmailService, StdoutEmailService};
use slot_scan::{HtmlRenderer, NotifierConfig, RequestSpec, RunReport, SlotChecker, SlotNotifier};

use crate::cli::Cli;

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));
}

fn cowin_config() -> CowinConfig {
    let mut config = CowinConfig::default();
    if let Ok(base_url) = std::env::var("COWIN_BASE_URL") {
        log::info!("🌐 Using API base URL {}", base_url);
        config.base_url = base_url;
    }
    config
}

async fn run(cli: Cli) -> anyhow::Result<RunReport> {
    let request = RequestSpec::try_from(cli.request_params()?)?;
    log::debug!("Request: {:?}", request);

    let client = CowinClient::new(cowin_config())?;

    let (email_service, config): (Arc<dyn EmailService>, NotifierConfig) = if cli.dry_run {
        let config = NotifierConfig::from_env()
            .unwrap_or_else(|_| NotifierConfig::new("dry-run@localhost"));
        (Arc::new(StdoutEmailService) as Arc<dyn EmailService>, config)
    } else {
        let config = NotifierConfig::from_env()?;
        let from_email =
            std::env::var("FROM_EMAIL").context("FROM_EMAIL environment variable not set")?;
        let ses = SesEmailService::new(from_email).await?;
        (Arc::new(ses) as Arc<dyn EmailService>, config)
    };

    let notifier = SlotNotifier::new(Arc::new(HtmlRenderer::default()), email_service, config);
    let checker = SlotChecker::new(client, notifier);

    Ok(checker.run(&request).await?)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logger(cli.verbose);

    log::info!("🚀 Checking vaccine availability...");

    match run(cli).await {
        Ok(report) => {
            log::info!(
                "✅ Sent {} sessions across {} centers (message {})",
                report.sessions,
                report.centers,
                report.message_id
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("❌ {:#}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
