use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use secrecy::ExposeSecret;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use draftdeck::adapters::api::{
    BackendClient, BackendClientConfig, HttpContentGenerator, HttpDocumentExporter,
    HttpOutlineSuggester, HttpProjectRepository, HttpSectionRefiner,
};
use draftdeck::adapters::session::StaticSessionProvider;
use draftdeck::application::{Collaborators, DraftingService};
use draftdeck::cli::{run, Cli, CliContext};
use draftdeck::config::{AppConfig, LogFormat, LoggingConfig, SessionConfig};
use draftdeck::domain::foundation::SessionToken;

/// Logs go to stderr so command output on stdout stays clean.
/// `RUST_LOG` overrides the configured level.
fn init_tracing(logging: &LoggingConfig, verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    let initialized = match logging.log_format()? {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    initialized.map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

fn session_provider(session: &SessionConfig) -> anyhow::Result<StaticSessionProvider> {
    if let Some(token) = &session.token {
        let token = SessionToken::new(token.expose_secret().as_str())
            .context("configured session token is blank")?;
        return Ok(StaticSessionProvider::new(token));
    }
    if let Some(path) = &session.token_file {
        return StaticSessionProvider::from_file(path)
            .with_context(|| format!("failed to read session token from {}", path.display()));
    }
    Ok(StaticSessionProvider::anonymous())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_tracing(&config.logging, cli.verbose)?;

    let client = BackendClient::new(
        BackendClientConfig::new(config.api.base_url.as_str()).with_timeout(config.api.timeout()),
    )?;
    tracing::debug!(base_url = %client.base_url(), "Using backend");

    let collaborators = Collaborators {
        session: Arc::new(session_provider(&config.session)?),
        repository: Arc::new(HttpProjectRepository::new(client.clone())),
        suggester: Arc::new(HttpOutlineSuggester::new(client.clone())),
        generator: Arc::new(HttpContentGenerator::new(client.clone())),
        refiner: Arc::new(HttpSectionRefiner::new(client.clone())),
        exporter: Arc::new(HttpDocumentExporter::new(client)),
    };

    let ctx = CliContext {
        service: DraftingService::new(collaborators).with_source("cli"),
        export_dir: config.export.output_dir.clone(),
    };

    let mut stdout = std::io::stdout().lock();
    run(cli.command, &ctx, &mut stdout).await
}
