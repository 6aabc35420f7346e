use anyhow::Context;
use clap::Parser;
use photo_quote::adapters::{surface::render_text, write_price_table};
use photo_quote::config::load_catalog;
use photo_quote::core::format::format_brl;
use photo_quote::utils::{logger, validation::Validate};
use photo_quote::{
    run_session, CliConfig, Command, FormEvent, FormSession, FormSurface, JsonLinesSurface,
    PricingEngine, QuoteError, TerminalSurface,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const EVENT_BUFFER: usize = 32;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {:#}", e);

        let user_error = e
            .downcast_ref::<QuoteError>()
            .is_some_and(QuoteError::is_user_error);
        std::process::exit(if user_error { 2 } else { 1 });
    }
}

async fn run(config: CliConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(config.catalog.as_deref()).context("Failed to load catalog")?;
    let engine = PricingEngine::new(catalog);

    match config.command {
        Command::Services => list_services(&engine),
        Command::Payments => list_payments(&engine),
        Command::Quote {
            service,
            hours,
            payment,
            json,
        } => quote(&engine, &service, hours.as_deref(), payment.as_deref(), json)?,
        Command::Table { hours, output } => {
            let rows = match &output {
                Some(path) => {
                    let file = std::fs::File::create(path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    write_price_table(&engine, hours, file)?
                }
                None => write_price_table(&engine, hours, std::io::stdout().lock())?,
            };
            tracing::info!("✅ Price table with {} rows written", rows);
        }
        Command::Session { json } => {
            let session = FormSession::new(engine);
            if json {
                session_from_stdin(session, &JsonLinesSurface::stdout()).await?;
            } else {
                session_from_stdin(session, &TerminalSurface::stdout()).await?;
            }
        }
    }

    Ok(())
}

fn list_services(engine: &PricingEngine) {
    for service in engine.catalog().services() {
        println!(
            "{:<24} {:<30} {:>4} fotos  {}/h  mínimo {}h",
            service.id,
            service.name,
            service.photo_count,
            format_brl(service.hourly_rate),
            service.min_hours
        );
    }
}

fn list_payments(engine: &PricingEngine) {
    let default_payment = engine.catalog().default_payment();
    for payment in engine.catalog().payments() {
        let marker = if payment.id == default_payment { "*" } else { " " };
        println!(
            "{} {:<14} {:<16} {:+.2}%  {}",
            marker,
            payment.id,
            payment.name,
            payment.modifier * 100.0,
            payment.description
        );
    }
}

fn quote(
    engine: &PricingEngine,
    service_id: &str,
    hours: Option<&str>,
    payment_id: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    engine.catalog().require_service(service_id)?;
    if let Some(payment_id) = payment_id {
        engine.catalog().require_payment(payment_id)?;
    }

    let mut state = engine.select_service(&engine.initial_state(), Some(service_id));
    if let Some(raw) = hours {
        state = engine.set_hours_text(&state, raw);
    }
    if let Some(payment_id) = payment_id {
        state = engine.set_payment_method(&state, payment_id);
    }

    let document = engine
        .quote_document(&state)
        .context("No price available for this selection")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        println!("{}", document.service.name);
        println!("{}", render_text(&document.display));
    }
    Ok(())
}

/// Reads form events from stdin on a separate task and feeds them through the
/// single session subscription.
async fn session_from_stdin<S: FormSurface>(session: FormSession, surface: &S) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match FormEvent::parse_line(&line) {
                Ok(Some(event)) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("⚠️ Skipping input: {}", e),
            }
        }
        Ok::<_, std::io::Error>(())
    });

    let handled = run_session(session, rx, surface).await?;
    reader.await.context("stdin reader task failed")??;

    tracing::debug!("Session handled {} events", handled);
    Ok(())
}
