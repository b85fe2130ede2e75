use std::path::Path;

use colored::Colorize;
use crn_client::{defaults, BatchPipeline, BatchReport, HttpTransport, ObjectResolver};
use crn_config::{ConfigSource, EnvSource, LayeredConfig, MapSource, TomlSource};
use crn_types::Identifier;

use crate::cli::{BatchArgs, Cli, Command, ConfigArgs, FetchArgs, OutputFormat};
use crate::manifest;

const DEFAULT_CONFIG_FILE: &str = "crn.toml";
const ENV_PREFIX: &str = "CRN";

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli)?;
    let format = cli.format;
    match cli.command {
        Command::Fetch(args) => cmd_fetch(&config, args, format).await,
        Command::Batch(args) => cmd_batch(&config, args, format).await,
        Command::Config(args) => cmd_config(&config, args),
    }
}

/// Assemble the layered configuration, highest precedence first:
/// CLI override, environment, config file (if any), library defaults.
fn build_config(cli: &Cli) -> anyhow::Result<LayeredConfig> {
    let mut sources: Vec<Box<dyn ConfigSource>> = Vec::new();

    if let Some(endpoint) = &cli.endpoint {
        sources.push(Box::new(
            MapSource::new("cli").with(defaults::ENDPOINT_KEY, endpoint),
        ));
    }
    sources.push(Box::new(EnvSource::new(ENV_PREFIX)));
    if let Some(path) = &cli.config {
        sources.push(Box::new(TomlSource::from_path(path)?));
    } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
        sources.push(Box::new(TomlSource::from_path(Path::new(
            DEFAULT_CONFIG_FILE,
        ))?));
    }
    sources.push(Box::new(defaults::source()));

    Ok(LayeredConfig::new(sources))
}

async fn cmd_fetch(
    config: &LayeredConfig,
    args: FetchArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let identifiers = args
        .identifiers
        .into_iter()
        .map(Identifier::new)
        .collect::<Result<Vec<_>, _>>()?;
    retrieve(config, &identifiers, format).await
}

async fn cmd_batch(
    config: &LayeredConfig,
    args: BatchArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let identifiers = manifest::read_identifier_list(&args.list)?;
    if identifiers.is_empty() {
        println!("Identifier list is empty; nothing to retrieve.");
        return Ok(());
    }
    retrieve(config, &identifiers, format).await
}

async fn retrieve(
    config: &LayeredConfig,
    identifiers: &[Identifier],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let resolver = ObjectResolver::new(config, HttpTransport::default());
    let endpoint = resolver.endpoint()?;
    let report = BatchPipeline::new(resolver).run(identifiers).await;
    match format {
        OutputFormat::Text => {
            println!("Retrieved from {}", endpoint.bold());
            print_report(&report);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report_json(&report))?),
    }
    Ok(())
}

fn report_json(report: &BatchReport) -> serde_json::Value {
    let outcomes: Vec<serde_json::Value> = report
        .outcomes()
        .iter()
        .map(|outcome| {
            let status = match outcome.status.error() {
                None => "succeeded",
                Some(err) if err.is_cache_miss() => "cache-miss",
                Some(_) => "failed",
            };
            serde_json::json!({
                "identifier": outcome.identifier.as_str(),
                "status": status,
                "error": outcome.status.error().map(|err| err.to_string()),
            })
        })
        .collect();
    serde_json::json!({
        "total": report.len(),
        "succeeded": report.succeeded(),
        "outcomes": outcomes,
    })
}

fn print_report(report: &BatchReport) {
    for outcome in report.outcomes() {
        match outcome.status.error() {
            None => println!("  {} {}", "✓".green(), outcome.identifier),
            Some(err) if err.is_cache_miss() => println!(
                "  {} {} {}",
                "✗".red(),
                outcome.identifier,
                "(not in store)".dimmed()
            ),
            Some(err) => println!(
                "  {} {} {}",
                "✗".red(),
                outcome.identifier,
                format!("({err})").dimmed()
            ),
        }
    }
    let summary = format!("{}/{} objects retrieved", report.succeeded(), report.len());
    if report.failed() == 0 {
        println!("{} {}", "✓".green().bold(), summary);
    } else {
        println!("{} {}", "!".yellow().bold(), summary);
    }
}

fn cmd_config(config: &LayeredConfig, args: ConfigArgs) -> anyhow::Result<()> {
    match config.get_string(&args.key) {
        Some(value) => {
            let source = config.defining_source(&args.key).unwrap_or("unknown");
            println!("{} = {} {}", args.key.bold(), value, format!("(from {source})").dimmed());
        }
        None => println!("{} is not set", args.key.bold()),
    }
    Ok(())
}
