//! boot-versions — print the boot versions listed in project metadata
//!
//! Usage:
//!   boot-versions [--config <yaml>] [--source <kind>] [--location <path|url>]
//!                 [--limit <bytes>] [--strict] [--json]

use anyhow::{bail, Context};
use initializr_metadata::{BootMetadataReader, ReaderConfig, SourceKind};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"boot-versions — list boot versions from project metadata

USAGE:
    boot-versions [OPTIONS]

OPTIONS:
    --config <path>         Read reader configuration from a YAML file
    --source <kind>         bundled | file | remote
    --location <path|url>   Metadata file path or URL
    --limit <bytes>         Maximum metadata size (default 51200)
    --strict                Validate the document against the metadata schema
    --json                  Print versions as JSON
    -h, --help              Show this help message

ENVIRONMENT:
    INITIALIZR_METADATA_SOURCE, INITIALIZR_METADATA_LOCATION,
    INITIALIZR_METADATA_SIZE_LIMIT, INITIALIZR_HTTP_TIMEOUT_SECS,
    INITIALIZR_METADATA_VALIDATE, RUST_LOG"#
    );
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> anyhow::Result<&'a str> {
    match args.get(i + 1) {
        Some(v) => Ok(v.as_str()),
        None => bail!("{} requires a value", flag),
    }
}

/// Options given on the command line, applied over the base configuration
#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<String>,
    source: Option<SourceKind>,
    location: Option<String>,
    limit: Option<u64>,
    strict: bool,
    json: bool,
}

impl CliArgs {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut cli = CliArgs::default();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => {
                    cli.config_path = Some(flag_value(args, i, "--config")?.to_string());
                    i += 1;
                }
                "--source" => {
                    cli.source = Some(flag_value(args, i, "--source")?.parse::<SourceKind>()?);
                    i += 1;
                }
                "--location" => {
                    cli.location = Some(flag_value(args, i, "--location")?.to_string());
                    i += 1;
                }
                "--limit" => {
                    let limit = flag_value(args, i, "--limit")?
                        .parse::<u64>()
                        .context("--limit expects a byte count")?;
                    cli.limit = Some(limit);
                    i += 1;
                }
                "--strict" => cli.strict = true,
                "--json" => cli.json = true,
                other => bail!("Unknown option: {}", other),
            }
            i += 1;
        }
        Ok(cli)
    }

    fn config(&self) -> anyhow::Result<ReaderConfig> {
        let mut config = match &self.config_path {
            Some(path) => ReaderConfig::from_yaml_file(path)?,
            None => ReaderConfig::from_env()?,
        };
        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(location) = &self.location {
            config.location = Some(location.clone());
        }
        if let Some(limit) = self.limit {
            config.size_limit = limit;
        }
        if self.strict {
            config.validate_schema = true;
        }
        Ok(config)
    }
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let cli = CliArgs::parse(args)?;
    let config = cli.config()?;
    let json = cli.json;

    tracing::debug!(?config, "loading boot versions");
    let reader = BootMetadataReader::from_config(&config)?;
    let versions = reader.boot_versions()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&versions)?);
    } else {
        for version in &versions {
            let marker = if version.is_default { "*" } else { " " };
            println!("{} {:<24} {}", marker, version.id, version.name);
        }
    }
    Ok(())
}
