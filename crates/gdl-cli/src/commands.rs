use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use colored::Colorize;
use serde::Serialize;

use gdl_loader::{DataLoader, DatasetName, LoadReport, LoaderConfig, Registry};
use gdl_store::{KeyedStore, Record};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Load(_) => cmd_load(&config, &cli.format).await,
        Command::Lookup(args) => cmd_lookup(&config, &cli.format, args).await,
        Command::Config(_) => cmd_config(&config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LoaderConfig> {
    match path {
        Some(path) => LoaderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(LoaderConfig::default()),
    }
}

async fn cmd_load(config: &LoaderConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let registry = Arc::new(Registry::new());
    let report = DataLoader::new(config).load(&registry).await;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }

    if !report.is_complete() {
        bail!(
            "{} of {} datasets failed to load",
            report.error_count(),
            report.error_count() + report.success_count()
        );
    }
    Ok(())
}

fn print_report(report: &LoadReport) {
    for s in &report.loaded {
        let fallback = if s.fallback { " (fallback)".yellow().to_string() } else { String::new() };
        println!(
            "{} {:<8} {:>5} entries  {}{}",
            "✓".green().bold(),
            s.dataset.to_string().bold(),
            s.entries,
            s.origin.dimmed(),
            fallback
        );
    }
    for e in &report.errors {
        println!(
            "{} {:<8} {}",
            "✗".red().bold(),
            e.dataset.to_string().bold(),
            format!("{} failed: {}", e.stage, e.cause).red()
        );
    }
}

/// What `lookup` searches by.
#[derive(Debug)]
enum LookupKey {
    Id(String),
    Name(String),
}

async fn cmd_lookup(config: &LoaderConfig, format: &OutputFormat, args: LookupArgs) -> anyhow::Result<()> {
    let key = match (args.id, args.name) {
        (Some(id), _) => LookupKey::Id(id),
        (None, Some(name)) => LookupKey::Name(name),
        (None, None) => bail!("lookup needs --id or --name"),
    };
    let dataset = DatasetName::from(args.dataset);

    let registry = Arc::new(Registry::new());
    let report = DataLoader::new(config).load(&registry).await;
    let unavailable = || match report.error_for(dataset) {
        Some(e) => anyhow!("{e}"),
        None => anyhow!("{dataset} not loaded"),
    };

    match dataset {
        DatasetName::Items => {
            let store = registry.items().ok_or_else(unavailable)?;
            print_record(lookup(store.as_ref(), &key)?, format)
        }
        DatasetName::Tiles => {
            let store = registry.tiles().ok_or_else(unavailable)?;
            print_record(lookup(store.as_ref(), &key)?, format)
        }
        DatasetName::Objects => {
            let store = registry.objects().ok_or_else(unavailable)?;
            print_record(lookup(store.as_ref(), &key)?, format)
        }
        DatasetName::Packets => {
            let store = registry.packets().ok_or_else(unavailable)?;
            print_record(lookup(store.as_ref(), &key)?, format)
        }
        DatasetName::Servers => {
            let store = registry.servers().ok_or_else(unavailable)?;
            print_record(lookup(store.as_ref(), &key)?, format)
        }
    }
}

fn lookup<'a, K, V>(store: &'a KeyedStore<K, V>, key: &LookupKey) -> anyhow::Result<&'a V>
where
    K: Clone + Eq + Hash + Display + FromStr,
    K::Err: Display,
    V: Record<Key = K>,
{
    match key {
        LookupKey::Id(raw) => {
            let id: K = raw.parse().map_err(|e| anyhow!("invalid id '{raw}': {e}"))?;
            Ok(store.by_id(&id)?)
        }
        LookupKey::Name(name) => Ok(store.by_name(name)?),
    }
}

fn print_record<V: Serialize + Debug>(record: &V, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Text => println!("{record:#?}"),
    }
    Ok(())
}

fn cmd_config(config: &LoaderConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
