use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use stowage::{Storage, StorageConfig, Value, ValueKind, WriteStrategy};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    let storage = Storage::from_config(&config);
    tracing::debug!(location = %storage.location().display(), "using store");

    let format = cli.format;
    match cli.command {
        Command::Get(args) => cmd_get(&storage, args, &format),
        Command::Set(args) => cmd_set(&storage, args, &format),
        Command::Delete(args) => cmd_delete(&storage, args, &format),
        Command::List => cmd_list(&storage, &format),
        Command::Where => {
            println!("{}", storage.location().display());
            Ok(())
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

/// Config file values, then command-line overrides.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<StorageConfig> {
    let mut config = match &cli.config {
        Some(path) => StorageConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StorageConfig::default(),
    };
    if let Some(path) = &cli.path {
        config.path = path.clone();
    }
    if let Some(file_name) = &cli.file_name {
        config.file_name = file_name.clone();
    }
    if cli.atomic {
        config.write_strategy = WriteStrategy::Atomic;
    }
    Ok(config)
}

fn parse_value(kind: ValueKind, raw: &str) -> anyhow::Result<Value> {
    kind.parse(raw)
        .with_context(|| format!("{raw:?} is not a valid {kind}"))
}

fn zero_value(kind: ValueKind) -> Value {
    match kind {
        ValueKind::Text => Value::Text(String::new()),
        ValueKind::Integer => Value::Integer(0),
        ValueKind::Float => Value::Float(0.0),
    }
}

fn cmd_get(storage: &Storage, args: GetArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let kind = ValueKind::from(args.kind);
    let default = match &args.default {
        Some(raw) => parse_value(kind, raw)?,
        None => zero_value(kind),
    };
    let found = storage.contains(&args.key)?;
    let value = storage.load_value(&args.key, default)?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "key": args.key, "found": found, "value": value })
        ),
        OutputFormat::Text if found => println!("{value}"),
        OutputFormat::Text => {
            eprintln!("{} {} not set", "note:".yellow(), args.key.bold());
            println!("{value}");
        }
    }
    Ok(())
}

fn cmd_set(storage: &Storage, args: SetArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let value = parse_value(args.kind.into(), &args.value)?;
    storage.save(&args.key, value.clone())?;
    match format {
        OutputFormat::Json => println!("{}", json!({ "key": args.key, "value": value })),
        OutputFormat::Text => println!(
            "{} {} = {}",
            "✓".green().bold(),
            args.key.bold(),
            value.to_string().cyan()
        ),
    }
    Ok(())
}

fn cmd_delete(storage: &Storage, args: DeleteArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let existed = storage.delete(&args.key)?;
    match format {
        OutputFormat::Json => println!("{}", json!({ "key": args.key, "deleted": existed })),
        OutputFormat::Text if existed => println!("{} Deleted {}", "✓".green(), args.key.bold()),
        OutputFormat::Text => println!("{} was not set", args.key.bold()),
    }
    Ok(())
}

fn cmd_list(storage: &Storage, format: &OutputFormat) -> anyhow::Result<()> {
    let entries = storage.entries()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text if entries.is_empty() => println!("No keys stored."),
        OutputFormat::Text => {
            for (key, value) in &entries {
                println!("{} = {}", key.bold(), value.cyan());
            }
        }
    }
    Ok(())
}
