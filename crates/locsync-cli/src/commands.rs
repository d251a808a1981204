use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use locsync_diff::diff_content;
use locsync_document::Format;
use locsync_types::{absolute_branch, categories, BranchResource, Categories, TxConfig};
use locsync_updater::SyncConfig;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args),
        Command::Slug(args) => cmd_slug(args),
        Command::Categories(args) => cmd_categories(args),
        Command::CheckConfig(args) => cmd_check_config(args),
    }
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<()> {
    let format = resolve_format(args.format, &args.head)?;
    let head = std::fs::read(&args.head)
        .with_context(|| format!("reading {}", args.head.display()))?;
    let base = std::fs::read(&args.base)
        .with_context(|| format!("reading {}", args.base.display()))?;

    match diff_content(&head, &base, format)? {
        Some(delta) => print!("{}", String::from_utf8_lossy(&delta)),
        None => println!("{}", "No new or changed phrases.".dimmed()),
    }
    Ok(())
}

fn resolve_format(arg: Option<FormatArg>, head: &Path) -> anyhow::Result<Format> {
    match arg {
        Some(FormatArg::Yaml) => Ok(Format::Yaml),
        Some(FormatArg::Json) => Ok(Format::Json),
        None => match head.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => bail!("cannot guess the format of {}; pass --format", head.display()),
        },
    }
}

fn cmd_slug(args: SlugArgs) -> anyhow::Result<()> {
    let branch = if args.absolute {
        absolute_branch(&args.branch)
    } else {
        args.branch
    };
    println!("{}", BranchResource::scoped_slug(&args.resource, &branch));
    Ok(())
}

fn cmd_categories(args: CategoriesArgs) -> anyhow::Result<()> {
    match args.action {
        CategoriesAction::Encode { pairs } => {
            println!("{}", categories::encode(&parse_pairs(&pairs)?));
        }
        CategoriesAction::Decode { encoded } => {
            for (key, value) in categories::decode(&encoded) {
                println!("{}={}", key.bold(), value);
            }
        }
    }
    Ok(())
}

fn parse_pairs(pairs: &[String]) -> anyhow::Result<Categories> {
    let mut out = Categories::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("expected key=value, got {pair:?}");
        };
        if key.is_empty()
            || key.contains(categories::KEY_VALUE_SEPARATOR)
            || key.contains(char::is_whitespace)
        {
            bail!("invalid category key {key:?}");
        }
        if value.contains(char::is_whitespace) {
            bail!("category value for {key:?} must not contain whitespace");
        }
        out.insert(key.to_string(), value.to_string());
    }
    Ok(out)
}

fn cmd_check_config(args: CheckConfigArgs) -> anyhow::Result<()> {
    let config = SyncConfig::load(&args.path)
        .with_context(|| format!("loading {}", args.path.display()))?;
    let tx_config = config
        .load_tx_config()
        .with_context(|| format!("loading {}", config.tx_config_path().display()))?;

    println!("{} {}", "✓".green().bold(), "Config is valid".bold());
    for line in config_summary(&config, &tx_config) {
        println!("{line}");
    }
    Ok(())
}

fn config_summary(config: &SyncConfig, tx_config: &TxConfig) -> Vec<String> {
    let mode = match config.repo.diff_point() {
        Some(point) => format!("diffs against {point}"),
        None => "whole files".to_string(),
    };
    let branches = if config.repo.process_all_branches() {
        "all branches".to_string()
    } else {
        format!("branch {}", config.repo.branch)
    };

    let mut lines = vec![
        format!("  Repository: {} ({branches})", config.repo.name),
        format!("  Project: {}", config.project.slug),
        format!("  Uploads: {mode}"),
        format!("  Resources: {}", tx_config.resources().len()),
    ];
    for resource in tx_config.resources() {
        let note = match Format::from_resource_type(resource.resource_type()) {
            Ok(format) => format.to_string(),
            Err(_) if config.repo.upload_diffs() => "no diff support".to_string(),
            Err(_) => resource.resource_type().to_string(),
        };
        lines.push(format!(
            "    {} <- {} [{note}]",
            resource.resource_slug(),
            resource.source_file()
        ));
    }
    lines
}
