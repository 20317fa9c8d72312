use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde_json::Value;

use kpatch_diff::{
    apply_to_mapping, diff_with_options, pointer, DiffOptions, PatchOperation, PatchOperations,
};
use kpatch_types::Mapping;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let output = match cli.command {
        Command::Diff(args) => cmd_diff(&args, cli.format)?,
        Command::Escape(args) => cmd_escape(&args, cli.format)?,
        Command::Apply(args) => cmd_apply(&args)?,
    };
    println!("{output}");
    Ok(())
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn read_mapping(path: &Path) -> anyhow::Result<Mapping> {
    let value = read_json(path)?;
    Mapping::from_json(&value).with_context(|| format!("loading mapping from {}", path.display()))
}

fn load_options(args: &DiffArgs) -> anyhow::Result<DiffOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => DiffOptions::default(),
    };
    if args.strict_prefix {
        options.strict_prefix = true;
    }
    if args.per_key_add {
        options.whole_map_add = false;
    }
    tracing::debug!(?options, "resolved diff options");
    Ok(options)
}

fn cmd_diff(args: &DiffArgs, format: OutputFormat) -> anyhow::Result<String> {
    let options = load_options(args)?;
    let old = read_mapping(&args.old)?;
    let new = read_mapping(&args.new)?;
    let ops = diff_with_options(&args.prefix, &old, &new, &options)?;
    match format {
        OutputFormat::Json => Ok(ops.to_json_pretty()?),
        OutputFormat::Text => Ok(render_text(&ops)),
    }
}

fn render_text(ops: &PatchOperations) -> String {
    if ops.is_empty() {
        return "No changes.".into();
    }
    ops.iter()
        .map(|op| match op {
            PatchOperation::Add { path, value } => {
                format!("{} {} = {}", "+".green().bold(), path, value.to_string().green())
            }
            PatchOperation::Replace { path, value } => {
                format!("{} {} = {}", "~".yellow().bold(), path, value.to_string().yellow())
            }
            PatchOperation::Remove { path } => format!("{} {}", "-".red().bold(), path.red()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn cmd_escape(args: &EscapeArgs, format: OutputFormat) -> anyhow::Result<String> {
    let escaped: Vec<String> = args
        .segments
        .iter()
        .map(|s| pointer::escape(s).into_owned())
        .collect();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&escaped)?),
        OutputFormat::Text => Ok(escaped.join("\n")),
    }
}

fn cmd_apply(args: &ApplyArgs) -> anyhow::Result<String> {
    let mapping = read_mapping(&args.mapping)?;
    let patch_text = fs::read_to_string(&args.patch)
        .with_context(|| format!("reading {}", args.patch.display()))?;
    let ops = PatchOperations::from_json(&patch_text)
        .with_context(|| format!("parsing patch {}", args.patch.display()))?;
    let result = apply_to_mapping(&args.prefix, &mapping, ops.as_slice())?;
    Ok(serde_json::to_string_pretty(&result)?)
}
