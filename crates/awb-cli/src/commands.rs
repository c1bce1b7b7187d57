use std::path::Path;

use anyhow::{Context, Result};
use awb_cli::pipeline::{RunOptions, RunOutcome, run_report};
use awb_config::{ConfigSummary, LoadedConfig, load_config, render_config};
use tracing::info;

use crate::cli::{ConfigArgs, RunArgs};
use crate::summary::categories_table;

fn load(path: Option<&Path>) -> Result<LoadedConfig> {
    let loaded = load_config(path).context("load configuration")?;
    match &loaded.source {
        Some(source) => info!(
            config = %source.display(),
            fingerprint = %loaded.fingerprint,
            "configuration loaded"
        ),
        None => info!(fingerprint = %loaded.fingerprint, "using default configuration"),
    }
    Ok(loaded)
}

pub fn run_run(args: &RunArgs) -> Result<RunOutcome> {
    let config = load(args.config.as_deref())?;
    let options = RunOptions {
        input: args.input.clone(),
        output: args.output.clone(),
        log_dir: args.log_dir.clone(),
        dry_run: args.dry_run,
    };
    run_report(&options, &config)
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    let config = load(args.config.as_deref())?;
    if args.json {
        let summary = ConfigSummary::from_loaded(&config);
        let json = serde_json::to_string_pretty(&summary).context("encode config summary")?;
        println!("{json}");
    } else {
        let toml = render_config(&config.config).context("render configuration")?;
        println!("# fingerprint: {}", config.fingerprint);
        print!("{toml}");
    }
    Ok(())
}

pub fn run_categories() -> Result<()> {
    println!("{}", categories_table());
    Ok(())
}
