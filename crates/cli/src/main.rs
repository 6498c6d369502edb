mod manifest;

use anyhow::{Context, Result, bail};
use clap::{Parser as ClapParser, Subcommand};
use parsy::{Config, MatchMode, Parser};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use crate::manifest::{DEFAULT_MANIFEST_NAME, Manifest, load_manifest, value_to_json};

#[derive(ClapParser)]
#[command(name = "parsy")]
#[command(
    version,
    about = "Inspect how declared options are extracted from a token list",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse tokens against a manifest and print values and remainder as JSON
    Parse(ParseArgs),

    /// Print the usage table for a manifest
    Usage(UsageArgs),

    /// Check a manifest for invalid or duplicate option keys
    Check(CheckArgs),
}

#[derive(ClapParser)]
struct ParseArgs {
    /// Path to the option manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,

    /// Require long keys to match the whole option name
    #[arg(long)]
    exact: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Tokens to parse (after `--`)
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

#[derive(ClapParser)]
struct UsageArgs {
    /// Path to the option manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,
}

#[derive(ClapParser)]
struct CheckArgs {
    /// Path to the option manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,
}

#[derive(serde::Serialize)]
struct Report {
    values: BTreeMap<String, serde_json::Value>,
    remainder: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse(args) => parse_command(args),
        Commands::Usage(args) => usage_command(args),
        Commands::Check(args) => check_command(args),
    }
}

fn build_parser(manifest: &Manifest, tokens: Vec<String>, mode: MatchMode) -> Result<Parser> {
    let parser = Parser::with_config(
        tokens,
        Config {
            match_mode: mode,
            env_fallback: false,
        },
    );
    for (idx, option) in manifest.options.iter().enumerate() {
        let def = option.to_arg_def()?;
        parser
            .register(def)
            .with_context(|| format!("failed to register option #{idx}"))?;
    }
    Ok(parser)
}

fn parse_command(args: ParseArgs) -> Result<()> {
    tracing::debug!("executing parse command");

    let manifest = load_manifest(&args.manifest)?;
    let mode = if args.exact {
        MatchMode::Exact
    } else {
        MatchMode::Prefix
    };
    let parser = build_parser(&manifest, args.tokens, mode)?;
    parser.parse().context("parse failed")?;

    let values = parser
        .keys()
        .into_iter()
        .filter_map(|key| {
            let value = parser.get(&key)?;
            Some((key, value_to_json(&value)))
        })
        .collect();
    let report = Report {
        values,
        remainder: parser.args(),
    };

    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");
    Ok(())
}

fn usage_command(args: UsageArgs) -> Result<()> {
    tracing::debug!("executing usage command");

    let manifest = load_manifest(&args.manifest)?;
    let parser = build_parser(&manifest, Vec::new(), MatchMode::Prefix)?;
    print!("{}", parser.help(&manifest.name));
    Ok(())
}

fn check_command(args: CheckArgs) -> Result<()> {
    tracing::debug!("executing check command");

    let manifest = load_manifest(&args.manifest)?;
    let parser = Parser::with_config(
        Vec::<String>::new(),
        Config {
            env_fallback: false,
            ..Config::default()
        },
    );

    let mut problems = 0usize;
    for (idx, option) in manifest.options.iter().enumerate() {
        let result = option.to_arg_def().and_then(|def| parser.register(def).map_err(Into::into));
        if let Err(err) = result {
            problems += 1;
            eprintln!("option #{idx}: {err:#}");
        }
    }

    if problems > 0 {
        bail!("{problems} problem(s) in {}", args.manifest.display());
    }
    println!("ok");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
