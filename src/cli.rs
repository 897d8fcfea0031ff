use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use artifact_inspector::application::dto::OutputFormat;
use artifact_inspector::config::MAX_PASS_DEADLINE_SECONDS;
use artifact_inspector::inspection::domain::{ArtifactLocation, Ecosystem};

/// Resolve component identities and reconcile intelligence-service notifications
/// for binary artifact repositories
#[derive(Parser, Debug)]
#[command(name = "artifact-inspector")]
#[command(version)]
#[command(about = "Component intelligence for binary artifact repositories", long_about = None)]
pub struct Args {
    /// Path to the config file (defaults to artifact-inspector.config.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve canonical component identities for artifacts
    Identify(IdentifyArgs),
    /// Reconcile a batch of policy and vulnerability notifications
    Reconcile(ReconcileArgs),
}

#[derive(ClapArgs, Debug)]
pub struct IdentifyArgs {
    /// Package type applied to every path, overriding the per-repository declaration
    #[arg(short, long, value_name = "TAG")]
    pub ecosystem: Option<Ecosystem>,

    /// Artifact metadata export (JSON) with properties, build layouts and checksums
    #[arg(short, long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Local mirror of the repository, searched for composer packages.json manifests
    #[arg(long, value_name = "DIR")]
    pub manifest_root: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Artifact paths, written as repo-key/path/to/file
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<ArtifactLocation>,
}

#[derive(ClapArgs, Debug)]
pub struct ReconcileArgs {
    /// Notification batch exported from the intelligence service (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub notifications: PathBuf,

    /// Project index mapping project versions to artifact paths (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub index: PathBuf,

    /// Deadline for the whole pass; overrides pass_deadline_seconds from the config
    #[arg(
        short,
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..=MAX_PASS_DEADLINE_SECONDS)
    )]
    pub deadline_seconds: Option<u64>,

    /// Base URL of the intelligence service; overrides blackduck.url from the config
    #[arg(long, env = "BLACKDUCK_URL", value_name = "URL")]
    pub blackduck_url: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
pub struct OutputArgs {
    /// Output format: json or markdown
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
