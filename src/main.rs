mod cli;

use artifact_inspector::adapters::outbound::console::StderrProgressReporter;
use artifact_inspector::adapters::outbound::filesystem::{FileSystemReader, MirrorManifestLocator};
use artifact_inspector::adapters::outbound::memory::NoComposerManifests;
use artifact_inspector::adapters::outbound::network::BlackDuckClient;
use artifact_inspector::application::dto::{IdentifyRequest, ReconcileRequest};
use artifact_inspector::application::factories::{FormatterFactory, PresenterFactory};
use artifact_inspector::application::use_cases::{
    IdentifyArtifactsUseCase, ReconcileNotificationsUseCase,
};
use artifact_inspector::config::{self, Settings, API_TOKEN_ENV};
use artifact_inspector::ports::outbound::ComposerManifestLocator;
use artifact_inspector::shared::error::{ExitCode, InspectorError};
use artifact_inspector::shared::telemetry::init_tracing;
use artifact_inspector::shared::Result;
use cli::{Args, Command, IdentifyArgs, ReconcileArgs};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse command-line arguments (clap exits with 2 on invalid arguments)
    let args = Args::parse_args();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    init_tracing(level);

    match run(args).await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            print_error(&e);
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn print_error(e: &anyhow::Error) {
    let colored = std::io::stderr().is_terminal();
    let header = "❌ An error occurred:";
    if colored {
        eprintln!("\n{}\n", header.red().bold());
    } else {
        eprintln!("\n{}\n", header);
    }
    eprintln!("{}", e);

    // Display error chain
    let mut source = e.source();
    while let Some(err) = source {
        eprintln!("\nCaused by: {}", err);
        source = err.source();
    }

    eprintln!();
}

async fn run(args: Args) -> Result<ExitCode> {
    let settings = load_settings(args.config.as_deref())?;

    match args.command {
        Command::Identify(identify) => run_identify(identify, settings),
        Command::Reconcile(reconcile) => run_reconcile(reconcile, settings).await,
    }
}

fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        let settings = config::load_config_from_path(path)?;
        eprintln!("📄 Loaded config from: {}", path.display());
        return Ok(settings);
    }

    let current_dir = std::env::current_dir()?;
    match config::discover_config(&current_dir)? {
        Some(settings) => {
            eprintln!(
                "📄 Auto-discovered config file: {}",
                current_dir.join(config::CONFIG_FILENAME).display()
            );
            Ok(settings)
        }
        None => Ok(Settings::default()),
    }
}

fn run_identify(args: IdentifyArgs, settings: Settings) -> Result<ExitCode> {
    let manifests: Arc<dyn ComposerManifestLocator> = match args.manifest_root {
        Some(root) => {
            validate_manifest_root(&root)?;
            Arc::new(MirrorManifestLocator::new(root))
        }
        None => Arc::new(NoComposerManifests),
    };

    let use_case = IdentifyArtifactsUseCase::new(
        FileSystemReader::new(),
        manifests,
        StderrProgressReporter::new(),
        settings.resolver,
    );

    let request = IdentifyRequest::new(args.paths, args.ecosystem, args.metadata);
    let response = use_case.execute(request)?;

    eprintln!("{}", FormatterFactory::progress_message(args.output.format));
    let formatter = FormatterFactory::create(args.output.format);
    let formatted = formatter.format_identification(&response)?;
    present(args.output.output, &formatted)?;

    Ok(exit_code_for(response.is_clean()))
}

async fn run_reconcile(args: ReconcileArgs, settings: Settings) -> Result<ExitCode> {
    let url = args
        .blackduck_url
        .or_else(|| settings.blackduck_url.clone())
        .ok_or_else(|| InspectorError::ServiceNotConfigured {
            details: "no service URL was given".to_string(),
        })?;
    let token = settings
        .api_token(std::env::var(API_TOKEN_ENV).ok())
        .ok_or_else(|| InspectorError::ServiceNotConfigured {
            details: format!(
                "no API token; set {} or blackduck.api_token in the config file",
                API_TOKEN_ENV
            ),
        })?;
    let client = BlackDuckClient::new(&url, token)?;

    let deadline = args
        .deadline_seconds
        .map(Duration::from_secs)
        .or(settings.pass_deadline);

    let use_case = ReconcileNotificationsUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        Arc::new(client),
        StderrProgressReporter::new(),
        settings.reconcile,
    );

    let request = ReconcileRequest::new(args.notifications, args.index, deadline);
    let response = use_case.execute(request).await?;

    eprintln!("{}", FormatterFactory::progress_message(args.output.format));
    let formatter = FormatterFactory::create(args.output.format);
    let formatted = formatter.format_reconciliation(&response)?;
    present(args.output.output, &formatted)?;

    Ok(exit_code_for(response.is_clean()))
}

fn present(output: Option<PathBuf>, content: &str) -> Result<()> {
    let presenter = PresenterFactory::create(output.into());
    presenter.present(content)
}

fn exit_code_for(clean: bool) -> ExitCode {
    if clean {
        ExitCode::Success
    } else {
        ExitCode::FailuresReported
    }
}

fn validate_manifest_root(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(InspectorError::Validation {
            message: format!("Manifest root does not exist: {}", path.display()),
        }
        .into());
    }

    // Security check: Reject symbolic links for the mirror root
    let metadata = std::fs::symlink_metadata(path).map_err(|e| InspectorError::Validation {
        message: format!(
            "Failed to read manifest root metadata: {}: {}",
            path.display(),
            e
        ),
    })?;

    if metadata.is_symlink() {
        return Err(InspectorError::SecurityError {
            path: path.to_path_buf(),
            reason: "Manifest root is a symbolic link".to_string(),
            hint: "Pass the real directory of the repository mirror".to_string(),
        }
        .into());
    }

    if !metadata.is_dir() {
        return Err(InspectorError::Validation {
            message: format!("Manifest root is not a directory: {}", path.display()),
        }
        .into());
    }

    Ok(())
}
