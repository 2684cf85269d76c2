//! `studystore`: command-line access to the study storage tree.
//!
//! Configuration is resolved once at startup: command-line flags first, then the
//! `STUDY_STORAGE_*` environment variables (a `.env` file is loaded if present).
//! Descriptors are printed as pretty JSON on stdout.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use study_storage::config::{policy_from_env_values, url_prefix_from_env_value};
use study_storage::constants::{
    ENV_OVERWRITE_EXISTING, ENV_STORAGE_ROOT, ENV_URL_PREFIX, ENV_USE_EXISTING,
};
use study_storage::{
    Assay, ConflictPolicy, NonEmptyText, Program, StorageConfig, Study, StudyStorageService,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "studystore")]
#[command(about = "Study storage folder management CLI")]
struct Cli {
    /// Storage root directory (overrides STUDY_STORAGE_ROOT)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// URL prefix for descriptors (overrides STUDY_STORAGE_URL_PREFIX)
    #[arg(long, global = true)]
    url_prefix: Option<String>,

    /// Reuse folders that already exist (overrides STUDY_STORAGE_USE_EXISTING)
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    use_existing: Option<bool>,

    /// Replace (empty) folders that already exist (overrides STUDY_STORAGE_OVERWRITE_EXISTING)
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    overwrite_existing: Option<bool>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the program folders under the storage root
    List,
    /// Show a folder and its immediate contents
    Resolve {
        #[command(subcommand)]
        target: Target,
    },
    /// Create a folder (its parent folders must exist)
    Create {
        #[command(subcommand)]
        target: Target,
    },
    /// Copy a file into a study or assay folder
    Save {
        #[command(subcommand)]
        target: SaveTarget,
    },
}

#[derive(Subcommand)]
enum Target {
    Program(ProgramArgs),
    Study(StudyArgs),
    Assay(AssayArgs),
}

#[derive(Subcommand)]
enum SaveTarget {
    Study {
        /// File to copy
        file: PathBuf,
        #[command(flatten)]
        study: StudyArgs,
    },
    Assay {
        /// File to copy
        file: PathBuf,
        #[command(flatten)]
        assay: AssayArgs,
    },
}

#[derive(Args, Clone)]
struct ProgramArgs {
    #[arg(long)]
    program_code: NonEmptyText,
    #[arg(long)]
    program_name: NonEmptyText,
}

#[derive(Args, Clone)]
struct StudyArgs {
    #[command(flatten)]
    program: ProgramArgs,
    #[arg(long)]
    study_code: NonEmptyText,
    #[arg(long)]
    study_name: NonEmptyText,
}

#[derive(Args, Clone)]
struct AssayArgs {
    #[command(flatten)]
    study: StudyArgs,
    #[arg(long)]
    assay_code: NonEmptyText,
    #[arg(long)]
    assay_name: NonEmptyText,
}

impl From<ProgramArgs> for Program {
    fn from(args: ProgramArgs) -> Self {
        Program::new(args.program_code, args.program_name)
    }
}

impl From<StudyArgs> for Study {
    fn from(args: StudyArgs) -> Self {
        Study::new(args.study_code, args.study_name, args.program.into())
    }
}

impl From<AssayArgs> for Assay {
    fn from(args: AssayArgs) -> Self {
        Assay::new(args.assay_code, args.assay_name, args.study.into())
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Builds the storage configuration from flags, falling back to the environment.
fn resolve_config(cli: &Cli) -> Result<StorageConfig> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => env_value(ENV_STORAGE_ROOT)
            .map(PathBuf::from)
            .with_context(|| format!("--root or {ENV_STORAGE_ROOT} must be set"))?,
    };

    let url_prefix = match &cli.url_prefix {
        Some(prefix) => prefix.clone(),
        None => url_prefix_from_env_value(env_value(ENV_URL_PREFIX)),
    };

    let env_policy = policy_from_env_values(
        env_value(ENV_USE_EXISTING),
        env_value(ENV_OVERWRITE_EXISTING),
    )?;

    Ok(StorageConfig::new(root, url_prefix, merge_policy(cli, env_policy))?)
}

/// Each policy flag given on the command line replaces the environment's value.
fn merge_policy(cli: &Cli, env_policy: ConflictPolicy) -> ConflictPolicy {
    ConflictPolicy::new(
        cli.use_existing.unwrap_or(env_policy.use_existing),
        cli.overwrite_existing.unwrap_or(env_policy.overwrite_existing),
    )
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("study_storage=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = resolve_config(&cli).context("invalid storage configuration")?;

    tracing::debug!(
        "storage root {} with url prefix {:?}",
        cfg.root_path().display(),
        cfg.root_url_prefix()
    );
    let service = StudyStorageService::new(Arc::new(cfg));

    match cli.command {
        Commands::List => {
            let root = service.root_folder()?;
            if root.is_empty() {
                tracing::info!("no program folders under {}", root.absolute_path.display());
            }
            print_json(&root)
        }
        Commands::Resolve { target } => match target {
            Target::Program(args) => print_json(&service.resolve_program_folder(&args.into())?),
            Target::Study(args) => print_json(&service.resolve_study_folder(&args.into())?),
            Target::Assay(args) => print_json(&service.resolve_assay_folder(&args.into())?),
        },
        Commands::Create { target } => match target {
            Target::Program(args) => print_json(&service.create_program_folder(&args.into())?),
            Target::Study(args) => print_json(&service.create_study_folder(&args.into())?),
            Target::Assay(args) => print_json(&service.create_assay_folder(&args.into())?),
        },
        Commands::Save { target } => match target {
            SaveTarget::Study { file, study } => {
                let saved = service
                    .save_study_file(&file, &study.into())
                    .with_context(|| format!("failed to save {}", file.display()))?;
                print_json(&saved)
            }
            SaveTarget::Assay { file, assay } => {
                let saved = service
                    .save_assay_file(&file, &assay.into())
                    .with_context(|| format!("failed to save {}", file.display()))?;
                print_json(&saved)
            }
        },
    }
}
