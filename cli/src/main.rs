mod output;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser as _;
use falcon_mirror::{
    config, default_process, encode, ClusterContext, ClusterEntity, DecodeMode, EntityStore,
    EntityType, ExtensionProperties, FalconClient, Job, LocationKind, MirrorService,
    ProcessEntity, UiModel,
};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use output::OutputFormat;

#[tokio::main]
async fn main() {
    if let Err(err) = init_tracing() {
        eprintln!("Failed to initialize logging: {err:#}");
    }

    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;
    Ok(())
}

/// Edit Falcon mirroring and snapshot jobs through their UI model
#[derive(Debug, clap::Parser)]
#[command(name = "falcon-mirror", version)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format for UI models and server responses
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Decode a process document into its UI model
    Decode {
        /// Process XML file
        file: PathBuf,

        /// Clear the job name so the model can be saved as a new job
        #[arg(long)]
        clone: bool,

        /// Reject documents without a sub-type marker instead of assuming HIVE
        #[arg(long)]
        no_fallback: bool,
    },

    /// Encode a UI model (JSON) into a process document
    Encode {
        /// UI model JSON file
        file: PathBuf,

        /// Process XML to encode onto (defaults to the sub-type template)
        #[arg(long)]
        base: Option<PathBuf>,

        /// Cluster XML files used for cluster-derived endpoints
        #[arg(long = "cluster")]
        clusters: Vec<PathBuf>,

        /// Print snapshot extension properties instead of a process document
        #[arg(long)]
        extension: bool,
    },

    /// Print the storage kind of a URL (HDFS, S3 or Azure)
    Classify { url: String },

    /// Fetch a process from the server and print its UI model
    Fetch {
        name: String,

        #[arg(long)]
        clone: bool,
    },

    /// Submit a UI model (JSON) to the server
    Save {
        /// UI model JSON file
        file: PathBuf,

        /// Process XML to encode onto
        #[arg(long)]
        base: Option<PathBuf>,

        /// Update the existing job instead of submitting a new one
        #[arg(long)]
        edit: bool,
    },

    /// Ask the server to validate a UI model (JSON) without storing it
    Validate {
        /// UI model JSON file
        file: PathBuf,

        /// Process XML to encode onto
        #[arg(long)]
        base: Option<PathBuf>,
    },

    /// Schedule an entity
    Schedule(EntityArgs),

    /// Suspend an entity
    Suspend(EntityArgs),

    /// Resume a suspended entity
    Resume(EntityArgs),

    /// Delete an entity
    Delete(EntityArgs),
}

#[derive(Debug, clap::Args)]
struct EntityArgs {
    name: String,

    /// Entity type (cluster, feed or process)
    #[arg(long = "type", default_value = "process")]
    kind: EntityType,
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load_or_default(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Decode {
            file,
            clone,
            no_fallback,
        } => {
            let process = ProcessEntity::parse(&read_file(&file)?)?;
            let mut options = falcon_mirror::DecodeOptions {
                mode: DecodeMode::Edit,
                fallback: config.subtype_fallback,
            };
            if clone {
                options = options.clone_mode();
            }
            if no_fallback {
                options.fallback = None;
            }
            let ui = falcon_mirror::decode(&process, &options)?;
            format.print(&ui)?;
        }
        Commands::Encode {
            file,
            base,
            clusters,
            extension,
        } => {
            let ui = read_ui_model(&file)?;
            if extension {
                let UiModel::Snapshot(snapshot) = &ui else {
                    anyhow::bail!("--extension only applies to snapshot jobs");
                };
                print!("{}", ExtensionProperties::from_snapshot(snapshot)?);
                return Ok(());
            }
            let base = match base {
                Some(path) => ProcessEntity::parse(&read_file(&path)?)?,
                None => default_process(ui.subtype()),
            };
            let mut context = ClusterContext::new();
            for path in &clusters {
                context.add(ClusterEntity::parse(&read_file(path)?)?);
            }
            let process = encode(&ui, &base, &context)?;
            println!("{}", process.to_xml()?);
        }
        Commands::Classify { url } => {
            println!("{}", LocationKind::classify(&url));
        }
        Commands::Fetch { name, clone } => {
            let service = connect(config)?;
            let mode = if clone {
                DecodeMode::Clone
            } else {
                DecodeMode::Edit
            };
            let job = service.load(&name, mode).await?;
            format.print(&job.ui)?;
        }
        Commands::Save { file, base, edit } => {
            let ui = read_ui_model(&file)?;
            let service = connect(config)?;
            let base = match base {
                Some(path) => ProcessEntity::parse(&read_file(&path)?)?,
                None if edit && matches!(ui, UiModel::Dataset(_)) => {
                    service.load(ui.name(), DecodeMode::Edit).await?.base
                }
                None => default_process(ui.subtype()),
            };
            let result = service.save(&Job { ui, base }, edit).await?;
            format.print(&result)?;
        }
        Commands::Validate { file, base } => {
            let ui = read_ui_model(&file)?;
            let base = match base {
                Some(path) => ProcessEntity::parse(&read_file(&path)?)?,
                None => default_process(ui.subtype()),
            };
            let result = connect(config)?.validate(&Job { ui, base }).await?;
            format.print(&result)?;
        }
        Commands::Schedule(args) => {
            let result = connect(config)?.store().schedule(args.kind, &args.name).await?;
            format.print(&result)?;
        }
        Commands::Suspend(args) => {
            let result = connect(config)?.store().suspend(args.kind, &args.name).await?;
            format.print(&result)?;
        }
        Commands::Resume(args) => {
            let result = connect(config)?.store().resume(args.kind, &args.name).await?;
            format.print(&result)?;
        }
        Commands::Delete(args) => {
            let result = connect(config)?.store().delete(args.kind, &args.name).await?;
            format.print(&result)?;
        }
    }

    Ok(())
}

fn connect(config: falcon_mirror::Config) -> anyhow::Result<MirrorService<FalconClient>> {
    let client = FalconClient::new(&config.server)?;
    info!(base_url = %client.base_url(), "Using Falcon server");
    Ok(MirrorService::new(client, config))
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_ui_model(path: &Path) -> anyhow::Result<UiModel> {
    let content = read_file(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid UI model in {}", path.display()))
}
