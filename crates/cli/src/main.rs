use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Result};
use folio_core::{
    BlobStore, NewProject, ProjectId, ProjectPatch, ProjectStore, PROJECTS_STORAGE_NAME,
};
use folio_proto::{CreateProjectParams, ProjectsResponse};
use folio_server::Server;
use folio_storage_ephemeral::EphemeralBlobStore;
use folio_storage_local::LocalBlobStore;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_ROOT: &str = "./data";
const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[derive(Clone, Debug, ValueEnum, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Backend {
    Local,
    Ephemeral,
}

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Portfolio project store")]
struct Cli {
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(flatten)]
    store: StoreArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct StoreArgs {
    #[arg(long, global = true, value_enum)]
    backend: Option<Backend>,
    #[arg(long, global = true)]
    root: Option<String>,
    /// Logical storage name; sanitized before use as the blob key.
    #[arg(long = "storage-name", global = true)]
    storage_name: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Serve(ServeArgs),
    List,
    Get { id: ProjectId },
    Create(CreateArgs),
    Update(UpdateArgs),
    Delete { id: ProjectId },
    Init,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long)]
    addr: Option<String>,
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long = "image-url")]
    image_url: Option<String>,
    #[arg(long = "tag", action = ArgAction::Append, value_name = "TAG")]
    tags: Vec<String>,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    id: ProjectId,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long = "image-url")]
    image_url: Option<String>,
    #[arg(long = "tag", action = ArgAction::Append, value_name = "TAG")]
    tags: Vec<String>,
    #[arg(long = "clear-tags", conflicts_with = "tags")]
    clear_tags: bool,
}

impl From<CreateArgs> for CreateProjectParams {
    fn from(a: CreateArgs) -> Self {
        Self {
            title: a.title,
            description: a.description,
            category: a.category,
            image_url: a.image_url,
            tags: Some(a.tags),
        }
    }
}

impl From<UpdateArgs> for ProjectPatch {
    fn from(a: UpdateArgs) -> Self {
        let tags = if a.clear_tags {
            Some(Vec::new())
        } else if a.tags.is_empty() {
            None
        } else {
            Some(a.tags)
        };
        Self {
            title: a.title,
            description: a.description,
            category: a.category,
            image_url: a.image_url,
            tags,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct StorageSection {
    backend: Option<Backend>,
    root: Option<String>,
    logical_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    addr: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    #[serde(default)]
    storage: Option<StorageSection>,
    #[serde(default)]
    server: Option<ServerSection>,
}

/// Settings after layering flags over config file and environment over defaults.
#[derive(Debug)]
struct Resolved {
    backend: Backend,
    root: PathBuf,
    logical_name: String,
    addr: String,
}

fn resolve(store: &StoreArgs, serve_addr: Option<&str>, cfg: &AppConfig) -> Resolved {
    let storage = cfg.storage.as_ref();
    let backend = store
        .backend
        .clone()
        .or_else(|| storage.and_then(|s| s.backend.clone()))
        .unwrap_or(Backend::Local);
    let root = store
        .root
        .clone()
        .or_else(|| storage.and_then(|s| s.root.clone()))
        .unwrap_or_else(|| DEFAULT_ROOT.to_owned());
    let logical_name = store
        .storage_name
        .clone()
        .or_else(|| storage.and_then(|s| s.logical_name.clone()))
        .unwrap_or_else(|| PROJECTS_STORAGE_NAME.to_owned());
    let addr = serve_addr
        .map(str::to_owned)
        .or_else(|| cfg.server.as_ref().and_then(|s| s.addr.clone()))
        .unwrap_or_else(|| DEFAULT_ADDR.to_owned());
    Resolved {
        backend,
        root: expand_path(&root),
        logical_name,
        addr,
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    let cfg = load_config(cli.config.as_deref())?;
    let serve_addr = match &cli.command {
        Commands::Serve(args) => args.addr.as_deref(),
        _ => None,
    };
    let settings = resolve(&cli.store, serve_addr, &cfg);
    match settings.backend {
        Backend::Local => {
            let blob = Arc::new(LocalBlobStore::new(&settings.root));
            let store = ProjectStore::with_logical_name(blob, &settings.logical_name);
            execute(store, cli.command, &settings).await
        }
        Backend::Ephemeral => {
            let blob = Arc::new(EphemeralBlobStore::new());
            let store = ProjectStore::with_logical_name(blob, &settings.logical_name);
            execute(store, cli.command, &settings).await
        }
    }
}

async fn execute<S: BlobStore + 'static>(
    store: ProjectStore<S>,
    command: Commands,
    settings: &Resolved,
) -> Result<()> {
    match command {
        Commands::Serve(_) => {
            info!(
                backend = ?settings.backend,
                root = %settings.root.display(),
                key = %store.key(),
                "starting server"
            );
            Server::new(store).run_http(&settings.addr).await?;
        }
        Commands::List => print_json(&ProjectsResponse {
            projects: store.list(),
        })?,
        Commands::Get { id } => print_json(&store.get(id)?)?,
        Commands::Create(args) => {
            let new = NewProject::try_from(CreateProjectParams::from(args))?;
            print_json(&store.create(new)?)?;
        }
        Commands::Update(args) => {
            let id = args.id;
            print_json(&store.update(id, ProjectPatch::from(args))?)?;
        }
        Commands::Delete { id } => {
            store.delete(id)?;
            info!(project_id = id, "deleted");
        }
        Commands::Init => print_json(&ProjectsResponse {
            projects: store.initialize()?,
        })?,
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| eyre!("encode output: {}", e))?;
    println!("{out}");
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<AppConfig> {
    let mut builder = config::Config::builder()
        .add_source(config::Environment::with_prefix("FOLIO").separator("__"));

    if let Some(raw) = path {
        let expanded = expand_path(raw);
        if !expanded.exists() {
            tracing::warn!(
                path = expanded.display().to_string(),
                "config file not found; continuing with defaults and env overrides"
            );
        }
        builder = builder.add_source(config::File::from(expanded).required(false));
    }

    let cfg = builder
        .build()
        .map_err(|e| eyre!("config load error: {}", e))?;
    cfg.try_deserialize()
        .map_err(|e| eyre!("config parse error: {}", e))
}

fn expand_path(input: &str) -> PathBuf {
    if input == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from(input));
    }
    if let Some(rest) = input.strip_prefix("~/") {
        return home_dir()
            .map(|mut base| {
                base.push(rest);
                base
            })
            .unwrap_or_else(|| PathBuf::from(rest));
    }
    PathBuf::from(input)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
}
