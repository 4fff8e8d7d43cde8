use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tessera", version)]
struct Cli {
    /// Log step progress and layer placements to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a recipe and write one step's image as PNG.
    Render(RenderArgs),
    /// List every registered operation.
    Ops,
    /// Decode an image file and print its content hash.
    Hash(HashArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Recipe JSON.
    #[arg(long)]
    recipe: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Step whose output is written (defaults to the last step).
    #[arg(long)]
    target: Option<String>,

    /// Resource root for `gfx:resolve_resource` (defaults to the recipe's directory).
    #[arg(long)]
    resources: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct HashArgs {
    /// PNG, JPEG or WEBP file.
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Ops => {
            for name in tessera::OpName::ALL {
                println!("{name}");
            }
            Ok(())
        }
        Command::Hash(args) => cmd_hash(&args.path),
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "tessera=debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.recipe)
        .with_context(|| format!("read recipe '{}'", args.recipe.display()))?;
    let recipe = tessera::Recipe::from_json(&text)?;

    let root = match args.resources {
        Some(dir) => dir,
        None => args
            .recipe
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let services =
        tessera::Services::new(Arc::new(tessera::DirResourceResolver::new(root))).with_system_fonts();

    let outputs = recipe.run_until(args.target.as_deref(), &services)?;
    let (id, artifact) = match args.target.as_deref() {
        Some(t) => (t, outputs.get(t)),
        None => match outputs.last() {
            Some((id, a)) => (id, Some(a)),
            None => anyhow::bail!("recipe has no steps"),
        },
    };
    let artifact = artifact.with_context(|| format!("step '{id}' produced no output"))?;
    let image = artifact.as_image("tessera render", id)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, image.encode_png()?)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    println!(
        "{id}: {}x{} {} -> {}",
        image.width(),
        image.height(),
        image.content_hash(),
        args.out.display()
    );
    Ok(())
}

fn cmd_hash(path: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    let content_type =
        tessera::adapters::resource::content_type_for(path).unwrap_or("application/octet-stream");
    let blob = tessera::BlobArtifact::new(bytes, content_type);
    let image = tessera::ops::source::blob_to_image(&blob)?;
    println!("blob  {}", blob.content_hash());
    println!("image {}x{} {}", image.width(), image.height(), image.content_hash());
    Ok(())
}
