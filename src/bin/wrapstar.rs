use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "wrapstar", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the image-search and thumbnail proxy.
    Serve(ServeArgs),
    /// Build a gallery and export it as tiled wrapping paper.
    Wrap(WrapArgs),
    /// Normalize one local image into a square thumbnail PNG.
    Thumb(ThumbArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Listen address (overrides HOST).
    #[arg(long)]
    host: Option<IpAddr>,

    /// Listen port (overrides PORT).
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser, Debug)]
struct WrapArgs {
    /// Celebrity name to search for.
    #[arg(long)]
    name: Option<String>,

    /// Base URL of the WrapStar proxy.
    #[arg(long, env = "WRAPSTAR_BACKEND", default_value = wrapstar::DEFAULT_BACKEND_URL)]
    backend: String,

    /// Folder of local images; candidates can be added with `--op add:<i>`.
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Grid edit applied in order: `add:<i>`, `url:<URL>`, `swap:<a>:<b>`, `remove:<i>`.
    #[arg(long = "op")]
    ops: Vec<wrapstar::GridOp>,

    /// Output PNG path, or a directory to place the default-named file in.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ThumbArgs {
    /// Source image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Wrap(args) => cmd_wrap(args).await,
        Command::Thumb(args) => cmd_thumb(args),
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    wrapstar::install_fail_fast_hook();
    let config = wrapstar::ServerConfig::from_env()?.with_overrides(args.host, args.port);
    wrapstar::serve(config).await?;
    Ok(())
}

async fn cmd_wrap(args: WrapArgs) -> anyhow::Result<()> {
    let client = wrapstar::SearchClient::new(&args.backend)?;
    let mut session = wrapstar::WrapSession::new();

    if let Some(name) = args.name.as_deref() {
        if let Some(count) = surface(session.search(&client, name).await)? {
            eprintln!("found {count} images for '{}'", name.trim());
        }
    }
    if let Some(folder) = args.folder.as_deref() {
        if let Some(count) = surface(session.select_folder(folder))? {
            for (i, candidate) in session.picker().candidates().iter().enumerate() {
                eprintln!("  [{i}] {}", candidate.name);
            }
            eprintln!("{count} local images available");
        }
    }

    for op in args.ops {
        let label = op.to_string();
        if surface(session.apply(op))?.is_none() {
            tracing::warn!(op = %label, "grid op skipped");
        }
    }

    session.localize(&client).await;
    let mut view = session.view(wrapstar::GalleryLayout::default())?;
    let paper = wrapstar::export_wrapping_paper(&mut view)?;

    let out = output_path(&args.out, &session.export_file_name())?;
    wrapstar::save_png(&paper, &out)?;
    eprintln!(
        "wrote {} ({}x{})",
        out.display(),
        paper.width(),
        paper.height()
    );
    Ok(())
}

fn cmd_thumb(args: ThumbArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let png = wrapstar::normalize_thumbnail(&bytes)?;

    wrapstar::ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// Print user-facing alerts and carry on; everything else is fatal.
fn surface<T>(result: wrapstar::WrapResult<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) => match err.alert() {
            Some(message) => {
                eprintln!("alert: {message}");
                Ok(None)
            }
            None => Err(err.into()),
        },
    }
}

/// `--out` names a directory when it already is one or ends with a path separator.
fn output_path(out: &Path, default_name: &str) -> anyhow::Result<PathBuf> {
    let names_dir = out
        .as_os_str()
        .to_string_lossy()
        .ends_with(std::path::is_separator);
    if names_dir && !out.is_dir() {
        std::fs::create_dir_all(out)
            .with_context(|| format!("create output dir '{}'", out.display()))?;
    }
    if out.is_dir() {
        Ok(out.join(default_name))
    } else {
        Ok(out.to_path_buf())
    }
}
