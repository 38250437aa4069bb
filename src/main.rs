//! CLI entry point for postdeck

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postdeck")]
#[command(version)]
#[command(about = "Front-matter parsing and post index tooling for static blogs", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a post from the pages directory
    Show {
        /// File name under the pages directory
        file: String,

        /// Print the parsed post as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse any file and print its front-matter and body as JSON
    Parse {
        path: PathBuf,
    },

    /// List posts from the index
    #[command(alias = "ls")]
    List {
        /// Only posts with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only posts matching this search term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List tags with post counts
    Tags,

    /// Rebuild the post index from the pages directory
    Index,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postdeck=debug,info"
    } else {
        "postdeck=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine site directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Show { file, json } => {
            let blog = postdeck::Blog::new(&base_dir)?;
            postdeck::commands::show::run(&blog, &file, json)?;
        }

        Commands::Parse { path } => {
            let path = if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            };
            postdeck::commands::show::parse_file(&path)?;
        }

        Commands::List { tag, search } => {
            let blog = postdeck::Blog::new(&base_dir)?;
            postdeck::commands::list::run(&blog, tag.as_deref(), search.as_deref())?;
        }

        Commands::Tags => {
            let blog = postdeck::Blog::new(&base_dir)?;
            postdeck::commands::tags::run(&blog)?;
        }

        Commands::Index => {
            let blog = postdeck::Blog::new(&base_dir)?;
            tracing::info!("Scanning {:?}", blog.pages_dir);
            let count = postdeck::commands::index::run(&blog)?;
            println!("Indexed {} posts into {:?}", count, blog.index_path);
        }

        Commands::Version => {
            println!("postdeck version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
