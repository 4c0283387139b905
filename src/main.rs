//! CLI entry point for docsite

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docsite")]
#[command(version)]
#[command(about = "Render markdown content for documentation sites", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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
    /// Render one page by slug
    #[command(alias = "r")]
    Render {
        /// Slug of the markdown file (file name without extension)
        slug: String,

        /// Print the full {content, data} record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all pages in the content directory
    List,

    /// Render a source file as a highlighted code block
    Highlight {
        /// File to highlight
        file: PathBuf,

        /// Language (defaults to the file extension)
        #[arg(short, long)]
        lang: Option<String>,

        /// Print a fenced markdown block instead of HTML
        #[arg(long)]
        markdown: bool,
    },

    /// Start the content server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "docsite=debug,info"
    } else {
        "docsite=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Render { slug, json } => {
            let site = docsite::Docsite::new(&base_dir)?;
            tracing::debug!("Rendering {} from {:?}", slug, site.content_dir);
            docsite::commands::render::run(&site, &slug, json)?;
        }

        Commands::List => {
            let site = docsite::Docsite::new(&base_dir)?;
            docsite::commands::list::run(&site)?;
        }

        Commands::Highlight {
            file,
            lang,
            markdown,
        } => {
            let site = docsite::Docsite::new(&base_dir)?;
            let file = if file.is_absolute() {
                file
            } else {
                base_dir.join(file)
            };
            docsite::commands::highlight::run(&site, &file, lang.as_deref(), markdown)?;
        }

        Commands::Server { port, ip } => {
            let site = docsite::Docsite::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            docsite::server::start(&site, &ip, port).await?;
        }

        Commands::Version => {
            println!("docsite version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
