//! CLI entry point for mdpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(version)]
#[command(about = "Build a static site from Markdown posts and pages", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post or page
    New {
        /// Kind of content to create (post, page)
        #[arg(short, long, default_value = "post")]
        kind: String,

        /// Title of the new post or page
        title: String,
    },

    /// Build the static site
    #[command(aliases = ["generate", "g"])]
    Build {
        /// Host name the site is built for (defaults to the host of `url`)
        #[arg(long)]
        host: Option<String>,
    },

    /// Build for local preview and serve the output directory
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Remove the output directory
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, page, route)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdpress=debug,info"
    } else {
        "mdpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            mdpress::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { kind, title } => {
            let site = mdpress::Site::new(&base_dir)?;
            tracing::info!("Creating new {} with title: {}", kind, title);
            mdpress::commands::new::create(&site, &title, &kind)?;
        }

        Commands::Build { host } => {
            let site = mdpress::Site::new(&base_dir)?;
            if let Err(e) = site.build(host.as_deref()) {
                tracing::error!("Build failed: {:#}", e);
                return Err(e);
            }
        }

        Commands::Serve { port, ip, open } => {
            let site = mdpress::Site::new(&base_dir)?;

            // Build first, with links relative to the preview host
            if let Err(e) = site.build(Some(mdpress::server::PREVIEW_HOST)) {
                tracing::error!("Build failed: {:#}", e);
                return Err(e);
            }

            tracing::info!("Starting server at http://{}:{}", ip, port);
            mdpress::server::start(&site, &ip, port, open).await?;
        }

        Commands::Clean => {
            let site = mdpress::Site::new(&base_dir)?;
            tracing::info!("Cleaning output folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = mdpress::Site::new(&base_dir)?;
            mdpress::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("mdpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
