// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use marquee_runtime::cli::{self, output};
use marquee_runtime::config::{ConfigOverrides, RuntimeConfig};

#[derive(Parser)]
#[command(
    name = "marquee",
    about = "Marquee — scrape a movie-listing site and serve its players and download links",
    version,
    after_help = "Run 'marquee <command> --help' for details on each command.\nRun 'marquee' with no command to start the web server."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Site origin to scrape (default https://www.watch-movies.com.pk)
    #[arg(long, global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(long, short)]
        port: Option<u16>,
    },
    /// Scrape and print the listing page
    Listing {
        /// Print at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Scrape and print one post
    Post {
        /// Post path on the site (e.g. "some-movie-2024/")
        id: String,
    },
    /// Print the mock posts catalog
    Posts {
        /// Only the record with this id
        #[arg(long)]
        id: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var(output::ENV_JSON, "1");
    }
    if cli.quiet {
        std::env::set_var(output::ENV_QUIET, "1");
    }
    if cli.verbose {
        std::env::set_var(output::ENV_VERBOSE, "1");
    }
    if cli.no_color {
        std::env::set_var(output::ENV_NO_COLOR, "1");
    }

    init_tracing(output::is_verbose(), output::is_json());

    let overrides = ConfigOverrides {
        origin: cli.origin,
        ..Default::default()
    };
    let result = dispatch(cli.command, overrides).await;

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if output::is_json() {
            output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        } else if !output::is_quiet() {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}

async fn dispatch(command: Option<Commands>, mut overrides: ConfigOverrides) -> Result<()> {
    match command {
        // No subcommand → run the server with defaults
        None => cli::serve::run(RuntimeConfig::resolve(&overrides)?).await,
        Some(Commands::Serve { host, port }) => {
            overrides.host = host;
            overrides.port = port;
            cli::serve::run(RuntimeConfig::resolve(&overrides)?).await
        }
        Some(Commands::Listing { limit }) => {
            let config = RuntimeConfig::resolve(&overrides)?;
            cli::listing_cmd::run(&config, limit).await
        }
        Some(Commands::Post { id }) => {
            let config = RuntimeConfig::resolve(&overrides)?;
            cli::post_cmd::run(&config, &id).await
        }
        Some(Commands::Posts { id }) => cli::posts_cmd::run(id.as_deref()).await,
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "marquee", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flag.
fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose {
        "marquee=debug,marquee_runtime=debug,tower_http=debug"
    } else {
        "marquee=info,marquee_runtime=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
