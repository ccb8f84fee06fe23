//! `campus`: command-line front end for the campus admin console.
//!
//! Drives the same flux handlers a UI shell would: log in, preview the
//! permission-filtered sidebar, inspect or edit a role's permissions.

mod commands;

use std::path::PathBuf;

use campus_core::ConsoleConfig;
use clap::{Parser, Subcommand};

/// Campus admin console CLI.
#[derive(Parser, Debug)]
#[command(name = "campus", about = "Campus admin console CLI")]
struct Cli {
    /// Path to config file (default: ~/.campus/config.toml).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<String>,

    /// Backend URL (overrides the config file).
    #[arg(long = "server", global = true)]
    server: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and save the session token.
    Login {
        /// Username.
        #[arg(long)]
        user: Option<String>,
        /// Password (prompted when omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the saved session.
    Logout,

    /// Render the sidebar for the current user.
    Sidebar {
        /// Active route.
        #[arg(long, default_value = "/")]
        route: String,
        /// Toggle a node's expansion (repeatable, applied in order).
        #[arg(long = "toggle")]
        toggle: Vec<i64>,
    },

    /// Show a role's menu and data-permission selection.
    Role {
        /// Role ID.
        id: i64,
        /// Select a menu node and its subtree (repeatable).
        #[arg(long = "check")]
        check: Vec<i64>,
        /// Deselect a menu node, its subtree and its ancestors (repeatable).
        #[arg(long = "uncheck")]
        uncheck: Vec<i64>,
        /// Persist the result.
        #[arg(long)]
        save: bool,
    },

    /// Show version.
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(ConsoleConfig::default_path);
    let mut config = ConsoleConfig::load(&config_path)?;
    if let Some(server) = cli.server {
        config.server = server;
    }
    let json_output = cli.output == "json";

    match cli.command {
        Commands::Login { user, password } => {
            let username = match user {
                Some(u) => u,
                None => {
                    eprint!("Username: ");
                    let mut s = String::new();
                    std::io::stdin().read_line(&mut s)?;
                    s.trim().to_string()
                }
            };
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")?,
            };
            commands::login::login(&username, &password, &mut config, &config_path).await?;
        }

        Commands::Logout => {
            commands::login::logout(&mut config, &config_path)?;
        }

        Commands::Sidebar { route, toggle } => {
            commands::sidebar::show(&config, &route, &toggle, json_output).await?;
        }

        Commands::Role {
            id,
            check,
            uncheck,
            save,
        } => {
            let edits = commands::role::Edits { check, uncheck, save };
            commands::role::show(&config, id, &edits, json_output).await?;
        }

        Commands::Version => {
            println!("campus cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
