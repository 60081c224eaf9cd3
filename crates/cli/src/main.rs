//! `taskdeck` -- command-line dashboard for the task management API.
//!
//! # Environment variables
//!
//! | Variable                | Default                  | Description                    |
//! |-------------------------|--------------------------|--------------------------------|
//! | `API_BASE_URL`          | `http://localhost:3000`  | Root URL of the REST API       |
//! | `TASKDECK_SESSION_FILE` | `.taskdeck/session.json` | Where the sign-in is persisted |
//! | `TASKDECK_PASSWORD`     | --                       | Password for `login`           |
//! | `RUST_LOG`              | `taskdeck=info,...`      | Log filter (written to stderr) |

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskdeck_client::{ApiClient, ClientConfig, FileSessionStore, Session};

mod commands;

use commands::Ctx;

/// Command-line dashboard for projects, tasks, users and notifications.
#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(version, about, long_about = None)]
struct Cli {
    /// File holding the signed-in token and user
    #[arg(
        long,
        global = true,
        env = "TASKDECK_SESSION_FILE",
        default_value = ".taskdeck/session.json"
    )]
    session_file: PathBuf,

    /// Print raw JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // === Session ===
    /// Sign in and persist the session
    Login {
        /// Account email
        email: String,

        /// Account password
        #[arg(long, env = "TASKDECK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the persisted session
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Ask the API instead of reading the persisted snapshot
        #[arg(long)]
        remote: bool,
    },

    // === Overview ===
    /// Project and task totals, completion rate and recent projects
    Dashboard,

    // === Tasks ===
    /// List tasks
    Tasks(commands::tasks::ListArgs),

    /// Task commands
    #[command(subcommand)]
    Task(commands::tasks::TaskCommand),

    // === Projects ===
    /// List projects
    Projects(commands::projects::ListArgs),

    /// Project commands
    #[command(subcommand)]
    Project(commands::projects::ProjectCommand),

    // === Users ===
    /// List users with their task statistics
    Users(commands::users::ListArgs),

    /// User commands
    #[command(subcommand)]
    User(commands::users::UserCommand),

    // === Notifications ===
    /// Notification commands
    #[command(subcommand)]
    #[command(alias = "notif")]
    Notifications(commands::notifications::NotificationCommand),

    // === Comments ===
    /// Comment commands
    #[command(subcommand)]
    Comment(commands::comments::CommentCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck=info,taskdeck_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env();
    let session = Session::new(FileSessionStore::new(&cli.session_file));
    let client = ApiClient::new(&config, session)
        .with_context(|| format!("Invalid API_BASE_URL: {}", config.base_url))?;

    tracing::debug!(
        base_url = %config.base_url,
        session_file = %cli.session_file.display(),
        "Client ready"
    );

    let ctx = Ctx {
        client,
        json: cli.json,
    };

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, &password).await,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami { remote } => commands::auth::whoami(&ctx, remote).await,
        Commands::Dashboard => commands::dashboard::run(&ctx).await,
        Commands::Tasks(args) => commands::tasks::list(&ctx, args).await,
        Commands::Task(cmd) => commands::tasks::run(&ctx, cmd).await,
        Commands::Projects(args) => commands::projects::list(&ctx, args).await,
        Commands::Project(cmd) => commands::projects::run(&ctx, cmd).await,
        Commands::Users(args) => commands::users::list(&ctx, args).await,
        Commands::User(cmd) => commands::users::run(&ctx, cmd).await,
        Commands::Notifications(cmd) => commands::notifications::run(&ctx, cmd).await,
        Commands::Comment(cmd) => commands::comments::run(&ctx, cmd).await,
    }
}
