use clap::{Parser, Subcommand};
use client::navigation::{Navigator, Route};
use client::{AppContext, Config};
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod pages;
mod prompt;

use pages::{events::EventsCommand, profile::ProfileCommand};

#[derive(Parser, Debug)]
#[command(version, about = "Party Manager: plan events and get their shopping list")]
struct Cli {
    #[clap(flatten)]
    config: Config,

    #[arg(long, short = 'y', global = true, help = "Answer yes to confirmation prompts")]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and keep the session for later commands
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PARTY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create a new account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Show, edit or delete your account
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Manage your events and their shopping lists
    #[command(subcommand)]
    Events(EventsCommand),
    /// List the available event types
    EventTypes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    debug!(config = ?cli.config, "Starting Party Manager client");

    let ctx = AppContext::from_config(&cli.config)?;
    let initial = Route::initial(&ctx.session.read());
    let mut navigator = Navigator::new(initial.clone());
    let mut changes = ctx.session.subscribe();

    match cli.command {
        Command::Login { email, password } => {
            pages::auth::login(&ctx, &mut navigator, &email, password).await?
        }
        Command::Register { name, email } => {
            pages::auth::register(&ctx, &mut navigator, name, email).await?
        }
        Command::Logout => pages::auth::logout(&ctx, &mut navigator, cli.yes).await?,
        Command::Whoami => pages::auth::whoami(&ctx),
        Command::Profile(command) => {
            pages::profile::run(&ctx, &mut navigator, command, cli.yes).await?
        }
        Command::Events(command) => {
            pages::events::run(&ctx, &mut navigator, command, cli.yes).await?
        }
        Command::EventTypes => pages::events::event_types(&ctx).await?,
    }

    if changes.has_changed().unwrap_or(false) {
        debug!(session = ?*changes.borrow_and_update(), "Session changed");
    }
    if navigator.current() != &initial {
        println!("\nNext: {}", pages::command_for(navigator.current()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::Cli;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
