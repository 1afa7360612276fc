use anyhow::Result;
use clap::Subcommand;
use client::api::users_api::{self, ProfileChanges};
use client::error::Error;
use client::navigation::{Navigator, Route};
use client::AppContext;
use secrecy::ExposeSecret;

use super::describe;
use crate::prompt;

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show the account data stored on the server
    Show {
        #[arg(long)]
        show_password: bool,
    },
    /// Change name, email or password
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, help = "Prompt for a new password")]
        password: bool,
    },
    /// Delete the account and log out
    Delete,
}

pub async fn run(
    ctx: &AppContext,
    navigator: &mut Navigator,
    command: ProfileCommand,
    assume_yes: bool,
) -> Result<()> {
    navigator.push(Route::Profile);
    match command {
        ProfileCommand::Show { show_password } => show(ctx, show_password).await,
        ProfileCommand::Update {
            name,
            email,
            password,
        } => update(ctx, name, email, password, assume_yes).await,
        ProfileCommand::Delete => delete(ctx, navigator, assume_yes).await,
    }
}

async fn show(ctx: &AppContext, show_password: bool) -> Result<()> {
    let profile = users_api::profile(ctx)
        .await
        .map_err(|e| describe(e).context("could not load the profile"))?;
    let password = profile.password.expose_secret();
    println!("Name: {}", profile.name);
    println!("Email: {}", profile.email);
    if show_password {
        println!("Password: {password}");
    } else {
        println!("Password: {}", "*".repeat(password.chars().count().max(8)));
    }
    Ok(())
}

async fn update(
    ctx: &AppContext,
    name: Option<String>,
    email: Option<String>,
    new_password: bool,
    assume_yes: bool,
) -> Result<()> {
    let password = if new_password {
        Some(prompt::secret("New password")?)
    } else {
        None
    };
    let changes = ProfileChanges {
        name,
        email,
        password,
    };
    if changes.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }
    if !prompt::confirm("Save the changes?", assume_yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    match users_api::update_profile(ctx, changes).await {
        Ok(session) => {
            println!("Profile updated, {}.", session.label());
            Ok(())
        }
        Err(Error::Conflict { .. }) => {
            anyhow::bail!("this email is already used by another account")
        }
        Err(error) => Err(describe(error).context("could not save the changes")),
    }
}

async fn delete(ctx: &AppContext, navigator: &mut Navigator, assume_yes: bool) -> Result<()> {
    if !prompt::confirm(
        "Delete your account? This cannot be undone.",
        assume_yes,
    )? {
        println!("Cancelled.");
        return Ok(());
    }
    let report = users_api::delete_account(ctx)
        .await
        .map_err(|e| describe(e).context("could not delete the account"))?;
    if let Err(error) = report.outcome {
        eprintln!("warning: the stored session could not be removed: {error}");
    }
    println!("Your account was deleted.");
    navigator.reset(Route::Login);
    Ok(())
}
