use anyhow::Result;
use client::api::{auth_api, users_api};
use client::error::Error;
use client::navigation::{Navigator, Route};
use client::AppContext;
use secrecy::SecretString;

use super::describe;
use crate::prompt;

pub async fn login(
    ctx: &AppContext,
    navigator: &mut Navigator,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => SecretString::from(password),
        None => prompt::secret("Password")?,
    };
    match auth_api::login(ctx, email, password).await {
        Ok(session) => {
            println!("Login successful. Welcome, {}!", session.label());
            navigator.reset(Route::Events);
            Ok(())
        }
        Err(Error::Unauthorized | Error::NotFound | Error::BadRequest { .. }) => {
            anyhow::bail!("wrong email or password")
        }
        Err(Error::Conflict { .. }) => {
            anyhow::bail!("an account with this email already exists")
        }
        Err(error) => Err(describe(error).context("could not log in, check your credentials")),
    }
}

pub async fn register(
    ctx: &AppContext,
    navigator: &mut Navigator,
    name: String,
    email: String,
) -> Result<()> {
    let password = prompt::secret("Password")?;
    let password_confirmation = prompt::secret("Confirm password")?;
    let form = users_api::RegisterForm {
        name,
        email,
        password,
        password_confirmation,
    };
    match users_api::register(ctx, form).await {
        Ok(()) => {
            println!("Account created. Log in to start planning.");
            navigator.reset(Route::Login);
            Ok(())
        }
        Err(Error::Conflict { .. }) => {
            anyhow::bail!("an account with this email already exists")
        }
        Err(error) => Err(describe(error).context("could not create the account")),
    }
}

pub async fn logout(ctx: &AppContext, navigator: &mut Navigator, assume_yes: bool) -> Result<()> {
    if !ctx.session.read().logged_in {
        println!("Not logged in.");
        return Ok(());
    }
    if !prompt::confirm("Do you really want to log out?", assume_yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    let report = auth_api::logout(ctx).await;
    if let Err(error) = report.outcome {
        eprintln!("warning: the stored session could not be removed: {error}");
    }
    println!("Logged out.");
    navigator.reset(Route::Login);
    Ok(())
}

pub fn whoami(ctx: &AppContext) {
    let session = ctx.session.read();
    match session.credentials() {
        Some((user_id, _)) => {
            println!("Logged in as {} (user id {user_id})", session.label());
            if let Some(email) = &session.email {
                println!("Email: {email}");
            }
        }
        None => println!("Not logged in."),
    }
}
