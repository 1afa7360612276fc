use secrecy::{ExposeSecret, SecretString};
use shared::{NewUserRequest, UserProfile};
use tracing::{debug, info};

use super::{authorized, USERS};
use crate::error::{check, Error, Result};
use crate::gateway::decode;
use crate::session::Session;
use crate::store::PersistReport;
use crate::AppContext;

pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub password_confirmation: SecretString,
}

#[derive(Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

fn validate_register(form: &RegisterForm) -> Result<()> {
    let mut errors: Vec<(&'static str, &'static str)> = Vec::new();
    if form.name.trim().is_empty() {
        errors.push(("name", "name must not be empty"));
    }
    if form.email.trim().is_empty() {
        errors.push(("email", "email must not be empty"));
    }
    if form.password.expose_secret().is_empty() {
        errors.push(("password", "password must not be empty"));
    }
    if form.password.expose_secret() != form.password_confirmation.expose_secret() {
        errors.push(("password", "password confirmation should match"));
    }
    check(errors)
}

fn validate_profile(profile: &UserProfile) -> Result<()> {
    let mut errors: Vec<(&'static str, &'static str)> = Vec::new();
    if profile.name.trim().is_empty() {
        errors.push(("name", "name must not be empty"));
    }
    if profile.email.trim().is_empty() {
        errors.push(("email", "email must not be empty"));
    }
    check(errors)
}

/// Creates the account. The session is left untouched: the caller still has
/// to log in to obtain a token.
pub async fn register(ctx: &AppContext, form: RegisterForm) -> Result<()> {
    validate_register(&form)?;
    let request = NewUserRequest {
        name: form.name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        password: form.password,
    };
    ctx.api.resource(USERS).post("", &request).await?;
    info!(email = %request.email, "Account created");
    Ok(())
}

pub async fn profile(ctx: &AppContext) -> Result<UserProfile> {
    let (gateway, user_id) = authorized(ctx, USERS)?;
    gateway.get_json(&format!("/{user_id}")).await
}

/// Saves the profile and replaces the session with the new display fields,
/// carrying the current token over.
pub async fn update_profile(ctx: &AppContext, changes: ProfileChanges) -> Result<Session> {
    let (gateway, user_id) = authorized(ctx, USERS)?;
    let current: UserProfile = gateway.get_json(&format!("/{user_id}")).await?;
    let updated = UserProfile {
        id: user_id,
        name: changes.name.unwrap_or(current.name),
        email: changes.email.unwrap_or(current.email),
        password: changes.password.unwrap_or(current.password),
    };
    validate_profile(&updated)?;

    let response = gateway.put(&format!("/{user_id}"), &updated).await?;
    let (name, email) = match decode::<UserProfile>(response).await {
        Ok(saved) => (saved.name, saved.email),
        Err(Error::InvalidResponse(message)) => {
            debug!(user_id, message = %message, "Profile update answered without a user record");
            (updated.name, updated.email)
        }
        Err(error) => return Err(error),
    };

    // Read right before replacing: the token must survive the swap.
    let (_, token) = ctx.credentials()?;
    let session = Session::authenticated(user_id, token, Some(name), Some(email));
    let _ = ctx.session.replace(session.clone());
    info!(user_id, "Profile updated");
    Ok(session)
}

/// Deletes the remote account, then clears the local session.
pub async fn delete_account(ctx: &AppContext) -> Result<PersistReport> {
    let (gateway, user_id) = authorized(ctx, USERS)?;
    gateway.delete(&format!("/{user_id}")).await?;
    info!(user_id, "Account deleted");
    Ok(ctx.session.logout())
}
