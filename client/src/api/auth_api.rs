use secrecy::{ExposeSecret, SecretString};
use shared::{SignInRequest, SignInResponse};
use tracing::{info, warn};

use super::SECURITY;
use crate::error::{check, Error, Result};
use crate::session::Session;
use crate::store::PersistReport;
use crate::AppContext;

fn validate_login(email: &str, password: &SecretString) -> Result<()> {
    let mut errors: Vec<(&'static str, &'static str)> = Vec::new();
    if email.trim().is_empty() {
        errors.push(("email", "email must not be empty"));
    }
    if password.expose_secret().is_empty() {
        errors.push(("password", "password must not be empty"));
    }
    check(errors)
}

/// Signs in and replaces the session with the full logged-in record.
pub async fn login(ctx: &AppContext, email: &str, password: SecretString) -> Result<Session> {
    validate_login(email, &password)?;
    let email = email.trim().to_owned();
    let request = SignInRequest {
        email: email.clone(),
        password,
    };
    let response = ctx
        .api
        .resource(SECURITY)
        .post_json::<_, SignInResponse>("/login", &request)
        .await?;

    let Some((user_id, token)) = response.credentials() else {
        warn!(email = %email, "Login response without token or user id");
        return Err(Error::InvalidResponse(
            "login response without token or user id".to_owned(),
        ));
    };
    let session = Session::authenticated(
        user_id,
        token,
        response.display_name.clone(),
        Some(email),
    );
    let _ = ctx.session.replace(session.clone());
    info!(user_id, "User login successful");
    Ok(session)
}

/// Tells the server, best effort, then clears the session.
pub async fn logout(ctx: &AppContext) -> PersistReport {
    if let Ok((user_id, token)) = ctx.credentials() {
        let result = ctx
            .api
            .resource(SECURITY)
            .authorized(&token)
            .post("/logout", &serde_json::json!({}))
            .await;
        if let Err(error) = result {
            warn!(user_id, error = %error, "Remote logout failed, clearing local session anyway");
        }
    }
    let report = ctx.session.logout();
    info!("User logged out");
    report
}
