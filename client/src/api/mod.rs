use crate::error::Result;
use crate::gateway::ApiGateway;
use crate::AppContext;

pub mod auth_api;
pub mod event_types_api;
pub mod events_api;
pub mod users_api;

pub const SECURITY: &str = "/Seguranca";
pub const USERS: &str = "/usuario";
pub const EVENTS: &str = "/evento";
pub const EVENT_TYPES: &str = "/tipoevento";

/// Gateway carrying the session token; fails before any request when logged out.
pub(crate) fn authorized(ctx: &AppContext, prefix: &str) -> Result<(ApiGateway, i64)> {
    let (user_id, token) = ctx.credentials()?;
    Ok((ctx.api.resource(prefix).authorized(&token), user_id))
}

/// Gateway for endpoints that also answer anonymous callers. The token is
/// attached when there is one.
pub(crate) fn public(ctx: &AppContext, prefix: &str) -> ApiGateway {
    let gateway = ctx.api.resource(prefix);
    match ctx.credentials() {
        Ok((_, token)) => gateway.authorized(&token),
        Err(_) => gateway,
    }
}
