use client::error::Error;
use client::navigation::Route;

pub mod auth;
pub mod events;
pub mod profile;

const BIN: &str = "party-manager";

/// The command that opens `route`.
pub fn command_for(route: &Route) -> String {
    match route {
        Route::Login => format!("{BIN} login --email <email>"),
        Route::Register => format!("{BIN} register --name <name> --email <email>"),
        Route::Events => format!("{BIN} events list"),
        Route::CreateEvent => format!(
            "{BIN} events create --name <name> --location <location> --adults <n> --children <n> --event-type <id>"
        ),
        Route::ViewEvent { id } => format!("{BIN} events show {id}"),
        Route::EditEvent { id, .. } => format!("{BIN} events edit {id}"),
        Route::Profile => format!("{BIN} profile show"),
    }
}

/// Human message for errors a screen does not handle itself.
pub fn describe(error: Error) -> anyhow::Error {
    match error {
        Error::NotLoggedIn => anyhow::anyhow!(
            "you are not logged in, run `{}` first",
            command_for(&Route::Login)
        ),
        Error::Unauthorized => anyhow::anyhow!(
            "the session was rejected by the server, log in again with `{}`",
            command_for(&Route::Login)
        ),
        Error::NotFound => anyhow::anyhow!("not found"),
        Error::BadRequest { message } if !message.trim().is_empty() => anyhow::anyhow!(message),
        other => anyhow::Error::new(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_carry_route_parameters() {
        assert_eq!(command_for(&Route::ViewEvent { id: 4 }), "party-manager events show 4");
        assert_eq!(
            command_for(&Route::EditEvent {
                id: 9,
                event_type_id: Some(2)
            }),
            "party-manager events edit 9"
        );
    }
}
