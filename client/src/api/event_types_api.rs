use shared::EventType;

use super::{public, EVENT_TYPES};
use crate::error::Result;
use crate::AppContext;

pub async fn list(ctx: &AppContext) -> Result<Vec<EventType>> {
    public(ctx, EVENT_TYPES).get_json("").await
}

pub async fn get(ctx: &AppContext, id: i64) -> Result<EventType> {
    public(ctx, EVENT_TYPES).get_json(&format!("/{id}")).await
}

/// Display name for an event type, `None` when the lookup fails.
pub async fn name_of(ctx: &AppContext, id: i64) -> Option<String> {
    match get(ctx, id).await {
        Ok(event_type) => Some(event_type.name),
        Err(error) => {
            tracing::warn!(event_type_id = id, error = %error, "Fail to load event type");
            None
        }
    }
}
