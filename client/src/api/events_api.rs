use chrono::Utc;
use shared::{Event, EventTypeItem, NewEventRequest, UpdateEventRequest};
use tracing::{debug, info};

use super::{authorized, public, EVENTS};
use crate::error::{check, Error, Result};
use crate::gateway::decode;
use crate::AppContext;

/// Raw form input; counts arrive as typed text and are parsed here.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub name: String,
    pub location: String,
    pub adults: String,
    pub children: String,
    pub event_type_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub name: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub event_type_id: Option<i64>,
}

fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

fn validate_event_form(form: &EventForm) -> Result<(u32, u32, i64)> {
    let mut errors: Vec<(&'static str, &'static str)> = Vec::new();
    if form.name.trim().is_empty() {
        errors.push(("name", "name must not be empty"));
    }
    if form.location.trim().is_empty() {
        errors.push(("location", "location must not be empty"));
    }
    let adults = parse_count(&form.adults);
    if adults.is_none() {
        errors.push(("adults", "adults must be a non-negative whole number"));
    }
    let children = parse_count(&form.children);
    if children.is_none() {
        errors.push(("children", "children must be a non-negative whole number"));
    }
    if form.event_type_id.is_none() {
        errors.push(("event_type", "event type must be selected"));
    }
    check(errors)?;
    match (adults, children, form.event_type_id) {
        (Some(adults), Some(children), Some(event_type_id)) => {
            Ok((adults, children, event_type_id))
        }
        _ => Err(Error::validation([("event", "incomplete event form")])),
    }
}

/// Events owned by the logged-in user.
pub async fn list(ctx: &AppContext) -> Result<Vec<Event>> {
    let (gateway, user_id) = authorized(ctx, EVENTS)?;
    let events: Vec<Event> = gateway.get_json(&format!("/usuario/{user_id}")).await?;
    debug!(user_id, count = events.len(), "Events loaded");
    Ok(events)
}

pub async fn get(ctx: &AppContext, id: i64) -> Result<Event> {
    let (gateway, _) = authorized(ctx, EVENTS)?;
    gateway.get_json(&format!("/{id}")).await
}

/// Creates the event. Returns the stored record when the server sends one back.
pub async fn create(ctx: &AppContext, form: EventForm) -> Result<Option<Event>> {
    let (gateway, user_id) = authorized(ctx, EVENTS)?;
    let (adults, children, event_type_id) = validate_event_form(&form)?;
    let request = NewEventRequest {
        name: form.name.trim().to_owned(),
        location: form.location.trim().to_owned(),
        adults,
        children,
        event_type_id,
        user_id,
        date: shared::timestamp(Utc::now()),
    };
    let response = gateway.post("", &request).await?;
    info!(user_id, event_type_id, "Event created");
    match decode::<Event>(response).await {
        Ok(event) => Ok(Some(event)),
        Err(Error::InvalidResponse(message)) => {
            debug!(message = %message, "Event creation answered without an event record");
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

/// Applies `changes` on top of the stored event and saves it. Returns the
/// server's view, including the recalculated items.
pub async fn update(ctx: &AppContext, id: i64, changes: EventChanges) -> Result<Event> {
    let (gateway, _) = authorized(ctx, EVENTS)?;
    let current: Event = gateway.get_json(&format!("/{id}")).await?;
    let Some(event_type_id) = changes.event_type_id.or(current.event_type_id) else {
        return Err(Error::validation([(
            "event_type",
            "event type must be selected",
        )]));
    };
    let request = UpdateEventRequest {
        id,
        name: changes.name.unwrap_or(current.name),
        date: changes.date.unwrap_or(current.date),
        location: changes.location.unwrap_or(current.location),
        event_type_id,
        adults: Some(changes.adults.unwrap_or(current.adults)),
        children: Some(changes.children.unwrap_or(current.children)),
    };
    let mut errors: Vec<(&'static str, &'static str)> = Vec::new();
    if request.name.trim().is_empty() {
        errors.push(("name", "name must not be empty"));
    }
    if request.location.trim().is_empty() {
        errors.push(("location", "location must not be empty"));
    }
    check(errors)?;

    let response = gateway.put(&format!("/{id}"), &request).await?;
    info!(event_id = id, "Event updated");
    match decode::<Event>(response).await {
        Ok(event) => Ok(event),
        Err(Error::InvalidResponse(message)) => {
            debug!(event_id = id, message = %message, "Update answered without an event, reloading");
            gateway.get_json(&format!("/{id}")).await
        }
        Err(error) => Err(error),
    }
}

pub async fn delete(ctx: &AppContext, id: i64) -> Result<()> {
    let (gateway, _) = authorized(ctx, EVENTS)?;
    gateway.delete(&format!("/{id}")).await?;
    info!(event_id = id, "Event deleted");
    Ok(())
}

/// Per-person item list configured for an event type.
pub async fn items_for_type(ctx: &AppContext, event_type_id: i64) -> Result<Vec<EventTypeItem>> {
    public(ctx, EVENTS)
        .get_json(&format!("/{event_type_id}/itens"))
        .await
}
