use anyhow::Result;
use clap::Subcommand;
use client::api::events_api::{self, EventChanges, EventForm};
use client::api::event_types_api;
use client::navigation::{Navigator, Route};
use client::AppContext;
use shared::{CalculatedItem, Event};

use super::describe;
use crate::prompt;

#[derive(Subcommand, Debug)]
pub enum EventsCommand {
    /// List your events
    List,
    /// Show one event with its shopping list
    Show {
        id: i64,
        #[arg(long, help = "Print a shareable summary")]
        share: bool,
    },
    /// Create an event
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        adults: String,
        #[arg(long)]
        children: String,
        #[arg(long = "event-type")]
        event_type: Option<i64>,
    },
    /// Change an event; the server recalculates its items
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        adults: Option<u32>,
        #[arg(long)]
        children: Option<u32>,
        #[arg(long = "event-type")]
        event_type: Option<i64>,
    },
    /// Delete an event
    Delete { id: i64 },
    /// Per-person items configured for an event type
    Items {
        #[arg(long = "event-type")]
        event_type: i64,
    },
}

pub async fn run(
    ctx: &AppContext,
    navigator: &mut Navigator,
    command: EventsCommand,
    assume_yes: bool,
) -> Result<()> {
    match command {
        EventsCommand::List => list(ctx, navigator).await,
        EventsCommand::Show { id, share } => show(ctx, navigator, id, share).await,
        EventsCommand::Create {
            name,
            location,
            adults,
            children,
            event_type,
        } => {
            let form = EventForm {
                name,
                location,
                adults,
                children,
                event_type_id: event_type,
            };
            create(ctx, navigator, form).await
        }
        EventsCommand::Edit {
            id,
            name,
            date,
            location,
            adults,
            children,
            event_type,
        } => {
            let changes = EventChanges {
                name,
                date,
                location,
                adults,
                children,
                event_type_id: event_type,
            };
            edit(ctx, navigator, id, changes).await
        }
        EventsCommand::Delete { id } => delete(ctx, navigator, id, assume_yes).await,
        EventsCommand::Items { event_type } => items(ctx, event_type).await,
    }
}

fn display_date(event: &Event) -> String {
    event
        .parsed_date()
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| event.date.clone())
}

fn print_items(items: &[CalculatedItem]) {
    if items.is_empty() {
        println!("No calculated items.");
        return;
    }
    println!("Calculated items:");
    for item in items {
        println!("  - {}: {}", item.item_name, item.quantity);
    }
}

async fn list(ctx: &AppContext, navigator: &mut Navigator) -> Result<()> {
    let events = events_api::list(ctx)
        .await
        .map_err(|e| describe(e).context("could not load the events"))?;
    navigator.push(Route::Events);
    if events.is_empty() {
        println!("No events found.");
        return Ok(());
    }
    for event in &events {
        println!(
            "#{id} {name} | {date} | {location} | adults: {adults} - children: {children}",
            id = event.id,
            name = event.name,
            date = display_date(event),
            location = event.location,
            adults = event.adults,
            children = event.children,
        );
    }
    Ok(())
}

async fn show(ctx: &AppContext, navigator: &mut Navigator, id: i64, share: bool) -> Result<()> {
    let event = events_api::get(ctx, id)
        .await
        .map_err(|e| describe(e).context(format!("could not load event {id}")))?;
    let type_name = match event.event_type_id {
        Some(type_id) => event_types_api::name_of(ctx, type_id).await,
        None => None,
    };
    navigator.push(Route::ViewEvent { id });

    if share {
        println!("{}", event.share_message(type_name.as_deref()));
        return Ok(());
    }
    println!("{}", event.name);
    println!("Date: {}", display_date(&event));
    println!("Location: {}", event.location);
    println!(
        "Event type: {}",
        type_name
            .as_deref()
            .or(event.event_type_name.as_deref())
            .unwrap_or("-")
    );
    println!("Adults: {}", event.adults);
    println!("Children: {}", event.children);
    println!("Guests: {}", event.guests());
    print_items(&event.calculated_items);
    Ok(())
}

async fn create(ctx: &AppContext, navigator: &mut Navigator, form: EventForm) -> Result<()> {
    navigator.push(Route::CreateEvent);
    let created = events_api::create(ctx, form)
        .await
        .map_err(|e| describe(e).context("could not create the event"))?;
    match created {
        Some(event) => {
            println!("Event created: #{} {}", event.id, event.name);
            print_items(&event.calculated_items);
            navigator.push(Route::ViewEvent { id: event.id });
        }
        None => {
            println!("Event created.");
            navigator.reset(Route::Events);
        }
    }
    Ok(())
}

async fn edit(
    ctx: &AppContext,
    navigator: &mut Navigator,
    id: i64,
    changes: EventChanges,
) -> Result<()> {
    navigator.push(Route::EditEvent {
        id,
        event_type_id: changes.event_type_id,
    });
    let event = events_api::update(ctx, id, changes)
        .await
        .map_err(|e| describe(e).context(format!("could not update event {id}")))?;
    println!("Event updated: #{} {}", event.id, event.name);
    print_items(&event.calculated_items);
    navigator.back();
    Ok(())
}

async fn delete(
    ctx: &AppContext,
    navigator: &mut Navigator,
    id: i64,
    assume_yes: bool,
) -> Result<()> {
    if !prompt::confirm(&format!("Delete event {id}?"), assume_yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    events_api::delete(ctx, id)
        .await
        .map_err(|e| describe(e).context(format!("could not delete event {id}")))?;
    println!("Event deleted.");
    navigator.reset(Route::Events);
    Ok(())
}

async fn items(ctx: &AppContext, event_type: i64) -> Result<()> {
    let items = events_api::items_for_type(ctx, event_type)
        .await
        .map_err(|e| describe(e).context("could not load the items of this event type"))?;
    if items.is_empty() {
        println!("No items configured for this event type.");
        return Ok(());
    }
    println!("Items per guest:");
    for item in &items {
        println!("  - {}: {}", item.name, item.quantity_per_person);
    }
    Ok(())
}

pub async fn event_types(ctx: &AppContext) -> Result<()> {
    let types = event_types_api::list(ctx)
        .await
        .map_err(|e| describe(e).context("could not load the event types"))?;
    if types.is_empty() {
        println!("No event types available.");
    }
    for event_type in &types {
        println!("{} {}", event_type.id, event_type.name);
    }
    Ok(())
}
