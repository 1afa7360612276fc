#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use client::gateway::ApiClient;
use client::session::Session;
use client::storage::MemoryStorage;
use client::store::SessionStore;
use client::AppContext;
use serde_json::{json, Value};
use url::Url;

pub const TOKEN: &str = "tok-7";
pub const USER_ID: i64 = 7;

/// Serves `router` on an ephemeral local port and returns the API base URL.
pub async fn serve(router: Router) -> anyhow::Result<Url> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(Url::parse(&format!("http://{addr}/api"))?)
}

pub fn context(base_url: &Url, storage: &MemoryStorage) -> AppContext {
    let api = ApiClient::new(base_url, Duration::from_secs(5)).expect("http client");
    AppContext::new(api, SessionStore::open(Arc::new(storage.clone())))
}

pub fn logged_in_session() -> Session {
    Session::authenticated(
        USER_ID,
        TOKEN,
        Some("Ana".to_owned()),
        Some("ana@example.com".to_owned()),
    )
}

fn authorized(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {TOKEN}");
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn event(id: i64) -> Value {
    json!({
        "id": id,
        "nome": "Birthday",
        "data": "2024-11-02T18:00:00",
        "localidade": "Lisbon",
        "numeroAdultos": 10,
        "numeroCriancas": 4,
        "idTipoEvento": 2,
        "tipoEvento": "Churrasco",
        "idUsuario": USER_ID,
        "itensCalculados": [
            { "itemNome": "Meat", "quantidade": 5.6 },
            { "itemNome": "Soda", "quantidade": 14 }
        ]
    })
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    match (body["email"].as_str(), body["senha"].as_str()) {
        (Some("ana@example.com"), Some("secret")) => Ok(Json(json!({
            "token": TOKEN,
            "nomeUsuario": "Ana",
            "id": USER_ID
        }))),
        (Some("broken@example.com"), _) => Ok(Json(json!({ "nomeUsuario": "Broken" }))),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, String) {
    match body["email"].as_str() {
        Some("taken@example.com") => (StatusCode::CONFLICT, "duplicate".to_owned()),
        Some(_) if body["nome"].is_string() && body["senha"].is_string() => {
            (StatusCode::CREATED, String::new())
        }
        _ => (StatusCode::BAD_REQUEST, "missing fields".to_owned()),
    }
}

async fn get_user(headers: HeaderMap, Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    Ok(Json(json!({
        "id": id,
        "nome": "Ana",
        "email": "ana@example.com",
        "senha": "secret"
    })))
}

async fn put_user(
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    if body["email"] == "taken@example.com" {
        return Err(StatusCode::CONFLICT);
    }
    if body["id"] != id {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(body))
}

async fn delete_user(headers: HeaderMap, Path(_id): Path<i64>) -> Result<StatusCode, StatusCode> {
    authorized(&headers)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_events(
    headers: HeaderMap,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    if user_id != USER_ID {
        return Ok(Json(json!([])));
    }
    Ok(Json(json!([event(1), { "id": 2, "nome": null }])))
}

async fn create_event(headers: HeaderMap, Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    if body["idUsuario"] != USER_ID || !body["data"].is_string() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut created = event(3);
    created["nome"] = body["nome"].clone();
    Ok(Json(created))
}

async fn get_event(headers: HeaderMap, Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    if id == 404 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(event(id)))
}

async fn put_event(
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let mut updated = event(id);
    for field in ["nome", "localidade", "data", "idTipoEvento", "numeroAdultos"] {
        if !body[field].is_null() {
            updated[field] = body[field].clone();
        }
    }
    Ok(Json(updated))
}

async fn delete_event(headers: HeaderMap, Path(_id): Path<i64>) -> Result<StatusCode, StatusCode> {
    authorized(&headers)?;
    Ok(StatusCode::OK)
}

async fn event_type_items(Path(_id): Path<i64>) -> Json<Value> {
    Json(json!([
        { "nome": "Meat", "quantidadePorPessoa": 0.4 },
        { "nome": "Soda", "quantidadePorPessoa": 1 }
    ]))
}

async fn event_types() -> Json<Value> {
    Json(json!([{ "id": 1, "nome": "Aniversario" }, { "id": 2, "nome": "Churrasco" }]))
}

async fn event_type(Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    match id {
        2 => Ok(Json(json!({ "id": 2, "nome": "Churrasco" }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

/// Stand-in for the remote Party Manager API.
pub fn remote_api() -> Router {
    Router::new()
        .route("/api/Seguranca/login", post(login))
        .route("/api/Seguranca/logout", post(|| async { StatusCode::OK }))
        .route("/api/usuario", post(register))
        .route(
            "/api/usuario/{id}",
            get(get_user).put(put_user).delete(delete_user),
        )
        .route("/api/evento", post(create_event))
        .route("/api/evento/usuario/{id}", get(list_events))
        .route(
            "/api/evento/{id}",
            get(get_event).put(put_event).delete(delete_event),
        )
        .route("/api/evento/{id}/itens", get(event_type_items))
        .route("/api/tipoevento", get(event_types))
        .route("/api/tipoevento/{id}", get(event_type))
}
