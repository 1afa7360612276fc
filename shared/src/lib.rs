use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    #[serde(rename = "senha", serialize_with = "expose")]
    pub password: SecretString,
}

/// Raw login answer. Every field is optional on the wire; use
/// [`SignInResponse::credentials`] to narrow it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SignInResponse {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub token: Option<String>,
    #[serde(
        rename = "nomeUsuario",
        default,
        deserialize_with = "blank_as_none"
    )]
    pub display_name: Option<String>,
    #[serde(rename = "id", default)]
    pub user_id: Option<i64>,
}

impl SignInResponse {
    /// `(user_id, token)` when the server returned both.
    pub fn credentials(&self) -> Option<(i64, &str)> {
        match (self.user_id, self.token.as_deref()) {
            (Some(user_id), Some(token)) if !token.is_empty() => Some((user_id, token)),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewUserRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha", serialize_with = "expose")]
    pub password: SecretString,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(rename = "nome", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(
        rename = "senha",
        serialize_with = "expose",
        deserialize_with = "secret_or_empty",
        default = "empty_secret"
    )]
    pub password: SecretString,
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn secret_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(SecretString::from(value.unwrap_or_default()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventType {
    pub id: i64,
    #[serde(rename = "nome", default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTypeItem {
    #[serde(rename = "nome", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(
        rename = "quantidadePorPessoa",
        default,
        deserialize_with = "null_as_default"
    )]
    pub quantity_per_person: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedItem {
    #[serde(rename = "itemNome", default, deserialize_with = "null_as_default")]
    pub item_name: String,
    #[serde(rename = "quantidade", default, deserialize_with = "null_as_default")]
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(rename = "nome", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "data", default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(rename = "localidade", default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(rename = "numeroAdultos", default, deserialize_with = "null_as_default")]
    pub adults: u32,
    #[serde(rename = "numeroCriancas", default, deserialize_with = "null_as_default")]
    pub children: u32,
    #[serde(rename = "idTipoEvento", default)]
    pub event_type_id: Option<i64>,
    #[serde(rename = "tipoEvento", default, deserialize_with = "blank_as_none")]
    pub event_type_name: Option<String>,
    #[serde(rename = "idUsuario", default)]
    pub user_id: Option<i64>,
    #[serde(
        rename = "itensCalculados",
        default,
        deserialize_with = "null_as_default"
    )]
    pub calculated_items: Vec<CalculatedItem>,
}

impl Event {
    pub fn guests(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    /// Narrows the free-form `data` field into a calendar date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
            return Some(date_time.date_naive());
        }
        if let Ok(date_time) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(date_time.date());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    pub fn share_message(&self, type_name: Option<&str>) -> String {
        let type_name = type_name
            .or(self.event_type_name.as_deref())
            .unwrap_or("-");
        let date = self
            .parsed_date()
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| self.date.clone());
        let mut message = format!(
            "Event details:\nName: {name}\nDate: {date}\nLocation: {location}\nEvent type: {type_name}\nAdults: {adults}\nChildren: {children}\n\nCalculated items:",
            name = self.name,
            location = self.location,
            adults = self.adults,
            children = self.children,
        );
        for item in &self.calculated_items {
            message.push_str(&format!("\n- {}: {}", item.item_name, item.quantity));
        }
        message
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEventRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "localidade")]
    pub location: String,
    #[serde(rename = "numeroAdultos")]
    pub adults: u32,
    #[serde(rename = "numeroCriancas")]
    pub children: u32,
    #[serde(rename = "idTipoEvento")]
    pub event_type_id: i64,
    #[serde(rename = "idUsuario")]
    pub user_id: i64,
    #[serde(rename = "data")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateEventRequest {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "localidade")]
    pub location: String,
    #[serde(rename = "idTipoEvento")]
    pub event_type_id: i64,
    #[serde(rename = "numeroAdultos", skip_serializing_if = "Option::is_none")]
    pub adults: Option<u32>,
    #[serde(rename = "numeroCriancas", skip_serializing_if = "Option::is_none")]
    pub children: Option<u32>,
}

/// Creation timestamp in the same shape a browser `toISOString` produces.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
