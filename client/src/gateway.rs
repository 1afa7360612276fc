use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("party-manager/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client bound to the remote API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_http(http, base_url))
    }

    pub fn with_http(http: Client, base_url: &Url) -> Self {
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request issuer for every path under `prefix`, e.g. `/evento`.
    pub fn resource(&self, prefix: &str) -> ApiGateway {
        ApiGateway {
            http: self.http.clone(),
            base: join(&self.base_url, prefix, ""),
            token: None,
        }
    }
}

#[derive(Clone)]
pub struct ApiGateway {
    http: Client,
    base: String,
    token: Option<String>,
}

impl ApiGateway {
    /// Sends `Authorization: Bearer <token>` on every request.
    pub fn authorized(mut self, token: &str) -> Self {
        self.token = Some(token.to_owned());
        self
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&join(&self.base, path, ""))?)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        let request = self.request(Method::GET, path)?;
        self.send(Method::GET, path, request).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(Method::POST, path, request).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let request = self.request(Method::PUT, path)?.json(body);
        self.send(Method::PUT, path, request).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        let request = self.request(Method::DELETE, path)?;
        self.send(Method::DELETE, path, request).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        decode(self.get(path).await?).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(self.post(path, body).await?).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(self.put(path, body).await?).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let mut request = self
            .http
            .request(method, self.url(path)?)
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        Ok(request)
    }

    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> Result<Response> {
        debug!(%method, base = %self.base, path, "Api request");
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            debug!(%method, path, status = %status, "Api response");
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(
            %method,
            base = %self.base,
            path,
            status = %status,
            response = %body,
            "Api unexpected response"
        );
        Err(Error::from_status(status, body))
    }
}

/// Narrows a successful response body into `T`.
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str::<T>(&body)
        .map_err(|e| Error::InvalidResponse(format!("{e}, body={body}")))
}

fn join(base: &str, prefix: &str, path: &str) -> String {
    let mut url = base.trim_end_matches('/').to_owned();
    for segment in [prefix, path] {
        let segment = segment.trim_matches('/');
        if !segment.is_empty() {
            url.push('/');
            url.push_str(segment);
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::join;

    #[test]
    fn join_collapses_slashes_at_the_seams() {
        assert_eq!(
            join("http://host/api/", "/evento", "/5"),
            "http://host/api/evento/5"
        );
        assert_eq!(join("http://host/api", "Usuario", ""), "http://host/api/Usuario");
        assert_eq!(
            join("http://host/api", "/evento/", "usuario/3"),
            "http://host/api/evento/usuario/3"
        );
    }
}
