//! HTTP client for the hosted service's REST and storage endpoints.

use std::time::Duration;

use placement_core::config::ServiceConfig;
use placement_core::{PortalError, Result};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

const REST_PATH: &str = "rest/v1";
const STORAGE_PATH: &str = "storage/v1/object";

/// Thin client over the PostgREST-style record API and the object API.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    access_token: Option<String>,
}

impl RestClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PortalError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            access_token: None,
        })
    }

    /// Uses the signed-in user's token instead of the anon key for
    /// `Authorization`, so the service applies that user's row policy.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Selects rows of `table` matching every equality filter.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = table_url(&self.base_url, table, filters)?;
        let request = self.request(Method::GET, url).query(&[("select", "*")]);
        self.send_json(request).await
    }

    /// Selects at most one row.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<Option<T>> {
        Ok(self.select(table, filters).await?.into_iter().next())
    }

    /// Inserts a row and returns the stored representation.
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T> {
        let url = table_url(&self.base_url, table, &[])?;
        let request = self
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(body);
        first_row(self.send_json(request).await?, table)
    }

    /// Inserts or replaces a row by primary key.
    pub async fn upsert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T> {
        let url = table_url(&self.base_url, table, &[])?;
        let request = self
            .request(Method::POST, url)
            .header("Prefer", "return=representation,resolution=merge-duplicates")
            .json(body);
        first_row(self.send_json(request).await?, table)
    }

    /// Patches the rows matching `filters`; returns the updated rows.
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
        body: &B,
    ) -> Result<Vec<T>> {
        let url = table_url(&self.base_url, table, filters)?;
        let request = self
            .request(Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(body);
        self.send_json(request).await
    }

    /// Uploads an object and returns its public URL.
    pub async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<String> {
        let url = object_url(&self.base_url, bucket, path)?;
        let content_type = mime_guess::from_path(path).first_or_octet_stream();
        let request = self
            .request(Method::POST, url)
            .header(reqwest::header::CONTENT_TYPE, content_type.as_ref())
            .header("x-upsert", "false")
            .body(bytes);

        let response = request
            .send()
            .await
            .map_err(|e| PortalError::upstream("storage", e.to_string()))?;
        check_status(response.status(), "storage")
            .inspect_err(|err| tracing::warn!(bucket, path, "[Storage] Upload failed: {}", err))?;

        Ok(public_object_url(&self.base_url, bucket, path)?.to_string())
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| PortalError::upstream("data", e.to_string()))?;
        let status = response.status();
        if let Err(err) = check_status(status, "data") {
            let detail = response.text().await.unwrap_or_default();
            tracing::debug!(%status, detail = %detail, "[Data] Request failed");
            return Err(err);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| PortalError::upstream("data", format!("Invalid response body: {}", e)))
    }
}

fn first_row<T>(rows: Vec<T>, table: &str) -> Result<T> {
    rows.into_iter()
        .next()
        .ok_or_else(|| PortalError::upstream("data", format!("{} returned no rows", table)))
}

/// Maps an HTTP status to the portal error taxonomy.
pub(crate) fn check_status(status: StatusCode, service: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            PortalError::policy_denied(format!("{} rejected the request ({})", service, status))
        }
        StatusCode::CONFLICT => {
            PortalError::validation(format!("{} reported a conflicting record", service))
        }
        _ => PortalError::upstream(service, format!("HTTP {}", status)),
    })
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Url::parse(&with_slash)
        .map_err(|e| PortalError::config(format!("Invalid service URL '{}': {}", raw, e)))
}

/// `{base}/rest/v1/{table}?{column}=eq.{value}&...`
pub(crate) fn table_url(base: &Url, table: &str, filters: &[(&str, &str)]) -> Result<Url> {
    let mut url = base
        .join(&format!("{}/{}", REST_PATH, table))
        .map_err(|e| PortalError::config(e.to_string()))?;
    if !filters.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (column, value) in filters {
            pairs.append_pair(column, &format!("eq.{}", value));
        }
    }
    Ok(url)
}

/// `{base}/storage/v1/object/{bucket}/{path}`
pub(crate) fn object_url(base: &Url, bucket: &str, path: &str) -> Result<Url> {
    base.join(&format!("{}/{}/{}", STORAGE_PATH, bucket, path))
        .map_err(|e| PortalError::config(e.to_string()))
}

/// `{base}/storage/v1/object/public/{bucket}/{path}`
pub(crate) fn public_object_url(base: &Url, bucket: &str, path: &str) -> Result<Url> {
    base.join(&format!("{}/public/{}/{}", STORAGE_PATH, bucket, path))
        .map_err(|e| PortalError::config(e.to_string()))
}
