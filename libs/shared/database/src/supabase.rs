use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::store::{Table, TableQuery, TableStore};

pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.anon_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }

        Ok(headers)
    }

    pub async fn request<T>(&self, method: Method, path: &str,
                            auth_token: Option<&str>, body: Option<Value>)
                            -> Result<T>
    where T: DeserializeOwned {
        self.request_with_headers(method, path, auth_token, body, None).await
    }

    pub async fn request_with_headers<T>(&self, method: Method, path: &str,
                                         auth_token: Option<&str>, body: Option<Value>,
                                         extra_headers: Option<HeaderMap>)
                                         -> Result<T>
    where T: DeserializeOwned {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers(auth_token)?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url)
            .headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("API error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    fn representation_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }

    fn table_path(table: Table, query: Option<&TableQuery>) -> String {
        match query.map(TableQuery::to_query_string) {
            Some(qs) if !qs.is_empty() => format!("/rest/v1/{}?{}", table.as_str(), qs),
            _ => format!("/rest/v1/{}", table.as_str()),
        }
    }
}

#[async_trait]
impl TableStore for SupabaseClient {
    async fn select(&self, table: Table, query: &TableQuery, auth_token: &str) -> Result<Vec<Value>> {
        let path = Self::table_path(table, Some(query));
        self.request(Method::GET, &path, Some(auth_token), None).await
    }

    async fn insert(&self, table: Table, row: Value, auth_token: &str) -> Result<Vec<Value>> {
        let path = Self::table_path(table, None);
        self.request_with_headers(
            Method::POST,
            &path,
            Some(auth_token),
            Some(row),
            Some(Self::representation_headers()),
        ).await
    }

    async fn update(&self, table: Table, query: &TableQuery, patch: Value, auth_token: &str) -> Result<Vec<Value>> {
        if query.is_unfiltered() {
            return Err(anyhow!("Refusing to update every row of {}", table.as_str()));
        }

        let path = Self::table_path(table, Some(query));
        self.request_with_headers(
            Method::PATCH,
            &path,
            Some(auth_token),
            Some(patch),
            Some(Self::representation_headers()),
        ).await
    }

    async fn delete(&self, table: Table, query: &TableQuery, auth_token: &str) -> Result<Vec<Value>> {
        if query.is_unfiltered() {
            return Err(anyhow!("Refusing to delete every row of {}", table.as_str()));
        }

        let path = Self::table_path(table, Some(query));
        self.request_with_headers(
            Method::DELETE,
            &path,
            Some(auth_token),
            None,
            Some(Self::representation_headers()),
        ).await
    }
}
