// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the remote store.
//!
//! Speaks the PostgREST dialect: table endpoints under `/rest/v1/` with
//! query-string filters, and object storage under `/storage/v1/`. All calls
//! are async and return [`StoreError`] on failure; callers surface them as
//! status lines, never as panics.

use crate::error::StoreError;
use crate::store::models::{NewOverlay, NewPose, Overlay, PoseRecord};
use futures_util::StreamExt;

/// Storage bucket holding uploaded overlay images.
const OVERLAY_BUCKET: &str = "overlays";

/// Client for overlay and pose records.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: Option<String>,
}

impl StoreClient {
    /// Builds a client for the given base URL with an optional anon key sent
    /// on every request.
    pub fn new(base_url: impl Into<String>, anon_key: Option<String>) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("AlignLens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoreError::Other(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    fn rest_url(&self, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/rest/v1/{}", self.base_url, table)
        } else {
            format!("{}/rest/v1/{}?{}", self.base_url, table, query)
        }
    }

    fn object_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, OVERLAY_BUCKET, name
        )
    }

    /// Public download URL for an uploaded object.
    #[must_use]
    pub fn public_object_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, OVERLAY_BUCKET, name
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.anon_key {
            Some(key) => request
                .header("apikey", key)
                .bearer_auth(key),
            None => request,
        }
    }

    /// All overlays, newest first.
    pub async fn list_overlays(&self) -> Result<Vec<Overlay>, StoreError> {
        let url = self.rest_url("overlays", "select=*&order=created_at.desc");
        let response = self.authorize(self.http.get(&url)).send().await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// One overlay by id.
    pub async fn get_overlay(&self, id: &str) -> Result<Overlay, StoreError> {
        let url = self.rest_url("overlays", &format!("select=*&id=eq.{}", id));
        let response = self.authorize(self.http.get(&url)).send().await?;
        let response = check_status(response)?;
        let mut rows: Vec<Overlay> = response.json().await?;
        rows.pop().ok_or(StoreError::NotFound)
    }

    /// Creates an overlay record and returns the stored row.
    pub async fn create_overlay(&self, overlay: &NewOverlay) -> Result<Overlay, StoreError> {
        let url = self.rest_url("overlays", "");
        let response = self
            .authorize(self.http.post(&url))
            .header("Prefer", "return=representation")
            .json(&[overlay])
            .send()
            .await?;
        let response = check_status(response)?;
        let mut rows: Vec<Overlay> = response.json().await?;
        rows.pop()
            .ok_or_else(|| StoreError::Decode("insert returned no row".to_string()))
    }

    /// Pose records for one overlay, newest first.
    pub async fn list_poses(&self, overlay_id: &str) -> Result<Vec<PoseRecord>, StoreError> {
        let url = self.rest_url(
            "poses",
            &format!("select=*&overlay_id=eq.{}&order=recorded_at.desc", overlay_id),
        );
        let response = self.authorize(self.http.get(&url)).send().await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// Writes one immutable pose record.
    pub async fn create_pose(&self, pose: &NewPose) -> Result<(), StoreError> {
        let url = self.rest_url("poses", "");
        let response = self
            .authorize(self.http.post(&url))
            .header("Prefer", "return=minimal")
            .json(&[pose])
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    /// Uploads overlay image bytes and returns the public URL.
    pub async fn upload_overlay_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        let url = self.object_url(file_name);
        let response = self
            .authorize(self.http.post(&url))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| StoreError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Upload(format!(
                "HTTP status: {}",
                response.status()
            )));
        }

        Ok(self.public_object_url(file_name))
    }

    /// Downloads an image, reporting progress in `[0, 1]` as chunks arrive.
    pub async fn download_image(
        &self,
        url: &str,
        mut progress: impl FnMut(f32) + Send,
    ) -> Result<Vec<u8>, StoreError> {
        let response = self.http.get(url).send().await?;
        let response = check_status(response)?;

        let total = response.content_length().unwrap_or(0);
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            bytes.extend_from_slice(&chunk);
            if total > 0 {
                progress((bytes.len() as f64 / total as f64) as f32);
            }
        }
        progress(1.0);

        Ok(bytes)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        Err(StoreError::NotFound)
    } else if !status.is_success() {
        Err(StoreError::Status(status.as_u16()))
    } else {
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StoreClient {
        StoreClient::new("https://store.example/", Some("anon".to_string()))
            .expect("client builds")
    }

    #[test]
    fn base_url_is_normalized() {
        let client = client();
        assert_eq!(
            client.rest_url("overlays", ""),
            "https://store.example/rest/v1/overlays"
        );
    }

    #[test]
    fn rest_url_appends_query() {
        let client = client();
        assert_eq!(
            client.rest_url("poses", "select=*&overlay_id=eq.o1"),
            "https://store.example/rest/v1/poses?select=*&overlay_id=eq.o1"
        );
    }

    #[test]
    fn object_urls_distinguish_upload_and_public() {
        let client = client();
        assert_eq!(
            client.object_url("a.png"),
            "https://store.example/storage/v1/object/overlays/a.png"
        );
        assert_eq!(
            client.public_object_url("a.png"),
            "https://store.example/storage/v1/object/public/overlays/a.png"
        );
    }
}
