//! Typed HTTP client for the notes backend.

use async_trait::async_trait;
use notes_types::{DataResponse, MessageResponse, Note, NoteInput};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Operations the client needs from the note store
#[async_trait]
pub trait NotesBackend: Send + Sync {
    /// All notes, or only those whose title matches `title`
    async fn list_notes(&self, title: Option<&str>) -> ClientResult<Vec<Note>>;

    async fn create_note(&self, title: &str, content: &str) -> ClientResult<Note>;

    async fn update_note(&self, id: i64, title: &str, content: &str) -> ClientResult<Note>;

    async fn delete_note(&self, id: i64) -> ClientResult<()>;
}

pub struct NotesApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl NotesApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: i64) -> String {
        format!("{}/notes/{}", self.base_url, id)
    }

    /// Unwrap `{ "data": ... }` from a successful response
    async fn read_data<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        if !resp.status().is_success() {
            return Err(Self::read_error(resp).await);
        }

        let body: DataResponse<T> = resp.json().await?;
        Ok(body.data)
    }

    /// Build an error from a non-2xx response, keeping its `message` if any
    async fn read_error(resp: reqwest::Response) -> ClientError {
        let status = resp.status().as_u16();
        let message = resp
            .json::<MessageResponse>()
            .await
            .ok()
            .and_then(|body| body.message);

        ClientError::from_status(status, message)
    }
}

#[async_trait]
impl NotesBackend for NotesApiClient {
    async fn list_notes(&self, title: Option<&str>) -> ClientResult<Vec<Note>> {
        let mut req = self.client.get(self.notes_url());
        if let Some(title) = title {
            req = req.query(&[("title", title)]);
        }

        let resp = req.send().await?;
        Self::read_data(resp).await
    }

    async fn create_note(&self, title: &str, content: &str) -> ClientResult<Note> {
        let resp = self
            .client
            .post(self.notes_url())
            .json(&NoteInput::new(title, content))
            .send()
            .await?;

        Self::read_data(resp).await
    }

    async fn update_note(&self, id: i64, title: &str, content: &str) -> ClientResult<Note> {
        let resp = self
            .client
            .put(self.note_url(id))
            .json(&NoteInput::new(title, content))
            .send()
            .await?;

        Self::read_data(resp).await
    }

    async fn delete_note(&self, id: i64) -> ClientResult<()> {
        let resp = self.client.delete(self.note_url(id)).send().await?;

        if !resp.status().is_success() {
            return Err(Self::read_error(resp).await);
        }

        // Body is an optional acknowledgement
        Ok(())
    }
}
