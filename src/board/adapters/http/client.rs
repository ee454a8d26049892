//! `reqwest`-backed gateway speaking the task service's JSON API.

use super::wire::{
    CreateTaskBody, UpdateStatusBody, UpdateTaskBody, created_task_id, data_array,
    decode_assignees, decode_boards, decode_single_task, decode_tasks, error_reason, parse_json,
};
use crate::{
    board::{
        domain::{
            Assignee, Board, BoardId, Task, TaskDraft, TaskId, TaskPatch, TaskStatus, status,
        },
        ports::{GatewayError, GatewayResult, TaskGateway},
    },
    config::GatewayConfig,
};
use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, StatusCode, Url,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;
use tracing::{debug, instrument};

/// Gateway that talks to the task service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskGateway {
    client: Client,
    config: GatewayConfig,
}

/// A completed exchange: status code plus the body as text.
struct RawResponse {
    status: StatusCode,
    body: String,
}

impl RawResponse {
    fn reason(&self) -> String {
        error_reason(
            &self.body,
            self.status.canonical_reason().unwrap_or("request failed"),
        )
    }
}

impl HttpTaskGateway {
    /// Creates a gateway for the configured service.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(GatewayError::transport)?;
        Ok(Self { client, config })
    }

    /// Returns the configuration this gateway was built with.
    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Builds `{base}/{route}/{id}`, escaping the identifier as one path
    /// segment.
    fn task_url(&self, route: &str, id: &TaskId) -> GatewayResult<Url> {
        let base = self.config.endpoint(route);
        let mut url =
            Url::parse(&base).map_err(|_| GatewayError::InvalidEndpoint(base.clone()))?;
        url.path_segments_mut()
            .map_err(|()| GatewayError::InvalidEndpoint(base))?
            .push(id.as_str());
        Ok(url)
    }

    async fn get_json(&self, path: &str) -> GatewayResult<Value> {
        let url = self.config.endpoint(path);
        self.get_url(&url).await
    }

    async fn send(&self, request: RequestBuilder) -> GatewayResult<RawResponse> {
        let response = request.send().await.map_err(GatewayError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(GatewayError::transport)?;
        debug!(status = status.as_u16(), "task service responded");
        Ok(RawResponse { status, body })
    }

    async fn get_url(&self, url: &str) -> GatewayResult<Value> {
        debug!(%url, "fetching");
        let response = self.send(self.client.get(url)).await?;
        if !response.status.is_success() {
            return Err(GatewayError::FetchFailed {
                status: response.status.as_u16(),
                reason: response.reason(),
            });
        }
        parse_json(&response.body)
    }

    async fn send_update(&self, request: RequestBuilder) -> GatewayResult<()> {
        let response = self.send(request).await?;
        if !response.status.is_success() {
            return Err(GatewayError::UpdateFailed {
                status: response.status.as_u16(),
                reason: response.reason(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    #[instrument(skip(self, draft), fields(board_id = %draft.board_id()))]
    async fn create_task(&self, draft: &TaskDraft) -> GatewayResult<Task> {
        let url = self.config.endpoint("/tasks/create");
        let request = self
            .client
            .post(&url)
            .json(&CreateTaskBody::from_draft(draft));
        let response = self.send(request).await?;
        if !response.status.is_success() {
            return Err(GatewayError::CreateFailed {
                status: response.status.as_u16(),
                reason: response.reason(),
            });
        }
        let id = created_task_id(&response.body)?;
        debug!(task_id = %id, "task created");
        Ok(draft.clone().into_task(id))
    }

    #[instrument(skip(self, patch), fields(task_id = %id))]
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> GatewayResult<()> {
        let url = self.task_url("/tasks/update", id)?;
        let request = self
            .client
            .put(url)
            .json(&UpdateTaskBody::from_patch(patch));
        self.send_update(request).await
    }

    #[instrument(skip(self), fields(task_id = %id, status = %status))]
    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> GatewayResult<()> {
        let url = self.task_url("/tasks/updateStatus", id)?;
        let request = self.client.patch(url).json(&UpdateStatusBody {
            status: status::to_remote(status),
        });
        self.send_update(request).await
    }

    #[instrument(skip(self), fields(task_id = %id))]
    async fn fetch_task(&self, id: &TaskId) -> GatewayResult<Task> {
        let url = self.task_url("/tasks", id)?;
        let body = self.get_url(url.as_str()).await?;
        decode_single_task(body)
    }

    #[instrument(skip(self), fields(board_id = %board_id))]
    async fn fetch_board_tasks(&self, board_id: BoardId) -> GatewayResult<Vec<Task>> {
        let body = self.get_json(&format!("/boards/{board_id}")).await?;
        Ok(decode_tasks(data_array(body, true)?, Some(board_id)))
    }

    #[instrument(skip(self))]
    async fn fetch_all_tasks(&self) -> GatewayResult<Vec<Task>> {
        let body = self.get_json("/tasks").await?;
        Ok(decode_tasks(data_array(body, true)?, None))
    }

    #[instrument(skip(self))]
    async fn fetch_boards(&self) -> GatewayResult<Vec<Board>> {
        let body = self.get_json("/boards").await?;
        Ok(decode_boards(data_array(body, false)?))
    }

    #[instrument(skip(self))]
    async fn fetch_assignees(&self) -> GatewayResult<Vec<Assignee>> {
        let body = self.get_json("/users").await?;
        Ok(decode_assignees(data_array(body, false)?))
    }
}
