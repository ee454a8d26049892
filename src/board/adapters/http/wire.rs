//! Wire shapes of the task service and decoders for its envelopes.
//!
//! List endpoints wrap their payload as `{"data": [...]}`. Single-task reads
//! may or may not be wrapped, and create responses carry the new identifier
//! either at the top level or under `data`. Each decoder accepts exactly the
//! shapes the service is known to produce and fails explicitly otherwise.

use crate::board::{
    domain::{
        Assignee, AssigneeId, Board, BoardId, RemoteId, RemoteStatus, RemoteTaskPayload, Task,
        TaskDraft, TaskId, TaskPatch, status,
    },
    ports::{GatewayError, GatewayResult},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Body of `POST /tasks/create`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateTaskBody<'a> {
    title: &'a str,
    description: &'a str,
    priority: &'static str,
    status: RemoteStatus,
    assignee_id: u64,
    board_id: u64,
}

impl<'a> CreateTaskBody<'a> {
    pub(super) fn from_draft(draft: &'a TaskDraft) -> Self {
        Self {
            title: draft.title(),
            description: draft.description(),
            priority: draft.priority().as_remote_str(),
            status: status::to_remote(draft.status()),
            assignee_id: draft.assignee_id().value(),
            board_id: draft.board_id().value(),
        }
    }
}

/// Body of `PUT /tasks/update/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateTaskBody<'a> {
    title: &'a str,
    description: &'a str,
    priority: &'static str,
    status: RemoteStatus,
    assignee_id: u64,
}

impl<'a> UpdateTaskBody<'a> {
    pub(super) fn from_patch(patch: &'a TaskPatch) -> Self {
        Self {
            title: &patch.title,
            description: &patch.description,
            priority: patch.priority.as_remote_str(),
            status: status::to_remote(patch.status),
            assignee_id: patch.assignee_id.value(),
        }
    }
}

/// Body of `PATCH /tasks/updateStatus/{id}`.
#[derive(Debug, Serialize)]
pub(super) struct UpdateStatusBody {
    pub(super) status: RemoteStatus,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreatedTaskBody {
    TopLevel { id: RemoteId },
    Wrapped { data: CreatedTaskData },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreatedTaskData {
    Object { id: RemoteId },
    Bare(RemoteId),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteBoard {
    id: Option<RemoteId>,
    name: Option<String>,
    #[serde(alias = "tasksCount", alias = "issuesCount")]
    task_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteUser {
    id: Option<RemoteId>,
    full_name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

/// Reads the identifier of a freshly created task from a response body.
pub(super) fn created_task_id(body: &str) -> GatewayResult<TaskId> {
    let decoded: CreatedTaskBody =
        serde_json::from_str(body).map_err(|_| GatewayError::MissingTaskId)?;
    let raw = match decoded {
        CreatedTaskBody::TopLevel { id }
        | CreatedTaskBody::Wrapped {
            data: CreatedTaskData::Object { id } | CreatedTaskData::Bare(id),
        } => id,
    };
    TaskId::new(raw.to_string()).map_err(|_| GatewayError::MissingTaskId)
}

/// Parses a response body as JSON.
pub(super) fn parse_json(body: &str) -> GatewayResult<Value> {
    serde_json::from_str(body)
        .map_err(|err| GatewayError::MalformedResponse(format!("body is not valid JSON: {err}")))
}

/// Extracts the `data` array of a list envelope.
///
/// `required` decides whether a missing `data` field is an error or an empty
/// list; a `data` field that is present but not an array is always an error.
pub(super) fn data_array(envelope: Value, required: bool) -> GatewayResult<Vec<Value>> {
    let Value::Object(mut fields) = envelope else {
        return Err(GatewayError::MalformedResponse(
            "expected an object with a 'data' field".to_owned(),
        ));
    };
    match fields.remove("data") {
        Some(Value::Array(items)) => Ok(items),
        None | Some(Value::Null) if !required => Ok(Vec::new()),
        None | Some(Value::Null) => Err(GatewayError::MalformedResponse(
            "response has no 'data' field".to_owned(),
        )),
        Some(other) => Err(GatewayError::MalformedResponse(format!(
            "expected 'data' to be an array, found {}",
            json_kind(&other)
        ))),
    }
}

/// Decodes a list of task payloads, skipping records that cannot form a task.
pub(super) fn decode_tasks(items: Vec<Value>, context_board_id: Option<BoardId>) -> Vec<Task> {
    items
        .into_iter()
        .filter_map(|item| {
            let payload = serde_json::from_value::<RemoteTaskPayload>(item)
                .map_err(|err| warn!(error = %err, "skipping undecodable task record"))
                .ok()?;
            Task::from_remote_payload(payload, context_board_id)
                .map_err(|err| warn!(error = %err, "skipping incomplete task record"))
                .ok()
        })
        .collect()
}

/// Decodes a single task that may or may not be wrapped in `data`.
pub(super) fn decode_single_task(body: Value) -> GatewayResult<Task> {
    let payload_value = match body {
        Value::Object(mut fields) if fields.get("data").is_some_and(Value::is_object) => fields
            .remove("data")
            .unwrap_or(Value::Null),
        other => other,
    };
    let payload: RemoteTaskPayload = serde_json::from_value(payload_value)
        .map_err(|err| GatewayError::MalformedResponse(format!("invalid task payload: {err}")))?;
    Task::from_remote_payload(payload, None)
        .map_err(|err| GatewayError::MalformedResponse(err.to_string()))
}

/// Decodes board directory entries, skipping records without a valid id.
pub(super) fn decode_boards(items: Vec<Value>) -> Vec<Board> {
    items
        .into_iter()
        .filter_map(|item| {
            let remote = serde_json::from_value::<RemoteBoard>(item)
                .map_err(|err| warn!(error = %err, "skipping undecodable board record"))
                .ok()?;
            let Some(id) = remote
                .id
                .as_ref()
                .and_then(RemoteId::as_u64)
                .and_then(|raw| BoardId::new(raw).ok())
            else {
                warn!("skipping board record without a valid id");
                return None;
            };
            Some(Board::new(
                id,
                remote.name.unwrap_or_default(),
                remote.task_count.unwrap_or_default(),
            ))
        })
        .collect()
}

/// Decodes assignee directory entries, skipping records without an id.
pub(super) fn decode_assignees(items: Vec<Value>) -> Vec<Assignee> {
    items
        .into_iter()
        .filter_map(|item| {
            let remote = serde_json::from_value::<RemoteUser>(item)
                .map_err(|err| warn!(error = %err, "skipping undecodable user record"))
                .ok()?;
            let Some(id) = remote.id.as_ref().and_then(RemoteId::as_u64) else {
                warn!("skipping user record without a valid id");
                return None;
            };
            Some(Assignee {
                id: AssigneeId::new(id),
                full_name: remote.full_name.unwrap_or_default(),
                email: remote.email.unwrap_or_default(),
                avatar_url: remote.avatar_url.unwrap_or_default(),
            })
        })
        .collect()
}

/// Extracts a human-readable reason from an error response body.
///
/// Tries `message`, then `error`, then the raw body, then the status line.
pub(super) fn error_reason(body: &str, fallback: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(reason) = json.get(key).and_then(Value::as_str) {
                return reason.to_owned();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_owned()
    } else {
        trimmed.to_owned()
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
