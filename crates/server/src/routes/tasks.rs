//! Task CRUD handlers and the watch stream.

use std::collections::HashMap;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures_core::Stream;
use serde::Deserialize;
use tokio::sync::mpsc;

use query_engine_execution::task::{Task, TaskStatus};
use query_engine_metadata::{FieldKind, FieldRegistry};
use query_engine_translation::translation;

use crate::response::{self, ErrorResponse};
use crate::state::AppState;
use crate::watcher::{TaskAction, TaskEvent, TaskEvents, WatcherId};

/// The request surface of the tasks resource: which query parameters may
/// filter, what type each one carries, which storage column it reaches,
/// and which columns may be sorted on.
fn task_fields() -> FieldRegistry {
    FieldRegistry::new()
        .filter("id", "id", FieldKind::Integer)
        .filter("name", "name", FieldKind::Text)
        .filter("category", "category", FieldKind::Text)
        .filter("status", "status", FieldKind::Text)
        .sortable("id")
        .sortable("name")
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Task>>, ErrorResponse> {
    let descriptor =
        translation::translate(&params, &task_fields()).map_err(response::bad_request)?;
    let tasks = state
        .store
        .select_tasks(&descriptor)
        .await
        .map_err(response::internal_error)?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> Result<Json<Task>, ErrorResponse> {
    let task = fetch_task(&state, task_id).await?;
    Ok(Json(task))
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(task): Json<Task>,
) -> Result<(StatusCode, Json<Task>), ErrorResponse> {
    task.validate().map_err(response::bad_request)?;
    let task = state
        .store
        .create_task(&task)
        .await
        .map_err(response::internal_error)?;
    state.events.publish(&TaskEvent {
        action: TaskAction::Created,
        task: task.clone(),
    });
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(mut update): Json<Task>,
) -> Result<Json<Task>, ErrorResponse> {
    let existing = fetch_task(&state, task_id).await?;
    // id and creation time are never taken from the request body
    update.id = existing.id;
    update.created = existing.created;
    update.validate().map_err(response::bad_request)?;

    let task = state
        .store
        .update_task(&update)
        .await
        .map_err(response::internal_error)?;
    state.events.publish(&TaskEvent {
        action: TaskAction::Updated,
        task: task.clone(),
    });
    Ok(Json(task))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    permanent: bool,
}

/// Soft-delete by default (status moves to `deleted`); `?permanent=true`
/// removes the row.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<Task>, ErrorResponse> {
    let mut task = fetch_task(&state, task_id).await?;

    if params.permanent {
        state
            .store
            .delete_task(task.id)
            .await
            .map_err(response::internal_error)?;
        state.events.publish(&TaskEvent {
            action: TaskAction::Deleted,
            task: task.clone(),
        });
    } else {
        task.status = TaskStatus::Deleted;
        task = state
            .store
            .update_task(&task)
            .await
            .map_err(response::internal_error)?;
        state.events.publish(&TaskEvent {
            action: TaskAction::Updated,
            task: task.clone(),
        });
    }
    Ok(Json(task))
}

pub async fn watch_tasks(State(state): State<AppState>) -> Sse<WatchStream> {
    let (id, receiver) = state.events.subscribe();
    let stream = WatchStream {
        id,
        events: state.events,
        receiver,
    };
    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn fetch_task(state: &AppState, task_id: i64) -> Result<Task, ErrorResponse> {
    state
        .store
        .get_task(task_id)
        .await
        .map_err(response::internal_error)?
        .ok_or_else(|| response::not_found(format!("task {task_id} was not found")))
}

/// Streams published task events to one watcher. Dropping the stream,
/// which happens when the client disconnects, unregisters the watcher.
pub struct WatchStream {
    id: WatcherId,
    events: TaskEvents,
    receiver: mpsc::Receiver<TaskEvent>,
}

impl Stream for WatchStream {
    type Item = Result<Event, axum::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut()
            .receiver
            .poll_recv(cx)
            .map(|next| {
                next.map(|event| Event::default().json_data(&event).map_err(axum::Error::new))
            })
    }
}

impl Drop for WatchStream {
    fn drop(&mut self) {
        self.events.unsubscribe(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_fields_expose_the_documented_filters() {
        let registry = task_fields();
        let names: Vec<&str> = registry
            .filters()
            .iter()
            .map(|rule| rule.request_name.as_str())
            .collect();
        assert_eq!(names, vec!["id", "name", "category", "status"]);
        assert!(registry.is_sortable("id"));
        assert!(registry.is_sortable("name"));
        assert!(!registry.is_sortable("description"));
    }
}
