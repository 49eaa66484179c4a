/// Task endpoints
///
/// - `POST /tasks/create/` - create a task in Pending status
/// - `PUT|PATCH /tasks/:task_id/assign/` - replace a task's assignee set
/// - `GET /users/:user_id/tasks/` - list tasks assigned to a user
///
/// All three require an authenticated caller; none applies a further role
/// check.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    models::{
        task::{CreateTask, Task},
        user::{User, UserSummary},
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

/// Create-task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Long-form description
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,

    /// Free-text category
    #[validate(length(min = 1, max = 100, message = "Task type must be 1-100 characters"))]
    pub task_type: String,
}

/// Assign-task request
#[derive(Debug, Deserialize)]
pub struct AssignTaskRequest {
    /// Complete replacement assignee set
    pub assigned_users: Vec<Uuid>,
}

/// Task as returned by the API, with its assignee set embedded
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task ID
    pub id: Uuid,

    /// Task name
    pub name: String,

    /// Description
    pub description: String,

    /// Free-text category
    pub task_type: String,

    /// Current status string
    pub status: String,

    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Completion timestamp, if any
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,

    /// Users currently assigned to the task
    pub assigned_users: Vec<UserSummary>,
}

impl TaskResponse {
    fn from_parts(task: Task, assigned_users: Vec<UserSummary>) -> Self {
        Self {
            id: task.id,
            name: task.name,
            description: task.description,
            task_type: task.task_type,
            status: task.status,
            created_at: task.created_at,
            completed_at: task.completed_at,
            assigned_users,
        }
    }
}

/// Create-task endpoint
///
/// ```text
/// POST /tasks/create/
/// {"name": "Ship release", "description": "...", "task_type": "deployment"}
/// ```
///
/// Creates the task in Pending status with an empty assignee set.
///
/// # Errors
///
/// - `400 Bad Request`: field validation failed
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;

    let task = Task::create(
        &state.db,
        CreateTask {
            name: req.name,
            description: req.description,
            task_type: req.task_type,
        },
    )
    .await?;

    tracing::info!(task_id = %task.id, "Task created");

    Ok((
        StatusCode::CREATED,
        Json(TaskResponse::from_parts(task, Vec::new())),
    ))
}

/// Assign-task endpoint
///
/// ```text
/// PUT /tasks/:task_id/assign/
/// {"assigned_users": ["<uuid>", "<uuid>"]}
/// ```
///
/// Replaces the task's whole assignee set with the supplied list. An empty
/// list clears all assignments.
///
/// # Errors
///
/// - `400 Bad Request`: one or more supplied user ids do not exist
/// - `404 Not Found`: no task with that id
pub async fn assign_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<AssignTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task = Task::find_by_id(&state.db, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found!".to_string()))?;

    // The count below is of distinct rows, so a repeated id must not inflate
    // the expected total.
    let assignee_ids = dedupe_preserving_order(&req.assigned_users);

    // Reject unknown assignee ids up front so the join table never holds a
    // dangling reference and the caller learns which field was wrong.
    if !assignee_ids.is_empty() {
        let found = User::count_existing(&state.db, &assignee_ids).await?;
        if found != assignee_ids.len() as i64 {
            return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "assigned_users".to_string(),
                message: "One or more user ids do not exist".to_string(),
            }]));
        }
    }

    Task::replace_assignees(&state.db, task.id, &assignee_ids).await?;
    let assigned_users = Task::assignees(&state.db, task.id).await?;

    tracing::info!(
        task_id = %task.id,
        assignees = assigned_users.len(),
        "Task assignee set replaced"
    );

    Ok(Json(TaskResponse::from_parts(task, assigned_users)))
}

/// Drops repeated ids, keeping first occurrences in order
fn dedupe_preserving_order(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// List-by-user endpoint
///
/// ```text
/// GET /users/:user_id/tasks/
/// ```
///
/// Returns every task whose assignee set contains the given user, in a
/// stable order.
pub async fn list_user_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = Task::list_for_user(&state.db, user_id).await?;

    let mut out = Vec::with_capacity(tasks.len());
    for task in tasks {
        let assigned_users = Task::assignees(&state.db, task.id).await?;
        out.push(TaskResponse::from_parts(task, assigned_users));
    }

    Ok(Json(out))
}
