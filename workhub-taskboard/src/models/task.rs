/// Task model and database operations
///
/// Tasks carry a free-text type, one of three statuses, and a many-to-many
/// assignee set stored in a join table. No endpoint performs a status
/// transition; tasks are created Pending and only their assignee set is ever
/// mutated.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL,
///     task_type VARCHAR(100) NOT NULL,
///     status VARCHAR(20) NOT NULL DEFAULT 'Pending',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     completed_at TIMESTAMPTZ
/// );
///
/// CREATE TABLE task_assignments (
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     PRIMARY KEY (task_id, user_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::user::UserSummary;

/// Task status
///
/// Stored as its display string ("Pending", "In Progress", "Completed").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started
    Pending,

    /// Being worked on
    #[serde(rename = "In Progress")]
    InProgress,

    /// Finished
    Completed,
}

impl TaskStatus {
    /// Status as its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(TaskStatus::Pending),
            "In Progress" => Ok(TaskStatus::InProgress),
            "Completed" => Ok(TaskStatus::Completed),
            other => Err(format!("Unknown task status '{}'", other)),
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Human-readable task name
    pub name: String,

    /// Long-form description
    pub description: String,

    /// Free-text task category
    pub task_type: String,

    /// Current status string ("Pending", "In Progress", "Completed")
    pub status: String,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was completed (never set by any current endpoint)
    pub completed_at: Option<DateTime<Utc>>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task name
    pub name: String,

    /// Description
    pub description: String,

    /// Free-text category
    pub task_type: String,
}

impl Task {
    /// Creates a new task in Pending status with an empty assignee set
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (name, description, task_type)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, task_type, status, created_at, completed_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.task_type)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, task_type, status, created_at, completed_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Replaces a task's assignee set
    ///
    /// Delete-then-insert in one transaction, so the set is swapped
    /// atomically and a failure leaves the old assignments intact.
    pub async fn replace_assignees(
        pool: &PgPool,
        task_id: Uuid,
        user_ids: &[Uuid],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM task_assignments WHERE task_id = $1")
            .bind(task_id)
            .execute(&mut *tx)
            .await?;

        for user_id in user_ids {
            sqlx::query(
                r#"
                INSERT INTO task_assignments (task_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(task_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Lists a task's assignees
    pub async fn assignees(pool: &PgPool, task_id: Uuid) -> Result<Vec<UserSummary>, sqlx::Error> {
        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT u.id, u.username, u.email
            FROM users u
            JOIN task_assignments a ON a.user_id = u.id
            WHERE a.task_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Lists every task assigned to a user
    ///
    /// Ordered by (created_at, id) so repeated calls without mutation return
    /// identical ordering and content.
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.name, t.description, t.task_type, t.status, t.created_at, t.completed_at
            FROM tasks t
            JOIN task_assignments a ON a.task_id = t.id
            WHERE a.user_id = $1
            ORDER BY t.created_at, t.id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }
}
