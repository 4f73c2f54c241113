use sqlx::PgPool;

use crate::database::models::Task;
use crate::database::pool::DatabaseError;

/// Repository over the tasks table, scoped to a single owner.
///
/// Every statement issued here carries the owner filter (or assignment, for
/// inserts), so a caller holding a `TaskRepository` can only ever see or
/// touch rows belonging to the subject it was built for. An update or delete
/// that matches no row reports NotFound whether the id does not exist or
/// belongs to another owner.
pub struct TaskRepository {
    pool: PgPool,
    owner_id: i64,
}

impl TaskRepository {
    pub fn scoped(pool: PgPool, owner_id: i64) -> Self {
        Self { pool, owner_id }
    }

    /// All of the owner's tasks, newest first
    pub async fn list(&self) -> Result<Vec<Task>, DatabaseError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, completed FROM tasks \
             WHERE user_id = $1 ORDER BY id DESC",
        )
        .bind(self.owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Insert a new task for the owner; completed always starts false
    pub async fn create(&self, title: &str) -> Result<Task, DatabaseError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (user_id, title, completed) VALUES ($1, $2, FALSE) \
             RETURNING id, user_id, title, completed",
        )
        .bind(self.owner_id)
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn update(&self, id: i64, title: &str, completed: bool) -> Result<Task, DatabaseError> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET title = $1, completed = $2 \
             WHERE id = $3 AND user_id = $4 \
             RETURNING id, user_id, title, completed",
        )
        .bind(title)
        .bind(completed)
        .bind(id)
        .bind(self.owner_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(self.owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }

        Ok(())
    }
}
