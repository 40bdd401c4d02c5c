//! Task documents.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection, SqliteExecutor, SqlitePool};

use crate::db::ObjectId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub goal_id: String,
    pub name: String,
    pub date: String,
    pub finish: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub user_id: Option<String>,
    pub goal_id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub goal_id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: ObjectId,
    pub goal_id: ObjectId,
    pub name: String,
    pub date: String,
}

/// Fields replaced by `PUT /task/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct TaskUpdate {
    #[serde(rename = "_id")]
    pub id: String,
    pub goal_id: String,
    pub name: String,
    pub date: String,
}

impl Task {
    pub async fn insert_one<'e, E>(db: E, task: NewTask) -> Result<Task, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let id = ObjectId::generate().to_hex();
        let user_id = task.user_id.to_hex();
        let goal_id = task.goal_id.to_hex();

        sqlx::query(
            r#"
            INSERT INTO tasks (id, user_id, goal_id, name, date, finish)
            VALUES (?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(&id)
        .bind(&user_id)
        .bind(&goal_id)
        .bind(&task.name)
        .bind(&task.date)
        .execute(db)
        .await?;

        Ok(Task {
            id,
            user_id,
            goal_id,
            name: task.name,
            date: task.date,
            finish: false,
        })
    }

    /// Insert tasks in order on one connection (normally an open transaction).
    pub async fn insert_many(
        conn: &mut SqliteConnection,
        tasks: Vec<NewTask>,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let mut inserted = Vec::with_capacity(tasks.len());
        for task in tasks {
            inserted.push(Self::insert_one(&mut *conn, task).await?);
        }
        Ok(inserted)
    }

    /// Tasks of a user with the given finish state, optionally narrowed to one goal.
    pub async fn find(
        db: &SqlitePool,
        user_id: &ObjectId,
        goal_id: Option<&ObjectId>,
        finish: bool,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let goal_id = goal_id.map(ObjectId::to_hex);

        sqlx::query_as(
            r#"
            SELECT id, user_id, goal_id, name, date, finish
            FROM tasks
            WHERE user_id = ? AND finish = ? AND (? IS NULL OR goal_id = ?)
            ORDER BY rowid
            "#,
        )
        .bind(user_id.to_hex())
        .bind(finish)
        .bind(&goal_id)
        .bind(&goal_id)
        .fetch_all(db)
        .await
    }

    /// `$set` goal, name and date. Returns the modified count.
    pub async fn update_one(
        db: &SqlitePool,
        id: &ObjectId,
        goal_id: &ObjectId,
        name: &str,
        date: &str,
    ) -> Result<u64, sqlx::Error> {
        let goal_id = goal_id.to_hex();

        let result = sqlx::query(
            r#"
            UPDATE tasks SET goal_id = ?, name = ?, date = ?
            WHERE id = ? AND (goal_id IS NOT ? OR name IS NOT ? OR date IS NOT ?)
            "#,
        )
        .bind(&goal_id)
        .bind(name)
        .bind(date)
        .bind(id.to_hex())
        .bind(&goal_id)
        .bind(name)
        .bind(date)
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }

    /// `$set` finish to true. Already finished tasks count as unmodified.
    pub async fn mark_finished(db: &SqlitePool, id: &ObjectId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET finish = 1 WHERE id = ? AND finish = 0")
            .bind(id.to_hex())
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_one(db: &SqlitePool, id: &ObjectId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id.to_hex())
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_many_by_user(db: &SqlitePool, user_id: &ObjectId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE user_id = ?")
            .bind(user_id.to_hex())
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count_by_user(db: &SqlitePool, user_id: &ObjectId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE user_id = ?")
            .bind(user_id.to_hex())
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    pub async fn find_by_goal(db: &SqlitePool, goal_id: &ObjectId) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, user_id, goal_id, name, date, finish FROM tasks WHERE goal_id = ? ORDER BY rowid",
        )
        .bind(goal_id.to_hex())
        .fetch_all(db)
        .await
    }
}
