//! Goal documents.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor, SqlitePool};

use crate::db::ObjectId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Goal {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub date: String,
    pub finish: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateGoalRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateGoalRequest {
    pub name: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewGoal {
    pub user_id: ObjectId,
    pub name: String,
    pub date: String,
}

impl Goal {
    /// Insert a goal with `finish = false`.
    ///
    /// Takes any executor so it can run inside a transaction.
    pub async fn insert_one<'e, E>(db: E, goal: NewGoal) -> Result<Goal, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let id = ObjectId::generate().to_hex();
        let user_id = goal.user_id.to_hex();

        sqlx::query("INSERT INTO goals (id, user_id, name, date, finish) VALUES (?, ?, ?, ?, 0)")
            .bind(&id)
            .bind(&user_id)
            .bind(&goal.name)
            .bind(&goal.date)
            .execute(db)
            .await?;

        Ok(Goal {
            id,
            user_id,
            name: goal.name,
            date: goal.date,
            finish: false,
        })
    }

    pub async fn find(
        db: &SqlitePool,
        user_id: &ObjectId,
        finish: bool,
    ) -> Result<Vec<Goal>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, user_id, name, date, finish
            FROM goals
            WHERE user_id = ? AND finish = ?
            ORDER BY rowid
            "#,
        )
        .bind(user_id.to_hex())
        .bind(finish)
        .fetch_all(db)
        .await
    }

    /// `$set` name and date. Returns the modified count, which is 0 when the
    /// goal is missing or already holds these values.
    pub async fn update_one(
        db: &SqlitePool,
        id: &ObjectId,
        name: &str,
        date: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE goals SET name = ?, date = ?
            WHERE id = ? AND (name IS NOT ? OR date IS NOT ?)
            "#,
        )
        .bind(name)
        .bind(date)
        .bind(id.to_hex())
        .bind(name)
        .bind(date)
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }

    /// `$set` finish to true. Already finished goals count as unmodified.
    pub async fn mark_finished(db: &SqlitePool, id: &ObjectId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE goals SET finish = 1 WHERE id = ? AND finish = 0")
            .bind(id.to_hex())
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_one(db: &SqlitePool, id: &ObjectId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM goals WHERE id = ?")
            .bind(id.to_hex())
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_many_by_user(db: &SqlitePool, user_id: &ObjectId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM goals WHERE user_id = ?")
            .bind(user_id.to_hex())
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count_by_user(db: &SqlitePool, user_id: &ObjectId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM goals WHERE user_id = ?")
            .bind(user_id.to_hex())
            .fetch_one(db)
            .await?;
        Ok(count)
    }
}
