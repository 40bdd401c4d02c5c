//! User documents.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::db::ObjectId;

/// Stored user row. Not serializable; responses go through [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// User as exposed over HTTP (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    pub async fn insert_one(db: &SqlitePool, user: NewUser) -> Result<User, sqlx::Error> {
        let id = ObjectId::generate().to_hex();

        sqlx::query("INSERT INTO users (id, name, email, password_hash) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(db)
            .await?;

        Ok(User {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
        })
    }

    /// All users registered under an email, oldest first
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, name, email, password_hash FROM users WHERE email = ? ORDER BY rowid",
        )
        .bind(email)
        .fetch_all(db)
        .await
    }

    pub async fn delete_one(db: &SqlitePool, id: &ObjectId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_hex())
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
