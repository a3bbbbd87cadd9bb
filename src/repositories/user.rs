//! UserRepository - users table

use super::{Create, Read};
use crate::dtos::CreateUserDTO;
use crate::entities::User;
use sqlx::{Error, SqlitePool};

pub struct UserRepository {
    connection_pool: SqlitePool,
}

impl UserRepository {
    pub fn new(connection_pool: SqlitePool) -> UserRepository {
        Self { connection_pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.connection_pool)
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.connection_pool)
            .await
    }

    /// Login lookup: the credential may be either the email or the username
    pub async fn find_by_credential(&self, credential: &str) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?1 OR username = ?1 LIMIT 1")
            .bind(credential)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, email, username, hashed_password)
             VALUES (?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.username)
        .bind(&data.hashed_password)
        .fetch_one(&self.connection_pool)
        .await
    }
}

impl Read<User, i64> for UserRepository {
    async fn read(&self, id: &i64) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_find_by_credential_matches_email_or_username(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = UserRepository::new(pool);

        let by_username = repo.find_by_credential("alice").await?.expect("alice exists");
        let by_email = repo
            .find_by_credential(&by_username.email)
            .await?
            .expect("alice by email");
        assert_eq!(by_username.id, by_email.id);
        assert!(repo.find_by_credential("nobody").await?.is_none());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_duplicate_username_is_rejected(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = UserRepository::new(pool);
        let result = repo
            .create(&CreateUserDTO {
                first_name: "Other".into(),
                last_name: "Alice".into(),
                email: "other.alice@example.com".into(),
                username: "alice".into(),
                hashed_password: "x".into(),
            })
            .await;
        assert!(matches!(result, Err(sqlx::Error::Database(_))));
        Ok(())
    }
}
