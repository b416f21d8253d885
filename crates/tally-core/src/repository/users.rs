use crate::error::CoreError;
use crate::models::User;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

/// Username rule carried over from onboarding: lowercase alphanumerics and
/// underscores, 3..=20 characters.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let ok = (3..=20).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(format!(
            "Invalid username '{}': use 3-20 lowercase letters, digits or underscores",
            username
        )))
    }
}

#[async_trait]
impl super::UserStore for SqliteRepository {
    async fn create_user(&self, username: &str, timezone: &str) -> Result<User, CoreError> {
        validate_username(username)?;
        crate::timezone::validate_timezone(timezone)?;

        let user = User {
            id: Uuid::now_v7(),
            username: username.to_string(),
            timezone: timezone.to_string(),
            score: 0,
            created_at: Utc::now(),
        };

        let result = sqlx::query(
            "INSERT INTO users (id, username, timezone, score, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.timezone)
        .bind(user.score)
        .bind(user.created_at)
        .execute(self.pool())
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(e) if is_unique_violation(&e) => {
                Err(CoreError::UsernameTaken(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, CoreError> {
        let user = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, CoreError> {
        let user = sqlx::query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(self.pool())
            .await?;
        Ok(user)
    }

    async fn find_users(&self) -> Result<Vec<User>, CoreError> {
        let users = sqlx::query_as("SELECT * FROM users ORDER BY created_at")
            .fetch_all(self.pool())
            .await?;
        Ok(users)
    }

    async fn update_timezone(&self, id: Uuid, timezone: &str) -> Result<(), CoreError> {
        crate::timezone::validate_timezone(timezone)?;
        let result = sqlx::query("UPDATE users SET timezone = $1 WHERE id = $2")
            .bind(timezone)
            .bind(id)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::UserNotFound(id.to_string()));
        }
        Ok(())
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(validate_username("jo_42").is_ok());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("ab").is_err()); // too short
        assert!(validate_username("a".repeat(21).as_str()).is_err());
        assert!(validate_username("Uppercase").is_err());
        assert!(validate_username("with space").is_err());
    }
}
