/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations. The `role`
 * column is stored as lowercase text and mapped through `UserRole`.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::scouting::{PublicProfile, UserRole};

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
                            phone_number, location, role, created_at, updated_at";

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User email address
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    /// `user` or `admin`
    pub role: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Parsed role; unknown values fall back to the unprivileged role
    pub fn role(&self) -> UserRole {
        UserRole::from_str(&self.role).unwrap_or_default()
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Profile shown to other users. Contact details are only included
    /// when `include_contact` is set (administrators, the owner).
    pub fn to_public_profile(&self, include_contact: bool) -> PublicProfile {
        PublicProfile {
            id: self.id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            location: self.location.clone(),
            email: include_contact.then(|| self.email.clone()),
            phone_number: if include_contact {
                self.phone_number.clone()
            } else {
                None
            },
            created_at: self.created_at,
        }
    }
}

/// Fields needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub location: Option<String>,
}

/// Advisory lock key serializing signups while the role of the new
/// account depends on whether any account exists yet
const SIGNUP_LOCK_KEY: i64 = 0x5c0_7_5160;

/// Create a new user
///
/// The very first account in an empty table becomes an administrator so a
/// fresh deployment can be managed without manual SQL. The existence check
/// and the insert run under a transaction-scoped advisory lock; two
/// concurrent first signups cannot both see an empty table.
pub async fn create_user(pool: &PgPool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SIGNUP_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    let has_users: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users)")
        .fetch_one(&mut *tx)
        .await?;
    let role = if has_users { UserRole::User } else { UserRole::Admin };

    let sql = format!(
        r#"
        INSERT INTO users (id, username, email, password_hash, first_name, last_name,
                           phone_number, location, role, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING {}
        "#,
        USER_COLUMNS
    );

    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.phone_number)
        .bind(&new_user.location)
        .bind(role.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    if role.is_admin() {
        tracing::info!("First account {} created as administrator", user.id);
    }
    Ok(user)
}

/// Get user by email (case-insensitive)
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {} FROM users WHERE LOWER(email) = LOWER($1)", USER_COLUMNS);
    sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
    sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Get user by username or, when that fails, by email
pub async fn get_user_by_login(pool: &PgPool, login: &str) -> Result<Option<User>, sqlx::Error> {
    if let Some(user) = get_user_by_username(pool, login).await? {
        return Ok(Some(user));
    }
    get_user_by_email(pool, login).await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Profile fields a user may change; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub location: Option<String>,
}

/// Update profile fields
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    changes: ProfileChanges,
) -> Result<Option<User>, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE users
        SET email = COALESCE($1, email),
            first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            phone_number = COALESCE($4, phone_number),
            location = COALESCE($5, location),
            updated_at = $6
        WHERE id = $7
        RETURNING {}
        "#,
        USER_COLUMNS
    );

    sqlx::query_as::<_, User>(&sql)
        .bind(changes.email)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.phone_number)
        .bind(changes.location)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Replace the stored password hash
pub async fn update_password_hash(
    pool: &PgPool,
    user_id: Uuid,
    password_hash: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET password_hash = $1, updated_at = $2 WHERE id = $3")
        .bind(password_hash)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Page of users, optionally filtered by username/email/name
pub async fn list_users(
    pool: &PgPool,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<User>, i64), sqlx::Error> {
    let filter = "($1::TEXT IS NULL \
                  OR username ILIKE $1 OR email ILIKE $1 \
                  OR first_name ILIKE $1 OR last_name ILIKE $1)";

    let sql = format!(
        "SELECT {} FROM users WHERE {} ORDER BY created_at ASC LIMIT $2 OFFSET $3",
        USER_COLUMNS, filter
    );
    let users = sqlx::query_as::<_, User>(&sql)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let count_sql = format!("SELECT COUNT(*) FROM users WHERE {}", filter);
    let total: i64 = sqlx::query_scalar(&count_sql)
        .bind(search)
        .fetch_one(pool)
        .await?;

    Ok((users, total))
}

/// All users, oldest first (CSV export)
pub async fn all_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    let sql = format!("SELECT {} FROM users ORDER BY created_at ASC", USER_COLUMNS);
    sqlx::query_as::<_, User>(&sql).fetch_all(pool).await
}

/// Change a user's role
pub async fn set_role(
    pool: &PgPool,
    user_id: Uuid,
    role: UserRole,
) -> Result<Option<User>, sqlx::Error> {
    let sql = format!(
        "UPDATE users SET role = $1, updated_at = $2 WHERE id = $3 RETURNING {}",
        USER_COLUMNS
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(role.as_str())
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Delete a user; foreign keys cascade to their rows
pub async fn delete_user(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: "striker9".to_string(),
            email: "striker9@example.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Okafor".to_string(),
            phone_number: Some("+44 7000 000000".to_string()),
            location: Some("Leeds".to_string()),
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(sample_user("admin").role(), UserRole::Admin);
        assert_eq!(sample_user("user").role(), UserRole::User);
        assert_eq!(sample_user("owner").role(), UserRole::User);
    }

    #[test]
    fn test_public_profile_hides_contact() {
        let user = sample_user("user");
        let profile = user.to_public_profile(false);
        assert_eq!(profile.email, None);
        assert_eq!(profile.phone_number, None);

        let full = user.to_public_profile(true);
        assert_eq!(full.email.as_deref(), Some("striker9@example.com"));
        assert!(full.phone_number.is_some());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(sample_user("user")).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "striker9");
    }
}
