//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::audit::{Actor, Audit};
use kernel::id::AdminCredentialId;
use kernel::principal::Role;
use sqlx::PgPool;

use crate::domain::entity::admin_credential::{AdminCredential, NewAdminCredential};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

const CREDENTIAL_COLUMNS: &str = r#"
    id,
    email,
    password_hash,
    role,
    is_active,
    created_at,
    updated_at,
    created_by,
    updated_by,
    is_deleted
"#;

/// `admin_credentials_email_key` covers `lower(email)`
fn unique_email_or(err: sqlx::Error, email: &Email) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AuthError::Internal(format!(
                "Admin credential already exists for {}",
                email
            ));
        }
    }
    AuthError::Database(err)
}

/// PostgreSQL-backed credential repository
#[derive(Clone)]
pub struct PgCredentialRepository {
    pool: PgPool,
}

impl PgCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialRepository for PgCredentialRepository {
    async fn find_active_by_email(&self, email: &Email) -> AuthResult<Option<AdminCredential>> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!(
            r#"
            SELECT {CREDENTIAL_COLUMNS}
            FROM admin_credentials
            WHERE lower(email) = $1
              AND is_active = true
              AND is_deleted = false
            "#
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialRow::into_credential).transpose()
    }

    async fn find_first_active(&self) -> AuthResult<Option<AdminCredential>> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!(
            r#"
            SELECT {CREDENTIAL_COLUMNS}
            FROM admin_credentials
            WHERE is_active = true
              AND is_deleted = false
            ORDER BY id
            LIMIT 1
            "#
        ))
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialRow::into_credential).transpose()
    }

    async fn count_active(&self) -> AuthResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM admin_credentials WHERE is_active = true AND is_deleted = false",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn insert(
        &self,
        credential: NewAdminCredential,
        actor: &Actor,
    ) -> AuthResult<AdminCredential> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, CredentialRow>(&format!(
            r#"
            INSERT INTO admin_credentials (
                email,
                password_hash,
                role,
                is_active,
                created_at,
                updated_at,
                created_by,
                updated_by,
                is_deleted
            ) VALUES ($1, $2, $3, true, $4, $4, $5, $5, false)
            RETURNING {CREDENTIAL_COLUMNS}
            "#
        ))
        .bind(credential.email.as_str())
        .bind(&credential.password_hash)
        .bind(credential.role.code())
        .bind(now)
        .bind(actor.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_email_or(e, &credential.email))?;

        row.into_credential()
    }

    async fn update_password(
        &self,
        id: AdminCredentialId,
        password_hash: &str,
        actor: &Actor,
    ) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE admin_credentials
            SET password_hash = $2,
                updated_at = GREATEST($3, created_at),
                updated_by = $4
            WHERE id = $1
              AND is_deleted = false
            "#,
        )
        .bind(id.value())
        .bind(password_hash)
        .bind(Utc::now())
        .bind(actor.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::CredentialNotFound);
        }

        Ok(())
    }

    async fn find_owner_display_name(&self) -> AuthResult<Option<String>> {
        let name: Option<Option<String>> = sqlx::query_scalar(
            r#"
            SELECT full_name
            FROM profile
            WHERE is_deleted = false
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(name.flatten())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    email: String,
    password_hash: String,
    role: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: String,
    updated_by: String,
    is_deleted: bool,
}

impl CredentialRow {
    fn into_credential(self) -> AuthResult<AdminCredential> {
        let role = match self.role.as_deref() {
            None | Some("") => Role::default(),
            Some(code) => Role::from_code(code)
                .map_err(|e| AuthError::Internal(format!("Invalid credential role: {}", e)))?,
        };

        Ok(AdminCredential {
            id: AdminCredentialId::new(self.id),
            email: Email::from_db(self.email),
            password_hash: self.password_hash,
            role,
            is_active: self.is_active,
            audit: Audit {
                created_at: self.created_at,
                updated_at: self.updated_at,
                created_by: self.created_by,
                updated_by: self.updated_by,
                is_deleted: self.is_deleted,
            },
        })
    }
}
