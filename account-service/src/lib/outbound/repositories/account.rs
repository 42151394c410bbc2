use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::PersonName;
use crate::domain::account::models::Phone;
use crate::domain::account::ports::AccountRepository;

const SELECT_COLUMNS: &str = "id, first_name, last_name, email, phone, role, secret_hash, \
     access_token, refresh_token, created_at, updated_at";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn account_from_row(row: &PgRow) -> Result<Account, AccountError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
    let first_name: String = row
        .try_get("first_name")
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
    let last_name: String = row
        .try_get("last_name")
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
    let phone: String = row
        .try_get("phone")
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
    let role: String = row
        .try_get("role")
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
    let secret_hash: String = row
        .try_get("secret_hash")
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
    let access_token: Option<String> = row
        .try_get("access_token")
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
    let refresh_token: Option<String> = row
        .try_get("refresh_token")
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

    Ok(Account {
        id: AccountId(id),
        first_name: PersonName::new(first_name)?,
        last_name: PersonName::new(last_name)?,
        email: EmailAddress::new(email)?,
        phone: Phone::new(phone)?,
        role: role.parse()?,
        secret_hash,
        access_token,
        refresh_token,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, first_name, last_name, email, phone, role,
                                  secret_hash, access_token, refresh_token,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(account.id.0)
        .bind(account.first_name.as_str())
        .bind(account.last_name.as_str())
        .bind(account.email.as_str())
        .bind(account.phone.as_str())
        .bind(account.role.as_str())
        .bind(&account.secret_hash)
        .bind(&account.access_token)
        .bind(&account.refresh_token)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                // The unique index on email is the authoritative guard
                // against concurrent signups racing on the same address.
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("accounts_email_key")
                {
                    return AccountError::EmailAlreadyExists(account.email.as_str().to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM accounts WHERE email = $1",
            SELECT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM accounts WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM accounts ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        rows.iter().map(account_from_row).collect()
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET first_name = $2, last_name = $3, email = $4, phone = $5,
                role = $6, secret_hash = $7, access_token = $8,
                refresh_token = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(account.id.0)
        .bind(account.first_name.as_str())
        .bind(account.last_name.as_str())
        .bind(account.email.as_str())
        .bind(account.phone.as_str())
        .bind(account.role.as_str())
        .bind(&account.secret_hash)
        .bind(&account.access_token)
        .bind(&account.refresh_token)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(account.id.to_string()));
        }

        Ok(account)
    }
}
