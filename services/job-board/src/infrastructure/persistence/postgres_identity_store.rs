//! PostgreSQL 身份存储，users 与 admins 两张表共用一份实现

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use recruit_adapter_postgres::map_write_error;
use recruit_common::{AdminId, Timestamps, UserId};
use recruit_errors::{AppError, AppResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Account, PrincipalId};
use crate::domain::repositories::{IdentityStore, duplicate_account_message};
use crate::domain::value_objects::{Email, HashedPassword};

const COLUMNS: &str =
    "id, name, email, password_hash, active, profile_pic, created_at, updated_at";

pub struct PostgresIdentityStore<Id: PrincipalId> {
    pool: PgPool,
    table: &'static str,
    _kind: PhantomData<Id>,
}

impl PostgresIdentityStore<UserId> {
    pub fn users(pool: PgPool) -> Self {
        Self {
            pool,
            table: "users",
            _kind: PhantomData,
        }
    }
}

impl PostgresIdentityStore<AdminId> {
    pub fn admins(pool: PgPool) -> Self {
        Self {
            pool,
            table: "admins",
            _kind: PhantomData,
        }
    }
}

#[async_trait]
impl<Id: PrincipalId> IdentityStore<Id> for PostgresIdentityStore<Id> {
    async fn find_by_id(&self, id: Id) -> AppResult<Option<Account<Id>>> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, self.table);
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id.uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find {}: {}", self.table, e)))?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<Account<Id>>> {
        let sql = format!("SELECT {} FROM {} WHERE email = $1", COLUMNS, self.table);
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find {}: {}", self.table, e)))?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn create(&self, account: &Account<Id>) -> AppResult<()> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            self.table, COLUMNS
        );
        sqlx::query(&sql)
            .bind(account.id.uuid())
            .bind(&account.name)
            .bind(account.email.as_str())
            .bind(account.password_hash.as_str())
            .bind(account.active)
            .bind(&account.profile_pic)
            .bind(account.timestamps.created_at)
            .bind(account.timestamps.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(
                    e,
                    &duplicate_account_message::<Id>(),
                    &format!("Failed to insert into {}", self.table),
                )
            })?;

        Ok(())
    }

    async fn save(&self, account: &Account<Id>) -> AppResult<()> {
        let sql = format!(
            "UPDATE {} SET name = $2, active = $3, profile_pic = $4, updated_at = $5 WHERE id = $1",
            self.table
        );
        let result = sqlx::query(&sql)
            .bind(account.id.uuid())
            .bind(&account.name)
            .bind(account.active)
            .bind(&account.profile_pic)
            .bind(account.timestamps.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update {}: {}", self.table, e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("{} not found", Id::LABEL)));
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    active: bool,
    profile_pic: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account<Id: PrincipalId>(self) -> Account<Id> {
        Account {
            id: Id::from_uuid(self.id),
            name: self.name,
            email: Email::from_trusted(self.email),
            password_hash: HashedPassword::from_hash(self.password_hash),
            active: self.active,
            profile_pic: self.profile_pic,
            timestamps: Timestamps {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}
