//! PostgreSQL-backed [`Storage`] implementation using Diesel.
//!
//! The database assigns ids, sequence numbers and creation timestamps through
//! column defaults; every create is a single-row `INSERT .. RETURNING`, so a
//! failed create leaves nothing behind. Listings skip, and log, any stored
//! row that no longer passes booking validation.

use std::num::NonZeroUsize;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{Storage, StorageError};
use crate::domain::{
    BookingId, DemoBooking, DemoBookingDraft, DemoBookingFields, NewUser, PasswordHash, User,
    UserId, UserValidationError, Username,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{DemoBookingRow, NewDemoBookingRow, NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::{demo_bookings, users};

/// Diesel-backed storage adapter.
#[derive(Clone)]
pub struct DieselStorage {
    pool: DbPool,
}

impl DieselStorage {
    /// Create an adapter over an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Rebuild a domain booking, rejecting rows that no longer pass validation.
fn row_to_booking(row: DemoBookingRow) -> Result<DemoBooking, StorageError> {
    let DemoBookingRow {
        id,
        name,
        email,
        phone,
        grade,
        message,
        created_at,
    } = row;

    let draft = DemoBookingDraft::try_from(DemoBookingFields {
        name,
        email,
        phone,
        grade,
        message,
    })
    .map_err(|err| StorageError::query(format!("stored booking {id} is invalid: {err}")))?;

    Ok(DemoBooking::new(BookingId::from_uuid(id), draft, created_at))
}

/// Convert listed rows, dropping the ones that fail re-validation.
fn collect_valid_bookings(rows: Vec<DemoBookingRow>) -> Vec<DemoBooking> {
    rows.into_iter()
        .filter_map(|row| {
            row_to_booking(row)
                .inspect_err(|err| warn!(error = %err, "skipping stored booking"))
                .ok()
        })
        .collect()
}

fn row_to_user(row: UserRow) -> Result<User, StorageError> {
    let UserRow {
        id,
        username,
        password_hash,
        created_at,
    } = row;

    let invalid = |err: UserValidationError| {
        StorageError::query(format!("stored user {id} is invalid: {err}"))
    };
    let username = Username::new(username).map_err(invalid)?;
    let password_hash = PasswordHash::from_phc(password_hash).map_err(invalid)?;
    Ok(User::from_parts(
        UserId::from_uuid(id),
        username,
        password_hash,
        created_at,
    ))
}

#[async_trait]
impl Storage for DieselStorage {
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            username: user.username().as_ref(),
            password_hash: user.password_hash().as_str(),
        };
        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(row)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(*id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn get_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .order(users::seq.asc())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn create_demo_booking(
        &self,
        draft: DemoBookingDraft,
    ) -> Result<DemoBooking, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewDemoBookingRow {
            name: draft.name().as_ref(),
            email: draft.email().as_ref(),
            phone: draft.phone().as_ref(),
            grade: draft.grade().as_ref(),
            message: draft.message().map(AsRef::as_ref),
        };
        let row: DemoBookingRow = diesel::insert_into(demo_bookings::table)
            .values(&new_row)
            .returning(DemoBookingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_booking(row)
    }

    async fn get_demo_bookings(&self) -> Result<Vec<DemoBooking>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DemoBookingRow> = demo_bookings::table
            .order((demo_bookings::created_at.desc(), demo_bookings::seq.desc()))
            .select(DemoBookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(collect_valid_bookings(rows))
    }

    async fn get_latest_demo_bookings(
        &self,
        limit: NonZeroUsize,
    ) -> Result<Vec<DemoBooking>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DemoBookingRow> = demo_bookings::table
            .order((demo_bookings::created_at.desc(), demo_bookings::seq.desc()))
            .limit(i64::try_from(limit.get()).unwrap_or(i64::MAX))
            .select(DemoBookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(collect_valid_bookings(rows))
    }

    async fn check_connection(&self) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
