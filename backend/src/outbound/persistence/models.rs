//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; adapters convert them into domain
//! types before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{demo_bookings, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = demo_bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DemoBookingRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub grade: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape; id, sequence and timestamp come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = demo_bookings)]
pub(crate) struct NewDemoBookingRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub grade: &'a str,
    pub message: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}
