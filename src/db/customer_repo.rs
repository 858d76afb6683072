// src/db/customer_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        customer::{CustomerPatch, Note},
        location::Appointment,
    },
};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CUSTOMERS
    // =========================================================================

    /// Writes only the fields present in `patch`.
    pub async fn update_customer(&self, id: i64, patch: &CustomerPatch) -> Result<(), AppError> {
        if patch.is_empty() {
            return Err(AppError::EmptyPatch);
        }

        let mut builder = build_update(id, patch);
        let result = builder.build().execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::CustomerNotFound);
        }

        Ok(())
    }

    // =========================================================================
    //  NOTES & APPOINTMENTS
    // =========================================================================

    pub async fn insert_note(
        &self,
        customer_id: i64,
        author_id: Uuid,
        body: &str,
    ) -> Result<Note, AppError> {
        sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (customer_id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, customer_id, author_id, body, created_at
            "#,
        )
        .bind(customer_id)
        .bind(author_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(customer_fk_error)
    }

    /// The appointment lands on the customer's own location.
    pub async fn insert_appointment(
        &self,
        customer_id: i64,
        closer_id: Option<Uuid>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (location_id, customer_id, closer_id, start_time, end_time)
            SELECT c.location_id, c.id, $2, $3, $4
            FROM customers c
            WHERE c.id = $1
            RETURNING id, customer_id, closer_id, start_time, end_time
            "#,
        )
        .bind(customer_id)
        .bind(closer_id)
        .bind(start_time)
        .bind(end_time)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::CustomerNotFound)
    }
}

fn customer_fk_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::CustomerNotFound;
        }
    }
    e.into()
}

fn build_update(id: i64, patch: &CustomerPatch) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("UPDATE customers SET ");
    let mut fields = builder.separated(", ");

    let text_fields = [
        ("first_name", &patch.first_name),
        ("last_name", &patch.last_name),
        ("email", &patch.email),
        ("phone", &patch.phone),
        ("address", &patch.address),
        ("city", &patch.city),
        ("state", &patch.state),
        ("zip", &patch.zip),
    ];
    for (column, value) in text_fields {
        if let Some(value) = value {
            fields.push(format!("{column} = ")).push_bind_unseparated(value);
        }
    }
    if let Some(status) = patch.disposition_status {
        fields
            .push("disposition_status = ")
            .push_bind_unseparated(status.as_str());
    }
    if let Some(closer_id) = patch.closer_id {
        fields.push("closer_id = ").push_bind_unseparated(closer_id);
    }
    fields.push("updated_at = NOW()");

    builder.push(" WHERE id = ").push_bind(id);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::DispositionStatus;

    #[test]
    fn update_only_touches_supplied_columns() {
        let patch = CustomerPatch {
            phone: Some("555-0100".into()),
            disposition_status: Some(DispositionStatus::PitchedPending),
            ..Default::default()
        };

        let builder = build_update(12, &patch);
        assert_eq!(
            builder.sql(),
            "UPDATE customers SET phone = $1, disposition_status = $2, updated_at = NOW() WHERE id = $3"
        );
    }
}
