//! `PostgreSQL` implementation of the `CourierRepository` trait.

use std::fmt::Display;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use parceltrace_core::error::DomainError;
use parceltrace_courier::domain::courier::{
    Category, Courier, CourierStatus, Package, Party, ShippingDocument,
};
use parceltrace_courier::domain::history::{HistoryEntry, NewHistoryEntry};
use parceltrace_courier::repository::CourierRepository;

/// PostgreSQL-backed courier repository.
#[derive(Debug, Clone)]
pub struct PgCourierRepository {
    pool: PgPool,
}

impl PgCourierRepository {
    /// Creates a new `PgCourierRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn infra(error: impl Display) -> DomainError {
    DomainError::Infrastructure(error.to_string())
}

fn courier_from_row(row: &PgRow) -> Result<Courier, DomainError> {
    let status: String = row.try_get("status").map_err(infra)?;
    let category: String = row.try_get("category").map_err(infra)?;
    let number_of_items: i32 = row.try_get("number_of_items").map_err(infra)?;

    Ok(Courier {
        id: row.try_get("id").map_err(infra)?,
        tracking_number: row.try_get("tracking_number").map_err(infra)?,
        status: CourierStatus::from_str(&status).map_err(infra)?,
        current_location_country: row.try_get("current_location_country").map_err(infra)?,
        current_location_city: row.try_get("current_location_city").map_err(infra)?,
        shipping: ShippingDocument {
            trailer_number: row.try_get("trailer_number").map_err(infra)?,
            seal_number: row.try_get("seal_number").map_err(infra)?,
            scac: row.try_get("scac").map_err(infra)?,
        },
        receiver: Party {
            name: row.try_get("receiver_name").map_err(infra)?,
            contact_number: row.try_get("receiver_contact_number").map_err(infra)?,
            email: row.try_get("receiver_email").map_err(infra)?,
            address: row.try_get("receiver_address").map_err(infra)?,
            country: row.try_get("receiver_country").map_err(infra)?,
            city: row.try_get("receiver_city").map_err(infra)?,
        },
        sender: Party {
            name: row.try_get("sender_name").map_err(infra)?,
            contact_number: row.try_get("sender_contact_number").map_err(infra)?,
            email: row.try_get("sender_email").map_err(infra)?,
            address: row.try_get("sender_address").map_err(infra)?,
            country: row.try_get("sender_country").map_err(infra)?,
            city: row.try_get("sender_city").map_err(infra)?,
        },
        package: Package {
            item_description: row.try_get("item_description").map_err(infra)?,
            number_of_items: u32::try_from(number_of_items).map_err(infra)?,
            parcel_colour: row.try_get("parcel_colour").map_err(infra)?,
            weight: row.try_get("weight").map_err(infra)?,
            rate: row.try_get("rate").map_err(infra)?,
            category: Category::from_str(&category).map_err(infra)?,
            destination_country: row.try_get("destination_country").map_err(infra)?,
            destination_city: row.try_get("destination_city").map_err(infra)?,
        },
        date_sent: row.try_get("date_sent").map_err(infra)?,
        estimated_delivery_date: row.try_get("estimated_delivery_date").map_err(infra)?,
        created_at: row.try_get("created_at").map_err(infra)?,
        updated_at: row.try_get("updated_at").map_err(infra)?,
    })
}

fn history_from_row(row: &PgRow) -> Result<HistoryEntry, DomainError> {
    let status: String = row.try_get("status").map_err(infra)?;
    Ok(HistoryEntry {
        id: row.try_get("id").map_err(infra)?,
        courier_id: row.try_get("courier_id").map_err(infra)?,
        status: CourierStatus::from_str(&status).map_err(infra)?,
        location_country: row.try_get("location_country").map_err(infra)?,
        location_city: row.try_get("location_city").map_err(infra)?,
        description: row.try_get("description").map_err(infra)?,
        recorded_at: row.try_get("recorded_at").map_err(infra)?,
    })
}

const INSERT_COURIER: &str = r"
INSERT INTO couriers (
    id, tracking_number, status,
    current_location_country, current_location_city,
    trailer_number, seal_number, scac,
    receiver_name, receiver_contact_number, receiver_email,
    receiver_address, receiver_country, receiver_city,
    sender_name, sender_contact_number, sender_email,
    sender_address, sender_country, sender_city,
    item_description, number_of_items, parcel_colour,
    weight, rate, category, destination_country, destination_city,
    date_sent, estimated_delivery_date, created_at, updated_at
) VALUES (
    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
    $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30,
    $31, $32
)
";

const UPDATE_COURIER: &str = r"
UPDATE couriers SET
    status = $2,
    current_location_country = $3,
    current_location_city = $4,
    trailer_number = $5,
    seal_number = $6,
    scac = $7,
    receiver_name = $8,
    receiver_contact_number = $9,
    receiver_email = $10,
    receiver_address = $11,
    receiver_country = $12,
    receiver_city = $13,
    sender_name = $14,
    sender_contact_number = $15,
    sender_email = $16,
    sender_address = $17,
    sender_country = $18,
    sender_city = $19,
    item_description = $20,
    number_of_items = $21,
    parcel_colour = $22,
    weight = $23,
    rate = $24,
    category = $25,
    destination_country = $26,
    destination_city = $27,
    date_sent = $28,
    estimated_delivery_date = $29,
    updated_at = $30
WHERE id = $1
";

const SELECT_COURIER_BY_ID: &str = "SELECT * FROM couriers WHERE id = $1";

const SELECT_COURIER_BY_TRACKING_NUMBER: &str =
    "SELECT * FROM couriers WHERE tracking_number = $1";

const TRACKING_NUMBER_EXISTS: &str =
    "SELECT EXISTS (SELECT 1 FROM couriers WHERE tracking_number = $1)";

const SELECT_LATEST_HISTORY: &str = r"
SELECT id, courier_id, status, location_country, location_city, description, recorded_at
FROM tracking_history
WHERE courier_id = $1
ORDER BY recorded_at DESC, id DESC
LIMIT 1
";

const SELECT_HISTORY: &str = r"
SELECT id, courier_id, status, location_country, location_city, description, recorded_at
FROM tracking_history
WHERE courier_id = $1
ORDER BY recorded_at DESC, id DESC
";

const INSERT_HISTORY: &str = r"
INSERT INTO tracking_history (
    courier_id, status, location_country, location_city, description, recorded_at
) VALUES ($1, $2, $3, $4, $5, $6)
RETURNING id
";

fn bind_courier_fields<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    courier: &'q Courier,
    number_of_items: i32,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(courier.status.as_str())
        .bind(&courier.current_location_country)
        .bind(&courier.current_location_city)
        .bind(&courier.shipping.trailer_number)
        .bind(&courier.shipping.seal_number)
        .bind(&courier.shipping.scac)
        .bind(&courier.receiver.name)
        .bind(&courier.receiver.contact_number)
        .bind(&courier.receiver.email)
        .bind(&courier.receiver.address)
        .bind(&courier.receiver.country)
        .bind(&courier.receiver.city)
        .bind(&courier.sender.name)
        .bind(&courier.sender.contact_number)
        .bind(&courier.sender.email)
        .bind(&courier.sender.address)
        .bind(&courier.sender.country)
        .bind(&courier.sender.city)
        .bind(&courier.package.item_description)
        .bind(number_of_items)
        .bind(&courier.package.parcel_colour)
        .bind(courier.package.weight)
        .bind(courier.package.rate)
        .bind(courier.package.category.as_str())
        .bind(&courier.package.destination_country)
        .bind(&courier.package.destination_city)
        .bind(courier.date_sent)
        .bind(courier.estimated_delivery_date)
}

#[async_trait]
impl CourierRepository for PgCourierRepository {
    async fn insert_courier(&self, courier: &Courier) -> Result<(), DomainError> {
        let number_of_items = i32::try_from(courier.package.number_of_items).map_err(infra)?;
        let query = sqlx::query(INSERT_COURIER)
            .bind(courier.id)
            .bind(&courier.tracking_number);
        let query = bind_courier_fields(query, courier, number_of_items)
            .bind(courier.created_at)
            .bind(courier.updated_at);

        match query.execute(&self.pool).await {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(
                DomainError::TrackingNumberConflict(courier.tracking_number.clone()),
            ),
            Err(error) => Err(infra(error)),
        }
    }

    async fn update_courier(&self, courier: &Courier) -> Result<(), DomainError> {
        let number_of_items = i32::try_from(courier.package.number_of_items).map_err(infra)?;
        let query = sqlx::query(UPDATE_COURIER).bind(courier.id);
        let query = bind_courier_fields(query, courier, number_of_items).bind(courier.updated_at);

        let result = query.execute(&self.pool).await.map_err(infra)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::CourierNotFound(courier.id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Courier>, DomainError> {
        let row = sqlx::query(SELECT_COURIER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(courier_from_row).transpose()
    }

    async fn find_by_tracking_number(
        &self,
        tracking_number: &str,
    ) -> Result<Option<Courier>, DomainError> {
        let row = sqlx::query(SELECT_COURIER_BY_TRACKING_NUMBER)
            .bind(tracking_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(courier_from_row).transpose()
    }

    async fn tracking_number_exists(&self, tracking_number: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(TRACKING_NUMBER_EXISTS)
            .bind(tracking_number)
            .fetch_one(&self.pool)
            .await
            .map_err(infra)
    }

    async fn latest_history(&self, courier_id: Uuid) -> Result<Option<HistoryEntry>, DomainError> {
        let row = sqlx::query(SELECT_LATEST_HISTORY)
            .bind(courier_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(history_from_row).transpose()
    }

    async fn list_history(&self, courier_id: Uuid) -> Result<Vec<HistoryEntry>, DomainError> {
        let rows = sqlx::query(SELECT_HISTORY)
            .bind(courier_id)
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;
        rows.iter().map(history_from_row).collect()
    }

    async fn append_history(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, DomainError> {
        let id: i64 = sqlx::query_scalar(INSERT_HISTORY)
            .bind(entry.courier_id)
            .bind(entry.status.as_str())
            .bind(&entry.location_country)
            .bind(&entry.location_city)
            .bind(&entry.description)
            .bind(entry.recorded_at)
            .fetch_one(&self.pool)
            .await
            .map_err(infra)?;

        Ok(HistoryEntry {
            id,
            courier_id: entry.courier_id,
            status: entry.status,
            location_country: entry.location_country,
            location_city: entry.location_city,
            description: entry.description,
            recorded_at: entry.recorded_at,
        })
    }
}
