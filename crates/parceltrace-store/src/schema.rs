//! Courier store database schema.

use sqlx::PgPool;
use tracing::info;

/// SQL to create the couriers table.
///
/// The `UNIQUE` constraint on `tracking_number` is the authoritative guard
/// against allocation races; the allocator's pre-check is best effort.
pub const CREATE_COURIERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS couriers (
    id                        UUID PRIMARY KEY,
    tracking_number           VARCHAR(20) NOT NULL UNIQUE,
    status                    VARCHAR(50) NOT NULL,
    current_location_country  VARCHAR(100),
    current_location_city     VARCHAR(100),
    trailer_number            VARCHAR(50) NOT NULL,
    seal_number               VARCHAR(50) NOT NULL,
    scac                      VARCHAR(50),
    receiver_name             VARCHAR(255) NOT NULL,
    receiver_contact_number   VARCHAR(50) NOT NULL,
    receiver_email            VARCHAR(255) NOT NULL,
    receiver_address          TEXT NOT NULL,
    receiver_country          VARCHAR(100),
    receiver_city             VARCHAR(100),
    sender_name               VARCHAR(255) NOT NULL,
    sender_contact_number     VARCHAR(50) NOT NULL,
    sender_email              VARCHAR(255) NOT NULL,
    sender_address            TEXT NOT NULL,
    sender_country            VARCHAR(100),
    sender_city               VARCHAR(100),
    item_description          TEXT NOT NULL,
    number_of_items           INTEGER NOT NULL DEFAULT 1,
    parcel_colour             VARCHAR(50) NOT NULL,
    weight                    DOUBLE PRECISION,
    rate                      DOUBLE PRECISION NOT NULL DEFAULT 0,
    category                  VARCHAR(50) NOT NULL DEFAULT 'Domestic',
    destination_country       VARCHAR(100),
    destination_city          VARCHAR(100),
    date_sent                 DATE NOT NULL,
    estimated_delivery_date   DATE,
    created_at                TIMESTAMPTZ NOT NULL,
    updated_at                TIMESTAMPTZ NOT NULL
);
";

/// SQL to create the tracking history table.
///
/// `id` is a monotonic sequence used as the tie-break when entries share a
/// `recorded_at` timestamp.
pub const CREATE_TRACKING_HISTORY_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS tracking_history (
    id                BIGSERIAL PRIMARY KEY,
    courier_id        UUID NOT NULL REFERENCES couriers (id) ON DELETE CASCADE,
    status            VARCHAR(50) NOT NULL,
    location_country  VARCHAR(100),
    location_city     VARCHAR(100),
    description       TEXT NOT NULL,
    recorded_at       TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tracking_history_courier
    ON tracking_history (courier_id, recorded_at DESC, id DESC);
";

/// Creates the tables and indexes if they do not already exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails.
pub async fn bootstrap(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(CREATE_COURIERS_TABLE).execute(pool).await?;
    sqlx::raw_sql(CREATE_TRACKING_HISTORY_TABLE)
        .execute(pool)
        .await?;
    info!("courier store schema is in place");
    Ok(())
}
