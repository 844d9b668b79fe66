//! Inicialización del esquema
//!
//! Crea las tablas si no existen. Se ejecuta al arrancar, antes de
//! aceptar requests.

use anyhow::Result;
use sqlx::PgPool;

pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shipments (
            id BIGSERIAL PRIMARY KEY,
            barcode TEXT NOT NULL,
            phone TEXT NOT NULL DEFAULT '',
            customer_name TEXT NOT NULL DEFAULT '',
            quantity INT NOT NULL DEFAULT 1,
            weight DOUBLE PRECISION NOT NULL DEFAULT 0,
            price DOUBLE PRECISION NOT NULL DEFAULT 0,
            paid_amount DOUBLE PRECISION NOT NULL DEFAULT 0,
            balance DOUBLE PRECISION NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'pending',
            delivery_status TEXT NOT NULL DEFAULT 'warehouse',
            location TEXT NOT NULL DEFAULT 'warehouse',
            arrival_date DATE,
            notes TEXT NOT NULL DEFAULT '',
            delivery_note TEXT,
            courier TEXT,
            delivered_at TIMESTAMPTZ,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS payments (
            id BIGSERIAL PRIMARY KEY,
            shipment_id BIGINT NOT NULL REFERENCES shipments(id) ON DELETE CASCADE,
            amount DOUBLE PRECISION NOT NULL,
            method TEXT NOT NULL DEFAULT 'cash',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // El teléfono se guarda ya normalizado (solo dígitos), así el join con
    // shipments se hace en la aplicación sin regex en SQL.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customer_pins (
            phone TEXT PRIMARY KEY,
            pin_hash TEXT NOT NULL,
            pin_plain TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS site_content (
            key TEXT PRIMARY KEY,
            payload JSONB NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
