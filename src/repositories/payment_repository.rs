//! Repositorio de pagos
//!
//! Los pagos son append-only. Al registrar uno, el envío se bloquea con
//! `FOR UPDATE` dentro de la transacción y el importe se aplica con
//! `apply_payment`, así dos pagos simultáneos no se pisan.

use crate::models::{Payment, Shipment};
use crate::services::shipment_lifecycle::apply_payment;
use crate::utils::errors::AppResult;
use sqlx::PgPool;

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar el pago y aplicar el importe al envío en una transacción.
    /// Devuelve el envío actualizado.
    pub async fn record(
        &self,
        shipment_id: i64,
        amount: f64,
        method: &str,
    ) -> AppResult<Shipment> {
        let mut tx = self.pool.begin().await?;

        let existing =
            sqlx::query_as::<_, Shipment>("SELECT * FROM shipments WHERE id = $1 FOR UPDATE")
                .bind(shipment_id)
                .fetch_one(&mut *tx)
                .await?;

        sqlx::query("INSERT INTO payments (shipment_id, amount, method) VALUES ($1, $2, $3)")
            .bind(shipment_id)
            .bind(amount)
            .bind(method)
            .execute(&mut *tx)
            .await?;

        let outcome = apply_payment(&existing, amount);
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            UPDATE shipments
            SET paid_amount = $2, balance = $3, status = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(shipment_id)
        .bind(outcome.paid_amount)
        .bind(outcome.balance)
        .bind(outcome.status)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(shipment)
    }

    pub async fn list_for_shipment(&self, shipment_id: i64) -> AppResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE shipment_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(shipment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}
