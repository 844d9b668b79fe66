//! Repositorio de PINes de cliente
//!
//! La clave es el teléfono ya normalizado (solo dígitos); el llamador es
//! responsable de normalizar antes de entrar aquí.

use crate::models::CustomerPin;
use crate::utils::errors::AppResult;
use sqlx::PgPool;

pub struct PinRepository {
    pool: PgPool,
}

impl PinRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_phone(&self, phone: &str) -> AppResult<Option<CustomerPin>> {
        let pin = sqlx::query_as::<_, CustomerPin>("SELECT * FROM customer_pins WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;

        Ok(pin)
    }

    /// Insertar un PIN nuevo; si el registro ya existe se sobreescribe
    /// hash y plaintext (carrera entre dos ensure simultáneos).
    pub async fn upsert(
        &self,
        phone: &str,
        pin_hash: &str,
        pin_plain: &str,
    ) -> AppResult<CustomerPin> {
        let pin = sqlx::query_as::<_, CustomerPin>(
            r#"
            INSERT INTO customer_pins (phone, pin_hash, pin_plain)
            VALUES ($1, $2, $3)
            ON CONFLICT (phone) DO UPDATE
                SET pin_hash = EXCLUDED.pin_hash,
                    pin_plain = EXCLUDED.pin_plain,
                    updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(phone)
        .bind(pin_hash)
        .bind(pin_plain)
        .fetch_one(&self.pool)
        .await?;

        Ok(pin)
    }

    /// Regenerar el PIN de un registro existente (reparación de filas
    /// legadas sin plaintext)
    pub async fn regenerate(
        &self,
        phone: &str,
        pin_hash: &str,
        pin_plain: &str,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE customer_pins SET pin_hash = $1, pin_plain = $2, updated_at = NOW() WHERE phone = $3",
        )
        .bind(pin_hash)
        .bind(pin_plain)
        .bind(phone)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
