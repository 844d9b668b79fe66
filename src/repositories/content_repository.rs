//! Repositorio de contenido del sitio
//!
//! Almacén clave-valor trivial para las secciones informativas de la UI.

use crate::utils::errors::AppResult;
use sqlx::PgPool;

const SECTIONS_KEY: &str = "sections";

pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_sections(&self) -> AppResult<Option<serde_json::Value>> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT payload FROM site_content WHERE key = $1")
                .bind(SECTIONS_KEY)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(payload,)| payload))
    }

    pub async fn put_sections(&self, sections: &serde_json::Value) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO site_content (key, payload, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET payload = EXCLUDED.payload, updated_at = NOW()
            "#,
        )
        .bind(SECTIONS_KEY)
        .bind(sections)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
