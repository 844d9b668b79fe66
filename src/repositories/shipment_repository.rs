//! Repositorio de envíos

use crate::models::Shipment;
use crate::utils::errors::AppResult;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;

/// Campos de un envío nuevo, ya validados y con defaults aplicados
#[derive(Debug)]
pub struct NewShipment {
    pub barcode: String,
    pub phone: String,
    pub customer_name: String,
    pub quantity: i32,
    pub weight: f64,
    pub price: f64,
    pub paid_amount: f64,
    pub balance: f64,
    pub status: String,
    pub delivery_status: String,
    pub location: String,
    pub arrival_date: NaiveDate,
    pub notes: String,
    pub delivery_note: Option<String>,
    pub courier: Option<String>,
}

/// Campos que escribe el patch de estado
#[derive(Debug)]
pub struct StatusPatch {
    pub status: String,
    pub delivery_status: String,
    pub location: String,
    pub delivered_at: Option<DateTime<Utc>>,
    pub paid_amount: f64,
    pub balance: f64,
}

/// Filtros de listado, con fechas ya parseadas y paginación saneada
#[derive(Debug, Default)]
pub struct ShipmentFilters {
    pub phone: Option<String>,
    pub barcode: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub search: Option<String>,
    pub page: u32,
    pub limit: u32,
}

pub struct ShipmentRepository {
    pool: PgPool,
}

impl ShipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewShipment) -> AppResult<Shipment> {
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            INSERT INTO shipments
                (barcode, phone, customer_name, quantity, weight, price, paid_amount, balance,
                 status, delivery_status, location, arrival_date, notes, delivery_note, courier)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(new.barcode)
        .bind(new.phone)
        .bind(new.customer_name)
        .bind(new.quantity)
        .bind(new.weight)
        .bind(new.price)
        .bind(new.paid_amount)
        .bind(new.balance)
        .bind(new.status)
        .bind(new.delivery_status)
        .bind(new.location)
        .bind(new.arrival_date)
        .bind(new.notes)
        .bind(new.delivery_note)
        .bind(new.courier)
        .fetch_one(&self.pool)
        .await?;

        Ok(shipment)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Shipment>> {
        let shipment = sqlx::query_as::<_, Shipment>("SELECT * FROM shipments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(shipment)
    }

    /// Persistir el resultado del merge de un PUT. El llamador ya pasó el
    /// gate de entrega; aquí solo se escribe.
    pub async fn update(&self, id: i64, merged: &Shipment) -> AppResult<Shipment> {
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            UPDATE shipments SET
                barcode = $2, phone = $3, customer_name = $4, quantity = $5, weight = $6,
                price = $7, paid_amount = $8, balance = $9,
                status = $10, delivery_status = $11, location = $12, arrival_date = $13,
                notes = $14, delivery_note = $15, courier = $16,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&merged.barcode)
        .bind(&merged.phone)
        .bind(&merged.customer_name)
        .bind(merged.quantity)
        .bind(merged.weight)
        .bind(merged.price)
        .bind(merged.paid_amount)
        .bind(merged.balance)
        .bind(&merged.status)
        .bind(&merged.delivery_status)
        .bind(&merged.location)
        .bind(merged.arrival_date)
        .bind(&merged.notes)
        .bind(&merged.delivery_note)
        .bind(&merged.courier)
        .fetch_one(&self.pool)
        .await?;

        Ok(shipment)
    }

    pub async fn patch_status(&self, id: i64, patch: StatusPatch) -> AppResult<Shipment> {
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            UPDATE shipments
            SET status = $2, delivery_status = $3, location = $4, delivered_at = $5,
                paid_amount = $6, balance = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.status)
        .bind(patch.delivery_status)
        .bind(patch.location)
        .bind(patch.delivered_at)
        .bind(patch.paid_amount)
        .bind(patch.balance)
        .fetch_one(&self.pool)
        .await?;

        Ok(shipment)
    }

    pub async fn list(&self, filters: &ShipmentFilters) -> AppResult<(Vec<Shipment>, i64)> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM shipments");
        push_filters(&mut count_query, filters);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let offset = (filters.page.saturating_sub(1) as i64) * filters.limit as i64;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM shipments");
        push_filters(&mut query, filters);
        query.push(" ORDER BY arrival_date DESC NULLS LAST, id DESC");
        query.push(" LIMIT ");
        query.push_bind(filters.limit as i64);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let shipments = query
            .build_query_as::<Shipment>()
            .fetch_all(&self.pool)
            .await?;

        Ok((shipments, total))
    }

    /// Totales globales para `/stats/summary`
    pub async fn stats_summary(&self) -> AppResult<(i64, f64, f64, HashMap<String, i64>)> {
        let totals: (i64, f64, f64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(price), 0)::double precision,
                   COALESCE(SUM(balance), 0)::double precision
            FROM shipments
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM shipments GROUP BY status")
                .fetch_all(&self.pool)
                .await?;

        let by_status = rows.into_iter().collect();

        Ok((totals.0, totals.1, totals.2, by_status))
    }
}

/// Añadir la cláusula WHERE según los filtros activos
fn push_filters(query: &mut QueryBuilder<Postgres>, filters: &ShipmentFilters) {
    let mut sep = " WHERE ";

    if let Some(phone) = &filters.phone {
        query.push(sep).push("phone ILIKE ");
        query.push_bind(format!("%{}%", phone));
        sep = " AND ";
    }
    if let Some(barcode) = &filters.barcode {
        query.push(sep).push("barcode ILIKE ");
        query.push_bind(format!("%{}%", barcode));
        sep = " AND ";
    }
    if let Some(status) = &filters.status {
        query.push(sep).push("status = ");
        query.push_bind(status.clone());
        sep = " AND ";
    }
    if let Some(location) = &filters.location {
        query.push(sep).push("location = ");
        query.push_bind(location.clone());
        sep = " AND ";
    }
    if let Some(date_from) = filters.date_from {
        query.push(sep).push("arrival_date >= ");
        query.push_bind(date_from);
        sep = " AND ";
    }
    if let Some(date_to) = filters.date_to {
        query.push(sep).push("arrival_date <= ");
        query.push_bind(date_to);
        sep = " AND ";
    }
    if let Some(search) = &filters.search {
        let pattern = format!("%{}%", search);
        query.push(sep).push("(phone ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR barcode ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR COALESCE(notes, '') ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
}
