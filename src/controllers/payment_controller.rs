//! Controller de pagos

use crate::config::EnvironmentConfig;
use crate::dto::payment_dto::{PaymentRecordedResponse, RecordPaymentRequest};
use crate::models::Payment;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::shipment_repository::ShipmentRepository;
use crate::services::pin_service::PinService;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::validate_positive;
use sqlx::PgPool;

const DEFAULT_METHOD: &str = "cash";

pub struct PaymentController {
    shipments: ShipmentRepository,
    payments: PaymentRepository,
    pins: PinService,
}

impl PaymentController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            shipments: ShipmentRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool.clone()),
            pins: PinService::new(pool, config.pin_secret.clone()),
        }
    }

    /// Registrar un pago contra un envío. Un importe no positivo se
    /// rechaza antes de tocar la base: ni fila de pago ni mutación.
    pub async fn record(
        &self,
        shipment_id: i64,
        request: RecordPaymentRequest,
    ) -> AppResult<PaymentRecordedResponse> {
        self.shipments
            .find_by_id(shipment_id)
            .await?
            .ok_or_else(|| not_found_error("Shipment", &shipment_id.to_string()))?;

        let mut errors = validator::ValidationErrors::new();
        if let Err(e) = validate_positive(request.amount) {
            errors.add("amount", e);
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let method = request
            .method
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_METHOD.to_string());

        let mut shipment = self
            .payments
            .record(shipment_id, request.amount, &method)
            .await?;
        self.pins.attach_to(&mut shipment).await?;

        let payments = self.payments.list_for_shipment(shipment_id).await?;

        tracing::info!(
            "Pago registrado: shipment_id={} amount={} balance={}",
            shipment_id,
            request.amount,
            shipment.balance
        );

        Ok(PaymentRecordedResponse { shipment, payments })
    }

    pub async fn list(&self, shipment_id: i64) -> AppResult<Vec<Payment>> {
        self.payments.list_for_shipment(shipment_id).await
    }
}
