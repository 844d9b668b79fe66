//! DTOs de estadísticas y contenido

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resumen global de envíos
#[derive(Debug, Serialize)]
pub struct StatsSummaryResponse {
    pub total_shipments: i64,
    pub total_price: f64,
    pub total_balance: f64,
    pub by_status: HashMap<String, i64>,
}

/// Secciones de contenido del sitio (blob JSON opaco)
#[derive(Debug, Deserialize, Serialize)]
pub struct ContentSections {
    #[serde(default)]
    pub sections: serde_json::Value,
}
