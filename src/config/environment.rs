//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! La configuración se construye una sola vez al arrancar y se inyecta vía
//! `AppState`; no hay globales mutables.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Secreto compartido: entra en el digest de los PINes y autoriza los
    /// headers de administrador (`x-admin-pin`, `x-admin-bypass-pin`).
    pub pin_secret: String,
    pub cors_origins: Vec<String>,
}

impl EnvironmentConfig {
    /// Construir la configuración desde variables de entorno.
    /// Los valores tienen defaults razonables para desarrollo local.
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            pin_secret: env::var("PIN_SECRET").unwrap_or_else(|_| "cargo-pin-secret".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
