//! Credencial de administrador por secreto compartido
//!
//! No es un modelo de capacidades: un header estático comparado contra el
//! secreto configurado. Autoriza exponer PINes (`x-admin-pin`) y saltarse
//! el gate de entrega (`x-admin-bypass-pin`).

use crate::config::EnvironmentConfig;
use axum::http::HeaderMap;

pub const ADMIN_PIN_HEADER: &str = "x-admin-pin";
pub const ADMIN_BYPASS_HEADER: &str = "x-admin-bypass-pin";

/// ¿El header trae el secreto compartido?
pub fn header_matches_secret(
    headers: &HeaderMap,
    header_name: &str,
    config: &EnvironmentConfig,
) -> bool {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == config.pin_secret)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "test".to_string(),
            port: 0,
            host: "localhost".to_string(),
            pin_secret: "super-secreto".to_string(),
            cors_origins: vec![],
        }
    }

    #[test]
    fn test_header_matches_secret() {
        let config = test_config();

        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_PIN_HEADER, "super-secreto".parse().unwrap());
        assert!(header_matches_secret(&headers, ADMIN_PIN_HEADER, &config));

        let mut wrong = HeaderMap::new();
        wrong.insert(ADMIN_PIN_HEADER, "otro".parse().unwrap());
        assert!(!header_matches_secret(&wrong, ADMIN_PIN_HEADER, &config));

        let empty = HeaderMap::new();
        assert!(!header_matches_secret(&empty, ADMIN_BYPASS_HEADER, &config));
    }
}
