//! Servicio de PINes de entrega
//!
//! Un PIN es un código de 4 dígitos ligado al teléfono del cliente. Se
//! guarda el digest y también el plaintext: el personal del almacén se lo
//! dicta al cliente por teléfono. Con 10.000 combinaciones no es una
//! frontera de seguridad sino un código humano de baja garantía; el
//! tradeoff es deliberado.

use crate::models::Shipment;
use crate::repositories::pin_repository::PinRepository;
use crate::utils::errors::AppResult;
use crate::utils::phone::normalize_phone;
use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

/// Resultado de `ensure`: si se acuñó un PIN nuevo y, cuando el llamador
/// está autorizado a verlo, el plaintext.
#[derive(Debug)]
pub struct EnsuredPin {
    pub created: bool,
    pub pin: Option<String>,
}

pub struct PinService {
    repository: PinRepository,
    secret: String,
}

impl PinService {
    pub fn new(pool: PgPool, secret: String) -> Self {
        Self {
            repository: PinRepository::new(pool),
            secret,
        }
    }

    /// Garantizar que el teléfono tenga un PIN.
    ///
    /// - Teléfono sin dígitos: no-op (`created=false`, sin pin).
    /// - Sin registro: se acuña un PIN aleatorio y se guarda.
    /// - Registro con plaintext: se devuelve tal cual (idempotente).
    /// - Registro sin plaintext (fila legada): se regenera.
    ///
    /// El plaintext solo se devuelve con `expose = true`.
    pub async fn ensure(&self, phone: &str, expose: bool) -> AppResult<EnsuredPin> {
        let normalized = normalize_phone(phone);
        if normalized.is_empty() {
            return Ok(EnsuredPin {
                created: false,
                pin: None,
            });
        }

        if let Some(existing) = self.repository.find_by_phone(&normalized).await? {
            if let Some(plain) = existing.pin_plain {
                return Ok(EnsuredPin {
                    created: false,
                    pin: expose.then_some(plain),
                });
            }

            // Fila con hash pero sin plaintext: estado parcial, regenerar.
            let pin = random_pin();
            let hash = hash_pin(&self.secret, &normalized, &pin);
            self.repository.regenerate(&normalized, &hash, &pin).await?;
            tracing::info!("PIN regenerado para teléfono {}", normalized);
            return Ok(EnsuredPin {
                created: true,
                pin: expose.then_some(pin),
            });
        }

        let pin = random_pin();
        let hash = hash_pin(&self.secret, &normalized, &pin);
        self.repository.upsert(&normalized, &hash, &pin).await?;
        tracing::info!("PIN creado para teléfono {}", normalized);
        Ok(EnsuredPin {
            created: true,
            pin: expose.then_some(pin),
        })
    }

    /// Verificar el PIN presentado contra el digest almacenado.
    /// Falso si el teléfono o el pin están vacíos o no hay registro.
    pub async fn verify(&self, phone: &str, pin: &str) -> AppResult<bool> {
        let normalized = normalize_phone(phone);
        let pin = pin.trim();
        if normalized.is_empty() || pin.is_empty() {
            return Ok(false);
        }

        let Some(record) = self.repository.find_by_phone(&normalized).await? else {
            return Ok(false);
        };

        let candidate = hash_pin(&self.secret, &normalized, pin);
        Ok(digest_eq(&candidate, &record.pin_hash))
    }

    /// Adjuntar el PIN plaintext a una fila de envío leída de la base.
    /// Si el envío tiene teléfono pero aún no hay PIN, se acuña aquí
    /// mismo: las lecturas de envíos crean PINes a propósito.
    pub async fn attach_to(&self, shipment: &mut Shipment) -> AppResult<()> {
        if shipment.pin_plain.is_some() {
            return Ok(());
        }
        if normalize_phone(&shipment.phone).is_empty() {
            return Ok(());
        }
        let ensured = self.ensure(&shipment.phone, true).await?;
        shipment.pin_plain = ensured.pin;
        Ok(())
    }
}

/// PIN aleatorio uniforme en 0000..=9999
pub fn random_pin() -> String {
    format!("{:04}", rand::thread_rng().gen_range(0..10_000))
}

/// Digest SHA-256 de `secreto:teléfono:pin`, en hex
pub fn hash_pin(secret: &str, phone: &str, pin: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}:{}", secret, phone, pin));
    hex::encode(hasher.finalize())
}

/// Comparación de digests en tiempo constante
fn digest_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_pin_format() {
        for _ in 0..100 {
            let pin = random_pin();
            assert_eq!(pin.len(), 4);
            assert!(pin.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_hash_pin_is_deterministic() {
        let a = hash_pin("secret", "99205050", "1234");
        let b = hash_pin("secret", "99205050", "1234");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_hash_pin_depends_on_all_inputs() {
        let base = hash_pin("secret", "99205050", "1234");
        assert_ne!(base, hash_pin("otro", "99205050", "1234"));
        assert_ne!(base, hash_pin("secret", "99205051", "1234"));
        assert_ne!(base, hash_pin("secret", "99205050", "1235"));
    }

    #[test]
    fn test_digest_eq() {
        assert!(digest_eq("abcd", "abcd"));
        assert!(!digest_eq("abcd", "abce"));
        assert!(!digest_eq("abcd", "abc"));
    }
}
