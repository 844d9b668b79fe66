//! Normalización de números de teléfono
//!
//! Los PINes de cliente se indexan por el teléfono reducido a dígitos,
//! de modo que "99-20-50-50" y "9920 5050" apuntan al mismo registro.

/// Reducir un teléfono a sus dígitos (quita espacios, guiones, prefijos "+").
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_strips_formatting() {
        assert_eq!(normalize_phone("99-20-50-50"), "99205050");
        assert_eq!(normalize_phone("+976 9920 5050"), "97699205050");
        assert_eq!(normalize_phone("(99) 20.50.50"), "99205050");
    }

    #[test]
    fn test_normalize_phone_empty_or_no_digits() {
        assert_eq!(normalize_phone(""), "");
        assert_eq!(normalize_phone("sin número"), "");
    }
}
