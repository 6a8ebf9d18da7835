// ============================================================================
// VALIDATE HELPERS - Reglas de validación del formulario de citas
// ============================================================================

use crate::utils::constants::ALLOWED_DURATIONS;

/// Email bien formado: una sola @, parte local no vacía y dominio con punto
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if value.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Teléfono: exactamente 9 dígitos
pub fn is_valid_phone(value: &str) -> bool {
    let value = value.trim();
    value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Duración dentro del conjunto permitido
pub fn is_allowed_duration(minutes: u32) -> bool {
    ALLOWED_DURATIONS.contains(&minutes)
}
