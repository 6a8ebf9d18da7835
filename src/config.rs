// ============================================================================
// CONFIG - Configuración inyectada por la página anfitriona
// ============================================================================
//
// La plantilla del servidor publica dos globals antes de cargar el wasm:
//
//   window.APPOINTMENTS_CONFIG = { apiUrl, csrfToken, advancedMode, staffId }
//   window.SCHOOL_STAGES = [ { id, name, subtitle, description, icon, features }, ... ]
//
// Ambos se leen una sola vez al arrancar. Los globals llegan como objetos JS,
// así que se serializan con JSON.stringify y se deserializan con serde_json.

use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::models::Stage;
use crate::utils::constants::DEFAULT_API_BASE;

/// Configuración de la página anfitriona
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    /// Base de la API de citas, con barra final
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Token CSRF de la sesión; viaja en cabecera en cada mutación
    #[serde(default)]
    pub csrf_token: String,
    /// Muestra los campos de seguimiento interno del formulario
    #[serde(default)]
    pub advanced_mode: bool,
    /// Restringe el dashboard a las citas del trabajador indicado
    #[serde(default)]
    pub staff_id: Option<u32>,
}

fn default_api_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            csrf_token: String::new(),
            advanced_mode: false,
            staff_id: None,
        }
    }
}

impl HostConfig {
    /// Leer `window.APPOINTMENTS_CONFIG`; sin global o con JSON inválido
    /// se arranca con los valores por defecto
    pub fn load() -> Self {
        match read_global_json("APPOINTMENTS_CONFIG") {
            Some(json) => match serde_json::from_str::<HostConfig>(&json) {
                Ok(config) => {
                    log::info!("⚙️ [CONFIG] Configuración cargada: api_url={}", config.api_url);
                    config
                }
                Err(e) => {
                    log::warn!("⚠️ [CONFIG] APPOINTMENTS_CONFIG inválido ({}), usando defaults", e);
                    Self::default()
                }
            },
            None => {
                log::warn!("⚠️ [CONFIG] APPOINTMENTS_CONFIG no definido, usando defaults");
                Self::default()
            }
        }
    }
}

/// Leer `window.SCHOOL_STAGES`. Devuelve `Err` si el global falta o no es
/// un array de etapas; el catálogo lo traduce en su mensaje de error.
pub fn read_school_stages() -> Result<Vec<Stage>, String> {
    let json = read_global_json("SCHOOL_STAGES")
        .ok_or_else(|| "SCHOOL_STAGES no definido".to_string())?;
    parse_stages(&json)
}

/// Deserializar el JSON de etapas; cualquier cosa que no sea un array
/// de objetos con `id` es un error
pub fn parse_stages(json: &str) -> Result<Vec<Stage>, String> {
    serde_json::from_str::<Vec<Stage>>(json)
        .map_err(|e| format!("SCHOOL_STAGES no es un array de etapas: {}", e))
}

/// Serializar un global de `window` a JSON; `None` si no existe
fn read_global_json(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    let raw = js_sys::Reflect::get(window.as_ref(), &JsValue::from_str(name)).ok()?;
    if raw.is_undefined() || raw.is_null() {
        return None;
    }
    let json = js_sys::JSON::stringify(&raw).ok()?;
    Some(String::from(json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuracion_completa_en_camel_case() {
        let json = r#"{
            "apiUrl": "/api/citas/",
            "csrfToken": "tok-123",
            "advancedMode": true,
            "staffId": 7
        }"#;
        let config: HostConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_url, "/api/citas/");
        assert_eq!(config.csrf_token, "tok-123");
        assert!(config.advanced_mode);
        assert_eq!(config.staff_id, Some(7));
    }

    #[test]
    fn configuracion_parcial_rellena_defaults() {
        let config: HostConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.api_url, DEFAULT_API_BASE);
        assert_eq!(config.csrf_token, "");
        assert!(!config.advanced_mode);
        assert_eq!(config.staff_id, None);
    }

    #[test]
    fn etapas_validas_se_deserializan() {
        let json = r#"[
            {"id": 1, "name": "Infantil", "icon": "👶", "features": ["Juego"]},
            {"id": 2, "name": "Primaria"}
        ]"#;
        let stages = parse_stages(json).unwrap();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].id, 1);
        assert_eq!(stages[1].name.as_deref(), Some("Primaria"));
    }

    #[test]
    fn un_objeto_no_es_un_catalogo() {
        assert!(parse_stages(r#"{"id": 1}"#).is_err());
        assert!(parse_stages("null").is_err());
        assert!(parse_stages(r#"[{"name": "sin id"}]"#).is_err());
    }
}
