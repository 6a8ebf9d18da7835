// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP
// Todos los requests corren contra un timeout fijo; al expirar se devuelve
// ApiError::Timeout en lugar de dejar la petición colgada.
// ============================================================================

use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use thiserror::Error;

use crate::models::appointment::{Appointment, AppointmentPayload};
use crate::models::dashboard::DashboardStats;
use crate::models::listing::{ListingQuery, ListingResponse};
use crate::models::stage::{Course, StaffOption};
use crate::utils::constants::REQUEST_TIMEOUT_MS;

/// Error del cliente API; Display produce el texto que ven los toasts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Error de red: {0}")]
    Network(String),
    #[error("La petición ha tardado demasiado en responder")]
    Timeout,
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Respuesta inesperada del servidor")]
    Parse(String),
}

/// Formato de exportación de citas
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExportKind {
    Pdf,
    Excel,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "excel",
        }
    }
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    csrf_token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, csrf_token: &str) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        Self {
            base_url,
            csrf_token: csrf_token.to_string(),
        }
    }

    /// Página del listado de citas (protocolo DataTables server-side)
    pub async fn list_appointments(&self, query: &ListingQuery) -> Result<ListingResponse, ApiError> {
        let url = format!("{}?{}", self.base_url, build_query(&query.to_query_pairs()));

        log::info!("📋 [CITAS] Cargando listado (draw {})", query.draw);

        let response = send_with_timeout(Request::get(&url).build().map_err(request_error)?).await?;
        let response = ensure_ok(response).await?;
        response
            .json::<ListingResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Cita completa por id (para poblar el modal de edición)
    pub async fn get_appointment(&self, id: u32) -> Result<Appointment, ApiError> {
        let url = format!("{}{}/", self.base_url, id);

        log::info!("🔍 [CITAS] Obteniendo cita {}", id);

        let response = send_with_timeout(Request::get(&url).build().map_err(request_error)?).await?;
        let response = ensure_ok(response).await?;
        response
            .json::<Appointment>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Crear cita (POST con token CSRF)
    pub async fn create_appointment(&self, payload: &AppointmentPayload) -> Result<(), ApiError> {
        log::info!("💾 [CITAS] Creando cita para {}", payload.visitor_name);

        let request = Request::post(&self.base_url)
            .header("X-CSRFToken", &self.csrf_token)
            .json(payload)
            .map_err(request_error)?;
        let response = send_with_timeout(request).await?;
        ensure_ok(response).await?;
        Ok(())
    }

    /// Actualizar cita existente (PUT con token CSRF)
    pub async fn update_appointment(&self, id: u32, payload: &AppointmentPayload) -> Result<(), ApiError> {
        let url = format!("{}{}/", self.base_url, id);

        log::info!("💾 [CITAS] Actualizando cita {}", id);

        let request = Request::put(&url)
            .header("X-CSRFToken", &self.csrf_token)
            .json(payload)
            .map_err(request_error)?;
        let response = send_with_timeout(request).await?;
        ensure_ok(response).await?;
        Ok(())
    }

    /// Eliminar cita (DELETE con token CSRF); la confirmación es del caller
    pub async fn delete_appointment(&self, id: u32) -> Result<(), ApiError> {
        let url = format!("{}{}/", self.base_url, id);

        log::info!("🗑️ [CITAS] Eliminando cita {}", id);

        let request = Request::delete(&url)
            .header("X-CSRFToken", &self.csrf_token)
            .build()
            .map_err(request_error)?;
        let response = send_with_timeout(request).await?;
        ensure_ok(response).await?;
        Ok(())
    }

    /// Cursos de una etapa; la lista vacía es válida (oculta el campo curso)
    pub async fn get_stage_courses(&self, stage_id: u32) -> Result<Vec<Course>, ApiError> {
        let url = format!("/api/stage/{}/courses/", stage_id);

        log::info!("📚 [CURSOS] Cargando cursos de la etapa {}", stage_id);

        let response = send_with_timeout(Request::get(&url).build().map_err(request_error)?).await?;
        let response = ensure_ok(response).await?;
        response
            .json::<Vec<Course>>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Staff asignable a una etapa
    pub async fn get_staff_by_stage(&self, stage_id: u32) -> Result<Vec<StaffOption>, ApiError> {
        let url = format!("/api/staff-by-stage/{}/", stage_id);

        log::info!("👥 [STAFF] Cargando staff de la etapa {}", stage_id);

        let response = send_with_timeout(Request::get(&url).build().map_err(request_error)?).await?;
        let response = ensure_ok(response).await?;
        response
            .json::<Vec<StaffOption>>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Contadores y próximas citas del dashboard
    pub async fn get_dashboard_stats(&self, staff_id: Option<u32>) -> Result<DashboardStats, ApiError> {
        let url = match staff_id {
            Some(id) => format!("/dashboard/stats/?staff_id={}", id),
            None => "/dashboard/stats/".to_string(),
        };

        let response = send_with_timeout(Request::get(&url).build().map_err(request_error)?).await?;
        let response = ensure_ok(response).await?;
        response
            .json::<DashboardStats>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// URL de exportación del listado completo (se navega, no se parsea)
    pub fn export_all_url(&self, kind: ExportKind) -> String {
        format!("{}export/?type={}", self.base_url, kind.as_str())
    }

    /// URL de exportación de una sola cita
    pub fn export_one_url(&self, id: u32, kind: ExportKind) -> String {
        format!("{}{}/export/?type={}", self.base_url, id, kind.as_str())
    }
}

/// Carrera entre el fetch y el timeout fijo
async fn send_with_timeout(request: Request) -> Result<Response, ApiError> {
    let send = request.send();
    futures::pin_mut!(send);
    match select(send, TimeoutFuture::new(REQUEST_TIMEOUT_MS)).await {
        Either::Left((result, _)) => result.map_err(|e| ApiError::Network(e.to_string())),
        Either::Right(_) => {
            log::warn!("⏱️ [API] Request abortado por timeout ({} ms)", REQUEST_TIMEOUT_MS);
            Err(ApiError::Timeout)
        }
    }
}

/// Convertir respuestas no-2xx en ApiError::Server con el mensaje más específico
async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let status_text = response.status_text();
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body).unwrap_or_else(|| {
        if status_text.is_empty() {
            format!("HTTP {}", status)
        } else {
            status_text
        }
    });
    log::error!("❌ [API] HTTP {}: {}", status, message);
    Err(ApiError::Server { status, message })
}

fn request_error(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

/// Escalera de extracción de mensajes de un cuerpo de error JSON:
/// primer error de campo → "error"/"detail" genérico → None
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    // Errores de campo del serializer: {"visitor_phone": ["mensaje"], ...}
    for (key, entry) in object {
        if key == "error" || key == "detail" {
            continue;
        }
        if let Some(first) = entry.as_array().and_then(|m| m.first()).and_then(|m| m.as_str()) {
            return Some(first.to_string());
        }
    }

    // Mensaje genérico: {"error": "..."} o {"detail": "..."}
    for key in ["error", "detail"] {
        if let Some(message) = object.get(key).and_then(|m| m.as_str()) {
            return Some(message.to_string());
        }
    }

    None
}

/// Query string a partir de pares clave/valor; los valores se escapan
fn build_query(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errores_de_campo_tienen_prioridad() {
        let body = r#"{"error": "Datos inválidos", "visitor_phone": ["El teléfono debe contener exactamente 9 dígitos."]}"#;
        assert_eq!(
            extract_error_message(body),
            Some("El teléfono debe contener exactamente 9 dígitos.".to_string())
        );
    }

    #[test]
    fn error_generico_cuando_no_hay_campos() {
        let body = r#"{"error": "Ya existe una cita en este horario"}"#;
        assert_eq!(
            extract_error_message(body),
            Some("Ya existe una cita en este horario".to_string())
        );
        let body = r#"{"detail": "No autorizado"}"#;
        assert_eq!(extract_error_message(body), Some("No autorizado".to_string()));
    }

    #[test]
    fn cuerpos_no_json_no_producen_mensaje() {
        assert_eq!(extract_error_message("<html>500</html>"), None);
        assert_eq!(extract_error_message(""), None);
        assert_eq!(extract_error_message("[1, 2]"), None);
    }

    #[test]
    fn non_field_errors_cuentan_como_error_de_campo() {
        let body = r#"{"non_field_errors": ["Ya existe una cita en este horario"]}"#;
        assert_eq!(
            extract_error_message(body),
            Some("Ya existe una cita en este horario".to_string())
        );
    }

    #[test]
    fn urls_de_exportacion() {
        let api = ApiClient::new("/api/appointments", "tok");
        assert_eq!(api.export_all_url(ExportKind::Pdf), "/api/appointments/export/?type=pdf");
        assert_eq!(api.export_all_url(ExportKind::Excel), "/api/appointments/export/?type=excel");
        assert_eq!(api.export_one_url(7, ExportKind::Pdf), "/api/appointments/7/export/?type=pdf");
    }
}
