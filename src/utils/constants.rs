/// URL base de la API de citas cuando la página anfitriona no inyecta una
/// Configurada en tiempo de compilación:
/// - Desarrollo: /api/appointments/ (por defecto)
/// - Producción: via VISITAS_API_URL env var
pub const DEFAULT_API_BASE: &str = match option_env!("VISITAS_API_URL") {
    Some(url) => url,
    None => "/api/appointments/",
};

/// Duraciones de cita permitidas (minutos)
pub const ALLOWED_DURATIONS: [u32; 3] = [30, 45, 60];

/// Retardo del debounce de la búsqueda (ms)
pub const SEARCH_DEBOUNCE_MS: u32 = 400;

/// Duración de los toasts (ms)
pub const TOAST_DURATION_MS: u32 = 3000;

/// Timeout fijo por request HTTP (ms); al expirar el request falla con error visible
pub const REQUEST_TIMEOUT_MS: u32 = 15_000;

/// Tamaño de página por defecto del listado
pub const DEFAULT_PAGE_LENGTH: u32 = 10;
