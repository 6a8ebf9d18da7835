// ============================================================================
// REFRESH COORDINATOR - Avisos y refresco de vistas tras cada mutación
// ============================================================================

use crate::dom::{get_element_by_id, window};
use crate::state::AppState;
use crate::views::toast;

/// Coordinador de notificaciones y refrescos. Tras cada mutación confirmada
/// muestra un único aviso y dispara la cascada de refrescos en orden fijo:
/// listado → calendario → dashboard. Cada paso es independiente; si uno
/// falla se registra y los demás siguen.
pub struct RefreshCoordinator {
    state: AppState,
}

impl RefreshCoordinator {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Aviso verde de operación completada
    pub fn notify_success(&self, message: &str) {
        toast::show_success(message);
    }

    /// Aviso rojo de error
    pub fn notify_error(&self, message: &str) {
        toast::show_error(message);
    }

    /// Cascada completa tras una mutación confirmada por el servidor
    pub fn after_mutation(&self, message: &str) {
        self.notify_success(message);

        if self.state.refresh.fire_listing() {
            log::info!("🔄 [REFRESCO] Listado relanzado");
        }
        self.refresh_calendar();
        if self.state.refresh.fire_dashboard() {
            log::info!("🔄 [REFRESCO] Dashboard relanzado");
        }
    }

    /// El calendario se refresca por su callback registrado desde JS.
    /// Sin callback, y solo en páginas que tienen calendario montado,
    /// se recurre a recargar la página entera.
    fn refresh_calendar(&self) {
        if self.state.refresh.fire_calendar() {
            log::info!("📅 [REFRESCO] Calendario relanzado");
            return;
        }
        if get_element_by_id("calendar").is_none() {
            return;
        }
        log::info!("📅 [REFRESCO] Calendario sin callback registrado, recargando página");
        if let Some(window) = window() {
            if let Err(e) = window.location().reload() {
                log::warn!("⚠️ [REFRESCO] No se pudo recargar la página: {:?}", e);
            }
        }
    }
}
