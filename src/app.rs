// ============================================================================
// APP - Arranque y montaje según la página anfitriona
// ============================================================================

use wasm_bindgen::prelude::*;

use crate::config::{read_school_stages, HostConfig};
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::state::AppState;
use crate::views;

/// Aplicación principal. Cada página anfitriona marca qué se monta:
/// `#booking-app` lleva el catálogo público y `#appointments-app` la
/// pantalla de administración; ambas pueden convivir.
pub struct App {
    state: AppState,
}

impl App {
    /// Leer la configuración y las etapas publicadas por el anfitrión
    pub fn new() -> Self {
        let config = HostConfig::load();
        let state = AppState::new(config);

        match read_school_stages() {
            Ok(stages) => {
                log::info!("📚 [APP] {} etapas publicadas por el anfitrión", stages.len());
                state.set_stages(stages);
            }
            Err(e) => log::warn!("⚠️ [APP] {}", e),
        }

        Self { state }
    }

    /// Montar las vistas presentes en la página actual
    pub fn render(&self) -> Result<(), JsValue> {
        let mut mounted = false;

        if let Some(root) = get_element_by_id("booking-app") {
            log::info!("📚 [APP] Montando catálogo público");
            views::catalog::render(&root);
            mounted = true;
        }

        if let Some(root) = get_element_by_id("appointments-app") {
            log::info!("📋 [APP] Montando pantalla de administración");
            set_inner_html(&root, "");
            let admin = views::admin::render(&self.state)?;
            append_child(&root, &admin)?;
            mounted = true;
        }

        if !mounted {
            log::info!("ℹ️ [APP] Sin punto de montaje en esta página");
        }
        Ok(())
    }

    /// Referencia al estado compartido
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
