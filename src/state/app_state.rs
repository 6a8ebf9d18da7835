// ============================================================================
// APP STATE - Estado global de la aplicación de citas
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::HostConfig;
use crate::models::{DashboardStats, Stage};
use crate::services::ApiClient;
use crate::state::{FormState, ListingState, RefreshHub};

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    /// Configuración inyectada por la página anfitriona (solo lectura)
    pub config: Rc<HostConfig>,
    pub listing: ListingState,
    pub form: FormState,
    pub refresh: RefreshHub,
    /// Etapas educativas publicadas por la página anfitriona
    pub stages: Rc<RefCell<Vec<Stage>>>,
    pub stats: Rc<RefCell<Option<DashboardStats>>>,
}

impl AppState {
    /// Crear nuevo estado de aplicación
    pub fn new(config: HostConfig) -> Self {
        Self {
            config: Rc::new(config),
            listing: ListingState::new(),
            form: FormState::new(),
            refresh: RefreshHub::default(),
            stages: Rc::new(RefCell::new(Vec::new())),
            stats: Rc::new(RefCell::new(None)),
        }
    }

    /// Cliente de la API con la base y el token CSRF de la configuración
    pub fn api_client(&self) -> ApiClient {
        ApiClient::new(&self.config.api_url, &self.config.csrf_token)
    }

    /// Establecer etapas
    pub fn set_stages(&self, stages: Vec<Stage>) {
        *self.stages.borrow_mut() = stages;
    }

    /// Obtener etapas
    pub fn get_stages(&self) -> Vec<Stage> {
        self.stages.borrow().clone()
    }

    /// Establecer estadísticas del dashboard
    pub fn set_stats(&self, stats: Option<DashboardStats>) {
        *self.stats.borrow_mut() = stats;
    }

    /// Obtener estadísticas del dashboard
    pub fn get_stats(&self) -> Option<DashboardStats> {
        self.stats.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FormMode;

    fn config_de_prueba() -> HostConfig {
        HostConfig {
            api_url: "/api/appointments/".to_string(),
            csrf_token: "token-abc".to_string(),
            advanced_mode: true,
            staff_id: Some(3),
        }
    }

    #[test]
    fn el_estado_arranca_vacio_y_cerrado() {
        let state = AppState::new(config_de_prueba());
        assert!(state.get_stages().is_empty());
        assert!(state.get_stats().is_none());
        assert_eq!(state.form.get_mode(), FormMode::Closed);
        assert!(!state.listing.get_loading());
    }

    #[test]
    fn los_clones_comparten_el_mismo_estado() {
        let state = AppState::new(config_de_prueba());
        let clone = state.clone();
        clone.set_stages(vec![Stage {
            id: 5,
            name: Some("Primaria".to_string()),
            subtitle: None,
            description: None,
            icon: None,
            features: Vec::new(),
        }]);
        assert_eq!(state.get_stages().len(), 1);
        assert_eq!(state.get_stages()[0].id, 5);
    }
}
