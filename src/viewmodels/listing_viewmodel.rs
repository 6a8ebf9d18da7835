// ============================================================================
// LISTING VIEWMODEL - Carga y navegación del listado de citas
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;

use crate::dom::{input_value, select_value, set_input_value, set_select_value, window};
use crate::services::{ApiClient, ExportKind};
use crate::state::AppState;
use crate::utils::constants::SEARCH_DEBOUNCE_MS;
use crate::viewmodels::RefreshCoordinator;
use crate::views;

/// ViewModel del listado: arma cada query con el estado de paginación y los
/// filtros leídos del DOM, y solo aplica la respuesta cuyo draw sigue vigente.
#[derive(Clone)]
pub struct ListingViewModel {
    api_client: ApiClient,
    state: AppState,
}

impl ListingViewModel {
    pub fn new(state: &AppState) -> Self {
        Self {
            api_client: state.api_client(),
            state: state.clone(),
        }
    }

    /// Cargar la página actual del listado
    pub async fn load_page(&self) {
        let query = self.snapshot_query();
        let ticket = query.draw;
        log::info!(
            "📋 [LISTADO] Cargando página (draw={}, start={})",
            ticket,
            query.start
        );

        self.state.listing.set_loading(true);
        views::listing::show_loading(&self.state);

        match self.api_client.list_appointments(&query).await {
            Ok(response) => {
                // Solo la respuesta del draw vigente toca el estado
                if !self.state.listing.latest.is_current(response.draw) {
                    log::info!("⏭️ [LISTADO] Respuesta con draw={} obsoleta, descartada", response.draw);
                    return;
                }
                if let Some(error) = response.error {
                    self.apply_error(error);
                    return;
                }
                self.state.listing.apply_page(
                    response.data,
                    response.records_total,
                    response.records_filtered,
                );
                views::listing::render_results(&self.state);
            }
            Err(e) => {
                if !self.state.listing.latest.is_current(ticket) {
                    return;
                }
                self.apply_error(e.to_string());
            }
        }
    }

    /// Algún filtro ha cambiado: primera página y recarga
    pub async fn filters_changed(&self) {
        log::info!("🔍 [LISTADO] Filtros cambiados");
        self.state.listing.reset_to_first_page();
        self.load_page().await;
    }

    /// Tecleo en el buscador: reprogramar el timeout de debounce.
    /// Guardar el nuevo timeout suelta el anterior, que se cancela solo.
    pub fn search_changed(&self) {
        let vm = self.clone();
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            spawn_local(async move {
                vm.state.listing.reset_to_first_page();
                vm.load_page().await;
            });
        });
        self.state.listing.schedule_search(timeout);
    }

    /// Click en una cabecera ordenable
    pub async fn sort_by(&self, column: u32) {
        self.state.listing.toggle_sort(column);
        self.load_page().await;
    }

    /// Página siguiente
    pub async fn next_page(&self) {
        if self.state.listing.next_page() {
            self.load_page().await;
        }
    }

    /// Página anterior
    pub async fn prev_page(&self) {
        if self.state.listing.prev_page() {
            self.load_page().await;
        }
    }

    /// Vaciar todos los filtros y recargar desde la primera página
    pub async fn reset_filters(&self) {
        log::info!("🧹 [LISTADO] Filtros reiniciados");
        set_select_value("stage-filter", "");
        set_input_value("date-filter", "");
        set_select_value("status-filter", "");
        set_input_value("appointments-search", "");
        self.state.listing.reset_to_first_page();
        self.load_page().await;
    }

    /// Navegar a la exportación del listado completo
    pub fn export_all(&self, kind: ExportKind) {
        let url = self.api_client.export_all_url(kind);
        log::info!("📄 [LISTADO] Exportando listado: {}", url);
        navigate_to(&url);
    }

    /// Navegar a la exportación de una cita concreta
    pub fn export_one(&self, id: u32, kind: ExportKind) {
        let url = self.api_client.export_one_url(id, kind);
        log::info!("📄 [LISTADO] Exportando cita {}: {}", id, url);
        navigate_to(&url);
    }

    /// Query de la próxima petición: paginación y orden del estado,
    /// filtros leídos de los controles en el momento de pedir
    fn snapshot_query(&self) -> crate::models::ListingQuery {
        let listing = &self.state.listing;
        crate::models::ListingQuery {
            draw: listing.latest.begin(),
            start: *listing.start.borrow(),
            length: *listing.length.borrow(),
            order_column: *listing.order_column.borrow(),
            order_dir: *listing.order_dir.borrow(),
            search: input_value("appointments-search"),
            stage: select_value("stage-filter"),
            date: input_value("date-filter"),
            status: select_value("status-filter"),
        }
    }

    fn apply_error(&self, message: String) {
        log::error!("❌ [LISTADO] {}", message);
        self.state.listing.set_loading(false);
        self.state.listing.set_error(Some(message.clone()));
        views::listing::render_results(&self.state);
        RefreshCoordinator::new(&self.state).notify_error(&message);
    }
}

fn navigate_to(url: &str) {
    if let Some(window) = window() {
        if let Err(e) = window.location().set_href(url) {
            log::warn!("⚠️ [LISTADO] No se pudo navegar a {}: {:?}", url, e);
        }
    }
}
