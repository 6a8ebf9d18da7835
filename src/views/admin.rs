// ============================================================================
// ADMIN VIEW - Pantalla de gestión de citas (filtros + tabla + modal)
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, InputEvent, MouseEvent};

use wasm_bindgen_futures::spawn_local;

use crate::dom::{on_change, on_click, on_input, on_submit, ElementBuilder};
use crate::models::AppointmentStatus;
use crate::services::ExportKind;
use crate::state::AppState;
use crate::utils::format::escape_html;
use crate::viewmodels::{FormViewModel, ListingViewModel};
use crate::views::{dashboard, form_modal};

/// Construir la pantalla completa de administración y dejarla cableada:
/// filtros, buscador, tabla ordenable, paginación, exportaciones y modal.
pub fn render(state: &AppState) -> Result<Element, JsValue> {
    let stages = state.get_stages();

    let toolbar = ElementBuilder::new("div")?
        .class("card mb-4")
        .html(&toolbar_html(&stages))
        .build();
    let table = ElementBuilder::new("div")?
        .class("card")
        .html(&table_shell_html())
        .build();

    // Click en el fondo del modal (fuera del diálogo) también cierra
    let state_clone = state.clone();
    let modal = ElementBuilder::new("div")?
        .html(&form_modal::modal_html(&stages, state.config.advanced_mode))
        .on_click(move |event: MouseEvent| {
            let on_backdrop = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .map(|element| element.id() == "appointmentModal")
                .unwrap_or(false);
            if on_backdrop {
                FormViewModel::new(&state_clone).cancel();
            }
        })?
        .build();

    let root = ElementBuilder::new("div")?
        .class("appointments-admin")
        .child(toolbar.clone())?
        .child(table.clone())?
        .child(modal.clone())?
        .build();

    wire_toolbar(state, &toolbar)?;
    wire_table(state, &table)?;
    wire_modal(state, &modal)?;

    // El listado se refresca tras cada mutación con los filtros vigentes
    let state_clone = state.clone();
    state.refresh.register_listing(move || {
        let vm = ListingViewModel::new(&state_clone);
        spawn_local(async move {
            vm.load_page().await;
        });
    });

    dashboard::mount(state);

    // Primera carga
    let vm = ListingViewModel::new(state);
    spawn_local(async move {
        vm.load_page().await;
    });

    Ok(root)
}

/// Barra de filtros y acciones
pub fn toolbar_html(stages: &[crate::models::Stage]) -> String {
    let stage_options: String = stages
        .iter()
        .map(|stage| {
            format!(
                r#"                    <option value="{}">{}</option>
"#,
                stage.id,
                escape_html(stage.name.as_deref().unwrap_or("Etapa Desconocida"))
            )
        })
        .collect();
    let status_options: String = AppointmentStatus::ALL
        .iter()
        .map(|status| {
            format!(
                r#"                    <option value="{}">{}</option>
"#,
                status.code(),
                status.label()
            )
        })
        .collect();

    format!(
        r#"<div class="card-body">
    <div class="row g-2 align-items-end">
        <div class="col-md-3">
            <label for="stage-filter" class="form-label">Etapa</label>
            <select class="form-select" id="stage-filter">
                    <option value="">Todas las etapas</option>
{stage_options}            </select>
        </div>
        <div class="col-md-2">
            <label for="date-filter" class="form-label">Fecha</label>
            <input type="date" class="form-control" id="date-filter">
        </div>
        <div class="col-md-2">
            <label for="status-filter" class="form-label">Estado</label>
            <select class="form-select" id="status-filter">
                    <option value="">Todos los estados</option>
{status_options}            </select>
        </div>
        <div class="col-md-3">
            <label for="appointments-search" class="form-label">Buscar</label>
            <input type="search" class="form-control" id="appointments-search" placeholder="Nombre o email...">
        </div>
        <div class="col-md-2">
            <button type="button" class="btn btn-outline-secondary w-100" id="reset-filters">Limpiar</button>
        </div>
    </div>
    <div class="d-flex gap-2 mt-3">
        <button type="button" class="btn btn-primary" id="new-appointment">
            <i class="bi bi-plus-lg me-1"></i>Nueva Cita
        </button>
        <button type="button" class="btn btn-outline-danger ms-auto" id="export-pdf">
            <i class="bi bi-file-earmark-pdf me-1"></i>PDF
        </button>
        <button type="button" class="btn btn-outline-success" id="export-excel">
            <i class="bi bi-file-earmark-excel me-1"></i>Excel
        </button>
    </div>
</div>"#,
        stage_options = stage_options,
        status_options = status_options,
    )
}

/// Esqueleto de la tabla: cabeceras ordenables, cuerpo vacío, contador y
/// controles de paginación. Las filas las pinta el listado tras cada carga.
pub fn table_shell_html() -> String {
    r#"<div class="card-body">
    <div class="table-responsive">
        <table class="table table-striped align-middle" id="appointments-table">
            <thead>
                <tr>
                    <th id="appointments-th-0" class="sorting sorting_desc" data-column="0">Fecha</th>
                    <th id="appointments-th-1" class="sorting" data-column="1">Hora</th>
                    <th id="appointments-th-2" class="sorting" data-column="2">Visitante</th>
                    <th id="appointments-th-3" class="sorting" data-column="3">Etapa</th>
                    <th id="appointments-th-4" class="sorting" data-column="4">Estado</th>
                    <th>Acciones</th>
                </tr>
            </thead>
            <tbody id="appointments-tbody">
                <tr><td colspan="6" class="text-center text-muted">Procesando...</td></tr>
            </tbody>
        </table>
    </div>
    <div class="d-flex justify-content-between align-items-center mt-2">
        <span class="text-muted" id="appointments-info"></span>
        <div class="d-flex align-items-center gap-2">
            <button type="button" class="btn btn-sm btn-outline-secondary" id="appointments-prev">Anterior</button>
            <span id="appointments-page-label"></span>
            <button type="button" class="btn btn-sm btn-outline-secondary" id="appointments-next">Siguiente</button>
        </div>
    </div>
</div>"#
        .to_string()
}

fn wire_toolbar(state: &AppState, toolbar: &Element) -> Result<(), JsValue> {
    for selector in ["#stage-filter", "#date-filter", "#status-filter"] {
        let state_clone = state.clone();
        wire_change(toolbar, selector, move |_event: Event| {
            let vm = ListingViewModel::new(&state_clone);
            spawn_local(async move {
                vm.filters_changed().await;
            });
        })?;
    }

    {
        let state_clone = state.clone();
        wire_input(toolbar, "#appointments-search", move |_event: InputEvent| {
            ListingViewModel::new(&state_clone).search_changed();
        })?;
    }

    {
        let state_clone = state.clone();
        wire_click(toolbar, "#reset-filters", move |_event: MouseEvent| {
            let vm = ListingViewModel::new(&state_clone);
            spawn_local(async move {
                vm.reset_filters().await;
            });
        })?;
    }

    {
        let state_clone = state.clone();
        wire_click(toolbar, "#new-appointment", move |_event: MouseEvent| {
            FormViewModel::new(&state_clone).open_create();
        })?;
    }

    {
        let state_clone = state.clone();
        wire_click(toolbar, "#export-pdf", move |_event: MouseEvent| {
            ListingViewModel::new(&state_clone).export_all(ExportKind::Pdf);
        })?;
    }
    {
        let state_clone = state.clone();
        wire_click(toolbar, "#export-excel", move |_event: MouseEvent| {
            ListingViewModel::new(&state_clone).export_all(ExportKind::Excel);
        })?;
    }

    Ok(())
}

fn wire_table(state: &AppState, table: &Element) -> Result<(), JsValue> {
    // Columnas ordenables; la de acciones no ordena
    for column in 0..5u32 {
        let state_clone = state.clone();
        wire_click(table, &format!("#appointments-th-{}", column), move |_event: MouseEvent| {
            let vm = ListingViewModel::new(&state_clone);
            spawn_local(async move {
                vm.sort_by(column).await;
            });
        })?;
    }

    {
        let state_clone = state.clone();
        wire_click(table, "#appointments-prev", move |_event: MouseEvent| {
            let vm = ListingViewModel::new(&state_clone);
            spawn_local(async move {
                vm.prev_page().await;
            });
        })?;
    }
    {
        let state_clone = state.clone();
        wire_click(table, "#appointments-next", move |_event: MouseEvent| {
            let vm = ListingViewModel::new(&state_clone);
            spawn_local(async move {
                vm.next_page().await;
            });
        })?;
    }

    Ok(())
}

fn wire_modal(state: &AppState, modal: &Element) -> Result<(), JsValue> {
    {
        let state_clone = state.clone();
        wire_click(modal, "#saveAppointment", move |_event: MouseEvent| {
            let vm = FormViewModel::new(&state_clone);
            spawn_local(async move {
                vm.submit().await;
            });
        })?;
    }

    // Enter dentro del formulario equivale a pulsar Guardar
    {
        let state_clone = state.clone();
        wire_submit(modal, "#appointmentForm", move |_event: Event| {
            let vm = FormViewModel::new(&state_clone);
            spawn_local(async move {
                vm.submit().await;
            });
        })?;
    }

    for selector in ["#cancelAppointment", "#appointmentModalClose"] {
        let state_clone = state.clone();
        wire_click(modal, selector, move |_event: MouseEvent| {
            FormViewModel::new(&state_clone).cancel();
        })?;
    }

    {
        let state_clone = state.clone();
        wire_change(modal, "#stage", move |_event: Event| {
            let vm = FormViewModel::new(&state_clone);
            spawn_local(async move {
                vm.stage_changed().await;
            });
        })?;
    }

    Ok(())
}

fn wire_click<F>(root: &Element, selector: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    match root.query_selector(selector)? {
        Some(element) => on_click(&element, handler),
        None => {
            log::warn!("⚠️ [ADMIN] Control {} no encontrado", selector);
            Ok(())
        }
    }
}

fn wire_change<F>(root: &Element, selector: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    match root.query_selector(selector)? {
        Some(element) => on_change(&element, handler),
        None => {
            log::warn!("⚠️ [ADMIN] Control {} no encontrado", selector);
            Ok(())
        }
    }
}

fn wire_input<F>(root: &Element, selector: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(InputEvent) + 'static,
{
    match root.query_selector(selector)? {
        Some(element) => on_input(&element, handler),
        None => {
            log::warn!("⚠️ [ADMIN] Control {} no encontrado", selector);
            Ok(())
        }
    }
}

fn wire_submit<F>(root: &Element, selector: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    match root.query_selector(selector)? {
        Some(element) => on_submit(&element, handler),
        None => {
            log::warn!("⚠️ [ADMIN] Control {} no encontrado", selector);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stage;

    #[test]
    fn la_barra_lleva_filtros_buscador_y_acciones() {
        let stages = vec![Stage {
            id: 2,
            name: Some("Primaria".to_string()),
            subtitle: None,
            description: None,
            icon: None,
            features: Vec::new(),
        }];
        let html = toolbar_html(&stages);
        for id in [
            "stage-filter",
            "date-filter",
            "status-filter",
            "appointments-search",
            "reset-filters",
            "new-appointment",
            "export-pdf",
            "export-excel",
        ] {
            assert!(html.contains(&format!("id=\"{}\"", id)), "falta #{}", id);
        }
        assert!(html.contains("Todas las etapas"));
        assert!(html.contains("Todos los estados"));
        assert!(html.contains(r#"<option value="2">Primaria</option>"#));
        assert!(html.contains(r#"<option value="pending">Pendiente</option>"#));
    }

    #[test]
    fn la_tabla_arranca_ordenada_por_fecha_descendente() {
        let html = table_shell_html();
        assert!(html.contains(r#"id="appointments-th-0" class="sorting sorting_desc""#));
        assert!(html.contains(r#"id="appointments-th-4" class="sorting""#));
        assert!(html.contains(r#"id="appointments-tbody""#));
    }

    #[test]
    fn la_columna_de_acciones_no_es_ordenable() {
        let html = table_shell_html();
        assert!(html.contains("<th>Acciones</th>"));
        assert!(!html.contains("appointments-th-5"));
    }
}
