// ============================================================================
// LISTING VIEW - Tabla paginada de citas
// ============================================================================

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

use crate::dom::{
    get_element_by_id, on_click, query_selector, set_class_name, set_disabled, set_inner_html,
    set_text_content,
};
use crate::models::{status_badge, ListingRow, SortDir};
use crate::services::ExportKind;
use crate::state::AppState;
use crate::utils::format::{escape_html, format_date_display, format_time_display};
use crate::viewmodels::{FormViewModel, ListingViewModel};

const LOADING_ROW_HTML: &str =
    r#"<tr><td colspan="6" class="text-center text-muted">Procesando...</td></tr>"#;
const EMPTY_ROW_HTML: &str =
    r#"<tr><td colspan="6" class="text-center text-muted">No se encontraron resultados</td></tr>"#;

/// Indicador de carga, solo mientras no hay filas previas que conservar
pub fn show_loading(state: &AppState) {
    if !state.listing.get_loading() || !state.listing.rows.borrow().is_empty() {
        return;
    }
    if let Some(tbody) = get_element_by_id("appointments-tbody") {
        set_inner_html(&tbody, LOADING_ROW_HTML);
    }
}

/// Volcar el estado del listado a la tabla: filas (o su fila de aviso),
/// contador, paginación e indicadores de orden
pub fn render_results(state: &AppState) {
    if let Err(e) = try_render_results(state) {
        log::error!("❌ [LISTADO] Error renderizando la tabla: {:?}", e);
    }
}

fn try_render_results(state: &AppState) -> Result<(), JsValue> {
    let tbody = match get_element_by_id("appointments-tbody") {
        Some(element) => element,
        None => return Ok(()),
    };

    let rows = state.listing.rows.borrow().clone();
    if rows.is_empty() {
        match state.listing.get_error() {
            Some(message) => set_inner_html(&tbody, &error_row_html(&message)),
            None => set_inner_html(&tbody, EMPTY_ROW_HTML),
        }
    } else {
        // Con error pero filas previas, se conservan las filas a la vista
        set_inner_html(&tbody, &rows_html(&rows));
        bind_row_actions(state, &rows)?;
    }

    update_info(state);
    update_pagination(state);
    update_sort_indicators(state);
    Ok(())
}

/// HTML de todas las filas
pub fn rows_html(rows: &[ListingRow]) -> String {
    rows.iter().map(row_html).collect()
}

/// HTML de una fila: fecha, hora, visitante, etapa, estado y acciones
pub fn row_html(row: &ListingRow) -> String {
    let date = row.date.as_deref().unwrap_or("");
    let course_line = match row.course_name.as_deref() {
        Some(course) if !course.is_empty() => format!(
            r#"<small class="text-muted">{}</small>"#,
            escape_html(course)
        ),
        _ => String::new(),
    };
    let (badge_class, badge_text) = status_badge(&row.status);

    format!(
        r#"<tr data-id="{id}">
    <td>{date}</td>
    <td>{time}</td>
    <td>
        <div>
            <div class="fw-bold">{name}</div>
            <small class="text-muted">{email}</small>
        </div>
    </td>
    <td>
        <div>
            <div>{stage}</div>
            {course_line}
        </div>
    </td>
    <td><span class="badge {badge_class}">{badge_text}</span></td>
    <td>
        <div class="btn-group btn-group-sm">
            <button class="btn btn-outline-primary edit-appointment" data-id="{id}" title="Editar">
                <i class="bi bi-pencil"></i>
            </button>
            <button class="btn btn-outline-danger delete-appointment" data-id="{id}" title="Eliminar">
                <i class="bi bi-trash"></i>
            </button>
            <button class="btn btn-outline-secondary export-appointment" data-id="{id}" title="Exportar PDF">
                <i class="bi bi-file-earmark-pdf"></i>
            </button>
        </div>
    </td>
</tr>
"#,
        id = row.id,
        date = format_date_display(date),
        time = format_time_display(date),
        name = escape_html(&row.visitor_name),
        email = escape_html(&row.visitor_email),
        stage = escape_html(&row.stage_name),
        course_line = course_line,
        badge_class = badge_class,
        badge_text = escape_html(&badge_text),
    )
}

fn error_row_html(message: &str) -> String {
    format!(
        r#"<tr><td colspan="6" class="text-center text-danger">{}</td></tr>"#,
        escape_html(message)
    )
}

/// Texto del contador, con las cadenas del paquete de idioma es-ES
pub fn pagination_label(start: u32, length: u32, filtered: u32, total: u32) -> String {
    let base = if filtered == 0 {
        "Mostrando registros del 0 al 0 de un total de 0 registros".to_string()
    } else {
        let first = start + 1;
        let last = (start + length).min(filtered);
        format!(
            "Mostrando registros del {} al {} de un total de {} registros",
            first, last, filtered
        )
    };
    if filtered != total {
        format!("{} (filtrado de un total de {} registros)", base, total)
    } else {
        base
    }
}

/// (página actual, páginas totales) a partir del estado de paginación
pub fn page_numbers(start: u32, length: u32, filtered: u32) -> (u32, u32) {
    if length == 0 {
        return (1, 1);
    }
    let pages = (filtered + length - 1) / length;
    (start / length + 1, pages.max(1))
}

fn update_info(state: &AppState) {
    if let Some(info) = get_element_by_id("appointments-info") {
        let label = pagination_label(
            *state.listing.start.borrow(),
            *state.listing.length.borrow(),
            *state.listing.records_filtered.borrow(),
            *state.listing.records_total.borrow(),
        );
        set_text_content(&info, &label);
    }
}

fn update_pagination(state: &AppState) {
    let (current, total) = page_numbers(
        *state.listing.start.borrow(),
        *state.listing.length.borrow(),
        *state.listing.records_filtered.borrow(),
    );
    if let Some(label) = get_element_by_id("appointments-page-label") {
        set_text_content(&label, &format!("Página {} de {}", current, total));
    }
    if let Some(prev) = get_element_by_id("appointments-prev") {
        let _ = set_disabled(&prev, current <= 1);
    }
    if let Some(next) = get_element_by_id("appointments-next") {
        let _ = set_disabled(&next, current >= total);
    }
}

fn update_sort_indicators(state: &AppState) {
    let order_column = *state.listing.order_column.borrow();
    let order_dir = *state.listing.order_dir.borrow();
    for column in 0..5u32 {
        if let Some(th) = get_element_by_id(&format!("appointments-th-{}", column)) {
            let class = if column == order_column {
                match order_dir {
                    SortDir::Asc => "sorting sorting_asc",
                    SortDir::Desc => "sorting sorting_desc",
                }
            } else {
                "sorting"
            };
            set_class_name(&th, class);
        }
    }
}

/// Conectar los botones de cada fila recién pintada
fn bind_row_actions(state: &AppState, rows: &[ListingRow]) -> Result<(), JsValue> {
    for row in rows {
        let id = row.id;

        let selector = format!("#appointments-tbody .edit-appointment[data-id='{}']", id);
        if let Some(button) = query_selector(&selector)? {
            let state_clone = state.clone();
            on_click(&button, move |_event| {
                let vm = FormViewModel::new(&state_clone);
                spawn_local(async move {
                    vm.open_edit(id).await;
                });
            })?;
        }

        let selector = format!("#appointments-tbody .delete-appointment[data-id='{}']", id);
        if let Some(button) = query_selector(&selector)? {
            let state_clone = state.clone();
            on_click(&button, move |_event| {
                let vm = FormViewModel::new(&state_clone);
                spawn_local(async move {
                    vm.delete(id).await;
                });
            })?;
        }

        let selector = format!("#appointments-tbody .export-appointment[data-id='{}']", id);
        if let Some(button) = query_selector(&selector)? {
            let state_clone = state.clone();
            on_click(&button, move |_event| {
                ListingViewModel::new(&state_clone).export_one(id, ExportKind::Pdf);
            })?;
        }
    }
    Ok(())
}
