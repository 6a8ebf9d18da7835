// ============================================================================
// DASHBOARD VIEW - Contadores y próximas visitas del panel
// ============================================================================
//
// El panel lo pinta el servidor; aquí solo se actualizan sus valores in situ
// tras cada mutación. Si la página no tiene panel, no se registra nada.

use wasm_bindgen_futures::spawn_local;

use crate::dom::{get_element_by_id, set_inner_html, set_text_content};
use crate::models::{DashboardStats, UpcomingAppointment};
use crate::state::AppState;
use crate::utils::format::{escape_html, format_date_display, format_time_display};

/// Registrar el refresco del panel si la página lo tiene montado
pub fn mount(state: &AppState) {
    if get_element_by_id("dashboard-stats").is_none() {
        return;
    }
    log::info!("📊 [DASHBOARD] Panel detectado, registrando refresco");

    let state_clone = state.clone();
    state.refresh.register_dashboard(move || {
        let state = state_clone.clone();
        spawn_local(async move {
            refresh(&state).await;
        });
    });

    // Repintado inmediato desde caché, y primer fetch para alinear con el servidor
    if let Some(stats) = state.get_stats() {
        update(&stats);
    }
    let state_clone = state.clone();
    spawn_local(async move {
        refresh(&state_clone).await;
    });
}

/// Re-pedir las estadísticas y volcarlas al panel
pub async fn refresh(state: &AppState) {
    let api_client = state.api_client();
    match api_client.get_dashboard_stats(state.config.staff_id).await {
        Ok(stats) => {
            update(&stats);
            state.set_stats(Some(stats));
        }
        Err(e) => {
            log::warn!("⚠️ [DASHBOARD] No se pudieron refrescar las estadísticas: {}", e);
        }
    }
}

fn update(stats: &DashboardStats) {
    set_counter("today-count", stats.today_count);
    set_counter("confirmed-count", stats.confirmed_count);
    set_counter("pending-count", stats.pending_count);
    set_counter("stages-count", stats.stages_count);
    if let Some(list) = get_element_by_id("upcoming-appointments") {
        set_inner_html(&list, &upcoming_html(&stats.upcoming_appointments));
    }
}

fn set_counter(id: &str, value: u32) {
    if let Some(element) = get_element_by_id(id) {
        set_text_content(&element, &value.to_string());
    }
}

/// HTML de la lista de próximas visitas
pub fn upcoming_html(items: &[UpcomingAppointment]) -> String {
    if items.is_empty() {
        return r#"<div class="list-group-item text-muted text-center">No hay próximas visitas</div>"#
            .to_string();
    }
    items.iter().map(upcoming_item_html).collect()
}

fn upcoming_item_html(item: &UpcomingAppointment) -> String {
    let stage_line = if item.stage_name.is_empty() {
        String::new()
    } else {
        format!(
            r#"<small class="text-muted">{}</small>"#,
            escape_html(&item.stage_name)
        )
    };
    format!(
        r#"<div class="list-group-item d-flex justify-content-between align-items-center">
    <div>
        <div class="fw-bold">{name}</div>
        {stage_line}
    </div>
    <span class="text-muted">{date} {time}</span>
</div>
"#,
        name = escape_html(&item.visitor_name),
        stage_line = stage_line,
        date = format_date_display(&item.date),
        time = format_time_display(&item.date),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sin_proximas_visitas_sale_el_aviso() {
        let html = upcoming_html(&[]);
        assert!(html.contains("No hay próximas visitas"));
    }

    #[test]
    fn cada_visita_lleva_nombre_etapa_y_fecha() {
        let items = vec![UpcomingAppointment {
            id: Some(7),
            date: "2024-03-10T14:30:00".to_string(),
            visitor_name: "Ana García".to_string(),
            stage_name: "Primaria".to_string(),
        }];
        let html = upcoming_html(&items);
        assert!(html.contains("Ana García"));
        assert!(html.contains("Primaria"));
        assert!(html.contains("10/03/2024 14:30"));
    }

    #[test]
    fn sin_etapa_no_hay_linea_secundaria() {
        let items = vec![UpcomingAppointment {
            id: None,
            date: "2024-03-10T09:00:00".to_string(),
            visitor_name: "Luis".to_string(),
            stage_name: String::new(),
        }];
        let html = upcoming_html(&items);
        assert!(!html.contains("text-muted\"></small>"));
        assert!(html.contains("Luis"));
    }

    #[test]
    fn el_nombre_del_visitante_se_escapa() {
        let items = vec![UpcomingAppointment {
            id: None,
            date: "2024-03-10T09:00:00".to_string(),
            visitor_name: "<b>Luis</b>".to_string(),
            stage_name: String::new(),
        }];
        assert!(upcoming_html(&items).contains("&lt;b&gt;Luis&lt;/b&gt;"));
    }
}
