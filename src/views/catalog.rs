// ============================================================================
// CATALOG VIEW - Catálogo público de etapas educativas
// ============================================================================

use web_sys::Element;

use crate::config::read_school_stages;
use crate::dom::set_inner_html;
use crate::models::{Stage, StageIcon};
use crate::utils::format::{capitalize_first, escape_html};

const EMPTY_MESSAGE_HTML: &str =
    r#"<p class="text-danger">No se encontraron etapas educativas disponibles.</p>"#;

/// Renderizar el catálogo en su raíz. Sin etapas válidas publicadas por la
/// página anfitriona se muestra el mensaje de catálogo vacío.
pub fn render(root: &Element) {
    match read_school_stages() {
        Ok(stages) => {
            log::info!("📚 [CATALOGO] Renderizando {} etapas", stages.len());
            set_inner_html(root, &catalog_html(&stages));
        }
        Err(e) => {
            log::error!("❌ [CATALOGO] {}", e);
            set_inner_html(root, EMPTY_MESSAGE_HTML);
        }
    }
}

/// HTML del grid completo de tarjetas
pub fn catalog_html(stages: &[Stage]) -> String {
    let cards: String = stages.iter().map(|stage| stage_card_html(stage)).collect();
    format!(
        r#"<div class="container py-5">
    <div class="row g-4">
{}    </div>
</div>"#,
        cards
    )
}

/// Tarjeta de una etapa. Los campos ausentes caen a sus textos por defecto;
/// todo lo que viene del anfitrión se escapa antes de interpolarse.
fn stage_card_html(stage: &Stage) -> String {
    let icon = StageIcon::from_token(stage.icon.as_deref().unwrap_or("📚"));
    let name = escape_html(stage.name.as_deref().unwrap_or("Etapa Desconocida"));
    let subtitle = escape_html(stage.subtitle.as_deref().unwrap_or(""));
    let description = escape_html(&capitalize_first(
        stage.description.as_deref().unwrap_or("Descripción no disponible."),
    ));

    let features: String = stage
        .features
        .iter()
        .map(|feature| {
            format!(
                r#"                        <li class="d-flex align-items-center mb-2">
                            <i class="fas fa-check-circle text-primary me-2"></i>
                            {}
                        </li>
"#,
                escape_html(feature)
            )
        })
        .collect();

    format!(
        r#"        <div class="col-12 col-md-6 col-lg-4">
            <div class="card h-100 border-0 shadow-sm hover-shadow rounded-3 overflow-hidden">
                <div class="bg-primary text-white text-center p-4">
                    <div class="stage-icon display-4 mb-2">
                        <i class="{icon}"></i>
                    </div>
                    <h3 class="h4 mb-1">{name}</h3>
                    <p class="text-white-50 small mb-0">{subtitle}</p>
                </div>
                <div class="card-body p-4 d-flex flex-column">
                    <p class="text-muted mb-4 fs-6">
                        {description}
                    </p>
                    <ul class="list-unstyled mb-4 flex-grow-1">
{features}                    </ul>
                    <a href="/reservar/{id}/"
                       class="btn btn-primary py-2 fw-semibold d-flex align-items-center justify-content-center gap-2 mt-auto">
                        <i class="fas fa-calendar-alt me-1"></i>
                        Reservar Visita
                    </a>
                </div>
            </div>
        </div>
"#,
        icon = icon.css_class(),
        name = name,
        subtitle = subtitle,
        description = description,
        features = features,
        id = stage.id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn etapa(id: u32) -> Stage {
        Stage {
            id,
            name: Some("Primaria".to_string()),
            subtitle: Some("6-12 años".to_string()),
            description: Some("visitas guiadas por las aulas".to_string()),
            icon: Some("🎨".to_string()),
            features: vec!["Talleres".to_string(), "Comedor".to_string()],
        }
    }

    #[test]
    fn una_tarjeta_por_etapa_con_su_enlace() {
        let html = catalog_html(&[etapa(3), etapa(8)]);
        assert_eq!(html.matches("card h-100").count(), 2);
        assert!(html.contains(r#"href="/reservar/3/""#));
        assert!(html.contains(r#"href="/reservar/8/""#));
    }

    #[test]
    fn la_descripcion_se_capitaliza() {
        let html = stage_card_html(&etapa(1));
        assert!(html.contains("Visitas guiadas por las aulas"));
    }

    #[test]
    fn el_icono_conocido_usa_su_glifo() {
        let html = stage_card_html(&etapa(1));
        assert!(html.contains("fa-paint-brush"));
    }

    #[test]
    fn los_campos_ausentes_caen_a_sus_defaults() {
        let stage = Stage {
            id: 5,
            name: None,
            subtitle: None,
            description: None,
            icon: None,
            features: Vec::new(),
        };
        let html = stage_card_html(&stage);
        assert!(html.contains("Etapa Desconocida"));
        assert!(html.contains("Descripción no disponible."));
        assert!(html.contains("fa-book-open"));
    }

    #[test]
    fn el_contenido_del_anfitrion_se_escapa() {
        let stage = Stage {
            id: 1,
            name: Some("<script>alert(1)</script>".to_string()),
            subtitle: None,
            description: None,
            icon: None,
            features: vec!["<b>negrita</b>".to_string()],
        };
        let html = stage_card_html(&stage);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;negrita&lt;/b&gt;"));
    }

    #[test]
    fn el_grid_vacio_no_tiene_tarjetas() {
        let html = catalog_html(&[]);
        assert!(html.contains("row g-4"));
        assert!(!html.contains("card h-100"));
    }
}
