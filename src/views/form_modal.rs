// ============================================================================
// FORM MODAL VIEW - Modal de alta y edición de citas
// ============================================================================

use crate::dom::{
    add_class, get_element_by_id, remove_attribute, remove_class, set_attribute, set_disabled,
    set_input_value, set_inner_html, set_select_value, set_text_content, set_textarea_value,
};
use crate::models::{Appointment, AppointmentStatus, Course, StaffOption, Stage};
use crate::utils::constants::ALLOWED_DURATIONS;
use crate::utils::format::{escape_html, split_datetime};
use crate::viewmodels::form_viewmodel::FieldError;

/// Campos que pueden llevar anotación de error inline
const ANNOTATED_FIELDS: [&str; 10] = [
    "visitor_name",
    "visitor_email",
    "visitor_phone",
    "stage",
    "course",
    "date",
    "time",
    "status",
    "duration",
    "follow_up_date",
];

/// HTML completo del modal, oculto hasta que se le añade la clase `show`.
/// Los campos de seguimiento interno solo existen en modo avanzado.
pub fn modal_html(stages: &[Stage], advanced_mode: bool) -> String {
    let advanced_block = if advanced_mode {
        r#"                    <div class="col-md-8">
                        <label for="notes" class="form-label">Notas internas</label>
                        <textarea class="form-control" id="notes" rows="2"></textarea>
                    </div>
                    <div class="col-md-4">
                        <label for="follow_up_date" class="form-label">Fecha de seguimiento</label>
                        <input type="date" class="form-control" id="follow_up_date">
                        <div class="invalid-feedback" id="follow_up_date-error"></div>
                    </div>
"#
        .to_string()
    } else {
        String::new()
    };

    format!(
        r#"<div class="modal fade" id="appointmentModal" tabindex="-1" aria-labelledby="appointmentModalLabel" aria-hidden="true">
    <div class="modal-dialog modal-lg">
        <div class="modal-content">
            <div class="modal-header">
                <h5 class="modal-title" id="appointmentModalLabel">Nueva Cita</h5>
                <button type="button" class="btn-close" id="appointmentModalClose" aria-label="Cerrar"></button>
            </div>
            <div class="modal-body">
                <form id="appointmentForm" novalidate>
                    <input type="hidden" id="appointment_id">
                    <div class="row g-3">
                        <div class="col-md-6">
                            <label for="visitor_name" class="form-label">Nombre del visitante</label>
                            <input type="text" class="form-control" id="visitor_name" required>
                            <div class="invalid-feedback" id="visitor_name-error"></div>
                        </div>
                        <div class="col-md-6">
                            <label for="visitor_email" class="form-label">Email</label>
                            <input type="email" class="form-control" id="visitor_email" required>
                            <div class="invalid-feedback" id="visitor_email-error"></div>
                        </div>
                        <div class="col-md-6">
                            <label for="visitor_phone" class="form-label">Teléfono</label>
                            <input type="tel" class="form-control" id="visitor_phone" required>
                            <div class="invalid-feedback" id="visitor_phone-error"></div>
                        </div>
                        <div class="col-md-6">
                            <label for="stage" class="form-label">Etapa educativa</label>
                            <select class="form-select" id="stage" required>
{stage_options}                            </select>
                            <div class="invalid-feedback" id="stage-error"></div>
                        </div>
                        <div class="col-md-6 d-none" id="course-container">
                            <label for="course" class="form-label">Curso</label>
                            <select class="form-select" id="course">
                                <option value="">Selecciona un curso</option>
                            </select>
                            <div class="invalid-feedback" id="course-error"></div>
                        </div>
                        <div class="col-md-6" id="staff-container">
                            <label for="staff" class="form-label">Personal asignado</label>
                            <select class="form-select" id="staff">
                                <option value="">---------</option>
                            </select>
                        </div>
                        <div class="col-md-4">
                            <label for="date" class="form-label">Fecha</label>
                            <input type="date" class="form-control" id="date" required>
                            <div class="invalid-feedback" id="date-error"></div>
                        </div>
                        <div class="col-md-4">
                            <label for="time" class="form-label">Hora</label>
                            <input type="time" class="form-control" id="time" required>
                            <div class="invalid-feedback" id="time-error"></div>
                        </div>
                        <div class="col-md-4">
                            <label for="duration" class="form-label">Duración</label>
                            <select class="form-select" id="duration" required>
{duration_options}                            </select>
                            <div class="invalid-feedback" id="duration-error"></div>
                        </div>
                        <div class="col-md-4">
                            <label for="status" class="form-label">Estado</label>
                            <select class="form-select" id="status" required>
{status_options}                            </select>
                            <div class="invalid-feedback" id="status-error"></div>
                        </div>
                        <div class="col-md-8">
                            <label for="comments" class="form-label">Comentarios</label>
                            <textarea class="form-control" id="comments" rows="2"></textarea>
                        </div>
{advanced_block}                    </div>
                </form>
            </div>
            <div class="modal-footer">
                <button type="button" class="btn btn-secondary" id="cancelAppointment">Cancelar</button>
                <button type="button" class="btn btn-primary" id="saveAppointment">Guardar</button>
            </div>
        </div>
    </div>
</div>"#,
        stage_options = stage_options_html(stages),
        duration_options = duration_options_html(),
        status_options = status_options_html(),
        advanced_block = advanced_block,
    )
}

/// Opciones del selector de etapa, con placeholder vacío delante
pub fn stage_options_html(stages: &[Stage]) -> String {
    let mut html =
        String::from("                                <option value=\"\">Selecciona una etapa</option>\n");
    for stage in stages {
        html.push_str(&format!(
            "                                <option value=\"{}\">{}</option>\n",
            stage.id,
            escape_html(stage.name.as_deref().unwrap_or("Etapa Desconocida"))
        ));
    }
    html
}

/// Opciones del selector de curso
pub fn course_options_html(courses: &[Course]) -> String {
    let mut html = String::from(r#"<option value="">Selecciona un curso</option>"#);
    for course in courses {
        html.push_str(&format!(
            r#"<option value="{}">{}</option>"#,
            course.id,
            escape_html(&course.name)
        ));
    }
    html
}

/// Opciones del selector de personal, con el placeholder vacío del admin
pub fn staff_options_html(staff: &[StaffOption]) -> String {
    let mut html = String::from(r#"<option value="">---------</option>"#);
    for member in staff {
        html.push_str(&format!(
            r#"<option value="{}">{}</option>"#,
            member.id,
            escape_html(&member.name)
        ));
    }
    html
}

fn duration_options_html() -> String {
    let mut html =
        String::from("                                <option value=\"\">Selecciona duración</option>\n");
    for minutes in ALLOWED_DURATIONS {
        html.push_str(&format!(
            "                                <option value=\"{minutes}\">{minutes} minutos</option>\n"
        ));
    }
    html
}

fn status_options_html() -> String {
    let mut html = String::new();
    for status in AppointmentStatus::ALL {
        let selected = if status == AppointmentStatus::Pending {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "                                <option value=\"{}\"{}>{}</option>\n",
            status.code(),
            selected,
            status.label()
        ));
    }
    html
}

/// Abrir el modal vacío en modo alta
pub fn open_for_create() {
    reset_form();
    set_title("Nueva Cita");
    show_modal();
}

/// Abrir el modal con una cita cargada en modo edición
pub fn open_for_edit(appointment: &Appointment) {
    reset_form();
    set_title("Editar Cita");

    set_input_value("appointment_id", &appointment.id.to_string());
    set_input_value("visitor_name", &appointment.visitor_name);
    set_input_value("visitor_email", &appointment.visitor_email);
    set_input_value("visitor_phone", &appointment.visitor_phone);
    set_select_value("stage", &appointment.stage.to_string());

    // El datetime ISO se reparte entre los controles de fecha y hora
    if let Some((date, time)) = split_datetime(&appointment.date) {
        set_input_value("date", &date);
        set_input_value("time", &time);
    }

    if let Some(duration) = appointment.duration {
        set_select_value("duration", &duration.to_string());
    }
    set_select_value("status", &appointment.status);
    set_textarea_value("comments", appointment.comments.as_deref().unwrap_or(""));
    set_textarea_value("notes", appointment.notes.as_deref().unwrap_or(""));
    set_input_value(
        "follow_up_date",
        appointment.follow_up_date.as_deref().unwrap_or(""),
    );

    show_modal();
}

/// Cerrar el modal
pub fn close() {
    if let Some(modal) = get_element_by_id("appointmentModal") {
        let _ = remove_class(&modal, "show");
    }
}

/// Poblar el selector de curso. Lista vacía: campo oculto y opcional;
/// con cursos: visible, obligatorio y con el guardado preseleccionado.
pub fn set_course_options(courses: &[Course], selected: Option<u32>) {
    let container = get_element_by_id("course-container");
    let select = get_element_by_id("course");
    let (container, select) = match (container, select) {
        (Some(container), Some(select)) => (container, select),
        _ => {
            log::warn!("⚠️ [FORM] Selector de curso no encontrado");
            return;
        }
    };

    set_inner_html(&select, &course_options_html(courses));
    if courses.is_empty() {
        let _ = add_class(&container, "d-none");
        let _ = remove_attribute(&select, "required");
    } else {
        let _ = remove_class(&container, "d-none");
        let _ = set_attribute(&select, "required", "");
        let value = selected.map(|id| id.to_string()).unwrap_or_default();
        set_select_value("course", &value);
    }
}

/// Poblar el selector de personal asignable
pub fn set_staff_options(staff: &[StaffOption], selected: Option<u32>) {
    let select = match get_element_by_id("staff") {
        Some(select) => select,
        None => return,
    };
    set_inner_html(&select, &staff_options_html(staff));
    let value = selected.map(|id| id.to_string()).unwrap_or_default();
    set_select_value("staff", &value);
}

/// Bloquear o liberar el botón de guardar mientras hay un envío en vuelo
pub fn set_submitting(submitting: bool) {
    if let Some(button) = get_element_by_id("saveAppointment") {
        let _ = set_disabled(&button, submitting);
    }
}

/// Pintar los errores de validación campo a campo
pub fn show_field_errors(errors: &[FieldError]) {
    for error in errors {
        if let Some(input) = get_element_by_id(error.field) {
            let _ = add_class(&input, "is-invalid");
        }
        if let Some(feedback) = get_element_by_id(&format!("{}-error", error.field)) {
            set_text_content(&feedback, error.message);
        }
    }
}

/// Quitar todas las anotaciones de error
pub fn clear_field_errors() {
    for field in ANNOTATED_FIELDS {
        if let Some(input) = get_element_by_id(field) {
            let _ = remove_class(&input, "is-invalid");
        }
        if let Some(feedback) = get_element_by_id(&format!("{}-error", field)) {
            set_text_content(&feedback, "");
        }
    }
}

fn show_modal() {
    if let Some(modal) = get_element_by_id("appointmentModal") {
        let _ = add_class(&modal, "show");
    } else {
        log::warn!("⚠️ [FORM] Modal de cita no encontrado en la página");
    }
}

fn set_title(title: &str) {
    if let Some(label) = get_element_by_id("appointmentModalLabel") {
        set_text_content(&label, title);
    }
}

/// Valores por defecto del formulario: estado pendiente, curso oculto,
/// personal en su placeholder y sin errores pintados
fn reset_form() {
    set_input_value("appointment_id", "");
    set_input_value("visitor_name", "");
    set_input_value("visitor_email", "");
    set_input_value("visitor_phone", "");
    set_select_value("stage", "");
    set_input_value("date", "");
    set_input_value("time", "");
    set_select_value("duration", "");
    set_select_value("status", AppointmentStatus::Pending.code());
    set_textarea_value("comments", "");
    set_textarea_value("notes", "");
    set_input_value("follow_up_date", "");
    set_course_options(&[], None);
    set_staff_options(&[], None);
    clear_field_errors();
    set_submitting(false);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn etapas() -> Vec<Stage> {
        vec![
            Stage {
                id: 1,
                name: Some("Infantil".to_string()),
                subtitle: None,
                description: None,
                icon: None,
                features: Vec::new(),
            },
            Stage {
                id: 2,
                name: None,
                subtitle: None,
                description: None,
                icon: None,
                features: Vec::new(),
            },
        ]
    }

    #[test]
    fn el_modal_lleva_todos_los_controles_basicos() {
        let html = modal_html(&etapas(), false);
        for id in [
            "appointment_id",
            "visitor_name",
            "visitor_email",
            "visitor_phone",
            "stage",
            "course",
            "staff",
            "date",
            "time",
            "duration",
            "status",
            "comments",
            "saveAppointment",
            "cancelAppointment",
        ] {
            assert!(html.contains(&format!("id=\"{}\"", id)), "falta #{}", id);
        }
    }

    #[test]
    fn los_campos_avanzados_solo_en_modo_avanzado() {
        let basic = modal_html(&etapas(), false);
        assert!(!basic.contains("id=\"notes\""));
        assert!(!basic.contains("id=\"follow_up_date\""));

        let advanced = modal_html(&etapas(), true);
        assert!(advanced.contains("id=\"notes\""));
        assert!(advanced.contains("id=\"follow_up_date\""));
    }

    #[test]
    fn el_selector_de_etapas_usa_nombre_o_default() {
        let html = stage_options_html(&etapas());
        assert!(html.contains(r#"<option value="1">Infantil</option>"#));
        assert!(html.contains(r#"<option value="2">Etapa Desconocida</option>"#));
        assert!(html.starts_with("                                <option value=\"\">Selecciona una etapa</option>"));
    }

    #[test]
    fn el_curso_empieza_oculto_y_con_placeholder() {
        let html = modal_html(&etapas(), false);
        assert!(html.contains(r#"class="col-md-6 d-none" id="course-container""#));
        assert!(html.contains("Selecciona un curso"));
    }

    #[test]
    fn las_duraciones_permitidas_estan_en_el_selector() {
        let html = modal_html(&etapas(), false);
        assert!(html.contains(r#"<option value="30">30 minutos</option>"#));
        assert!(html.contains(r#"<option value="45">45 minutos</option>"#));
        assert!(html.contains(r#"<option value="60">60 minutos</option>"#));
        assert!(!html.contains(r#"<option value="40">"#));
    }

    #[test]
    fn el_estado_pendiente_sale_preseleccionado() {
        let html = modal_html(&etapas(), false);
        assert!(html.contains(r#"<option value="pending" selected>Pendiente</option>"#));
        assert!(html.contains(r#"<option value="completed">Realizada</option>"#));
        assert!(html.contains(r#"<option value="cancelled">Cancelada</option>"#));
    }

    #[test]
    fn las_opciones_de_curso_se_escapan() {
        let courses = vec![Course {
            id: 9,
            name: "1º <Primaria>".to_string(),
        }];
        let html = course_options_html(&courses);
        assert!(html.contains("1º &lt;Primaria&gt;"));
        assert!(html.starts_with(r#"<option value="">Selecciona un curso</option>"#));
    }

    #[test]
    fn el_personal_lleva_el_placeholder_del_admin() {
        let staff = vec![StaffOption {
            id: 4,
            name: "Marta Ruiz".to_string(),
        }];
        let html = staff_options_html(&staff);
        assert!(html.starts_with(r#"<option value="">---------</option>"#));
        assert!(html.contains(r#"<option value="4">Marta Ruiz</option>"#));
    }
}
