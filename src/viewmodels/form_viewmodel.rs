// ============================================================================
// FORM VIEWMODEL - Alta, edición y borrado de citas desde el modal
// ============================================================================

use crate::dom::{input_value, select_value, textarea_value, window};
use crate::models::AppointmentPayload;
use crate::services::ApiClient;
use crate::state::{AppState, FormMode};
use crate::utils::format::combine_datetime;
use crate::utils::validate::{is_allowed_duration, is_valid_email, is_valid_phone};
use crate::viewmodels::RefreshCoordinator;
use crate::views;

const MSG_NAME: &str = "El nombre es obligatorio";
const MSG_EMAIL: &str = "Introduce un email válido";
const MSG_PHONE: &str = "El teléfono debe contener exactamente 9 dígitos.";
const MSG_STAGE: &str = "Selecciona una etapa";
const MSG_COURSE: &str = "Selecciona un curso";
const MSG_DATE: &str = "La fecha es obligatoria";
const MSG_TIME: &str = "La hora es obligatoria";
const MSG_STATUS: &str = "Selecciona un estado";
const MSG_DURATION: &str = "Selecciona una duración válida";

/// Valores del formulario tal como se leen de los controles, sin convertir
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormValues {
    pub visitor_name: String,
    pub visitor_email: String,
    pub visitor_phone: String,
    pub stage: String,
    pub course: String,
    pub status: String,
    pub duration: String,
    pub date: String,
    pub time: String,
    pub comments: String,
    pub notes: String,
    pub follow_up_date: String,
    pub staff: String,
    /// La etapa elegida ofrece cursos, así que el curso es obligatorio
    pub course_required: bool,
    /// Los campos de seguimiento interno están visibles
    pub advanced_mode: bool,
}

/// Error de un campo concreto; `field` es el id del control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Validar el formulario completo; lista vacía = válido
pub fn validate(values: &FormValues) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if values.visitor_name.trim().is_empty() {
        errors.push(FieldError { field: "visitor_name", message: MSG_NAME });
    }
    if !is_valid_email(values.visitor_email.trim()) {
        errors.push(FieldError { field: "visitor_email", message: MSG_EMAIL });
    }
    if !is_valid_phone(&values.visitor_phone) {
        errors.push(FieldError { field: "visitor_phone", message: MSG_PHONE });
    }
    if values.stage.trim().parse::<u32>().is_err() {
        errors.push(FieldError { field: "stage", message: MSG_STAGE });
    }
    // El curso solo es obligatorio cuando la etapa ofrece cursos
    if values.course_required && values.course.trim().parse::<u32>().is_err() {
        errors.push(FieldError { field: "course", message: MSG_COURSE });
    }
    if values.date.trim().is_empty() {
        errors.push(FieldError { field: "date", message: MSG_DATE });
    }
    if values.time.trim().is_empty() {
        errors.push(FieldError { field: "time", message: MSG_TIME });
    }
    if values.status.trim().is_empty() {
        errors.push(FieldError { field: "status", message: MSG_STATUS });
    }
    match values.duration.trim().parse::<u32>() {
        Ok(minutes) if is_allowed_duration(minutes) => {}
        _ => errors.push(FieldError { field: "duration", message: MSG_DURATION }),
    }

    errors
}

/// Validar y convertir los valores al cuerpo JSON de la API.
/// Fecha y hora se combinan en un solo datetime ISO; los opcionales vacíos
/// no viajan en el cuerpo.
pub fn build_payload(values: &FormValues) -> Result<AppointmentPayload, Vec<FieldError>> {
    let errors = validate(values);
    if !errors.is_empty() {
        return Err(errors);
    }

    let stage = values
        .stage
        .trim()
        .parse::<u32>()
        .map_err(|_| vec![FieldError { field: "stage", message: MSG_STAGE }])?;
    let duration = values
        .duration
        .trim()
        .parse::<u32>()
        .map_err(|_| vec![FieldError { field: "duration", message: MSG_DURATION }])?;
    let course = if values.course_required {
        let id = values
            .course
            .trim()
            .parse::<u32>()
            .map_err(|_| vec![FieldError { field: "course", message: MSG_COURSE }])?;
        Some(id)
    } else {
        None
    };

    let trimmed_or_none = |raw: &str| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    };

    Ok(AppointmentPayload {
        date: combine_datetime(values.date.trim(), values.time.trim()),
        visitor_name: values.visitor_name.trim().to_string(),
        visitor_email: values.visitor_email.trim().to_string(),
        visitor_phone: values.visitor_phone.trim().to_string(),
        stage,
        course,
        status: values.status.trim().to_string(),
        duration,
        comments: trimmed_or_none(&values.comments),
        notes: if values.advanced_mode {
            trimmed_or_none(&values.notes)
        } else {
            None
        },
        follow_up_date: if values.advanced_mode {
            trimmed_or_none(&values.follow_up_date)
        } else {
            None
        },
        staff: values.staff.trim().parse::<u32>().ok(),
    })
}

/// ViewModel del formulario de citas
#[derive(Clone)]
pub struct FormViewModel {
    api_client: ApiClient,
    state: AppState,
}

impl FormViewModel {
    pub fn new(state: &AppState) -> Self {
        Self {
            api_client: state.api_client(),
            state: state.clone(),
        }
    }

    /// Abrir el modal vacío para dar de alta una cita
    pub fn open_create(&self) {
        log::info!("➕ [FORM] Abriendo formulario de cita nueva");
        self.state.form.set_mode(FormMode::Creating);
        self.state.form.clear_stage_options();
        views::form_modal::open_for_create();
    }

    /// Cargar una cita existente y abrir el modal en modo edición
    pub async fn open_edit(&self, id: u32) {
        log::info!("📝 [FORM] Editando cita {}", id);
        match self.api_client.get_appointment(id).await {
            Ok(appointment) => {
                self.state.form.set_mode(FormMode::Editing { id });
                views::form_modal::open_for_edit(&appointment);
                // Cursos y personal de la etapa, con los valores guardados preseleccionados
                self.load_stage_options(appointment.stage, appointment.course, appointment.staff)
                    .await;
            }
            Err(e) => {
                log::error!("❌ [FORM] No se pudo cargar la cita {}: {}", id, e);
                RefreshCoordinator::new(&self.state).notify_error(&e.to_string());
            }
        }
    }

    /// La etapa del formulario ha cambiado: recargar cursos y personal
    pub async fn stage_changed(&self) {
        let raw = select_value("stage");
        let stage_id = match raw.trim().parse::<u32>() {
            Ok(id) => id,
            Err(_) => {
                self.state.form.clear_stage_options();
                views::form_modal::set_course_options(&[], None);
                views::form_modal::set_staff_options(&[], None);
                return;
            }
        };
        self.load_stage_options(stage_id, None, None).await;
    }

    /// Validar, convertir y enviar el formulario según el modo actual
    pub async fn submit(&self) {
        let mode = self.state.form.get_mode();
        if mode.is_submitting() {
            log::warn!("⚠️ [FORM] Envío ignorado: ya hay una petición en vuelo");
            return;
        }
        if !mode.is_open() {
            return;
        }

        views::form_modal::clear_field_errors();
        let payload = match build_payload(&self.collect_values()) {
            Ok(payload) => payload,
            Err(errors) => {
                log::warn!("⚠️ [FORM] Formulario inválido: {} campos", errors.len());
                views::form_modal::show_field_errors(&errors);
                return;
            }
        };

        self.state.form.set_mode(mode.begin_submit());
        views::form_modal::set_submitting(true);

        let result = match mode {
            FormMode::Editing { id } => self.api_client.update_appointment(id, &payload).await,
            _ => self.api_client.create_appointment(&payload).await,
        };

        let coordinator = RefreshCoordinator::new(&self.state);
        match result {
            Ok(()) => {
                self.state.form.set_mode(FormMode::Closed);
                views::form_modal::set_submitting(false);
                views::form_modal::close();
                coordinator.after_mutation("Cita guardada correctamente");
            }
            Err(e) => {
                // Volver al modo anterior con los valores del usuario intactos
                let current = self.state.form.get_mode();
                self.state.form.set_mode(current.after_failure());
                views::form_modal::set_submitting(false);
                coordinator.notify_error(&e.to_string());
            }
        }
    }

    /// Borrar una cita, siempre previa confirmación del usuario
    pub async fn delete(&self, id: u32) {
        let confirmed = window()
            .and_then(|w| w.confirm_with_message("¿Está seguro de que desea eliminar esta cita?").ok())
            .unwrap_or(false);
        if !confirmed {
            log::info!("🚫 [CITAS] Borrado de la cita {} cancelado por el usuario", id);
            return;
        }

        let coordinator = RefreshCoordinator::new(&self.state);
        match self.api_client.delete_appointment(id).await {
            Ok(()) => coordinator.after_mutation("Cita eliminada correctamente"),
            Err(e) => {
                log::error!("❌ [CITAS] No se pudo borrar la cita {}: {}", id, e);
                coordinator.notify_error(&e.to_string());
            }
        }
    }

    /// Cerrar el modal descartando lo escrito
    pub fn cancel(&self) {
        self.state.form.set_mode(FormMode::Closed);
        views::form_modal::close();
    }

    async fn load_stage_options(
        &self,
        stage_id: u32,
        selected_course: Option<u32>,
        selected_staff: Option<u32>,
    ) {
        // Un fallo cargando cursos deja el selector oculto y el campo opcional
        match self.api_client.get_stage_courses(stage_id).await {
            Ok(courses) => {
                views::form_modal::set_course_options(&courses, selected_course);
                self.state.form.set_courses(courses);
            }
            Err(e) => {
                log::warn!("⚠️ [FORM] Cursos de la etapa {} no disponibles: {}", stage_id, e);
                self.state.form.set_courses(Vec::new());
                views::form_modal::set_course_options(&[], None);
            }
        }

        match self.api_client.get_staff_by_stage(stage_id).await {
            Ok(staff) => {
                views::form_modal::set_staff_options(&staff, selected_staff);
                self.state.form.set_staff_options(staff);
            }
            Err(e) => {
                log::warn!("⚠️ [FORM] Personal de la etapa {} no disponible: {}", stage_id, e);
                self.state.form.set_staff_options(Vec::new());
                views::form_modal::set_staff_options(&[], None);
            }
        }
    }

    fn collect_values(&self) -> FormValues {
        FormValues {
            visitor_name: input_value("visitor_name"),
            visitor_email: input_value("visitor_email"),
            visitor_phone: input_value("visitor_phone"),
            stage: select_value("stage"),
            course: select_value("course"),
            status: select_value("status"),
            duration: select_value("duration"),
            date: input_value("date"),
            time: input_value("time"),
            comments: textarea_value("comments"),
            notes: textarea_value("notes"),
            follow_up_date: input_value("follow_up_date"),
            staff: select_value("staff"),
            course_required: self.state.form.course_required(),
            advanced_mode: self.state.config.advanced_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valores_validos() -> FormValues {
        FormValues {
            visitor_name: "Ana García".to_string(),
            visitor_email: "ana@example.com".to_string(),
            visitor_phone: "612345678".to_string(),
            stage: "2".to_string(),
            course: String::new(),
            status: "pending".to_string(),
            duration: "45".to_string(),
            date: "2024-03-10".to_string(),
            time: "14:30".to_string(),
            comments: String::new(),
            notes: String::new(),
            follow_up_date: String::new(),
            staff: String::new(),
            course_required: false,
            advanced_mode: false,
        }
    }

    fn campos(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn un_formulario_completo_es_valido() {
        assert!(validate(&valores_validos()).is_empty());
    }

    #[test]
    fn nombre_vacio_o_en_blanco_falla() {
        let mut values = valores_validos();
        values.visitor_name = "   ".to_string();
        assert_eq!(campos(&validate(&values)), vec!["visitor_name"]);
    }

    #[test]
    fn email_sin_dominio_falla() {
        let mut values = valores_validos();
        values.visitor_email = "ana@".to_string();
        assert_eq!(campos(&validate(&values)), vec!["visitor_email"]);
    }

    #[test]
    fn telefono_de_ocho_digitos_falla() {
        let mut values = valores_validos();
        values.visitor_phone = "61234567".to_string();
        let errors = validate(&values);
        assert_eq!(campos(&errors), vec!["visitor_phone"]);
        assert_eq!(errors[0].message, MSG_PHONE);
    }

    #[test]
    fn duracion_fuera_del_conjunto_falla() {
        let mut values = valores_validos();
        values.duration = "40".to_string();
        assert_eq!(campos(&validate(&values)), vec!["duration"]);
    }

    #[test]
    fn curso_obligatorio_solo_cuando_la_etapa_tiene_cursos() {
        let mut values = valores_validos();
        values.course_required = true;
        values.course = String::new();
        assert_eq!(campos(&validate(&values)), vec!["course"]);

        values.course = "9".to_string();
        assert!(validate(&values).is_empty());

        values.course_required = false;
        values.course = String::new();
        assert!(validate(&values).is_empty());
    }

    #[test]
    fn varios_errores_se_acumulan() {
        let mut values = valores_validos();
        values.visitor_name = String::new();
        values.date = String::new();
        values.time = String::new();
        let fields = campos(&validate(&values));
        assert_eq!(fields, vec!["visitor_name", "date", "time"]);
    }

    #[test]
    fn el_payload_combina_fecha_y_hora() {
        let payload = build_payload(&valores_validos()).unwrap();
        assert_eq!(payload.date, "2024-03-10T14:30");
        assert_eq!(payload.stage, 2);
        assert_eq!(payload.duration, 45);
        assert_eq!(payload.status, "pending");
    }

    #[test]
    fn opcionales_vacios_quedan_fuera_del_payload() {
        let payload = build_payload(&valores_validos()).unwrap();
        assert_eq!(payload.course, None);
        assert_eq!(payload.comments, None);
        assert_eq!(payload.notes, None);
        assert_eq!(payload.follow_up_date, None);
        assert_eq!(payload.staff, None);
    }

    #[test]
    fn curso_y_personal_viajan_cuando_estan_elegidos() {
        let mut values = valores_validos();
        values.course_required = true;
        values.course = "9".to_string();
        values.staff = "4".to_string();
        let payload = build_payload(&values).unwrap();
        assert_eq!(payload.course, Some(9));
        assert_eq!(payload.staff, Some(4));
    }

    #[test]
    fn campos_avanzados_solo_en_modo_avanzado() {
        let mut values = valores_validos();
        values.notes = "Llamar antes".to_string();
        values.follow_up_date = "2024-04-01".to_string();

        let payload = build_payload(&values).unwrap();
        assert_eq!(payload.notes, None);
        assert_eq!(payload.follow_up_date, None);

        values.advanced_mode = true;
        let payload = build_payload(&values).unwrap();
        assert_eq!(payload.notes, Some("Llamar antes".to_string()));
        assert_eq!(payload.follow_up_date, Some("2024-04-01".to_string()));
    }

    #[test]
    fn comentarios_en_blanco_no_viajan() {
        let mut values = valores_validos();
        values.comments = "  \n ".to_string();
        let payload = build_payload(&values).unwrap();
        assert_eq!(payload.comments, None);

        values.comments = " Grupo de 25 alumnos ".to_string();
        let payload = build_payload(&values).unwrap();
        assert_eq!(payload.comments, Some("Grupo de 25 alumnos".to_string()));
    }

    #[test]
    fn un_formulario_invalido_no_produce_payload() {
        let mut values = valores_validos();
        values.stage = "no-numerica".to_string();
        let errors = build_payload(&values).unwrap_err();
        assert_eq!(campos(&errors), vec!["stage"]);
    }
}
