// ============================================================================
// FORM STATE - Estado del modal de alta/edición de citas
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Course, StaffOption};

/// Modo del modal de cita. El formulario es una máquina de estados:
/// `Closed` → `Creating`/`Editing` → `Submitting` → `Closed` si la petición
/// termina bien, o de vuelta al modo anterior si falla.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    /// Modal cerrado
    Closed,
    /// Alta de cita nueva
    Creating,
    /// Edición de la cita indicada
    Editing { id: u32 },
    /// Petición de guardado en vuelo; `editing_id` recuerda el modo previo
    Submitting { editing_id: Option<u32> },
}

impl FormMode {
    /// ¿Está el modal abierto en algún modo?
    pub fn is_open(self) -> bool {
        self != FormMode::Closed
    }

    /// ¿Hay una petición de guardado en vuelo?
    pub fn is_submitting(self) -> bool {
        matches!(self, FormMode::Submitting { .. })
    }

    /// Id de la cita en edición, si la hay
    pub fn editing_id(self) -> Option<u32> {
        match self {
            FormMode::Editing { id } => Some(id),
            FormMode::Submitting { editing_id } => editing_id,
            _ => None,
        }
    }

    /// Transición al enviar el formulario; desde `Closed` o `Submitting`
    /// no hay envío posible y el modo no cambia
    pub fn begin_submit(self) -> FormMode {
        match self {
            FormMode::Creating => FormMode::Submitting { editing_id: None },
            FormMode::Editing { id } => FormMode::Submitting { editing_id: Some(id) },
            other => other,
        }
    }

    /// Transición tras un guardado fallido: volver al modo anterior
    /// con los valores del usuario intactos
    pub fn after_failure(self) -> FormMode {
        match self {
            FormMode::Submitting { editing_id: None } => FormMode::Creating,
            FormMode::Submitting { editing_id: Some(id) } => FormMode::Editing { id },
            other => other,
        }
    }
}

/// Estado del formulario de citas
#[derive(Clone)]
pub struct FormState {
    pub mode: Rc<RefCell<FormMode>>,
    /// Cursos de la etapa seleccionada; vacío ⇒ selector oculto
    pub courses: Rc<RefCell<Vec<Course>>>,
    /// Personal asignable a la etapa seleccionada
    pub staff_options: Rc<RefCell<Vec<StaffOption>>>,
}

impl FormState {
    /// Crear nuevo estado de formulario
    pub fn new() -> Self {
        Self {
            mode: Rc::new(RefCell::new(FormMode::Closed)),
            courses: Rc::new(RefCell::new(Vec::new())),
            staff_options: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Establecer modo
    pub fn set_mode(&self, mode: FormMode) {
        log::info!("📝 [FORM] Modo: {:?}", mode);
        *self.mode.borrow_mut() = mode;
    }

    /// Obtener modo
    pub fn get_mode(&self) -> FormMode {
        *self.mode.borrow()
    }

    /// Establecer cursos de la etapa actual
    pub fn set_courses(&self, courses: Vec<Course>) {
        *self.courses.borrow_mut() = courses;
    }

    /// ¿El curso es obligatorio? Solo cuando la etapa ofrece cursos
    pub fn course_required(&self) -> bool {
        !self.courses.borrow().is_empty()
    }

    /// Establecer personal de la etapa actual
    pub fn set_staff_options(&self, staff: Vec<StaffOption>) {
        *self.staff_options.borrow_mut() = staff;
    }

    /// Vaciar cursos y personal (al cerrar o al deseleccionar etapa)
    pub fn clear_stage_options(&self) {
        self.courses.borrow_mut().clear();
        self.staff_options.borrow_mut().clear();
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
