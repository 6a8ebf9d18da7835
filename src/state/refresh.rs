// ============================================================================
// REFRESH HUB - Callbacks de refresco de las vistas periféricas
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

/// Registro de callbacks de refresco. Cada vista montada registra el suyo
/// al arrancar; el coordinador los dispara tras cada mutación sin saber
/// cómo se refresca cada una. Un slot vacío simplemente no se dispara.
#[derive(Clone, Default)]
pub struct RefreshHub {
    listing: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
    calendar: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
    dashboard: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

impl RefreshHub {
    /// Registrar el refresco del listado de citas
    pub fn register_listing<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        *self.listing.borrow_mut() = Some(Rc::new(callback));
    }

    /// Registrar el refresco del calendario (normalmente desde JS)
    pub fn register_calendar<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        *self.calendar.borrow_mut() = Some(Rc::new(callback));
    }

    /// Registrar el refresco de los contadores del dashboard
    pub fn register_dashboard<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        *self.dashboard.borrow_mut() = Some(Rc::new(callback));
    }

    /// ¿Hay callback de calendario registrado?
    pub fn has_calendar(&self) -> bool {
        self.calendar.borrow().is_some()
    }

    /// Disparar el refresco del listado; devuelve si había callback
    pub fn fire_listing(&self) -> bool {
        Self::fire(&self.listing)
    }

    /// Disparar el refresco del calendario; devuelve si había callback
    pub fn fire_calendar(&self) -> bool {
        Self::fire(&self.calendar)
    }

    /// Disparar el refresco del dashboard; devuelve si había callback
    pub fn fire_dashboard(&self) -> bool {
        Self::fire(&self.dashboard)
    }

    fn fire(slot: &Rc<RefCell<Option<Rc<dyn Fn()>>>>) -> bool {
        // Clonar antes de invocar: el callback puede volver a tocar el slot
        let callback = slot.borrow().clone();
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn disparar_sin_registro_no_hace_nada() {
        let hub = RefreshHub::default();
        assert!(!hub.fire_listing());
        assert!(!hub.fire_calendar());
        assert!(!hub.fire_dashboard());
        assert!(!hub.has_calendar());
    }

    #[test]
    fn el_callback_registrado_se_invoca() {
        let hub = RefreshHub::default();
        let fired = Rc::new(Cell::new(0));
        let fired_clone = fired.clone();
        hub.register_listing(move || fired_clone.set(fired_clone.get() + 1));

        assert!(hub.fire_listing());
        assert!(hub.fire_listing());
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn registrar_de_nuevo_reemplaza_al_anterior() {
        let hub = RefreshHub::default();
        let first = Rc::new(Cell::new(false));
        let second = Rc::new(Cell::new(false));
        let first_clone = first.clone();
        let second_clone = second.clone();

        hub.register_calendar(move || first_clone.set(true));
        hub.register_calendar(move || second_clone.set(true));
        assert!(hub.has_calendar());
        assert!(hub.fire_calendar());

        assert!(!first.get());
        assert!(second.get());
    }

    #[test]
    fn los_slots_son_independientes() {
        let hub = RefreshHub::default();
        let dashboard_fired = Rc::new(Cell::new(false));
        let dashboard_clone = dashboard_fired.clone();
        hub.register_dashboard(move || dashboard_clone.set(true));

        assert!(!hub.fire_listing());
        assert!(hub.fire_dashboard());
        assert!(dashboard_fired.get());
    }
}
