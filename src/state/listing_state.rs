// ============================================================================
// LISTING STATE - Estado del listado paginado de citas
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

use crate::models::{ListingRow, SortDir};
use crate::utils::constants::DEFAULT_PAGE_LENGTH;

/// Guardia de "la última petición gana": un único slot con el ticket vigente.
///
/// Cada carga del listado pide un ticket con `begin()`; al llegar la respuesta
/// se comprueba con `is_current()` y las respuestas de tickets antiguos se
/// descartan sin tocar el estado. El ticket viaja como `draw` en la petición
/// y el servidor lo devuelve tal cual.
#[derive(Clone, Default)]
pub struct LatestRequest {
    current: Rc<RefCell<u32>>,
}

impl LatestRequest {
    /// Emitir un ticket nuevo; invalida todos los anteriores
    pub fn begin(&self) -> u32 {
        let mut current = self.current.borrow_mut();
        *current += 1;
        *current
    }

    /// ¿Sigue siendo este el ticket vigente?
    pub fn is_current(&self, ticket: u32) -> bool {
        *self.current.borrow() == ticket
    }
}

/// Estado del listado de citas
#[derive(Clone)]
pub struct ListingState {
    pub latest: LatestRequest,
    pub start: Rc<RefCell<u32>>,
    pub length: Rc<RefCell<u32>>,
    pub order_column: Rc<RefCell<u32>>,
    pub order_dir: Rc<RefCell<SortDir>>,
    pub rows: Rc<RefCell<Vec<ListingRow>>>,
    pub records_total: Rc<RefCell<u32>>,
    pub records_filtered: Rc<RefCell<u32>>,
    pub loading: Rc<RefCell<bool>>,
    pub error: Rc<RefCell<Option<String>>>,
    /// Timeout pendiente del buscador; reemplazarlo cancela el anterior
    pub search_debounce: Rc<RefCell<Option<Timeout>>>,
}

impl ListingState {
    /// Crear nuevo estado de listado (orden inicial: fecha descendente)
    pub fn new() -> Self {
        Self {
            latest: LatestRequest::default(),
            start: Rc::new(RefCell::new(0)),
            length: Rc::new(RefCell::new(DEFAULT_PAGE_LENGTH)),
            order_column: Rc::new(RefCell::new(0)),
            order_dir: Rc::new(RefCell::new(SortDir::Desc)),
            rows: Rc::new(RefCell::new(Vec::new())),
            records_total: Rc::new(RefCell::new(0)),
            records_filtered: Rc::new(RefCell::new(0)),
            loading: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
            search_debounce: Rc::new(RefCell::new(None)),
        }
    }

    /// Establecer loading
    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    /// Obtener loading
    pub fn get_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Establecer error
    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    /// Obtener error
    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    /// Volver a la primera página (al cambiar filtros, búsqueda u orden)
    pub fn reset_to_first_page(&self) {
        *self.start.borrow_mut() = 0;
    }

    /// Avanzar a la página siguiente si existe
    pub fn next_page(&self) -> bool {
        let length = *self.length.borrow();
        let filtered = *self.records_filtered.borrow();
        let mut start = self.start.borrow_mut();
        if *start + length < filtered {
            *start += length;
            true
        } else {
            false
        }
    }

    /// Retroceder a la página anterior si existe
    pub fn prev_page(&self) -> bool {
        let length = *self.length.borrow();
        let mut start = self.start.borrow_mut();
        if *start >= length && *start > 0 {
            *start -= length;
            true
        } else if *start > 0 {
            *start = 0;
            true
        } else {
            false
        }
    }

    /// Cambiar la columna de orden; repetir columna invierte la dirección
    pub fn toggle_sort(&self, column: u32) {
        let mut order_column = self.order_column.borrow_mut();
        let mut order_dir = self.order_dir.borrow_mut();
        if *order_column == column {
            *order_dir = order_dir.toggled();
        } else {
            *order_column = column;
            *order_dir = SortDir::Asc;
        }
        drop(order_column);
        drop(order_dir);
        self.reset_to_first_page();
    }

    /// Aplicar una página recibida del servidor
    pub fn apply_page(&self, rows: Vec<ListingRow>, total: u32, filtered: u32) {
        *self.rows.borrow_mut() = rows;
        *self.records_total.borrow_mut() = total;
        *self.records_filtered.borrow_mut() = filtered;
        self.set_error(None);
        self.set_loading(false);
    }

    /// Programar el timeout del buscador; el anterior se cancela al soltarse
    pub fn schedule_search(&self, timeout: Timeout) {
        *self.search_debounce.borrow_mut() = Some(timeout);
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_posteriores_invalidan_los_anteriores() {
        let latest = LatestRequest::default();
        let primero = latest.begin();
        let segundo = latest.begin();
        assert_eq!(primero, 1);
        assert_eq!(segundo, 2);
        assert!(!latest.is_current(primero));
        assert!(latest.is_current(segundo));
    }

    #[test]
    fn el_ticket_vigente_deja_de_serlo_al_emitir_otro() {
        let latest = LatestRequest::default();
        let ticket = latest.begin();
        assert!(latest.is_current(ticket));
        latest.begin();
        assert!(!latest.is_current(ticket));
    }

    #[test]
    fn paginacion_avanza_y_retrocede_dentro_de_los_limites() {
        let state = ListingState::new();
        state.apply_page(Vec::new(), 42, 25);

        assert!(state.next_page());
        assert_eq!(*state.start.borrow(), 10);
        assert!(state.next_page());
        assert_eq!(*state.start.borrow(), 20);
        // 25 filtradas con longitud 10: no hay cuarta página
        assert!(!state.next_page());
        assert_eq!(*state.start.borrow(), 20);

        assert!(state.prev_page());
        assert_eq!(*state.start.borrow(), 10);
        assert!(state.prev_page());
        assert_eq!(*state.start.borrow(), 0);
        assert!(!state.prev_page());
    }

    #[test]
    fn repetir_columna_invierte_la_direccion() {
        let state = ListingState::new();
        assert_eq!(*state.order_column.borrow(), 0);
        assert_eq!(*state.order_dir.borrow(), SortDir::Desc);

        state.toggle_sort(0);
        assert_eq!(*state.order_dir.borrow(), SortDir::Asc);

        state.toggle_sort(2);
        assert_eq!(*state.order_column.borrow(), 2);
        assert_eq!(*state.order_dir.borrow(), SortDir::Asc);

        state.toggle_sort(2);
        assert_eq!(*state.order_dir.borrow(), SortDir::Desc);
    }

    #[test]
    fn cambiar_orden_vuelve_a_la_primera_pagina() {
        let state = ListingState::new();
        state.apply_page(Vec::new(), 42, 42);
        state.next_page();
        assert_eq!(*state.start.borrow(), 10);
        state.toggle_sort(1);
        assert_eq!(*state.start.borrow(), 0);
    }

    #[test]
    fn aplicar_pagina_limpia_error_y_loading() {
        let state = ListingState::new();
        state.set_loading(true);
        state.set_error(Some("fallo".to_string()));
        state.apply_page(Vec::new(), 5, 5);
        assert!(!state.get_loading());
        assert!(state.get_error().is_none());
        assert_eq!(*state.records_total.borrow(), 5);
    }
}
