// ============================================================================
// VISITAS FRONTEND - CAPA DE PRESENTACIÓN MVVM (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI
// - Services: SOLO comunicación API
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con backend
// ============================================================================

mod app;
mod config;
mod dom;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    wasm_logger::init(Config::default());
    log::info!("🚀 Visitas Escolares - Rust Puro + MVVM");

    // Crear y renderizar app
    let app = App::new();
    app.render()?;

    // Guardar app en variable global
    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Registra el callback de refresco del calendario (llamable desde JavaScript).
/// El calendario de la página lo entrega en su propio arranque; mientras no
/// exista, el coordinador recurre a recargar la página si hay `#calendar`.
#[wasm_bindgen]
pub fn register_calendar_refresh(callback: js_sys::Function) {
    APP.with(|app_cell| {
        if let Some(ref app) = *app_cell.borrow() {
            let replacing = app.state().refresh.has_calendar();
            let cb = Rc::new(callback);
            app.state().refresh.register_calendar(move || {
                if let Err(e) = cb.call0(&JsValue::NULL) {
                    log::warn!("⚠️ [CALENDARIO] Callback de refresco falló: {:?}", e);
                }
            });
            if replacing {
                log::info!("📅 [CALENDARIO] Callback de refresco reemplazado");
            } else {
                log::info!("📅 [CALENDARIO] Callback de refresco registrado");
            }
        } else {
            log::warn!("⚠️ [CALENDARIO] App no está inicializada");
        }
    });
}

/// Relanza la carga del listado de citas (llamable desde JavaScript)
#[wasm_bindgen]
pub fn refresh_appointments() {
    APP.with(|app_cell| {
        if let Some(ref app) = *app_cell.borrow() {
            if !app.state().refresh.fire_listing() {
                log::warn!("⚠️ [REFRESCO] Listado no montado en esta página");
            }
        } else {
            log::warn!("⚠️ [REFRESCO] App no está inicializada");
        }
    });
}
