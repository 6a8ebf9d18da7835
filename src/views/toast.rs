// ============================================================================
// TOAST VIEW - Avisos flotantes de éxito y error
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::dom::{append_child, document, get_element_by_id, ElementBuilder};
use crate::utils::constants::TOAST_DURATION_MS;

/// Tipo de aviso; fija color de fondo y clase
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Success => "toast-notification toast-success",
            Self::Error => "toast-notification toast-error",
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            Self::Success => "#198754",
            Self::Error => "#dc3545",
        }
    }
}

/// Aviso verde de operación completada
pub fn show_success(message: &str) {
    show(message, ToastKind::Success);
}

/// Aviso rojo de error
pub fn show_error(message: &str) {
    show(message, ToastKind::Error);
}

fn show(message: &str, kind: ToastKind) {
    if let Err(e) = try_show(message, kind) {
        log::warn!("⚠️ [TOAST] No se pudo mostrar el aviso: {:?}", e);
    }
}

fn try_show(message: &str, kind: ToastKind) -> Result<(), JsValue> {
    let container = ensure_container()?;

    let toast = ElementBuilder::new("div")?
        .class(kind.class())
        .text(message)
        .attr(
            "style",
            &format!(
                "background: {}; color: #fff; padding: 12px 20px; margin-top: 8px; \
                 border-radius: 6px; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.25); max-width: 320px;",
                kind.background()
            ),
        )?
        .build();
    append_child(&container, &toast)?;

    // Autodescarte pasado el tiempo fijo; forget porque el timeout vive solo
    let node = toast.clone();
    Timeout::new(TOAST_DURATION_MS, move || {
        node.remove();
    })
    .forget();

    Ok(())
}

/// Contenedor fijo arriba a la derecha; se crea la primera vez
fn ensure_container() -> Result<Element, JsValue> {
    if let Some(existing) = get_element_by_id("toast-container") {
        return Ok(existing);
    }
    let document = document().ok_or_else(|| JsValue::from_str("document no disponible"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("body no disponible"))?;

    let container = ElementBuilder::new("div")?
        .id("toast-container")?
        .attr("style", "position: fixed; top: 1rem; right: 1rem; z-index: 1080;")?
        .build();
    append_child(&body, &container)?;
    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cada_tipo_tiene_su_color() {
        assert_eq!(ToastKind::Success.background(), "#198754");
        assert_eq!(ToastKind::Error.background(), "#dc3545");
    }

    #[test]
    fn cada_tipo_tiene_su_clase() {
        assert!(ToastKind::Success.class().contains("toast-success"));
        assert!(ToastKind::Error.class().contains("toast-error"));
    }
}
