// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Establecer class name (reemplaza todas las clases)
pub fn set_class_name(element: &Element, class: &str) {
    element.set_class_name(class);
}

/// Agregar clase
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| JsValue::from_str("Element is not an HtmlElement"))?
        .class_list()
        .add_1(class)
}

/// Remover clase
pub fn remove_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| JsValue::from_str("Element is not an HtmlElement"))?
        .class_list()
        .remove_1(class)
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Establecer inner HTML
pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

/// Agregar hijo
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Remover atributo
pub fn remove_attribute(element: &Element, name: &str) -> Result<(), JsValue> {
    element.remove_attribute(name)
}

/// Habilitar/deshabilitar un control (botón submit durante el envío)
pub fn set_disabled(element: &Element, disabled: bool) -> Result<(), JsValue> {
    if disabled {
        set_attribute(element, "disabled", "disabled")
    } else {
        remove_attribute(element, "disabled")
    }
}

/// Query selector sobre el documento
pub fn query_selector(selector: &str) -> Result<Option<Element>, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))?
        .query_selector(selector)
}

// ============================================================================
// Lectura/escritura de controles de formulario por id
// Un control inexistente lee como cadena vacía y escribe como no-op
// ============================================================================

/// Valor de un <input>
pub fn input_value(id: &str) -> String {
    get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

/// Establecer valor de un <input>
pub fn set_input_value(id: &str, value: &str) {
    if let Some(input) = get_element_by_id(id).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
        input.set_value(value);
    }
}

/// Valor de un <select>
pub fn select_value(id: &str) -> String {
    get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
        .unwrap_or_default()
}

/// Establecer valor de un <select> (la opción debe existir ya)
pub fn set_select_value(id: &str, value: &str) {
    if let Some(select) = get_element_by_id(id).and_then(|el| el.dyn_into::<HtmlSelectElement>().ok()) {
        select.set_value(value);
    }
}

/// Valor de un <textarea>
pub fn textarea_value(id: &str) -> String {
    get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|area| area.value())
        .unwrap_or_default()
}

/// Establecer valor de un <textarea>
pub fn set_textarea_value(id: &str, value: &str) {
    if let Some(area) = get_element_by_id(id).and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok()) {
        area.set_value(value);
    }
}
