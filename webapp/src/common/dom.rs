use anyhow::anyhow;

use tracing::warn;
use wasm_bindgen::{JsCast, JsValue, convert::FromWasmAbi, prelude::Closure};
use web_sys::{Document, Element, EventTarget, HtmlElement};

// browser apis report failures as opaque JsValues, so give them some context
// before they end up in anyhow
pub trait JsResultExt<T> {
    fn js_context(self, what: &str) -> anyhow::Result<T>;
}

impl<T> JsResultExt<T> for Result<T, JsValue> {
    fn js_context(self, what: &str) -> anyhow::Result<T> {
        self.map_err(|err| anyhow!("{what}: {err:?}"))
    }
}

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

// a selector that fails to parse is treated the same as one that matches nothing
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document
        .query_selector(selector)
        .js_context(selector)
        .unwrap_or_else(|err| {
            warn!("invalid selector: {err}");
            None
        })
}

pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector)
        .js_context(selector)
        .unwrap_or_else(|err| {
            warn!("invalid selector: {err}");
            None
        })
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector).js_context(selector) {
        Ok(val) => val,
        Err(err) => {
            warn!("invalid selector: {err}");
            return Vec::new();
        }
    };

    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn set_display(element: &HtmlElement, value: &str) {
    if let Err(err) = element
        .style()
        .set_property("display", value)
        .js_context("set display")
    {
        warn!("{err}");
    }
}

pub fn set_attribute(element: &Element, name: &str, value: &str) {
    if let Err(err) = element.set_attribute(name, value).js_context(name) {
        warn!("failed to set attribute: {err}");
    }
}

pub fn toggle_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let result = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };

    if let Err(err) = result.js_context(class) {
        warn!("failed to toggle class: {err}");
    }
}

// inputs, textareas and contenteditable regions keep the arrow keys for themselves
pub fn is_text_editable(element: &Element) -> bool {
    match element.tag_name().as_str() {
        "INPUT" | "TEXTAREA" => true,
        _ => element
            .dyn_ref::<HtmlElement>()
            .is_some_and(|el| el.is_content_editable()),
    }
}

// handlers are registered once per page load and live as long as the page does,
// so the closure is intentionally leaked to the js side
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F)
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);

    if let Err(err) = target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .js_context(event)
    {
        warn!("failed to register listener: {err}");
    }

    closure.forget();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;
    use crate::common::fixture::Fixture;

    #[wasm_bindgen_test]
    fn bad_selectors_match_nothing() {
        let fixture = Fixture::new(r#"<form id="qs-form"><input type="text"></form>"#);
        let form: Element = fixture.element("#qs-form");

        assert!(query_in(&form, "input[type=\"text\"]").is_some());
        assert!(query_in(&form, "input[type=").is_none());
        assert!(query(&fixture.document, "#qs-form[").is_none());
        assert!(query_all(&fixture.document, ":::").is_empty());
    }
}
