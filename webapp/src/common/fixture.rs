use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

// a scratch subtree of the test page, detached again on drop
pub struct Fixture {
    pub document: Document,
    root: Element,
}

impl Fixture {
    pub fn new(html: &str) -> Self {
        let document = super::dom::document().expect("test page has a document");
        let root = document.create_element("div").expect("create fixture root");
        root.set_inner_html(html);

        document
            .body()
            .expect("test page has a body")
            .append_child(&root)
            .expect("attach fixture");

        Fixture { document, root }
    }

    pub fn element<T: JsCast>(&self, selector: &str) -> T {
        self.root
            .query_selector(selector)
            .expect("valid selector")
            .unwrap_or_else(|| panic!("fixture has no {selector}"))
            .dyn_into::<T>()
            .unwrap_or_else(|_| panic!("{selector} has the wrong element type"))
    }

    pub fn all(&self, selector: &str) -> Vec<Element> {
        let list = self.root.query_selector_all(selector).expect("valid selector");
        (0..list.length())
            .filter_map(|idx| list.item(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.root.remove();
    }
}

pub fn window() -> Window {
    web_sys::window().expect("test page has a window")
}

pub fn location_hash() -> String {
    window().location().hash().expect("read location.hash")
}

pub fn history_length() -> u32 {
    window()
        .history()
        .expect("history")
        .length()
        .expect("history.length")
}

// swaps the fragment of the test page without adding an entry
pub fn set_location_hash(hash: &str) {
    let location = window().location();
    let path = location.pathname().expect("pathname");
    let search = location.search().expect("search");

    window()
        .history()
        .expect("history")
        .replace_state_with_url(&JsValue::NULL, "", Some(&format!("{path}{search}{hash}")))
        .expect("replaceState");
}
