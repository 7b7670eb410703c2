// the active tab is mirrored into the url fragment with history.replaceState,
// so switching tabs never adds history entries or scrolls to the panel

use std::{cell::RefCell, rc::Rc};

use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent};

use crate::{
    common::dom::{self, JsResultExt},
    config::TabsConfig,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Direction::Previous),
            "ArrowRight" => Some(Direction::Next),
            _ => None,
        }
    }
}

// active-tab state, independent of the dom
//
// ids holds the target id of each trigger in document order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabSet {
    ids: Vec<String>,
    active: Option<String>,
}

impl TabSet {
    pub fn new(ids: Vec<String>) -> Self {
        TabSet { ids, active: None }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_index(&self) -> Option<usize> {
        let active = self.active.as_deref()?;
        self.ids.iter().position(|id| id == active)
    }

    pub fn is_active(&self, idx: usize) -> bool {
        self.ids
            .get(idx)
            .is_some_and(|id| self.active.as_deref() == Some(id.as_str()))
    }

    // false, with the state untouched, unless id names a panel
    pub fn select(&mut self, id: &str, panel_exists: impl Fn(&str) -> bool) -> bool {
        if id.is_empty() || !panel_exists(id) {
            return false;
        }

        self.active = Some(id.to_owned());
        true
    }

    // wraps at both ends
    pub fn neighbor(&self, direction: Direction) -> Option<usize> {
        let current = self.active_index()?;
        let len = self.ids.len();

        Some(match direction {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current + len - 1) % len,
        })
    }

    // url fragment if it names a panel, otherwise the first trigger's target
    pub fn initial(
        &self,
        fragment: Option<&str>,
        panel_exists: impl Fn(&str) -> bool,
    ) -> Option<String> {
        if let Some(fragment) = fragment
            && panel_exists(fragment)
        {
            return Some(fragment.to_owned());
        }

        self.ids.first().filter(|id| !id.is_empty()).cloned()
    }
}

// location.hash comes back with the leading '#', or empty
pub fn fragment_id(hash: &str) -> Option<&str> {
    let id = hash.strip_prefix('#').unwrap_or(hash);
    (!id.is_empty()).then_some(id)
}

pub struct TabController {
    document: Document,
    triggers: Vec<HtmlElement>,
    panels: Vec<Element>,
    state: RefCell<TabSet>,
}

impl TabController {
    pub fn bind(document: &Document, config: &TabsConfig) -> Option<Rc<Self>> {
        let triggers: Vec<HtmlElement> = dom::query_all(document, &config.trigger_selector)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();
        let panels = dom::query_all(document, &config.panel_selector);

        if triggers.is_empty() {
            warn!("no tab buttons ({}) found", config.trigger_selector);
        }
        if panels.is_empty() {
            warn!("no tab contents ({}) found", config.panel_selector);
        }
        if triggers.is_empty() && panels.is_empty() {
            return None;
        }

        let ids = triggers
            .iter()
            .map(|trigger| {
                trigger
                    .get_attribute(&config.target_attribute)
                    .unwrap_or_default()
            })
            .collect();

        Some(Rc::new(TabController {
            document: document.clone(),
            triggers,
            panels,
            state: RefCell::new(TabSet::new(ids)),
        }))
    }

    pub fn active(&self) -> Option<String> {
        self.state.borrow().active().map(String::from)
    }

    pub fn activate(&self, tab_id: &str, update_url: bool) {
        if tab_id.is_empty() {
            return;
        }

        let found = self
            .state
            .borrow_mut()
            .select(tab_id, |id| self.is_panel(id));

        if !found {
            warn!("activate: target tab not found for id {tab_id}");
            return;
        }

        self.render();

        if update_url && let Err(err) = replace_fragment(tab_id) {
            debug!("could not update url fragment: {err}");
        }
    }

    // runs once, after register(); never touches the url
    pub fn init(&self) {
        let hash = web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .unwrap_or_default();

        let initial = self
            .state
            .borrow()
            .initial(fragment_id(&hash), |id| self.is_panel(id));

        match initial {
            Some(tab_id) => self.activate(&tab_id, false),
            None => debug!("no tab to activate on load"),
        }

        self.normalize_tabindex();

        if let Some(active) = self.active() {
            info!("initial active tab: {active}");
        }
    }

    pub fn register(self: &Rc<Self>) {
        for (idx, trigger) in self.triggers.iter().enumerate() {
            let controller = Rc::clone(self);
            dom::listen(trigger, "click", move |_: Event| controller.on_click(idx));

            let target = trigger.clone();
            dom::listen(trigger, "keydown", move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), "Enter" | " ") {
                    event.prevent_default();
                    target.click();
                }
            });
        }

        let controller = Rc::clone(self);
        dom::listen(&self.document, "keydown", move |event: KeyboardEvent| {
            controller.on_arrow_key(&event)
        });
    }

    fn is_panel(&self, id: &str) -> bool {
        self.panels.iter().any(|panel| panel.id() == id)
    }

    fn on_click(&self, idx: usize) {
        let tab_id = self.state.borrow().ids().get(idx).cloned();

        if let Some(tab_id) = tab_id {
            self.activate(&tab_id, true);
        }
    }

    fn on_arrow_key(&self, event: &KeyboardEvent) {
        let Some(direction) = Direction::from_key(&event.key()) else {
            return;
        };

        if self
            .document
            .active_element()
            .is_some_and(|el| dom::is_text_editable(&el))
        {
            return;
        }

        let Some(next) = self.state.borrow().neighbor(direction) else {
            return;
        };

        if let Some(trigger) = self.triggers.get(next) {
            if let Err(err) = trigger.focus().js_context("focus") {
                debug!("{err}");
            }
            trigger.click();
        }
    }

    fn render(&self) {
        let state = self.state.borrow();

        for (idx, trigger) in self.triggers.iter().enumerate() {
            let on = state.is_active(idx);

            dom::toggle_class(trigger, "active", on);
            dom::set_attribute(trigger, "aria-selected", if on { "true" } else { "false" });
            dom::set_attribute(trigger, "tabindex", if on { "0" } else { "-1" });
        }

        for panel in &self.panels {
            let on = state.active() == Some(panel.id().as_str());

            dom::toggle_class(panel, "active", on);
            dom::set_attribute(panel, "aria-hidden", if on { "false" } else { "true" });
        }
    }

    // only the active trigger is reachable with tab; also covers pages where
    // nothing could be activated
    fn normalize_tabindex(&self) {
        let state = self.state.borrow();

        for (idx, trigger) in self.triggers.iter().enumerate() {
            let tabindex = if state.is_active(idx) { "0" } else { "-1" };
            dom::set_attribute(trigger, "tabindex", tabindex);
        }
    }
}

fn replace_fragment(tab_id: &str) -> anyhow::Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow::Error::msg("no window"))?;

    window
        .history()
        .js_context("history")?
        .replace_state_with_url(&JsValue::NULL, "", Some(&format!("#{tab_id}")))
        .js_context("replaceState")
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use wasm_bindgen_test::wasm_bindgen_test;
    use web_sys::{HtmlInputElement, KeyboardEventInit};

    use super::*;
    use crate::common::fixture::{Fixture, history_length, location_hash, set_location_hash};

    const PAGE: &str = r#"
        <button class="tt-btn" data-tab="tt-home">Home</button>
        <button class="tt-btn" data-tab="tt-nations">Nations</button>
        <button class="tt-btn" data-tab="tt-contact">Contact</button>
        <section class="tt-panel" id="tt-home"></section>
        <section class="tt-panel" id="tt-nations"><p id="tt-info"></p></section>
        <section class="tt-panel" id="tt-contact"><input id="tt-input" type="text"></section>
    "#;

    fn config() -> TabsConfig {
        TabsConfig {
            trigger_selector: String::from(".tt-btn"),
            panel_selector: String::from(".tt-panel"),
            target_attribute: String::from("data-tab"),
        }
    }

    fn bound(fixture: &Fixture) -> Rc<TabController> {
        TabController::bind(&fixture.document, &config()).expect("fixture has tabs")
    }

    fn active_ids(fixture: &Fixture, selector: &str, attribute: &str) -> Vec<String> {
        fixture
            .all(selector)
            .into_iter()
            .filter(|el| el.class_list().contains("active"))
            .map(|el| el.get_attribute(attribute).unwrap_or_default())
            .collect()
    }

    fn arrow(key: &str) -> KeyboardEvent {
        let init = KeyboardEventInit::new();
        init.set_key(key);
        KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("keyboard event")
    }

    #[wasm_bindgen_test]
    fn activate_marks_one_trigger_and_one_panel() {
        let fixture = Fixture::new(PAGE);
        let tabs = bound(&fixture);

        for id in ["tt-home", "tt-nations", "tt-contact"] {
            tabs.activate(id, false);

            assert_eq!(active_ids(&fixture, ".tt-btn", "data-tab"), vec![id]);
            assert_eq!(active_ids(&fixture, ".tt-panel", "id"), vec![id]);

            let shown: Vec<String> = fixture
                .all(".tt-panel")
                .into_iter()
                .filter(|el| el.get_attribute("aria-hidden").as_deref() == Some("false"))
                .map(|el| el.id())
                .collect();
            assert_eq!(shown, vec![id]);

            let selected: Vec<String> = fixture
                .all(".tt-btn")
                .into_iter()
                .filter(|el| el.get_attribute("aria-selected").as_deref() == Some("true"))
                .filter(|el| el.get_attribute("tabindex").as_deref() == Some("0"))
                .filter_map(|el| el.get_attribute("data-tab"))
                .collect();
            assert_eq!(selected, vec![id]);
        }
    }

    #[wasm_bindgen_test]
    fn element_that_is_not_a_panel_keeps_active_tab() {
        let fixture = Fixture::new(PAGE);
        let tabs = bound(&fixture);
        tabs.activate("tt-nations", false);

        tabs.activate("tt-info", true);
        tabs.activate("tt-missing", true);

        assert_eq!(tabs.active().as_deref(), Some("tt-nations"));
        assert_eq!(active_ids(&fixture, ".tt-panel", "id"), vec!["tt-nations"]);
        assert_ne!(location_hash(), "#tt-info");
    }

    #[wasm_bindgen_test]
    fn init_uses_fragment_without_writing_history() {
        let fixture = Fixture::new(PAGE);
        set_location_hash("#tt-nations");
        let entries = history_length();

        let tabs = bound(&fixture);
        tabs.init();

        assert_eq!(tabs.active().as_deref(), Some("tt-nations"));
        assert_eq!(location_hash(), "#tt-nations");
        assert_eq!(history_length(), entries);
        set_location_hash("");
    }

    #[wasm_bindgen_test]
    fn init_falls_back_to_first_trigger_and_leaves_url_alone() {
        let fixture = Fixture::new(PAGE);
        // names an element on the page, but not a panel
        set_location_hash("#tt-info");

        let tabs = bound(&fixture);
        tabs.init();

        assert_eq!(tabs.active().as_deref(), Some("tt-home"));
        assert_eq!(active_ids(&fixture, ".tt-panel", "id"), vec!["tt-home"]);
        assert_eq!(location_hash(), "#tt-info");
        set_location_hash("");
    }

    #[wasm_bindgen_test]
    fn click_replaces_fragment_in_place() {
        let fixture = Fixture::new(PAGE);
        set_location_hash("");
        let tabs = bound(&fixture);
        tabs.register();
        tabs.init();
        let entries = history_length();

        fixture.element::<HtmlElement>("[data-tab=\"tt-contact\"]").click();

        assert_eq!(tabs.active().as_deref(), Some("tt-contact"));
        assert_eq!(location_hash(), "#tt-contact");
        assert_eq!(history_length(), entries);
        set_location_hash("");
    }

    #[wasm_bindgen_test]
    fn arrows_wrap_and_skip_text_inputs() {
        let fixture = Fixture::new(PAGE);
        let tabs = bound(&fixture);
        tabs.register();
        tabs.activate("tt-home", false);

        tabs.on_arrow_key(&arrow("ArrowLeft"));
        assert_eq!(tabs.active().as_deref(), Some("tt-contact"));

        tabs.on_arrow_key(&arrow("ArrowRight"));
        assert_eq!(tabs.active().as_deref(), Some("tt-home"));

        fixture
            .element::<HtmlInputElement>("#tt-input")
            .focus()
            .expect("focus input");
        tabs.on_arrow_key(&arrow("ArrowRight"));
        assert_eq!(tabs.active().as_deref(), Some("tt-home"));
        set_location_hash("");
    }
}
