use std::rc::Rc;

use tracing::{debug, warn};
use web_sys::{Document, Element, Event};

use crate::{
    common::{
        dom,
        storage::{LocalStore, PreferenceStore},
    },
    config::DisplayModeConfig,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    // anything other than the dark sentinel, including nothing at all, is light
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("1") => DisplayMode::Dark,
            _ => DisplayMode::Light,
        }
    }

    pub fn as_stored(self) -> &'static str {
        match self {
            DisplayMode::Dark => "1",
            DisplayMode::Light => "0",
        }
    }

    pub fn is_dark(self) -> bool {
        self == DisplayMode::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Dark => DisplayMode::Light,
            DisplayMode::Light => DisplayMode::Dark,
        }
    }

    // icon offered on the toggle is the mode a click would switch to
    pub fn glyph_class(self) -> &'static str {
        match self {
            DisplayMode::Dark => "fa-solid fa-sun",
            DisplayMode::Light => "fa-solid fa-moon",
        }
    }
}

pub fn load_mode(store: &impl PreferenceStore, key: &str) -> DisplayMode {
    DisplayMode::from_stored(store.get(key).as_deref())
}

// written back before returning
pub fn toggle_mode(store: &impl PreferenceStore, key: &str, current: DisplayMode) -> DisplayMode {
    let next = current.toggled();
    store.set(key, next.as_stored());
    next
}

pub struct DisplayModeController<S: PreferenceStore = LocalStore> {
    root: Element,
    toggle: Element,
    config: DisplayModeConfig,
    store: S,
}

impl DisplayModeController<LocalStore> {
    pub fn bind(document: &Document, config: &DisplayModeConfig) -> Option<Rc<Self>> {
        let Some(toggle) = document.get_element_by_id(&config.toggle_id) else {
            warn!(
                "no dark toggle (#{}) found, display mode switching disabled",
                config.toggle_id
            );
            return None;
        };

        let Some(root) = document.document_element() else {
            warn!("document has no root element");
            return None;
        };

        Some(Rc::new(DisplayModeController {
            root,
            toggle,
            config: config.clone(),
            store: LocalStore::new(),
        }))
    }
}

impl<S: PreferenceStore + 'static> DisplayModeController<S> {
    // the class on the root element is the source of truth, so anything else
    // on the page that flips it is picked up on the next toggle
    pub fn current(&self) -> DisplayMode {
        if self.root.class_list().contains(&self.config.dark_class) {
            DisplayMode::Dark
        } else {
            DisplayMode::Light
        }
    }

    pub fn init(&self) {
        let mode = load_mode(&self.store, &self.config.storage_key);
        if mode.is_dark() {
            self.apply(mode);
        }

        debug!("display mode on load: {mode:?}");
        self.sync_icon();
    }

    pub fn toggle(&self) {
        let next = toggle_mode(&self.store, &self.config.storage_key, self.current());

        self.apply(next);
        self.sync_icon();
    }

    pub fn register(self: &Rc<Self>) {
        let controller = Rc::clone(self);
        dom::listen(&self.toggle, "click", move |_: Event| controller.toggle());
    }

    fn apply(&self, mode: DisplayMode) {
        dom::toggle_class(&self.root, &self.config.dark_class, mode.is_dark());
    }

    fn sync_icon(&self) {
        let Some(glyph) = dom::query_in(&self.toggle, &self.config.glyph_selector) else {
            return;
        };

        glyph.set_class_name(self.current().glyph_class());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::storage::testing::MemoryStore;

    const KEY: &str = "wt-dark-mode";

    #[test]
    fn stored_values() {
        assert_eq!(DisplayMode::from_stored(Some("1")), DisplayMode::Dark);
        assert_eq!(DisplayMode::from_stored(Some("0")), DisplayMode::Light);
        assert_eq!(DisplayMode::from_stored(None), DisplayMode::Light);
        assert_eq!(DisplayMode::from_stored(Some("true")), DisplayMode::Light);
        assert_eq!(DisplayMode::from_stored(Some("")), DisplayMode::Light);
    }

    #[test]
    fn glyph_offers_the_other_mode() {
        assert_eq!(DisplayMode::Dark.glyph_class(), "fa-solid fa-sun");
        assert_eq!(DisplayMode::Light.glyph_class(), "fa-solid fa-moon");
    }

    #[test]
    fn missing_preference_loads_light() {
        let store = MemoryStore::default();
        assert_eq!(load_mode(&store, KEY), DisplayMode::Light);
    }

    #[test]
    fn toggle_persists_each_change() {
        let store = MemoryStore::default();

        let mode = toggle_mode(&store, KEY, DisplayMode::Light);
        assert_eq!(mode, DisplayMode::Dark);
        assert_eq!(store.get(KEY).as_deref(), Some("1"));

        let mode = toggle_mode(&store, KEY, mode);
        assert_eq!(mode, DisplayMode::Light);
        assert_eq!(store.get(KEY).as_deref(), Some("0"));
    }

    #[test]
    fn double_toggle_round_trips() {
        let store = MemoryStore::with(KEY, "1");
        let start = load_mode(&store, KEY);

        let once = toggle_mode(&store, KEY, start);
        let twice = toggle_mode(&store, KEY, once);

        assert_eq!(twice, start);
        assert_eq!(load_mode(&store, KEY), start);
        assert_eq!(store.get(KEY).as_deref(), Some(start.as_stored()));
    }
}
