use std::rc::Rc;

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, HtmlSelectElement};

use crate::{common::dom, config::CategoryConfig};

pub const NATIONS: &[(&str, &str)] = &[
    (
        "USA",
        "USA: Balanced tech trees, strong aircraft & combined arms. Known for versatility.",
    ),
    (
        "Germany",
        "Germany: Excellent tanks and high-performance aircraft; good optics and shells.",
    ),
    (
        "USSR",
        "USSR: Tough tanks, effective HEAT rounds, robust aircraft at many tiers.",
    ),
    (
        "Japan",
        "Japan: Agile aircraft with great turn performance; lighter armor on tanks.",
    ),
    (
        "Great Britain",
        "Great Britain: Accurate guns, excellent turreted tanks and naval units.",
    ),
    (
        "China",
        "China: Recent additions with hybrid tech trees; varied options.",
    ),
    (
        "Italy",
        "Italy: Light-to-medium vehicles and unique tank/airplay characteristics.",
    ),
    (
        "France",
        "France: Auto-loading guns and fast tanks at certain tiers.",
    ),
    (
        "Sweden",
        "Sweden: Precise guns and balanced vehicles; unique early designs.",
    ),
    (
        "Israel",
        "Israel: Modern MBTs and advanced equipment in high tiers.",
    ),
];

pub fn lookup(key: &str) -> Option<&'static str> {
    NATIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, description)| *description)
}

// what the info box should show for a given selector value
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InfoDisplay {
    Hidden,
    Shown(String),
}

impl InfoDisplay {
    pub fn for_selection(key: &str) -> Self {
        if key.is_empty() {
            return InfoDisplay::Hidden;
        }

        match lookup(key) {
            Some(description) => InfoDisplay::Shown(String::from(description)),
            None => InfoDisplay::Shown(format!("Information about {key} not available.")),
        }
    }
}

pub struct CategoryPanel {
    select: HtmlSelectElement,
    info: HtmlElement,
}

impl CategoryPanel {
    pub fn bind(document: &Document, config: &CategoryConfig) -> Option<Rc<Self>> {
        let Some(select) = document.get_element_by_id(&config.select_id) else {
            debug!("no #{} on this page, nation info disabled", config.select_id);
            return None;
        };

        let Some(info) = dom::by_id::<HtmlElement>(document, &config.info_id) else {
            warn!(
                "#{} exists but #{} not found, nation info disabled",
                config.select_id, config.info_id
            );
            return None;
        };

        let select = match select.dyn_into::<HtmlSelectElement>() {
            Ok(val) => val,
            Err(_) => {
                warn!("#{} is not a <select>", config.select_id);
                return None;
            }
        };

        dom::set_display(&info, "none");

        Some(Rc::new(CategoryPanel { select, info }))
    }

    pub fn on_selection_change(&self, key: &str) {
        debug!("nation selected: {key:?}");

        match InfoDisplay::for_selection(key) {
            InfoDisplay::Hidden => {
                dom::set_display(&self.info, "none");
                self.info.set_text_content(Some(""));
            }
            InfoDisplay::Shown(text) => {
                self.info.set_text_content(Some(&text));
                dom::set_display(&self.info, "block");
            }
        }
    }

    pub fn register(self: &Rc<Self>) {
        let panel = Rc::clone(self);
        dom::listen(&self.select, "change", move |_: Event| {
            panel.on_selection_change(&panel.select.value())
        });
    }
}
