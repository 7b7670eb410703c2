use serde::Deserialize;
use tracing::{debug, warn};
use web_sys::Document;

// pages may carry a <script type="application/json" id="wt-config"> block to
// override any of these; everything missing falls back to the defaults below
pub const CONFIG_ELEMENT_ID: &str = "wt-config";

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub tabs: TabsConfig,
    pub display_mode: DisplayModeConfig,
    pub category: CategoryConfig,
    pub contact: ContactConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TabsConfig {
    pub trigger_selector: String,
    pub panel_selector: String,
    // data attribute on each trigger naming the panel id
    pub target_attribute: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        TabsConfig {
            trigger_selector: String::from(".tab-btn"),
            panel_selector: String::from(".tab-content"),
            target_attribute: String::from("data-tab"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayModeConfig {
    pub toggle_id: String,
    pub glyph_selector: String,
    pub storage_key: String,
    pub dark_class: String,
}

impl Default for DisplayModeConfig {
    fn default() -> Self {
        DisplayModeConfig {
            toggle_id: String::from("darkToggle"),
            glyph_selector: String::from("i"),
            storage_key: String::from("wt-dark-mode"),
            dark_class: String::from("dark"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CategoryConfig {
    pub select_id: String,
    pub info_id: String,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        CategoryConfig {
            select_id: String::from("nationSelect"),
            info_id: String::from("nationInfo"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactConfig {
    pub form_selector: String,
    pub hide_delay_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        ContactConfig {
            form_selector: String::from(".contact-form"),
            hide_delay_ms: 4500,
        }
    }
}

impl SiteConfig {
    pub fn from_json(doc: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(doc)?)
    }

    pub fn from_document(document: &Document) -> Self {
        let Some(doc) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return SiteConfig::default();
        };

        match SiteConfig::from_json(&doc) {
            Ok(config) => {
                debug!("loaded page config from #{CONFIG_ELEMENT_ID}");
                config
            }
            Err(err) => {
                warn!("ignoring malformed #{CONFIG_ELEMENT_ID}: {err}");
                SiteConfig::default()
            }
        }
    }
}
