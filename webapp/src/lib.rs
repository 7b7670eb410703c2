use tracing::warn;

pub mod category;
use category::CategoryPanel;

pub mod common;

pub mod config;
use config::SiteConfig;

pub mod contact;
use contact::ContactForm;

pub mod display_mode;
use display_mode::DisplayModeController;

pub mod tabs;
use tabs::TabController;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

// each feature binds to its own part of the page and is skipped if that part
// is missing; nothing here depends on another feature being present
pub fn start() {
    let Some(document) = common::dom::document() else {
        warn!("no document available, page controller not started");
        return;
    };

    let config = SiteConfig::from_document(&document);

    if let Some(tabs) = TabController::bind(&document, &config.tabs) {
        tabs.register();
        tabs.init();
    }

    if let Some(display_mode) = DisplayModeController::bind(&document, &config.display_mode) {
        display_mode.init();
        display_mode.register();
    }

    if let Some(category) = CategoryPanel::bind(&document, &config.category) {
        category.register();
    }

    if let Some(contact) = ContactForm::bind(&document, &config.contact) {
        contact.register();
    }
}
