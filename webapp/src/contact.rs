// nothing is ever sent anywhere: submission is intercepted and an inline
// message reports the outcome for a few seconds

use std::{cell::RefCell, rc::Rc};

use gloo_timers::callback::Timeout;
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
};

use crate::{
    common::dom::{self, JsResultExt},
    config::ContactConfig,
};

pub const ERROR_TEXT: &str = "Please fill all fields before sending.";
pub const SUCCESS_TEXT: &str = "Thanks — your message was (simulated) sent.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Incomplete,
    Sent,
}

impl Submission {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Submission {
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
            message: message.trim().to_owned(),
        }
    }

    pub fn validate(&self) -> Outcome {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            Outcome::Incomplete
        } else {
            Outcome::Sent
        }
    }
}

impl Outcome {
    pub fn text(self) -> &'static str {
        match self {
            Outcome::Incomplete => ERROR_TEXT,
            Outcome::Sent => SUCCESS_TEXT,
        }
    }

    // (background, color)
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            Outcome::Incomplete => ("#ffe6e6", "#800"),
            Outcome::Sent => ("#e6ffea", "#064"),
        }
    }

    pub fn resets_form(self) -> bool {
        self == Outcome::Sent
    }
}

pub struct ContactForm {
    form: HtmlFormElement,
    message: HtmlElement,
    hide_delay_ms: u32,
    // dropping a Timeout cancels it, so replacing this on every submit means
    // only the latest message's hide is ever pending
    pending_hide: RefCell<Option<Timeout>>,
}

impl ContactForm {
    pub fn bind(document: &Document, config: &ContactConfig) -> Option<Rc<Self>> {
        let Some(form) = dom::query(document, &config.form_selector)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        else {
            debug!("no contact form ({}) on this page", config.form_selector);
            return None;
        };

        let message = match create_message_element(document, &form) {
            Ok(val) => val,
            Err(err) => {
                warn!("contact form disabled: {err}");
                return None;
            }
        };

        Some(Rc::new(ContactForm {
            form,
            message,
            hide_delay_ms: config.hide_delay_ms,
            pending_hide: RefCell::new(None),
        }))
    }

    pub fn on_submit(&self, event: &Event) {
        event.prevent_default();

        let submission = self.read_fields();
        let outcome = submission.validate();
        debug!("contact form submitted: {outcome:?}");

        self.show(outcome);

        if outcome.resets_form() {
            info!("contact message accepted (simulated send)");
            self.form.reset();
        }
    }

    pub fn register(self: &Rc<Self>) {
        let handler = Rc::clone(self);
        dom::listen(&self.form, "submit", move |event: Event| handler.on_submit(&event));
    }

    fn read_fields(&self) -> Submission {
        let name = self
            .field::<HtmlInputElement>("input[type=\"text\"]")
            .map(|el| el.value());
        let email = self
            .field::<HtmlInputElement>("input[type=\"email\"]")
            .map(|el| el.value());
        let message = self
            .field::<HtmlTextAreaElement>("textarea")
            .map(|el| el.value());

        Submission::new(
            name.as_deref().unwrap_or_default(),
            email.as_deref().unwrap_or_default(),
            message.as_deref().unwrap_or_default(),
        )
    }

    fn field<T: JsCast>(&self, selector: &str) -> Option<T> {
        dom::query_in(&self.form, selector)?.dyn_into::<T>().ok()
    }

    fn show(&self, outcome: Outcome) {
        let (background, color) = outcome.colors();
        let style = self.message.style();

        for (property, value) in [("background", background), ("color", color)] {
            if let Err(err) = style.set_property(property, value).js_context(property) {
                warn!("{err}");
            }
        }

        self.message.set_text_content(Some(outcome.text()));
        dom::set_display(&self.message, "block");

        let message = self.message.clone();
        let hide = Timeout::new(self.hide_delay_ms, move || dom::set_display(&message, "none"));
        *self.pending_hide.borrow_mut() = Some(hide);
    }
}

fn create_message_element(
    document: &Document,
    form: &HtmlFormElement,
) -> anyhow::Result<HtmlElement> {
    let element: Element = document.create_element("div").js_context("create message")?;
    element.set_class_name("form-message");

    let message = element
        .dyn_into::<HtmlElement>()
        .map_err(|_| anyhow::Error::msg("message element is not an HtmlElement"))?;
    dom::set_display(&message, "none");

    form.append_child(&message).js_context("append message")?;
    Ok(message)
}
