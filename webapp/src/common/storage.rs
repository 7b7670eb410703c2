use gloo_console::error as console_error;

// preferences are stored as raw strings rather than json so that the values
// stay readable by anything else on the page
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);
}

// window.localStorage, if the browser lets us have it
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());

        if storage.is_none() {
            console_error!("local storage unavailable, preferences will not persist");
        }

        LocalStore { storage }
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        LocalStore::new()
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = self.storage.as_ref()?;

        storage.get_item(key).unwrap_or_else(|err| {
            console_error!(format!("Failed to fetch local storage {key}: {err:?}"));
            None
        })
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };

        storage
            .set_item(key, value)
            .unwrap_or_else(|err| console_error!(format!("Failed to set local storage {key}: {err:?}")))
    }
}
