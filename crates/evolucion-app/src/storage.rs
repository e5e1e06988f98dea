// crates/evolucion-app/src/storage.rs
// localStorage access for the projects view preference

use web_sys::Storage;

use evolucion_core::ViewMode;
use evolucion_core::preference::VIEW_MODE_KEY;

fn local_storage() -> Option<Storage> {
    match web_sys::window()?.local_storage() {
        Ok(storage) => storage,
        Err(e) => {
            log::warn!("localStorage unavailable: {:?}", e);
            None
        }
    }
}

/// Stored view mode, or the default when storage is missing or unreadable
pub fn load_view_mode() -> ViewMode {
    let stored = local_storage().and_then(|storage| match storage.get_item(VIEW_MODE_KEY) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read view preference: {:?}", e);
            None
        }
    });
    ViewMode::from_stored(stored.as_deref())
}

pub fn save_view_mode(mode: ViewMode) {
    let Some(storage) = local_storage() else {
        return;
    };
    if let Err(e) = storage.set_item(VIEW_MODE_KEY, mode.as_str()) {
        log::warn!("Failed to store view preference: {:?}", e);
    }
}
