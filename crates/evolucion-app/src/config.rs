// crates/evolucion-app/src/config.rs
// Site config from the inline <script type="text/toml" id="site-config"> block

use web_sys::Document;

use evolucion_core::SiteConfig;

const CONFIG_ELEMENT_ID: &str = "site-config";

/// Load config from the page, falling back to defaults
pub fn load(document: &Document) -> SiteConfig {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        log::debug!("No #{} block, using default config", CONFIG_ELEMENT_ID);
        return SiteConfig::default();
    };

    let contents = element.text_content().unwrap_or_default();
    let config = match SiteConfig::from_toml_str(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from #{}", CONFIG_ELEMENT_ID);
            config
        }
        Err(e) => {
            log::warn!("Failed to parse #{}: {}", CONFIG_ELEMENT_ID, e);
            SiteConfig::default()
        }
    };

    for problem in config.validate() {
        log::warn!("Config: {}", problem);
    }
    config
}
