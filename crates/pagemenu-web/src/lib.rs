#![forbid(unsafe_code)]

//! WASM frontend for pagemenu.
//!
//! This crate is intentionally host-specific (web/WASM). It wires the
//! host-agnostic controllers of `pagemenu-core` to a live page:
//! - a [`Document`](pagemenu_core::Document) implementation over `web-sys`,
//! - page-level `click` and capturing `mousedown` listeners,
//! - `buttonClick` / `buttonMouseover` entry points for menu bar markup.
//!
//! The listeners are removed when the `PageMenus` instance goes away, whether
//! through `destroy()`, `free()` or garbage collection.
//!
//! ```js
//! const menus = new PageMenus(JSON.stringify({ buttons: [...] }));
//! // <a onclick="return menus.buttonClick(event, 'menu-input')"
//! //    onmouseover="menus.buttonMouseover(event, 'menu-input')">Input</a>
//! ```

mod listener;
#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
mod web_document;

pub use listener::ListenerGuard;
#[cfg(target_arch = "wasm32")]
pub use wasm::PageMenus;
#[cfg(target_arch = "wasm32")]
pub use web_document::{WebDocument, event_target, pointer_event};

#[cfg(not(target_arch = "wasm32"))]
use pagemenu_core::{ConfigError, PageMenuConfig};

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets. The stub still validates the configuration the
/// way the web build does.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct PageMenus {
    config: PageMenuConfig,
}

#[cfg(not(target_arch = "wasm32"))]
impl PageMenus {
    pub fn new(config: Option<&str>) -> Result<Self, ConfigError> {
        let config = match config {
            Some(json) => PageMenuConfig::from_json_str(json)?,
            None => PageMenuConfig::default(),
        };
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &PageMenuConfig {
        &self.config
    }
}
