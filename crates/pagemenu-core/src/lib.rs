#![forbid(unsafe_code)]

//! Host-agnostic page menus.
//!
//! `pagemenu-core` holds the logic behind two pieces of page chrome:
//!
//! - **Context menus**: every document click is routed through a
//!   [`ContextMenuDispatcher`], which decides from the CSS classes of the
//!   clicked element (or its ancestors) whether to open an entity menu,
//!   close the open one, or let the browser handle the click.
//! - **Menu bar**: a [`MenuBarController`] keeps at most one dropdown panel
//!   of the top menu bar open and follows the mouse once a menu is open.
//!
//! # Design principles
//!
//! - **No I/O**: the page is reached only through the [`Document`] trait; the
//!   web frontend implements it over `web-sys`, tests use [`MemoryDocument`].
//! - **Silent degradation**: a missing element never raises. The DOM is left
//!   unchanged and the click falls through to the browser.
//! - **`#![forbid(unsafe_code)]`**: safety enforced at compile time.

pub mod config;
pub mod context_menu;
pub mod dom;
pub mod escape;
pub mod event;
pub mod filter;
pub mod logging;
pub mod memory;
pub mod menu_bar;
pub mod registry;

#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};

pub use config::{ButtonBinding, ConfigError, PageMenuConfig};
pub use context_menu::{ContextMenuDispatcher, OperatorSelection};
pub use dom::{Ancestors, Display, Document};
pub use escape::{encode_entity_name, expand_link_template, unescape_html};
pub use event::{ClickOutcome, MouseButton, PassReason, Point, PointerEvent};
pub use filter::{FilterFieldName, FilterLookup, filter_field_id};
pub use memory::{MemoryDocument, NodeId};
pub use menu_bar::{BarTransition, MenuBarController};
pub use registry::{EntityKind, MenuClassRegistry};
