#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use pagemenu_core::{ContextMenuDispatcher, MenuBarController, PageMenuConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::listener::ListenerGuard;
use crate::web_document::{WebDocument, event_target, pointer_event};

type MouseListener = Closure<dyn FnMut(MouseEvent)>;

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = match info.location() {
                Some(loc) => format!(
                    "pagemenu panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                ),
                None => format!("pagemenu panic: {info}"),
            };
            web_sys::console::error_1(&JsValue::from_str(&msg));
        }));
    });
}

/// Everything the listeners mutate. Events run to completion one at a time,
/// so a single `RefCell` borrow per event is enough.
struct PageState {
    doc: WebDocument,
    context: ContextMenuDispatcher<Element>,
    bar: MenuBarController<Element>,
}

/// Button an inline menu bar handler fired for.
///
/// Inline handlers run on the button itself, so `currentTarget` is the button
/// even when the pointer is over a nested element.
fn button_of(event: &MouseEvent) -> Option<Element> {
    event
        .current_target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .or_else(|| event_target(event))
}

/// Context menus and menu bar for one page.
///
/// The document listeners live as long as this value: `destroy()`, the
/// generated `free()` and garbage collection all remove them.
#[wasm_bindgen]
pub struct PageMenus {
    state: Rc<RefCell<PageState>>,
    listeners: Vec<ListenerGuard<MouseListener>>,
}

#[wasm_bindgen]
impl PageMenus {
    /// Install the page listeners.
    ///
    /// `config` is an optional JSON `PageMenuConfig`; an invalid one is
    /// rejected with its error message.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<PageMenus, JsValue> {
        install_panic_hook();
        let config = match config {
            Some(json) => PageMenuConfig::from_json_str(&json)
                .map_err(|err| JsValue::from_str(&err.to_string()))?,
            None => PageMenuConfig::default(),
        };
        let doc = WebDocument::new().ok_or_else(|| JsValue::from_str("no document available"))?;
        let context = ContextMenuDispatcher::from_config(&config);
        let bar = MenuBarController::from_config(&config, &doc);

        let mut menus = Self {
            state: Rc::new(RefCell::new(PageState { doc, context, bar })),
            listeners: Vec::with_capacity(2),
        };
        menus.install()?;
        Ok(menus)
    }

    /// Click on a menu bar button. Returns `false` so inline handlers can
    /// `return` it to cancel navigation.
    #[wasm_bindgen(js_name = buttonClick)]
    pub fn button_click(&self, event: MouseEvent, menu_id: &str) -> bool {
        let Some(button) = button_of(&event) else {
            return false;
        };
        let mut state = self.state.borrow_mut();
        let PageState { doc, bar, .. } = &mut *state;
        bar.on_button_activate(doc, &button, menu_id);
        event.prevent_default();
        false
    }

    /// Pointer entered a menu bar button.
    #[wasm_bindgen(js_name = buttonMouseover)]
    pub fn button_mouseover(&self, event: MouseEvent, menu_id: &str) {
        let Some(button) = button_of(&event) else {
            return;
        };
        let mut state = self.state.borrow_mut();
        let PageState { doc, bar, .. } = &mut *state;
        bar.on_button_hover(doc, &button, menu_id);
    }

    /// Remove the page listeners. The instance is inert afterwards.
    pub fn destroy(&mut self) {
        self.listeners.clear();
    }
}

impl PageMenus {
    fn install(&mut self) -> Result<(), JsValue> {
        let document = self.state.borrow().doc.document().clone();

        let state = Rc::clone(&self.state);
        let on_click: MouseListener = Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(pointer) = pointer_event(&event) else {
                return;
            };
            let mut state = state.borrow_mut();
            let PageState { doc, context, .. } = &mut *state;
            if context.on_document_click(doc, &pointer).is_handled() {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        let target = document.clone();
        self.listeners.push(ListenerGuard::new(on_click, move |listener: &MouseListener| {
            let _ = target
                .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        }));

        let state = Rc::clone(&self.state);
        let on_mouse_down: MouseListener = Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(pointer) = pointer_event(&event) else {
                return;
            };
            let mut state = state.borrow_mut();
            let PageState { doc, bar, .. } = &mut *state;
            bar.on_global_mouse_down(doc, &pointer);
        }) as Box<dyn FnMut(MouseEvent)>);
        // Capture phase: the bar must see the mousedown even when a handler
        // further down stops propagation.
        document.add_event_listener_with_callback_and_bool(
            "mousedown",
            on_mouse_down.as_ref().unchecked_ref(),
            true,
        )?;
        self.listeners.push(ListenerGuard::new(on_mouse_down, move |listener: &MouseListener| {
            let _ = document.remove_event_listener_with_callback_and_bool(
                "mousedown",
                listener.as_ref().unchecked_ref(),
                true,
            );
        }));
        Ok(())
    }
}
