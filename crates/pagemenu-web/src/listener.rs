#![forbid(unsafe_code)]

//! Event listener registrations tied to the lifetime of a Rust value.

/// A callback registered with an event source, removed again when the guard
/// is released or dropped.
///
/// `detach` always runs before the callback itself is freed: the page must
/// never hold a `wasm_bindgen` closure that Rust has already dropped, or every
/// later event throws.
pub struct ListenerGuard<C> {
    callback: Option<C>,
    detach: Box<dyn Fn(&C)>,
}

impl<C> ListenerGuard<C> {
    /// Wrap a callback that is already registered; `detach` unregisters it.
    pub fn new(callback: C, detach: impl Fn(&C) + 'static) -> Self {
        Self {
            callback: Some(callback),
            detach: Box::new(detach),
        }
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.callback.is_some()
    }

    /// Unregister and free the callback. Idempotent.
    pub fn release(&mut self) {
        if let Some(callback) = self.callback.take() {
            (self.detach)(&callback);
        }
    }
}

impl<C> Drop for ListenerGuard<C> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<C> std::fmt::Debug for ListenerGuard<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("attached", &self.is_attached())
            .finish()
    }
}
