//! Window width probing. Browser-only; off-browser the width is unknown.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

/// Quiet period after the last resize event before listeners hear the new width.
pub const RESIZE_DEBOUNCE_MS: u32 = 200;

/// Current `window.innerWidth`, if running in a browser.
pub fn current_width() -> Option<f64> {
    #[cfg(feature = "csr")]
    {
        web_sys::window()?.inner_width().ok()?.as_f64()
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Holds at most one scheduled call. Scheduling another drops the previous
/// handle, which cancels it for timer handles such as `gloo_timers::callback::Timeout`.
#[derive(Debug)]
pub struct Debounce<H> {
    pending: Option<H>,
}

impl<H> Debounce<H> {
    pub const fn new() -> Self {
        Self { pending: None }
    }

    pub fn schedule(&mut self, handle: H) {
        self.pending = Some(handle);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<H> Default for Debounce<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Call `callback` with the new width once resizing has paused for
/// [`RESIZE_DEBOUNCE_MS`], for the life of the page.
pub fn on_resize(callback: impl Fn(f64) + 'static) {
    #[cfg(feature = "csr")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;

        use gloo_timers::callback::Timeout;
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Rc::new(callback);
        let pending: Rc<RefCell<Debounce<Timeout>>> = Rc::default();
        let listener = Closure::<dyn FnMut()>::new(move || {
            let callback = Rc::clone(&callback);
            pending.borrow_mut().schedule(Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                if let Some(width) = current_width() {
                    callback(width);
                }
            }));
        });
        // The listener lives as long as the app.
        if window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref()).is_ok() {
            listener.forget();
        } else {
            log::warn!("resize listener could not be installed");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = callback;
    }
}
