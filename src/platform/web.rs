//! Browser-only glue: vibration, sharing, orientation permission

use std::cell::Cell;
use std::rc::Rc;

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::ShareOutcome;
use crate::feedback::{FeedbackError, FeedbackSink, haptic_pattern};
use crate::input::TiltPermission;
use crate::sim::GameEvent;

/// Vibrates the device on catches and splashes
pub struct HapticSink {
    /// Shared with the settings toggle
    pub enabled: Rc<Cell<bool>>,
}

impl FeedbackSink for HapticSink {
    fn on_event(&mut self, event: &GameEvent) -> Result<(), FeedbackError> {
        if !self.enabled.get() {
            return Ok(());
        }
        let Some(pattern) = haptic_pattern(event) else {
            return Ok(());
        };
        let window = web_sys::window().ok_or(FeedbackError::Unsupported("window"))?;

        let array = js_sys::Array::new();
        for ms in pattern {
            array.push(&JsValue::from(*ms));
        }
        // Returns false when vibration is unsupported or blocked; not worth reporting
        window.navigator().vibrate_with_pattern(&array);
        Ok(())
    }
}

/// Look up a callable property, `None` if missing or not a function
fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Offer `text` through the system share sheet, or copy it when there is none
pub async fn share(text: &str) -> ShareOutcome {
    let Some(window) = web_sys::window() else {
        return ShareOutcome::Failed;
    };
    let navigator = window.navigator();

    if let Some(share) = method(&navigator, "share") {
        let data = js_sys::Object::new();
        let _ = Reflect::set(&data, &"title".into(), &"Hungry Cat".into());
        let _ = Reflect::set(&data, &"text".into(), &JsValue::from_str(text));
        let Some(promise) = share
            .call1(&navigator, &data)
            .ok()
            .and_then(|p| p.dyn_into::<Promise>().ok())
        else {
            return ShareOutcome::Failed;
        };
        // Rejects when the player dismisses the sheet
        return match JsFuture::from(promise).await {
            Ok(_) => ShareOutcome::Shared,
            Err(_) => ShareOutcome::Failed,
        };
    }

    let promise = navigator.clipboard().write_text(text);
    match JsFuture::from(promise).await {
        Ok(_) => ShareOutcome::Copied,
        Err(_) => ShareOutcome::Failed,
    }
}

/// Put `label` back on `element` after `delay_ms`
pub fn reset_label_after(element: &web_sys::Element, label: &'static str, delay_ms: i32) {
    let Some(window) = web_sys::window() else { return };
    let element = element.clone();
    let callback = Closure::once_into_js(move || {
        element.set_text_content(Some(label));
    });
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay_ms,
    );
}

/// Ask for orientation events.
///
/// The prompt (iOS) is issued synchronously, so call this from inside the
/// click handler; the returned future only waits for the answer.
pub fn request_tilt_permission() -> impl Future<Output = TiltPermission> {
    let pending = begin_tilt_request();
    async move {
        let promise = match pending {
            Ok(promise) => promise,
            Err(settled) => return settled,
        };
        match JsFuture::from(promise).await {
            Ok(answer) => TiltPermission::from_response(&answer.as_string().unwrap_or_default()),
            Err(_) => TiltPermission::Denied,
        }
    }
}

fn begin_tilt_request() -> Result<Promise, TiltPermission> {
    let ctor = Reflect::get(&js_sys::global(), &JsValue::from_str("DeviceOrientationEvent"))
        .map_err(|_| TiltPermission::Unsupported)?;
    if ctor.is_undefined() {
        return Err(TiltPermission::Unsupported);
    }
    let request = method(&ctor, "requestPermission").ok_or(TiltPermission::NotRequired)?;
    request
        .call0(&ctor)
        .ok()
        .and_then(|p| p.dyn_into::<Promise>().ok())
        .ok_or(TiltPermission::Denied)
}
