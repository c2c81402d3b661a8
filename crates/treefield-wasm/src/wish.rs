//! Promise-based bridge to the JS text-generation call.

use js_sys::{Array, Function, Object, Promise};
use treefield_core::wish::{resolve_wish, WishError, WishRequest, DEFAULT_TIMEOUT_MS};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

#[wasm_bindgen]
extern "C" {
    // Globals rather than `window.*` so the bridge also runs in workers.
    #[wasm_bindgen(js_name = setTimeout)]
    fn set_timeout(handler: &Function, millis: i32) -> JsValue;

    #[wasm_bindgen(js_name = clearTimeout)]
    fn clear_timeout(handle: &JsValue);
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Map whatever the service/timer race settled on to a wish or an error.
/// `marker` is the value the timer resolves with.
fn classify_answer(value: &JsValue, marker: &JsValue, timeout_ms: u32) -> Result<String, WishError> {
    if Object::is(value, marker) {
        return Err(WishError::Timeout { millis: timeout_ms });
    }
    value
        .as_string()
        .ok_or_else(|| WishError::MalformedResponse(describe(value)))
}

/// Call `service(prompt, recipient, tone)` and race it against the timeout.
async fn call_service(
    service: &Function,
    request: &WishRequest,
    timeout_ms: u32,
) -> Result<String, WishError> {
    let returned = service
        .call3(
            &JsValue::NULL,
            &JsValue::from_str(&request.prompt()),
            &JsValue::from_str(request.recipient()),
            &JsValue::from_str(request.tone.as_str()),
        )
        .map_err(|err| WishError::Network(describe(&err)))?;
    let answer = Promise::resolve(&returned);

    let marker: JsValue = Object::new().into();
    let mut handle = JsValue::UNDEFINED;
    let timer = Promise::new(&mut |resolve: Function, _reject: Function| {
        let fire: Function = resolve.bind1(&JsValue::NULL, &marker).unchecked_into();
        handle = set_timeout(&fire, timeout_ms.min(i32::MAX as u32) as i32);
    });

    let settled = JsFuture::from(Promise::race(&Array::of2(&answer, &timer))).await;
    clear_timeout(&handle);

    let value = settled.map_err(|err| WishError::Network(describe(&err)))?;
    classify_answer(&value, &marker, timeout_ms)
}

/// Resolve raw UI input to display text, or `None` for a blank recipient.
async fn request_wish(
    recipient: &str,
    tone: &str,
    service: &Function,
    timeout_ms: u32,
) -> Option<String> {
    let request = WishRequest::from_input(recipient, tone)?;
    Some(resolve_wish(call_service(service, &request, timeout_ms).await))
}

/// Generate a wish through `service`, a JS function
/// `(prompt, recipient, tone) => Promise<string>`.
///
/// The returned promise never rejects: it resolves to the wish, to a fallback
/// line when the service fails or times out, or to `null` for a blank
/// recipient.
#[wasm_bindgen]
pub fn generate_wish(
    recipient: String,
    tone: String,
    service: Function,
    timeout_ms: Option<u32>,
) -> Promise {
    future_to_promise(async move {
        let timeout_ms = timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        Ok(match request_wish(&recipient, &tone, &service, timeout_ms).await {
            Some(text) => JsValue::from_str(&text),
            None => JsValue::NULL,
        })
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use treefield_core::wish::{Tone, ERROR_FALLBACK};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn js_service(body: &str) -> Function {
        Function::new_with_args("prompt, recipient, tone", body)
    }

    fn request() -> WishRequest {
        WishRequest::new("Ada", Tone::Warm).unwrap()
    }

    #[wasm_bindgen_test]
    fn classify_marker_is_timeout() {
        let marker: JsValue = Object::new().into();
        assert_eq!(
            classify_answer(&marker, &marker, 250),
            Err(WishError::Timeout { millis: 250 })
        );
    }

    #[wasm_bindgen_test]
    fn classify_non_string_is_malformed() {
        let marker: JsValue = Object::new().into();
        let answer = classify_answer(&JsValue::from_f64(42.0), &marker, 250);
        assert!(matches!(answer, Err(WishError::MalformedResponse(_))), "{:?}", answer);
        assert_eq!(
            classify_answer(&JsValue::from_str("Joy."), &marker, 250),
            Ok("Joy.".to_string())
        );
    }

    #[wasm_bindgen_test]
    async fn rejected_promise_maps_to_network() {
        let service = js_service("return Promise.reject('offline');");
        assert_eq!(
            call_service(&service, &request(), 1_000).await,
            Err(WishError::Network("offline".to_string()))
        );
    }

    #[wasm_bindgen_test]
    async fn throwing_service_maps_to_network() {
        let service = js_service("throw new Error('boom');");
        let outcome = call_service(&service, &request(), 1_000).await;
        assert!(matches!(outcome, Err(WishError::Network(_))), "{:?}", outcome);
    }

    #[wasm_bindgen_test]
    async fn silent_service_times_out() {
        let service = js_service("return new Promise(() => {});");
        assert_eq!(
            call_service(&service, &request(), 20).await,
            Err(WishError::Timeout { millis: 20 })
        );
    }

    #[wasm_bindgen_test]
    async fn plain_string_answer_is_accepted() {
        let service = js_service("return 'Gold for ' + recipient + '.';");
        assert_eq!(
            call_service(&service, &request(), 1_000).await,
            Ok("Gold for Ada.".to_string())
        );
    }

    #[wasm_bindgen_test]
    async fn failures_resolve_to_fallback_text() {
        let service = js_service("return Promise.reject('offline');");
        assert_eq!(
            request_wish("Ada", "warm", &service, 1_000).await,
            Some(ERROR_FALLBACK.to_string())
        );
    }

    #[wasm_bindgen_test]
    async fn blank_recipient_skips_the_service() {
        let service = js_service("throw new Error('must not be called');");
        assert_eq!(request_wish("   ", "warm", &service, 1_000).await, None);
    }
}
