//! Backend over `window.fetch`

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::error::TransportError;
use crate::settings::Endpoints;
use crate::sync::{Backend, FORM_CONTENT_TYPE, PublishRequest};

/// Every endpoint is a form-encoded POST
pub struct FetchBackend {
    endpoints: Endpoints,
}

impl FetchBackend {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    async fn post(&self, path: &str, body: &str) -> Result<String, TransportError> {
        let window = web_sys::window().ok_or_else(|| TransportError::Request("no window".into()))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from_str(body));
        let request = Request::new_with_str_and_init(&self.endpoints.url(path), &init)
            .map_err(|e| TransportError::Request(describe(&e)))?;
        request
            .headers()
            .set("Content-Type", FORM_CONTENT_TYPE)
            .map_err(|e| TransportError::Request(describe(&e)))?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| TransportError::Request(describe(&e)))?
            .dyn_into()
            .map_err(|e| TransportError::Request(describe(&e)))?;
        if !response.ok() {
            return Err(TransportError::Status(response.status()));
        }

        let text = response
            .text()
            .map_err(|e| TransportError::Body(describe(&e)))?;
        JsFuture::from(text)
            .await
            .map_err(|e| TransportError::Body(describe(&e)))?
            .as_string()
            .ok_or_else(|| TransportError::Body("response body is not text".into()))
    }
}

impl Backend for FetchBackend {
    async fn get_circle(&self) -> Result<String, TransportError> {
        self.post(&self.endpoints.get_circle, "").await
    }

    async fn publish(&self, request: PublishRequest) -> Result<(), TransportError> {
        self.post(request.path(&self.endpoints), &request.form_body())
            .await
            .map(|_| ())
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
