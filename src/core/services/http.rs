use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};
use crate::core::error::BoardError;

pub const CSRF_HEADER: &str = "X-Csrf-Token";
pub const REMOTE_HEADER: &str = "X-Remote";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A fully built request, independent of how it gets sent.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl BoardRequest {
    /// Every request carries the csrf token and a JSON content type.
    pub fn new(method: Method, url: impl Into<String>, csrf: &str) -> Self {
        Self {
            method,
            url: url.into(),
            headers: vec![
                (CSRF_HEADER, csrf.to_string()),
                (CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE.to_string()),
            ],
            body: None,
        }
    }

    /// Marks the request as an in-page call rather than a form navigation.
    pub fn remote(mut self) -> Self {
        self.headers.push((REMOTE_HEADER, "true".to_string()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, BoardError> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests. The browser implementation is `FetchTransport`; tests
/// substitute a recorder.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: &BoardRequest) -> Result<HttpResponse, BoardError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn js_error(value: JsValue) -> BoardError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    BoardError::Network(message)
}

impl Transport for FetchTransport {
    async fn send(&self, request: &BoardRequest) -> Result<HttpResponse, BoardError> {
        let window = web_sys::window().ok_or_else(|| BoardError::Network("no window".to_string()))?;

        let headers = Headers::new().map_err(js_error)?;
        for (name, value) in &request.headers {
            headers.set(name, value).map_err(js_error)?;
        }

        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_headers(&headers);
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let js_request = Request::new_with_str_and_init(&request.url, &init).map_err(js_error)?;
        let js_response = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(js_error)?;
        let response: Response = js_response.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;

        Ok(HttpResponse {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}
