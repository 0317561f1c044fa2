use celeste_core::core_api::Engine;
use celeste_render::{JsonStyle, TextRenderOptions, render_json_full, render_text};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(default)]
pub struct WebRenderOptions {
    pub json_output: bool,
    /// Chapter headings only. Ignored when `json_output` is set.
    pub collapsed: bool,
}

#[derive(Debug, Clone)]
struct WebError {
    code: &'static str,
    message: String,
}

#[derive(Debug, Clone, Serialize)]
struct WebErrorPayload {
    code: String,
    message: String,
}

impl WebError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn to_js_value(&self) -> JsValue {
        let payload = WebErrorPayload {
            code: self.code.to_string(),
            message: self.message.clone(),
        };
        serde_wasm_bindgen::to_value(&payload).unwrap_or_else(|_| {
            JsValue::from_str(&format!("{}: {}", payload.code, payload.message))
        })
    }
}

#[wasm_bindgen]
pub fn render_save_text(save_bytes: &[u8], options: JsValue) -> Result<String, JsValue> {
    let parsed_options = parse_options(options).map_err(|err| err.to_js_value())?;
    render_save_text_impl(save_bytes, &parsed_options).map_err(|err| err.to_js_value())
}

fn render_save_text_impl(
    save_bytes: &[u8],
    options: &WebRenderOptions,
) -> Result<String, WebError> {
    if save_bytes.is_empty() {
        return Err(WebError::new(
            "unsupported_file",
            "The uploaded file is empty. Please provide a .celeste save file.",
        ));
    }

    let session = Engine::new()
        .open_bytes(save_bytes)
        .map_err(|err| WebError::new("parse_failed", err.to_string()))?;

    if options.json_output {
        let value = render_json_full(session.snapshot(), JsonStyle::CanonicalV1);
        return serde_json::to_string_pretty(&value).map_err(|err| {
            WebError::new(
                "render_failed",
                format!("failed to serialize rendered JSON output: {err}"),
            )
        });
    }

    Ok(render_text(
        session.snapshot(),
        TextRenderOptions {
            collapsed: options.collapsed,
        },
    ))
}

fn parse_options(options: JsValue) -> Result<WebRenderOptions, WebError> {
    if options.is_null() || options.is_undefined() {
        return Ok(WebRenderOptions::default());
    }

    serde_wasm_bindgen::from_value(options).map_err(|err| {
        WebError::new(
            "invalid_options",
            format!("Failed to parse web render options: {err}"),
        )
    })
}
