//! WASM bindings for palette2css.
//!
//! Exposes the conversion to JavaScript via wasm-bindgen so a palette can be
//! turned into custom properties in the browser. Errors are thrown as JS
//! errors carrying the same diagnostics as the CLI.

use palette_css::{CollisionPolicy, Config, Conversion};
use wasm_bindgen::prelude::*;

fn config(strict: bool) -> Config {
    Config {
        collisions: if strict {
            CollisionPolicy::Strict
        } else {
            CollisionPolicy::Lenient
        },
        ..Config::default()
    }
}

fn convert(source: &str, strict: bool) -> Result<Conversion, String> {
    palette_css::compile(source, &config(strict)).map_err(|e| e.to_string())
}

/// Convert palette JSON to a stylesheet body fragment.
#[wasm_bindgen]
pub fn compile(source: &str, strict: bool) -> Result<String, JsError> {
    let conversion = convert(source, strict).map_err(|e| JsError::new(&e))?;
    Ok(conversion.css())
}

/// Convert palette JSON to an array of `{ key, value, path }` objects.
#[wasm_bindgen]
pub fn declarations(source: &str, strict: bool) -> Result<JsValue, JsError> {
    let conversion = convert(source, strict).map_err(|e| JsError::new(&e))?;
    serde_wasm_bindgen::to_value(&conversion.declarations)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Key collisions found in lenient mode, as `"<message>"` strings.
#[wasm_bindgen]
pub fn collisions(source: &str) -> Result<js_sys::Array, JsError> {
    let conversion = convert(source, false).map_err(|e| JsError::new(&e))?;
    Ok(conversion
        .collisions
        .iter()
        .map(|c| JsValue::from_str(&c.to_string()))
        .collect())
}

/// Get the converter version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
