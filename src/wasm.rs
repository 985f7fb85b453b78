//! WebAssembly bindings for picascii

use crate::ramp::ramp_keys;
use crate::{Converter, PicasciiError, ScaleMode, SourceImage};
use wasm_bindgen::prelude::*;

fn to_js(err: PicasciiError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

#[wasm_bindgen]
pub struct WasmConverter {
    inner: Converter,
}

#[wasm_bindgen]
impl WasmConverter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmConverter {
        WasmConverter {
            inner: Converter::new(),
        }
    }

    /// Load an RGBA image, e.g. the `data` of a canvas `ImageData`.
    /// Replaces any previously loaded image.
    #[wasm_bindgen]
    pub fn load_image(&mut self, image_data: &[u8], width: u32, height: u32) -> Result<(), JsValue> {
        let source = SourceImage::from_rgba(width, height, image_data.to_vec()).map_err(to_js)?;
        self.inner.load(source);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn has_image(&self) -> bool {
        self.inner.source().is_some()
    }

    /// "pixel-perfect", "auto" or "manual"
    #[wasm_bindgen]
    pub fn set_scale_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        self.inner.config_mut().scale_mode = mode.parse::<ScaleMode>().map_err(to_js)?;
        Ok(())
    }

    /// Manual width; values below 1 fall back to the default width.
    /// Takes `i32` so JS passes a plain number rather than a `BigInt`;
    /// it is widened to the config's `i64`.
    #[wasm_bindgen]
    pub fn set_manual_width(&mut self, width: i32) {
        self.inner.config_mut().set_manual_width(width);
    }

    #[wasm_bindgen]
    pub fn set_vertical_stretch(&mut self, stretch: f64) {
        self.inner.config_mut().vertical_stretch = stretch;
    }

    #[wasm_bindgen]
    pub fn set_ramp(&mut self, key: &str) {
        self.inner.config_mut().ramp_key = key.to_string();
    }

    #[wasm_bindgen]
    pub fn set_negative(&mut self, enabled: bool) {
        self.inner.config_mut().negative = enabled;
    }

    /// Apply the "pastebin" or "wykop" preset.
    #[wasm_bindgen]
    pub fn apply_preset(&mut self, preset: &str) -> Result<(), JsValue> {
        let preset = preset.parse().map_err(to_js)?;
        let config = self.inner.config().clone().with_preset(preset);
        *self.inner.config_mut() = config;
        Ok(())
    }

    /// Active ramp glyphs joined by spaces
    #[wasm_bindgen]
    pub fn preview_ramp(&self) -> Result<String, JsValue> {
        self.inner.preview_ramp().map_err(to_js)
    }

    /// Render the loaded image.
    /// Returns `{ text, width, height, charCount }`.
    #[wasm_bindgen]
    pub fn render(&self) -> Result<js_sys::Object, JsValue> {
        let rendered = self.inner.render().map_err(to_js)?;

        let result = js_sys::Object::new();
        js_sys::Reflect::set(&result, &"text".into(), &rendered.text.into())?;
        js_sys::Reflect::set(&result, &"width".into(), &rendered.width.into())?;
        js_sys::Reflect::set(&result, &"height".into(), &rendered.height.into())?;
        js_sys::Reflect::set(&result, &"charCount".into(), &(rendered.char_count as f64).into())?;

        Ok(result)
    }
}

impl Default for WasmConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys of the built-in ramps, for populating a selector.
#[wasm_bindgen]
pub fn ramp_names() -> js_sys::Array {
    ramp_keys().map(JsValue::from_str).collect()
}

#[wasm_bindgen(start)]
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}
