//! Clock Helpers
//!
//! Browser time via js-sys. Pure modules never call these directly; they
//! take clock values as parameters so tests control time.

use wasm_bindgen::JsValue;

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Local (year, month, day), month 1-based.
pub fn today_parts() -> (i32, u32, u32) {
    let now = js_sys::Date::new_0();
    (
        now.get_full_year() as i32,
        now.get_month() as u32 + 1,
        now.get_date() as u32,
    )
}

/// Current instant as an ISO-8601 string, the stored `completedAt` format.
pub fn iso_now() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

/// Display a stored date in ja-JP form; unparseable input is shown as-is.
pub fn format_date_ja(date: &str) -> String {
    if date.is_empty() {
        return "-".to_string();
    }
    let parsed = js_sys::Date::new(&JsValue::from_str(date));
    if parsed.get_time().is_nan() {
        return date.to_string();
    }
    parsed
        .to_locale_date_string("ja-JP", &JsValue::UNDEFINED)
        .into()
}

/// Display a stored timestamp in ja-JP form; unparseable input as-is.
pub fn format_datetime_ja(timestamp: &str) -> String {
    let parsed = js_sys::Date::new(&JsValue::from_str(timestamp));
    if parsed.get_time().is_nan() {
        return timestamp.to_string();
    }
    parsed.to_locale_string("ja-JP", &JsValue::UNDEFINED).into()
}
