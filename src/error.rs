use crate::interop::{new_obj, set_kv};
use puzzle_piece::PuzzleError;
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f32, max: f32, got: f32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "min", &JsValue::from_f64(min as f64));
    set_kv(&d, "max", &JsValue::from_f64(max as f64));
    set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn no_data_source() -> JsValue {
    err("no_data_source", "call setDataSource before reloading", None)
}

#[inline]
pub fn bad_data_source(method: &str, message: impl Into<String>) -> JsValue {
    let d = new_obj(); set_kv(&d, "method", &JsValue::from_str(method));
    err("bad_data_source", message, Some(d.into()))
}

/// Envelope for a core error, same code as [`PuzzleError::code`].
pub fn puzzle(e: &PuzzleError) -> JsValue {
    let data = match *e {
        PuzzleError::NotFoundPiece { index, total } => {
            let d = new_obj();
            set_kv(&d, "index", &JsValue::from_f64(index as f64));
            set_kv(&d, "total", &JsValue::from_f64(total as f64));
            Some(d.into())
        }
        PuzzleError::UnsetSize => None,
    };
    err(e.code(), e.to_string(), data)
}
