use js_sys::{Array, Function, Object, Reflect, Uint32Array};
use wasm_bindgen::{JsCast, JsValue};

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_u32(slice: &[u32]) -> Uint32Array {
    let arr = Uint32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
pub fn arr_str(items: &[String]) -> Array {
    items.iter().map(|s| JsValue::from_str(s)).collect()
}

/// Calls `obj[name](...args)` with `obj` as `this`. A missing method or a
/// thrown exception comes back as `Err(message)`.
pub fn call_method(obj: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, String> {
    let f = Reflect::get(obj, &JsValue::from_str(name)).map_err(|e| describe(&e))?;
    let f: Function = f.dyn_into().map_err(|_| format!("{} is not a function", name))?;
    let out = match args {
        [] => f.call0(obj),
        [a] => f.call1(obj, a),
        [a, b] => f.call2(obj, a, b),
        _ => f.apply(obj, &args.iter().collect::<Array>()),
    };
    out.map_err(|e| format!("{} threw: {}", name, describe(&e)))
}

/// Best-effort text for a thrown JS value.
pub fn describe(v: &JsValue) -> String {
    if let Some(s) = v.as_string() { return s; }
    if let Some(e) = v.dyn_ref::<js_sys::Error>() { return String::from(e.message()); }
    format!("{:?}", v)
}

pub fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}
