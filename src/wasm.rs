//! WebAssembly binding of the request facade.
//!
//! ```js
//! const assignment = optimize_js(3, 2,
//!   [{ length: 1000, weight: "medium" }, { mi: 45, weight: "light" }, {}],
//!   [500, 1000],
//!   "abc-eobl");
//! ```

use crate::model::RawTask;
use crate::optimize::{optimize, optimize_with, Algorithm, OptimizeOptions};
use wasm_bindgen::prelude::*;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Runs [`optimize()`] on JavaScript values.
///
/// `tasks` is an array of `{ name?, length? | mi? | MI?, weight? }`
/// records. Errors are thrown only for arguments that cannot be decoded
/// at all; every request that decodes gets an assignment.
#[wasm_bindgen]
pub fn optimize_js(
    task_count: usize,
    resource_count: usize,
    tasks: JsValue,
    capacities: Vec<f64>,
    algorithm: &str,
) -> Result<Vec<usize>, JsValue> {
    let tasks: Vec<RawTask> = serde_wasm_bindgen::from_value(tasks).map_err(to_js_error)?;
    let algorithm: Algorithm = algorithm.parse().map_err(to_js_error)?;
    Ok(optimize(task_count, resource_count, &tasks, &capacities, algorithm))
}

/// Runs [`optimize_with`] and returns the full report.
///
/// `options` is a serialized [`OptimizeOptions`]; missing fields take their
/// defaults.
#[wasm_bindgen]
pub fn optimize_report_js(
    task_count: usize,
    resource_count: usize,
    tasks: JsValue,
    capacities: Vec<f64>,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let tasks: Vec<RawTask> = serde_wasm_bindgen::from_value(tasks).map_err(to_js_error)?;
    let options: OptimizeOptions = if options.is_undefined() || options.is_null() {
        OptimizeOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(to_js_error)?
    };
    let report = optimize_with(task_count, resource_count, &tasks, &capacities, &options);
    serde_wasm_bindgen::to_value(&report).map_err(to_js_error)
}
