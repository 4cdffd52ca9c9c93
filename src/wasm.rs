//! JavaScript bindings for browser front ends.
//!
//! Mirrors the engine surface a visualization needs: set parameters, run,
//! reset, and read back cities and the best tour.

use wasm_bindgen::prelude::*;

use crate::aco::{AcoConfig, AcoEngine, City, World};

/// Ant colony over a fixed city set, driven from JavaScript.
#[wasm_bindgen]
pub struct WasmColony {
    inner: AcoEngine,
}

#[wasm_bindgen]
impl WasmColony {
    /// Creates a colony over the built-in 12-city set with default parameters.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> Result<WasmColony, JsValue> {
        let mut config = AcoConfig::default();
        config.seed = seed;
        let inner = AcoEngine::with_default_cities(config).map_err(to_js)?;
        Ok(Self { inner })
    }

    /// Creates a colony from `[{name, x, y}, ...]`.
    #[wasm_bindgen(js_name = withCities)]
    pub fn with_cities(cities_js: JsValue, seed: Option<u64>) -> Result<WasmColony, JsValue> {
        let cities: Vec<City> = serde_wasm_bindgen::from_value(cities_js)
            .map_err(|e| JsValue::from_str(&format!("invalid cities: {e}")))?;
        let mut config = AcoConfig::default();
        config.seed = seed;
        let inner = AcoEngine::new(World::new(cities), config).map_err(to_js)?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(js_name = setParameters)]
    pub fn set_parameters(
        &mut self,
        num_ants: usize,
        evaporation_rate: f64,
        alpha: f64,
        beta: f64,
    ) -> Result<(), JsValue> {
        self.inner
            .set_parameters(num_ants, evaporation_rate, alpha, beta)
            .map_err(to_js)
    }

    /// Runs one batch of ants. Returns the run summary as an object.
    #[wasm_bindgen(js_name = runAlgorithm)]
    pub fn run_algorithm(&mut self) -> Result<JsValue, JsValue> {
        let summary = self.inner.run().map_err(to_js)?;
        serde_wasm_bindgen::to_value(&summary).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = resetAlgorithm)]
    pub fn reset_algorithm(&mut self) {
        self.inner.reset();
    }

    /// Cities as `[{name, x, y}, ...]`.
    #[wasm_bindgen(js_name = getCities)]
    pub fn get_cities(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.cities()).unwrap_or(JsValue::NULL)
    }

    /// Best tour as an array of city indices, empty before the first run.
    #[wasm_bindgen(js_name = getBestTour)]
    pub fn get_best_tour(&self) -> Vec<usize> {
        self.inner.best_tour().map(<[usize]>::to_vec).unwrap_or_default()
    }

    /// Best tour length, `Infinity` before the first run.
    #[wasm_bindgen(js_name = getBestDistance)]
    pub fn get_best_distance(&self) -> f64 {
        self.inner.best_distance()
    }
}

fn to_js(err: crate::aco::AcoError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
