//! Fetches the three startup inputs concurrently in the browser.

use climate_data::config::MapConfig;
use climate_data::error::LoadError;
use climate_data::inputs::ClimateInputs;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

fn fetch_error(source: &str, err: &JsValue) -> LoadError {
    LoadError::Fetch {
        source: source.to_string(),
        reason: err.as_string().unwrap_or_else(|| format!("{:?}", err)),
    }
}

/// Fetch every url at once and return the bodies in order.
///
/// All requests are in flight before any is awaited; the first failure
/// rejects the whole set.
pub async fn fetch_all(urls: &[&str]) -> Result<Vec<String>, LoadError> {
    let window = web_sys::window().ok_or_else(|| LoadError::Fetch {
        source: "window".to_string(),
        reason: "no global window".to_string(),
    })?;

    let requests = js_sys::Array::new();
    for url in urls {
        log::info!("[Climate] loader: fetching {}", url);
        requests.push(&window.fetch_with_str(url));
    }

    let responses = JsFuture::from(js_sys::Promise::all(&requests))
        .await
        .map_err(|e| fetch_error("inputs", &e))?;
    let responses: js_sys::Array = responses.unchecked_into();

    let mut bodies = Vec::with_capacity(urls.len());
    for (url, value) in urls.iter().zip(responses.iter()) {
        let response: web_sys::Response = value
            .dyn_into()
            .map_err(|e| fetch_error(url, &e))?;
        if !response.ok() {
            return Err(LoadError::Fetch {
                source: url.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }
        let text = response.text().map_err(|e| fetch_error(url, &e))?;
        let body = JsFuture::from(text).await.map_err(|e| fetch_error(url, &e))?;
        let body = body.as_string().unwrap_or_default();
        log::info!("[Climate] loader: {} ({} bytes)", url, body.len());
        bodies.push(body);
    }
    Ok(bodies)
}

/// Fetch the dataset and both topologies named in `config`.
pub async fn load_inputs(config: &MapConfig) -> Result<ClimateInputs, LoadError> {
    let bodies = fetch_all(&[
        config.dataset_path.as_str(),
        config.states_path.as_str(),
        config.countries_path.as_str(),
    ])
    .await?;

    match <[String; 3]>::try_from(bodies) {
        Ok([dataset, states, countries]) => Ok(ClimateInputs {
            dataset,
            states,
            countries,
        }),
        Err(bodies) => Err(LoadError::Fetch {
            source: "inputs".to_string(),
            reason: format!("expected 3 responses, got {}", bodies.len()),
        }),
    }
}
