//! Concurrent loading of the three inputs from files or URLs.

use anyhow::Context;
use climate_data::config::MapConfig;
use climate_data::inputs::ClimateInputs;
use log::info;

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read one input, over HTTP when `source` is a URL.
pub async fn read_source(client: &reqwest::Client, source: &str) -> anyhow::Result<String> {
    let body = if is_url(source) {
        let response = client.get(source).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("{}: HTTP {}", source, response.status());
        }
        response.text().await?
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("failed to read {}", source))?
    };
    info!("Loaded {} ({} bytes)", source, body.len());
    Ok(body)
}

/// Load the dataset and both topologies; the first failure aborts the rest.
pub async fn load_inputs(config: &MapConfig) -> anyhow::Result<ClimateInputs> {
    let client = reqwest::Client::new();
    let (dataset, states, countries) = tokio::try_join!(
        read_source(&client, &config.dataset_path),
        read_source(&client, &config.states_path),
        read_source(&client, &config.countries_path),
    )?;
    Ok(ClimateInputs {
        dataset,
        states,
        countries,
    })
}
