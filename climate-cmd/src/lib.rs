//! Command implementations for the climate CLI.
//!
//! Both subcommands load the dataset and both topologies concurrently, from
//! local paths or http(s) URLs, and run the same join and classification the
//! web map uses.

use clap::{Args, Subcommand};
use climate_data::attribute::Attribute;
use climate_data::config::MapConfig;

pub mod encode;
pub mod load;
pub mod summary;

/// Where the inputs come from; flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// JSON file with a `MapConfig` (missing fields take their defaults)
    #[arg(short = 'c', long)]
    pub config: Option<String>,

    /// Climate CSV path or URL
    #[arg(short = 'd', long)]
    pub dataset: Option<String>,

    /// US states TopoJSON path or URL
    #[arg(short = 's', long)]
    pub states: Option<String>,

    /// Countries TopoJSON path or URL
    #[arg(long)]
    pub countries: Option<String>,
}

impl InputArgs {
    /// Build and validate the effective configuration.
    pub fn resolve(&self) -> anyhow::Result<MapConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                MapConfig::from_json(&text)
                    .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path, e))?
            }
            None => MapConfig::default(),
        };
        if let Some(dataset) = &self.dataset {
            config.dataset_path = dataset.clone();
        }
        if let Some(states) = &self.states {
            config.states_path = states.clone();
        }
        if let Some(countries) = &self.countries {
            config.countries_path = countries.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the join report and quantile class breaks
    Summary {
        #[command(flatten)]
        inputs: InputArgs,

        /// Only summarize this attribute (column name, e.g. "Max Temp")
        #[arg(short = 'a', long)]
        attribute: Option<Attribute>,
    },

    /// Write the map fills and bar chart layout as JSON
    Encode {
        #[command(flatten)]
        inputs: InputArgs,

        /// Attribute to encode (defaults to the configured one)
        #[arg(short = 'a', long)]
        attribute: Option<Attribute>,

        /// Output path (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Bar chart width in pixels
        #[arg(long, default_value_t = 960.0)]
        width: f64,

        /// Bar chart height in pixels
        #[arg(long, default_value_t = 320.0)]
        height: f64,
    },
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Summary { .. } => "summary",
            Command::Encode { .. } => "encode",
        }
    }
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Summary { inputs, attribute } => {
            let config = inputs.resolve()?;
            summary::run_summary(&config, attribute).await
        }
        Command::Encode {
            inputs,
            attribute,
            output,
            width,
            height,
        } => {
            let config = inputs.resolve()?;
            encode::run_encode(&config, attribute, output.as_deref(), width, height).await
        }
    }
}
