//! Placeholder shown while the inputs are being fetched.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    #[props(default = "Loading data...".to_string())]
    pub message: String,
    /// Sources still in flight, listed under the message
    #[props(default)]
    pub pending: Vec<String>,
}

fn pending_text(pending: &[String]) -> Option<String> {
    (!pending.is_empty()).then(|| format!("Waiting for {}", pending.join(", ")))
}

#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    let pending = pending_text(&props.pending);
    rsx! {
        div {
            style: "display: flex; flex-direction: column; align-items: center; gap: 4px; padding: 32px; color: #666;",
            span { "{props.message}" }
            if let Some(pending) = pending {
                span { style: "font-size: 12px; color: #999;", "{pending}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_text() {
        assert_eq!(pending_text(&[]), None);
        let sources = vec![
            "data/climate-data.csv".to_string(),
            "data/us-states.topojson".to_string(),
        ];
        assert_eq!(
            pending_text(&sources).as_deref(),
            Some("Waiting for data/climate-data.csv, data/us-states.topojson")
        );
    }
}
