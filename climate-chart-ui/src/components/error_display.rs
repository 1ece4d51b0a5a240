//! Error box shown above the charts when a load or layout step fails.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    /// Lead-in shown in bold before the message
    #[props(default = "Error".to_string())]
    pub label: String,
    pub message: String,
}

/// `label` with exactly one trailing `": "`.
fn heading(label: &str) -> String {
    let label = label.trim_end().trim_end_matches(':');
    format!("{}: ", label)
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let title = heading(&props.label);
    rsx! {
        div {
            role: "alert",
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-left: 4px solid #C62828; border-radius: 2px; white-space: pre-wrap;",
            strong { "{title}" }
            "{props.message}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_adds_one_separator() {
        assert_eq!(heading("Error"), "Error: ");
        assert_eq!(heading("Could not load the climate data:"), "Could not load the climate data: ");
        assert_eq!(heading("Bubble layout failed: "), "Bubble layout failed: ");
    }
}
