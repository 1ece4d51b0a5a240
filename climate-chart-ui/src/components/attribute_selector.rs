//! Dropdown listing the climate attributes.

use climate_data::attribute::Attribute;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct AttributeSelectorProps {
    /// Currently selected attribute
    pub selected: Attribute,
    /// Called with the newly chosen attribute
    pub on_select: EventHandler<Attribute>,
}

/// One option per attribute, labelled with its column name.
#[component]
pub fn AttributeSelector(props: AttributeSelectorProps) -> Element {
    let on_select = props.on_select;
    let on_change = move |evt: Event<FormData>| match evt.value().parse::<Attribute>() {
        Ok(attribute) => on_select.call(attribute),
        Err(e) => log::warn!("[Climate] selector: {}", e),
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                style: "font-weight: bold;",
                "Attribute: "
                select {
                    id: "attributeSelect",
                    onchange: on_change,
                    for attribute in Attribute::ALL {
                        option {
                            value: "{attribute}",
                            selected: attribute == props.selected,
                            "{attribute}"
                        }
                    }
                }
            }
        }
    }
}
