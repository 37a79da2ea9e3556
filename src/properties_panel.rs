use yew::prelude::*;
use web_sys::HtmlInputElement;

use crate::properties::{Property, PropertySnapshot};
use crate::scene::ShapeKind;

#[derive(Properties, PartialEq)]
pub struct PropertiesPanelProps {
    pub snapshot: PropertySnapshot,
    pub palette: Vec<String>,
    /// Raw field value for the edited property
    pub on_change: Callback<(Property, String)>,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn number_field(
    label: &'static str,
    property: Property,
    snapshot: &PropertySnapshot,
    on_change: &Callback<(Property, String)>,
    disabled: bool,
) -> Html {
    let oninput = {
        let on_change = on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_change.emit((property, input.value()));
            }
        })
    };

    html! {
        <div>
            <label class="block text-xs text-gray-500 mb-1">{label}</label>
            <input
                type="number"
                data-property={property.name()}
                value={snapshot.value(property)}
                {oninput}
                {disabled}
                class="w-full px-2 py-1 border border-gray-300 rounded text-sm bg-white text-gray-900 disabled:bg-gray-100"
            />
        </div>
    }
}

/// Editable view of the selected shape. Renders nothing without a selection.
#[function_component(PropertiesPanel)]
pub fn properties_panel(props: &PropertiesPanelProps) -> Html {
    let snapshot = &props.snapshot;
    let Some(kind) = snapshot.kind else {
        return html! {};
    };
    let is_circle = kind == ShapeKind::Circle;
    let snapshot_json = serde_json::to_string(snapshot).unwrap_or_default();

    let colors = props
        .palette
        .iter()
        .map(|color| {
            let onchange = {
                let on_change = props.on_change.clone();
                let color = color.clone();
                Callback::from(move |_: Event| on_change.emit((Property::Color, color.clone())))
            };

            html! {
                <label key={color.clone()} class="flex items-center gap-1 text-sm">
                    <input
                        type="radio"
                        name="color"
                        value={color.clone()}
                        checked={snapshot.color == *color}
                        {onchange}
                    />
                    {capitalize(color)}
                </label>
            }
        })
        .collect::<Html>();

    html! {
        <div
            class="w-64 flex-none bg-white border-l border-gray-300 p-4"
            data-testid="properties-panel"
            data-snapshot={snapshot_json}
        >
            <h2 class="text-lg font-semibold pb-3 mb-4 border-b border-gray-200">
                {format!("Type: {}", kind)}
            </h2>

            <div class="space-y-4">
                // Fill Color
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">{"Fill Color"}</label>
                    <div class="flex flex-wrap gap-2">{colors}</div>
                </div>

                // Position
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">{"Position"}</label>
                    <div class="grid grid-cols-2 gap-2">
                        {number_field("Top", Property::Top, snapshot, &props.on_change, false)}
                        {number_field("Left", Property::Left, snapshot, &props.on_change, false)}
                    </div>
                </div>

                // Dimensions
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">{"Dimensions"}</label>
                    <div class="grid grid-cols-2 gap-2">
                        {number_field("Width", Property::Width, snapshot, &props.on_change, false)}
                        {number_field("Height", Property::Height, snapshot, &props.on_change, false)}
                    </div>
                </div>

                <div>
                    {number_field("Radius", Property::Radius, snapshot, &props.on_change, !is_circle)}
                    <p class="text-xs text-gray-500 mt-1">{"Only applicable for circles"}</p>
                </div>
            </div>
        </div>
    }
}
