use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToolbarProps {
    pub on_add_rectangle: Callback<()>,
    pub on_add_circle: Callback<()>,
    pub on_add_text: Callback<()>,
    pub on_add_path: Callback<()>,
    pub on_add_image: Callback<()>,
    pub on_delete: Callback<()>,
    #[prop_or_default]
    pub has_selection: bool,
}

const BUTTON_CLASS: &str =
    "px-3 py-1 bg-white border border-gray-300 rounded text-sm hover:bg-gray-50 disabled:opacity-50";

fn button(label: &'static str, callback: &Callback<()>, disabled: bool) -> Html {
    let callback = callback.clone();
    let onclick = Callback::from(move |_: MouseEvent| callback.emit(()));
    html! {
        <button {onclick} {disabled} class={BUTTON_CLASS}>{label}</button>
    }
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    html! {
        <div class="flex gap-2 mt-2" data-testid="toolbar">
            {button("Add Rectangle", &props.on_add_rectangle, false)}
            {button("Add Circle", &props.on_add_circle, false)}
            {button("Add Text", &props.on_add_text, false)}
            {button("Add Path", &props.on_add_path, false)}
            {button("Add Image", &props.on_add_image, false)}
            {button("Delete Selected", &props.on_delete, !props.has_selection)}
        </div>
    }
}
