use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AlertModalProps {
    pub open: bool,
    pub message: AttrValue,
    pub on_close: Callback<()>,
}

/// Blocking informational overlay. Clicks on the backdrop do nothing; only the
/// OK button closes it.
#[function_component(AlertModal)]
pub fn alert_modal(props: &AlertModalProps) -> Html {
    if !props.open {
        return html! {};
    }

    let onclick = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div
            data-testid="alert-modal"
            class="fixed inset-0 flex items-center justify-center"
            style="background-color: rgba(0, 0, 0, 0.5); z-index: 100;"
        >
            <div class="bg-white rounded shadow-lg p-6 w-80 text-center" role="alertdialog">
                <h1 class="text-xl font-semibold mb-2">{"Alert"}</h1>
                <p class="text-sm text-gray-700 mb-4">{props.message.clone()}</p>
                <button
                    {onclick}
                    class="px-4 py-1 bg-blue-500 text-white rounded hover:bg-blue-600"
                >
                    {"OK"}
                </button>
            </div>
        </div>
    }
}
