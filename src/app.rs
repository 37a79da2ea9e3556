use yew::prelude::*;

use crate::editor_view::EditorView;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class="p-4">
            <p style="font-weight: 400; font-family: 'Open Sans', sans-serif; font-size: 32px; line-height: 20px;">
                {"Shape demos "}<b>{"· Kitchensink"}</b>
            </p>
            <EditorView />
        </div>
    }
}
