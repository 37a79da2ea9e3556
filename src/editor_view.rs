use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use crate::components::{AlertModal, Toolbar};
use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::image_loader::load_bitmap;
use crate::placement::OsRandom;
use crate::properties::{Property, PropertySnapshot};
use crate::properties_panel::PropertiesPanel;
use crate::render::CanvasRenderer;
use crate::scene::{DVec2, SceneGraph};
use crate::utils::{client_to_canvas_coords, is_delete_key, targets_editable};

const IMAGE_COLOR_MESSAGE: &str = "Cannot change color of image";

/// Everything that lives exactly as long as the mounted canvas
struct CanvasSession {
    editor: Editor<SceneGraph>,
    renderer: CanvasRenderer,
}

impl CanvasSession {
    /// Paint if the last operation asked for it
    fn repaint(&mut self) {
        if !self.editor.take_render_request() {
            return;
        }
        if let Some(scene) = self.editor.surface() {
            if let Err(err) = self.renderer.draw(scene) {
                log::error!("{err}");
            }
        }
    }
}

type Session = Rc<RefCell<CanvasSession>>;

/// Run `f` against the session and repaint. Before the canvas is mounted there
/// is no session and this does nothing.
fn with_session(
    session: &Option<Session>,
    update: &UseForceUpdateHandle,
    f: impl FnOnce(&mut CanvasSession),
) {
    let Some(session) = session else {
        return;
    };
    {
        let mut session = session.borrow_mut();
        f(&mut *session);
        session.repaint();
    }
    update.force_update();
}

/// Load the configured image in the background and place it when decoded.
/// Nothing happens if the view is gone by then.
fn spawn_image_load(session: Weak<RefCell<CanvasSession>>, url: String, update: UseForceUpdateHandle) {
    wasm_bindgen_futures::spawn_local(async move {
        let (element, bitmap) = match load_bitmap(&url).await {
            Ok(loaded) => loaded,
            Err(err) => {
                log::warn!("{err}");
                return;
            }
        };
        let Some(session) = session.upgrade() else {
            log::debug!("canvas closed before {url} finished loading");
            return;
        };
        {
            let mut session = session.borrow_mut();
            session.renderer.register_image(&bitmap.url, element);
            session.editor.add_image(bitmap);
            session.repaint();
        }
        update.force_update();
    });
}

#[function_component(EditorView)]
pub fn editor_view() -> Html {
    let config = use_memo((), |_| EditorConfig::default());
    let canvas_ref = use_node_ref();
    let session = use_state(|| None::<Session>);
    let update = use_force_update();

    // Create the canvas session on mount, release it on unmount
    {
        let canvas_ref = canvas_ref.clone();
        let session = session.clone();
        let update = update.clone();
        let config = (*config).clone();

        use_effect_with((), move |_| {
            let mut created: Option<Session> = None;
            let mut listener: Option<EventListener> = None;

            match canvas_ref.cast::<HtmlCanvasElement>() {
                Some(canvas) => match CanvasRenderer::new(&canvas) {
                    Ok(renderer) => {
                        let mut editor = Editor::new(config.clone(), OsRandom);
                        editor.attach(SceneGraph::new(config.canvas_width, config.canvas_height));
                        let shared = Rc::new(RefCell::new(CanvasSession { editor, renderer }));
                        shared.borrow_mut().repaint();

                        // Delete/Backspace removes the selection unless typing in a field
                        // or the alert is up
                        let for_keys = Rc::downgrade(&shared);
                        let update = update.clone();
                        listener = Some(EventListener::new(&gloo::utils::document(), "keydown", move |event| {
                            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                                return;
                            };
                            if !is_delete_key(&key_event.key()) || targets_editable(event) {
                                return;
                            }
                            if let Some(shared) = for_keys.upgrade() {
                                if shared.borrow().editor.alert_open() {
                                    return;
                                }
                                key_event.prevent_default();
                                with_session(&Some(shared), &update, |s| {
                                    s.editor.delete_selected();
                                });
                            }
                        }));

                        session.set(Some(shared.clone()));
                        created = Some(shared);
                    }
                    Err(err) => log::error!("{err}"),
                },
                None => log::error!("canvas element missing at mount"),
            }

            move || {
                drop(listener);
                if let Some(shared) = created {
                    shared.borrow_mut().editor.release();
                }
            }
        });
    }

    let toolbar_action = |action: fn(&mut Editor<SceneGraph>)| {
        let session = (*session).clone();
        let update = update.clone();
        Callback::from(move |_: ()| {
            with_session(&session, &update, |s| action(&mut s.editor));
        })
    };

    let on_add_rectangle = toolbar_action(|e| {
        e.add_rectangle();
    });
    let on_add_circle = toolbar_action(|e| {
        e.add_circle();
    });
    let on_add_text = toolbar_action(|e| {
        e.add_text_box();
    });
    let on_add_path = toolbar_action(|e| {
        e.add_path();
    });
    let on_delete = toolbar_action(|e| {
        e.delete_selected();
    });

    let on_add_image = {
        let session = (*session).clone();
        let update = update.clone();
        let url = config.image_url.clone();
        Callback::from(move |_: ()| {
            if let Some(shared) = &session {
                spawn_image_load(Rc::downgrade(shared), url.clone(), update.clone());
            }
        })
    };

    let on_property_change = {
        let session = (*session).clone();
        let update = update.clone();
        Callback::from(move |(property, value): (Property, String)| {
            with_session(&session, &update, |s| {
                s.editor.apply_property(property, &value);
            });
        })
    };

    let on_close_alert = {
        let session = (*session).clone();
        let update = update.clone();
        Callback::from(move |_: ()| {
            with_session(&session, &update, |s| s.editor.dismiss_alert());
        })
    };

    let pointer = |action: fn(&mut Editor<SceneGraph>, DVec2), only_while_dragging: bool| {
        let session = (*session).clone();
        let update = update.clone();
        let canvas_ref = canvas_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            let Some(shared) = &session else {
                return;
            };
            if only_while_dragging {
                let dragging = shared
                    .borrow()
                    .editor
                    .surface()
                    .map(|scene| scene.is_dragging())
                    .unwrap_or(false);
                if !dragging {
                    return;
                }
            }
            let point = client_to_canvas_coords(&e, &canvas);
            with_session(&session, &update, |s| action(&mut s.editor, point));
        })
    };

    let onmousedown = pointer(|e, p| e.pointer_down(p), false);
    let onmousemove = pointer(|e, p| e.pointer_move(p), true);
    let onmouseup = pointer(|e, p| e.pointer_up(p), true);
    let onmouseleave = pointer(|e, p| e.pointer_up(p), true);

    let (snapshot, alert_open, shape_count) = match &*session {
        Some(shared) => {
            let shared = shared.borrow();
            (
                shared.editor.snapshot().clone(),
                shared.editor.alert_open(),
                shared.editor.shapes().len(),
            )
        }
        None => (PropertySnapshot::default(), false, 0),
    };
    let has_selection = snapshot.has_selection();

    html! {
        <div>
            <AlertModal
                open={alert_open}
                message={IMAGE_COLOR_MESSAGE}
                on_close={on_close_alert}
            />
            <div class="flex">
                <div class="p-2">
                    <canvas
                        ref={canvas_ref}
                        width={config.canvas_width.to_string()}
                        height={config.canvas_height.to_string()}
                        data-testid="main-canvas"
                        data-shape-count={shape_count.to_string()}
                        style="border: 1px solid black;"
                        {onmousedown}
                        {onmousemove}
                        {onmouseup}
                        {onmouseleave}
                    />
                    <Toolbar
                        {on_add_rectangle}
                        {on_add_circle}
                        {on_add_text}
                        {on_add_path}
                        {on_add_image}
                        {on_delete}
                        {has_selection}
                    />
                </div>
                <PropertiesPanel
                    {snapshot}
                    palette={config.palette.clone()}
                    on_change={on_property_change}
                />
            </div>
        </div>
    }
}
