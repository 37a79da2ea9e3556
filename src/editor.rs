//! Drawing surface adapter.
//!
//! [`Editor`] turns toolbar actions and panel edits into shape mutations on
//! the attached [`Surface`], and turns the surface's selection/transform
//! events back into a [`PropertySnapshot`] for the panel.

use crate::config::EditorConfig;
use crate::placement::{FirstPlacement, OsRandom, Placer, RandomSource};
use crate::properties::{parse_number, Property, PropertyOutcome, PropertySnapshot};
use crate::scene::{DVec2, Shape, ShapeGeometry, ShapeKind};
use crate::surface::{Surface, SurfaceEvent};

pub const RECT_SIZE: (f64, f64) = (400.0, 100.0);
pub const CIRCLE_RADIUS: f64 = 50.0;
pub const TEXT_BOX_SIZE: (f64, f64) = (400.0, 100.0);
pub const TEXT_BOX_CONTENT: &str = "Shapes are awesome!!!!";

/// Decorative path placed by "Add Path" (about 150 x 150)
pub const PATH_DATA: &str = "M121.32,0L44.58,0C36.67,0,29.5,3.22,24.31,8.41\
c-5.19,5.19-8.41,12.37-8.41,20.28c0,15.82,12.87,28.69,28.69,28.69c0,0,4.4,\
0,7.48,0C36.66,72.78,8.4,101.04,8.4,101.04C2.98,106.45,0,113.66,0,121.32\
c0,7.66,2.98,14.87,8.4,20.29l0,0c5.42,5.42,12.62,8.4,20.28,8.4c7.66,0,14.87\
-2.98,20.29-8.4c0,0,28.26-28.25,43.66-43.66c0,3.08,0,7.48,0,7.48c0,15.82,\
12.87,28.69,28.69,28.69c7.66,0,14.87-2.99,20.29-8.4c5.42-5.42,8.4-12.62,8.4\
-20.28l0-76.74c0-7.66-2.98-14.87-8.4-20.29C136.19,2.98,128.98,0,121.32,0z";

/// A decoded image ready to be placed
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    pub url: String,
    pub width: f64,
    pub height: f64,
}

/// Canvas session plus everything the UI derives from it.
///
/// Until a surface is attached (and after it is released) every operation is
/// a silent no-op.
pub struct Editor<S, R = OsRandom> {
    config: EditorConfig,
    surface: Option<S>,
    placer: Placer<R>,
    snapshot: PropertySnapshot,
    alert_open: bool,
}

impl<S: Surface, R: RandomSource> Editor<S, R> {
    pub fn new(config: EditorConfig, rng: R) -> Self {
        Self {
            config,
            surface: None,
            placer: Placer::new(rng),
            snapshot: PropertySnapshot::default(),
            alert_open: false,
        }
    }

    // === Session lifecycle ===

    /// Start the canvas session
    pub fn attach(&mut self, surface: S) {
        let size = surface.canvas_size();
        log::info!("canvas session attached ({}x{})", size.x, size.y);
        self.surface = Some(surface);
        self.refresh_snapshot();
    }

    /// End the canvas session and hand the surface back for disposal
    pub fn release(&mut self) -> Option<S> {
        let surface = self.surface.take();
        if surface.is_some() {
            log::info!("canvas session released");
        }
        self.snapshot = PropertySnapshot::default();
        self.alert_open = false;
        surface
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    // === Read side ===

    pub fn snapshot(&self) -> &PropertySnapshot {
        &self.snapshot
    }

    pub fn shapes(&self) -> &[Shape] {
        self.surface.as_ref().map(|s| s.shapes()).unwrap_or(&[])
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        let surface = self.surface.as_ref()?;
        surface.shape(surface.selected()?)
    }

    pub fn first_placement(&self) -> &FirstPlacement {
        self.placer.flags()
    }

    /// Whether the "unsupported operation" alert is showing
    pub fn alert_open(&self) -> bool {
        self.alert_open
    }

    /// User acknowledged the alert
    pub fn dismiss_alert(&mut self) {
        self.alert_open = false;
    }

    /// Whether the surface needs repainting; resets the request
    pub fn take_render_request(&mut self) -> bool {
        self.surface
            .as_mut()
            .map(|s| s.take_render_request())
            .unwrap_or(false)
    }

    // === Toolbar ===

    pub fn add_rectangle(&mut self) -> Option<u64> {
        let (width, height) = RECT_SIZE;
        self.add_shape(Shape::new(
            ShapeGeometry::rectangle(width, height),
            Some("red".to_string()),
        ))
    }

    pub fn add_circle(&mut self) -> Option<u64> {
        self.add_shape(Shape::new(
            ShapeGeometry::circle(CIRCLE_RADIUS),
            Some("black".to_string()),
        ))
    }

    pub fn add_text_box(&mut self) -> Option<u64> {
        let (width, height) = TEXT_BOX_SIZE;
        self.add_shape(Shape::new(
            ShapeGeometry::text_box(TEXT_BOX_CONTENT, width, height),
            Some("blue".to_string()),
        ))
    }

    pub fn add_path(&mut self) -> Option<u64> {
        self.add_shape(Shape::new(
            ShapeGeometry::path(PATH_DATA),
            Some("green".to_string()),
        ))
    }

    /// Place a bitmap that finished loading
    pub fn add_image(&mut self, bitmap: Bitmap) -> Option<u64> {
        self.add_shape(Shape::new(
            ShapeGeometry::image(bitmap.url, bitmap.width, bitmap.height),
            None,
        ))
    }

    fn add_shape(&mut self, shape: Shape) -> Option<u64> {
        let surface = self.surface.as_mut()?;
        let kind = shape.kind();
        let position = self
            .placer
            .place(kind, shape.effective_size(), surface.canvas_size());
        let id = surface.add(shape.with_position(position));
        surface.request_render();
        log::debug!("added {kind} #{id} at ({}, {})", position.x, position.y);
        Some(id)
    }

    /// Remove the selected shape. Returns it, or `None` when nothing was
    /// selected. Blocked while the alert is open.
    pub fn delete_selected(&mut self) -> Option<Shape> {
        if self.alert_open {
            return None;
        }
        let surface = self.surface.as_mut()?;
        let id = surface.selected()?;
        let removed = surface.remove(id);
        surface.clear_selection();
        surface.request_render();
        self.snapshot = PropertySnapshot::default();
        log::debug!("deleted shape #{id}");
        removed
    }

    // === Property panel ===

    /// Apply a raw form value to the selected shape
    pub fn apply_property(&mut self, property: Property, raw: &str) -> PropertyOutcome {
        let fallback_size = self.config.fallback_size;
        let Some(surface) = self.surface.as_mut() else {
            return PropertyOutcome::Ignored;
        };
        let Some(id) = surface.selected() else {
            return PropertyOutcome::Ignored;
        };

        let outcome = match surface.shape_mut(id) {
            Some(shape) => {
                let outcome = mutate(shape, property, raw, fallback_size);
                if outcome == PropertyOutcome::Applied {
                    shape.set_coords();
                }
                outcome
            }
            None => PropertyOutcome::Ignored,
        };

        match outcome {
            PropertyOutcome::Applied => {
                surface.request_render();
                log::debug!("set {property} of #{id} from {raw:?}");
                self.refresh_snapshot();
            }
            PropertyOutcome::Unsupported => {
                log::warn!("cannot change {property} of image #{id}");
                self.alert_open = true;
            }
            PropertyOutcome::Ignored => {}
        }
        outcome
    }

    // === Surface events ===

    /// Pointer pressed on the canvas
    pub fn pointer_down(&mut self, point: DVec2) {
        if let Some(surface) = self.surface.as_mut() {
            surface.pointer_down(point);
        }
        self.pump_events();
    }

    pub fn pointer_move(&mut self, point: DVec2) {
        if let Some(surface) = self.surface.as_mut() {
            surface.pointer_move(point);
        }
        self.pump_events();
    }

    pub fn pointer_up(&mut self, point: DVec2) {
        if let Some(surface) = self.surface.as_mut() {
            surface.pointer_up(point);
        }
        self.pump_events();
    }

    /// Select a shape by id, as if it had been clicked
    pub fn select(&mut self, id: u64) {
        if let Some(surface) = self.surface.as_mut() {
            surface.select(id);
        }
        self.pump_events();
    }

    /// Process every event the surface queued since the last call
    pub fn pump_events(&mut self) {
        let events = match self.surface.as_mut() {
            Some(surface) => surface.drain_events(),
            None => return,
        };
        for event in events {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::SelectionCleared => {
                self.snapshot = PropertySnapshot::default();
            }
            SurfaceEvent::SelectionCreated(_)
            | SurfaceEvent::SelectionUpdated(_)
            | SurfaceEvent::ObjectMoving(_)
            | SurfaceEvent::ObjectModified(_) => self.refresh_snapshot(),
        }
    }

    /// Recompute the snapshot from the selected shape
    fn refresh_snapshot(&mut self) {
        self.snapshot = self
            .selected_shape()
            .map(PropertySnapshot::from_shape)
            .unwrap_or_default();
    }
}

impl<S: Surface> Editor<S, OsRandom> {
    /// Editor with default settings and browser entropy for placement
    pub fn with_defaults() -> Self {
        Self::new(EditorConfig::default(), OsRandom)
    }
}

fn mutate(shape: &mut Shape, property: Property, raw: &str, fallback_size: f64) -> PropertyOutcome {
    match property {
        Property::Color => {
            if shape.kind() == ShapeKind::Image {
                return PropertyOutcome::Unsupported;
            }
            let color = raw.trim();
            if color.is_empty() {
                return PropertyOutcome::Ignored;
            }
            shape.fill = Some(color.to_string());
        }
        Property::Top => shape.position.y = parse_number(raw).unwrap_or(0.0),
        Property::Left => shape.position.x = parse_number(raw).unwrap_or(0.0),
        Property::Width | Property::Height => {
            let target = parse_number(raw)
                .filter(|v| *v > 0.0)
                .unwrap_or(fallback_size);
            let intrinsic = shape.intrinsic_size();
            if property == Property::Width {
                if intrinsic.x <= 0.0 {
                    return PropertyOutcome::Ignored;
                }
                shape.scale.x = target / intrinsic.x;
            } else {
                if intrinsic.y <= 0.0 {
                    return PropertyOutcome::Ignored;
                }
                shape.scale.y = target / intrinsic.y;
            }
        }
        Property::Radius => {
            if shape.kind() != ShapeKind::Circle {
                return PropertyOutcome::Ignored;
            }
            match parse_number(raw).filter(|r| *r > 0.0) {
                Some(radius) => {
                    shape.set_radius(radius);
                }
                None => return PropertyOutcome::Ignored,
            }
        }
    }
    PropertyOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::tests::SeededRandom;
    use crate::scene::SceneGraph;

    fn editor() -> Editor<SceneGraph, SeededRandom> {
        let mut editor = Editor::new(EditorConfig::default(), SeededRandom::new(1));
        editor.attach(SceneGraph::new(1000.0, 500.0));
        editor
    }

    fn bitmap() -> Bitmap {
        Bitmap {
            url: "https://example.com/cat.jpeg".to_string(),
            width: 100.0,
            height: 150.0,
        }
    }

    fn add(editor: &mut Editor<SceneGraph, SeededRandom>, kind: ShapeKind) -> u64 {
        let id = match kind {
            ShapeKind::Rectangle => editor.add_rectangle(),
            ShapeKind::Circle => editor.add_circle(),
            ShapeKind::TextBox => editor.add_text_box(),
            ShapeKind::Path => editor.add_path(),
            ShapeKind::Image => editor.add_image(bitmap()),
        };
        id.unwrap()
    }

    fn shape(editor: &Editor<SceneGraph, SeededRandom>, id: u64) -> &Shape {
        editor.surface().unwrap().shape(id).unwrap()
    }

    #[test]
    fn test_first_add_of_each_kind_uses_fixed_position() {
        let mut editor = editor();
        let expected = [
            (ShapeKind::Rectangle, DVec2::new(50.0, 50.0)),
            (ShapeKind::Circle, DVec2::new(310.0, 310.0)),
            (ShapeKind::TextBox, DVec2::new(50.0, 200.0)),
            (ShapeKind::Path, DVec2::new(70.0, 290.0)),
            (ShapeKind::Image, DVec2::new(530.0, 30.0)),
        ];
        for (kind, position) in expected {
            let id = add(&mut editor, kind);
            assert_eq!(shape(&editor, id).position, position, "{kind}");
            assert!(!editor.first_placement().is_pending(kind));
        }
    }

    #[test]
    fn test_later_adds_stay_inside_canvas() {
        let mut editor = editor();
        for kind in ShapeKind::ALL {
            add(&mut editor, kind);
            for _ in 0..50 {
                let id = add(&mut editor, kind);
                let shape = shape(&editor, id);
                let max = DVec2::new(1000.0, 500.0) - shape.effective_size();
                assert!(shape.left() >= 0.0 && shape.left() < max.x, "{kind} x");
                assert!(shape.top() >= 0.0 && shape.top() < max.y, "{kind} y");
            }
        }
    }

    #[test]
    fn test_default_appearance() {
        let mut editor = editor();
        let rect = add(&mut editor, ShapeKind::Rectangle);
        let circle = add(&mut editor, ShapeKind::Circle);
        let text = add(&mut editor, ShapeKind::TextBox);
        let path = add(&mut editor, ShapeKind::Path);
        let image = add(&mut editor, ShapeKind::Image);

        assert_eq!(shape(&editor, rect).effective_size(), DVec2::new(400.0, 100.0));
        assert_eq!(shape(&editor, rect).fill.as_deref(), Some("red"));
        assert_eq!(shape(&editor, circle).radius(), Some(50.0));
        assert_eq!(shape(&editor, circle).fill.as_deref(), Some("black"));
        assert_eq!(shape(&editor, text).fill.as_deref(), Some("blue"));
        assert_eq!(shape(&editor, path).fill.as_deref(), Some("green"));
        assert_eq!(shape(&editor, image).fill, None);
        assert_eq!(shape(&editor, image).effective_size(), DVec2::new(100.0, 150.0));

        let path_size = shape(&editor, path).intrinsic_size();
        assert!((path_size.x - 150.0).abs() < 1.0);
        assert!((path_size.y - 150.0).abs() < 1.0);
    }

    #[test]
    fn test_operations_before_attach_are_noops() {
        let mut editor: Editor<SceneGraph, SeededRandom> =
            Editor::new(EditorConfig::default(), SeededRandom::new(1));

        assert_eq!(editor.add_rectangle(), None);
        assert_eq!(editor.add_image(bitmap()), None);
        assert_eq!(editor.apply_property(Property::Top, "10"), PropertyOutcome::Ignored);
        assert!(editor.delete_selected().is_none());
        editor.pointer_down(DVec2::new(10.0, 10.0));

        // The first-placement flag must survive a click before setup
        assert!(editor.first_placement().is_pending(ShapeKind::Rectangle));
        assert!(editor.shapes().is_empty());
        assert!(!editor.take_render_request());
    }

    #[test]
    fn test_width_edit_sets_horizontal_scale_only() {
        let mut editor = editor();
        let id = editor.add_rectangle().unwrap();
        editor.select(id);

        assert_eq!(editor.apply_property(Property::Width, "200"), PropertyOutcome::Applied);
        let shape = shape(&editor, id);
        assert_eq!(shape.scale, DVec2::new(0.5, 1.0));
        assert_eq!(shape.effective_size(), DVec2::new(200.0, 100.0));
        assert_eq!(shape.coords().max.x, 250.0);
        assert_eq!(editor.snapshot().width, 200.0);
    }

    #[test]
    fn test_invalid_size_falls_back_to_fifty() {
        let mut editor = editor();
        let id = editor.add_rectangle().unwrap();
        editor.select(id);

        editor.apply_property(Property::Width, "not-a-number");
        assert_eq!(shape(&editor, id).effective_size().x, 50.0);

        editor.apply_property(Property::Height, "-20");
        assert_eq!(shape(&editor, id).effective_size().y, 50.0);
        assert_eq!(shape(&editor, id).scale, DVec2::new(0.125, 0.5));
    }

    #[test]
    fn test_height_edit_on_circle_uses_diameter() {
        let mut editor = editor();
        let id = editor.add_circle().unwrap();
        editor.select(id);

        editor.apply_property(Property::Height, "300");
        let shape = shape(&editor, id);
        assert_eq!(shape.scale, DVec2::new(1.0, 3.0));
        assert_eq!(shape.radius(), Some(50.0));
    }

    #[test]
    fn test_position_edits() {
        let mut editor = editor();
        let id = editor.add_rectangle().unwrap();
        editor.select(id);

        editor.apply_property(Property::Top, "120.5");
        editor.apply_property(Property::Left, "7");
        assert_eq!(shape(&editor, id).position, DVec2::new(7.0, 120.5));

        editor.apply_property(Property::Left, "abc");
        assert_eq!(shape(&editor, id).position, DVec2::new(0.0, 120.5));
        assert_eq!(shape(&editor, id).coords().min, DVec2::new(0.0, 120.5));
        assert_eq!(editor.snapshot().left, 0.0);
    }

    #[test]
    fn test_color_edit_on_shape() {
        let mut editor = editor();
        let id = editor.add_rectangle().unwrap();
        editor.select(id);
        let before = shape(&editor, id).clone();

        assert_eq!(editor.apply_property(Property::Color, "blue"), PropertyOutcome::Applied);
        let after = shape(&editor, id);
        assert_eq!(after.fill.as_deref(), Some("blue"));
        assert_eq!(after.position, before.position);
        assert_eq!(after.scale, before.scale);
        assert!(!editor.alert_open());
        assert_eq!(editor.snapshot().color, "blue");
    }

    #[test]
    fn test_color_edit_on_image_raises_alert() {
        let mut editor = editor();
        let id = editor.add_image(bitmap()).unwrap();
        editor.select(id);

        assert_eq!(
            editor.apply_property(Property::Color, "blue"),
            PropertyOutcome::Unsupported
        );
        assert_eq!(shape(&editor, id).fill, None);
        assert!(editor.alert_open());

        // Only an explicit acknowledgement closes it
        editor.pointer_down(DVec2::new(900.0, 450.0));
        assert!(editor.alert_open());
        editor.dismiss_alert();
        assert!(!editor.alert_open());
    }

    #[test]
    fn test_radius_only_applies_to_circles() {
        let mut editor = editor();
        let rect = editor.add_rectangle().unwrap();
        editor.select(rect);
        let before = shape(&editor, rect).clone();
        assert_eq!(editor.apply_property(Property::Radius, "80"), PropertyOutcome::Ignored);
        assert_eq!(shape(&editor, rect), &before);

        let circle = editor.add_circle().unwrap();
        editor.select(circle);
        assert_eq!(editor.apply_property(Property::Radius, "80"), PropertyOutcome::Applied);
        assert_eq!(shape(&editor, circle).radius(), Some(80.0));
        assert_eq!(shape(&editor, circle).effective_size(), DVec2::new(160.0, 160.0));
        assert_eq!(editor.snapshot().radius, 80.0);
        assert_eq!(editor.snapshot().width, 160.0);
    }

    #[test]
    fn test_non_positive_radius_is_ignored() {
        let mut editor = editor();
        let circle = editor.add_circle().unwrap();
        editor.select(circle);

        for raw in ["0", "-5", "abc"] {
            assert_eq!(editor.apply_property(Property::Radius, raw), PropertyOutcome::Ignored);
        }
        assert_eq!(shape(&editor, circle).radius(), Some(50.0));

        // Still resizable and clickable
        assert_eq!(editor.apply_property(Property::Width, "120"), PropertyOutcome::Applied);
        assert_eq!(shape(&editor, circle).effective_size(), DVec2::new(120.0, 100.0));
        editor.pointer_down(DVec2::new(900.0, 450.0));
        assert!(!editor.snapshot().has_selection());
        editor.pointer_down(DVec2::new(360.0, 360.0));
        assert_eq!(editor.snapshot().kind, Some(ShapeKind::Circle));
    }

    #[test]
    fn test_delete_blocked_while_alert_open() {
        let mut editor = editor();
        let image = add(&mut editor, ShapeKind::Image);
        editor.select(image);
        assert_eq!(editor.apply_property(Property::Color, "blue"), PropertyOutcome::Unsupported);

        assert!(editor.delete_selected().is_none());
        assert_eq!(editor.shapes().len(), 1);
        assert_eq!(editor.snapshot().kind, Some(ShapeKind::Image));

        editor.dismiss_alert();
        assert_eq!(editor.delete_selected().map(|s| s.id), Some(image));
        assert!(editor.shapes().is_empty());
    }

    #[test]
    fn test_edit_without_selection_is_ignored() {
        let mut editor = editor();
        editor.add_rectangle();
        assert_eq!(editor.apply_property(Property::Width, "10"), PropertyOutcome::Ignored);
    }

    #[test]
    fn test_selection_populates_and_clear_resets_snapshot() {
        let mut editor = editor();
        let id = editor.add_circle().unwrap();

        editor.pointer_down(DVec2::new(360.0, 360.0));
        editor.pointer_up(DVec2::new(360.0, 360.0));
        let snapshot = editor.snapshot().clone();
        assert_eq!(snapshot.kind, Some(ShapeKind::Circle));
        assert_eq!(snapshot.color, "black");
        assert_eq!((snapshot.left, snapshot.top), (310.0, 310.0));
        assert_eq!((snapshot.width, snapshot.height), (100.0, 100.0));
        assert_eq!(snapshot.radius, 50.0);
        assert_eq!(editor.selected_shape().map(|s| s.id), Some(id));

        editor.pointer_down(DVec2::new(990.0, 10.0));
        assert_eq!(editor.snapshot(), &PropertySnapshot::default());
    }

    #[test]
    fn test_drag_keeps_snapshot_in_sync() {
        let mut editor = editor();
        editor.add_rectangle();

        editor.pointer_down(DVec2::new(60.0, 60.0));
        editor.pointer_move(DVec2::new(160.0, 80.0));
        assert_eq!((editor.snapshot().left, editor.snapshot().top), (150.0, 70.0));
        editor.pointer_up(DVec2::new(160.0, 80.0));
        assert_eq!((editor.snapshot().left, editor.snapshot().top), (150.0, 70.0));
    }

    #[test]
    fn test_switching_selection_updates_snapshot() {
        let mut editor = editor();
        let rect = editor.add_rectangle().unwrap();
        let circle = editor.add_circle().unwrap();

        editor.select(rect);
        assert_eq!(editor.snapshot().kind, Some(ShapeKind::Rectangle));
        editor.select(circle);
        assert_eq!(editor.snapshot().kind, Some(ShapeKind::Circle));
    }

    #[test]
    fn test_delete_selected() {
        let mut editor = editor();
        let keep = editor.add_circle().unwrap();
        let id = editor.add_rectangle().unwrap();
        editor.select(id);

        let removed = editor.delete_selected().unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(editor.shapes().len(), 1);
        assert_eq!(editor.shapes()[0].id, keep);
        assert!(editor.selected_shape().is_none());
        assert!(!editor.snapshot().has_selection());
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let mut editor = editor();
        editor.add_rectangle();
        editor.take_render_request();

        assert!(editor.delete_selected().is_none());
        assert_eq!(editor.shapes().len(), 1);
        assert!(!editor.take_render_request());
    }

    #[test]
    fn test_release_ends_session() {
        let mut editor = editor();
        let id = editor.add_rectangle().unwrap();
        editor.select(id);

        let surface = editor.release().unwrap();
        assert_eq!(surface.len(), 1);
        assert!(!editor.is_attached());
        assert!(!editor.snapshot().has_selection());
        assert_eq!(editor.add_image(bitmap()), None);
    }
}
