use super::shape::Shape;
use super::types::{BBox, DVec2};
use crate::surface::{Surface, SurfaceEvent};

/// Side length of the square scale handle on the selected shape
pub const HANDLE_SIZE: f64 = 10.0;

/// Scale gestures never shrink a shape below this effective size
const MIN_EFFECTIVE_SIZE: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Drag {
    /// Dragging the body of a shape; `grab_offset` is pointer minus position
    Move { id: u64, grab_offset: DVec2, moved: bool },
    /// Dragging the bottom-right handle
    Scale { id: u64, moved: bool },
}

impl Drag {
    fn finish(self) -> Option<u64> {
        match self {
            Drag::Move { id, moved: true, .. } | Drag::Scale { id, moved: true } => Some(id),
            _ => None,
        }
    }
}

/// In-memory drawing surface: owns the shapes, the single selection, pointer
/// gestures and the queue of surface events
pub struct SceneGraph {
    size: DVec2,
    /// All shapes, bottom to top
    shapes: Vec<Shape>,
    selection: Option<u64>,
    drag: Option<Drag>,
    events: Vec<SurfaceEvent>,
    render_requested: bool,
}

impl SceneGraph {
    /// Create an empty scene for a canvas of the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: DVec2::new(width, height),
            shapes: Vec::new(),
            selection: None,
            drag: None,
            events: Vec::new(),
            render_requested: true,
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Topmost shape under the point
    pub fn hit_test(&self, point: DVec2) -> Option<u64> {
        self.shapes
            .iter()
            .rev()
            .find(|shape| shape.contains_point(point))
            .map(|shape| shape.id)
    }

    /// Bounds of the scale handle, centred on the selected shape's
    /// bottom-right corner
    pub fn scale_handle(&self) -> Option<BBox> {
        let shape = self.shape(self.selection?)?;
        let corner = shape.coords().max;
        Some(BBox::new(corner, corner).expand(HANDLE_SIZE / 2.0))
    }

    /// Whether a drag gesture is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

impl Surface for SceneGraph {
    fn canvas_size(&self) -> DVec2 {
        self.size
    }

    fn add(&mut self, shape: Shape) -> u64 {
        let id = shape.id;
        self.shapes.push(shape);
        self.render_requested = true;
        id
    }

    fn remove(&mut self, id: u64) -> Option<Shape> {
        let pos = self.shapes.iter().position(|s| s.id == id)?;
        if self.selection == Some(id) {
            self.selection = None;
        }
        if matches!(self.drag, Some(Drag::Move { id: d, .. } | Drag::Scale { id: d, .. }) if d == id) {
            self.drag = None;
        }
        self.render_requested = true;
        Some(self.shapes.remove(pos))
    }

    fn shape(&self, id: u64) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    fn shape_mut(&mut self, id: u64) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn selected(&self) -> Option<u64> {
        self.selection
    }

    fn select(&mut self, id: u64) {
        if self.shape(id).is_none() {
            return;
        }
        match self.selection {
            None => self.events.push(SurfaceEvent::SelectionCreated(id)),
            Some(current) if current != id => self.events.push(SurfaceEvent::SelectionUpdated(id)),
            Some(_) => return,
        }
        self.selection = Some(id);
        self.render_requested = true;
    }

    fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.render_requested = true;
        }
    }

    fn request_render(&mut self) {
        self.render_requested = true;
    }

    fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    fn pointer_down(&mut self, point: DVec2) {
        if let (Some(id), Some(handle)) = (self.selection, self.scale_handle()) {
            if handle.contains(point) {
                self.drag = Some(Drag::Scale { id, moved: false });
                return;
            }
        }

        match self.hit_test(point) {
            Some(id) => {
                self.select(id);
                if let Some(shape) = self.shape(id) {
                    self.drag = Some(Drag::Move {
                        id,
                        grab_offset: point - shape.position,
                        moved: false,
                    });
                }
            }
            None => {
                self.drag = None;
                if self.selection.take().is_some() {
                    self.events.push(SurfaceEvent::SelectionCleared);
                    self.render_requested = true;
                }
            }
        }
    }

    fn pointer_move(&mut self, point: DVec2) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        match drag {
            Drag::Move { id, grab_offset, moved } => {
                let Some(shape) = self.shapes.iter_mut().find(|s| s.id == *id) else {
                    return;
                };
                shape.position = point - *grab_offset;
                shape.set_coords();
                *moved = true;
                self.events.push(SurfaceEvent::ObjectMoving(*id));
            }
            Drag::Scale { id, moved } => {
                let Some(shape) = self.shapes.iter_mut().find(|s| s.id == *id) else {
                    return;
                };
                let target = (point - shape.position).max(DVec2::splat(MIN_EFFECTIVE_SIZE));
                let intrinsic = shape.intrinsic_size();
                if intrinsic.x > 0.0 {
                    shape.scale.x = target.x / intrinsic.x;
                }
                if intrinsic.y > 0.0 {
                    shape.scale.y = target.y / intrinsic.y;
                }
                shape.set_coords();
                *moved = true;
            }
        }
        self.render_requested = true;
    }

    fn pointer_up(&mut self, _point: DVec2) {
        if let Some(id) = self.drag.take().and_then(Drag::finish) {
            self.events.push(SurfaceEvent::ObjectModified(id));
            self.render_requested = true;
        }
    }

    fn drain_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }
}
