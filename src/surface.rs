//! Capability interface between the editor and the drawing surface.
//!
//! The editor never renders or hit-tests on its own. It creates shapes, hands
//! them to a [`Surface`], and reacts to the [`SurfaceEvent`]s the surface
//! queues while the user clicks and drags.

use crate::scene::{DVec2, Shape};

/// Selection and transform notifications raised by the surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// A shape became selected while nothing was selected
    SelectionCreated(u64),
    /// The selection moved from one shape to another
    SelectionUpdated(u64),
    SelectionCleared,
    /// The selected shape is being dragged
    ObjectMoving(u64),
    /// A drag or scale gesture finished and changed the shape
    ObjectModified(u64),
}

pub trait Surface {
    /// Canvas width and height
    fn canvas_size(&self) -> DVec2;

    /// Add a shape on top of the z-order, returning its id
    fn add(&mut self, shape: Shape) -> u64;

    /// Remove a shape; a selected shape is deselected silently
    fn remove(&mut self, id: u64) -> Option<Shape>;

    fn shape(&self, id: u64) -> Option<&Shape>;

    fn shape_mut(&mut self, id: u64) -> Option<&mut Shape>;

    /// Shapes bottom to top
    fn shapes(&self) -> &[Shape];

    fn selected(&self) -> Option<u64>;

    /// Select a shape programmatically, queueing the matching event
    fn select(&mut self, id: u64);

    /// Drop the selection without queueing an event
    fn clear_selection(&mut self);

    /// Ask for a redraw on the next frame
    fn request_render(&mut self);

    /// Whether a redraw was requested since the last call; resets the flag
    fn take_render_request(&mut self) -> bool;

    fn pointer_down(&mut self, point: DVec2);

    fn pointer_move(&mut self, point: DVec2);

    fn pointer_up(&mut self, point: DVec2);

    /// Hand over all events queued since the last call, oldest first
    fn drain_events(&mut self) -> Vec<SurfaceEvent>;
}
