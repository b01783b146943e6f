// In-memory platform for exercising the overlay lifecycle without a window server.
//
// Handles are cheap clones over shared state so a test can keep one copy to
// inspect while the manager owns the other.

use std::cell::RefCell;
use std::rc::Rc;

use crate::surface::{Bounds, PresentationSurface, SurfaceError, SurfacePlatform, SurfaceResult};

struct SurfaceRecord {
    bounds: Bounds,
    opacity: f64,
    visible: bool,
    live: bool,
}

#[derive(Default)]
struct MockState {
    displays: Vec<Bounds>,
    surfaces: Vec<SurfaceRecord>,
    pending_failure: Option<SurfaceError>,
    hide_calls: usize,
}

#[derive(Clone, Default)]
pub struct MockPlatform {
    state: Rc<RefCell<MockState>>,
}

impl MockPlatform {
    pub fn with_displays(displays: Vec<Bounds>) -> Self {
        let platform = Self::default();
        platform.set_displays(displays);
        platform
    }

    /// Simulate a display being connected or removed.
    pub fn set_displays(&self, displays: Vec<Bounds>) {
        self.state.borrow_mut().displays = displays;
    }

    /// The next `create_surface` call fails with `error`.
    pub fn fail_next(&self, error: SurfaceError) {
        self.state.borrow_mut().pending_failure = Some(error);
    }

    /// Total surfaces ever created.
    pub fn created(&self) -> usize {
        self.state.borrow().surfaces.len()
    }

    pub fn hidden(&self) -> usize {
        self.state.borrow().hide_calls
    }

    pub fn live_count(&self) -> usize {
        self.state.borrow().surfaces.iter().filter(|s| s.live).count()
    }

    pub fn visible_count(&self) -> usize {
        self.state
            .borrow()
            .surfaces
            .iter()
            .filter(|s| s.live && s.visible)
            .count()
    }

    pub fn live_opacities(&self) -> Vec<f64> {
        self.state
            .borrow()
            .surfaces
            .iter()
            .filter(|s| s.live)
            .map(|s| s.opacity)
            .collect()
    }
}

impl SurfacePlatform for MockPlatform {
    type Surface = MockSurface;

    fn displays(&self) -> Vec<Bounds> {
        self.state.borrow().displays.clone()
    }

    fn create_surface(&self, bounds: Bounds, intensity: f64) -> SurfaceResult<MockSurface> {
        let mut state = self.state.borrow_mut();
        if let Some(err) = state.pending_failure.take() {
            return Err(err);
        }
        if bounds.is_empty() {
            return Err(SurfaceError::EmptyBounds(bounds));
        }
        state.surfaces.push(SurfaceRecord {
            bounds,
            opacity: intensity,
            visible: false,
            live: true,
        });
        Ok(MockSurface {
            index: state.surfaces.len() - 1,
            state: self.state.clone(),
        })
    }
}

pub struct MockSurface {
    index: usize,
    state: Rc<RefCell<MockState>>,
}

impl MockSurface {
    fn with_record<R>(&self, f: impl FnOnce(&mut SurfaceRecord) -> R) -> R {
        f(&mut self.state.borrow_mut().surfaces[self.index])
    }
}

impl PresentationSurface for MockSurface {
    fn show(&mut self) {
        self.with_record(|r| r.visible = true);
    }

    fn hide(&mut self) {
        self.with_record(|r| r.visible = false);
        self.state.borrow_mut().hide_calls += 1;
    }

    fn set_opacity(&mut self, intensity: f64) {
        self.with_record(|r| r.opacity = intensity);
    }

    fn bounds(&self) -> Bounds {
        self.with_record(|r| r.bounds)
    }
}

impl Drop for MockSurface {
    fn drop(&mut self) {
        self.with_record(|r| r.live = false);
    }
}
