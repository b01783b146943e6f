// Overlay lifecycle: one dimming surface per display while the curtains are drawn.
//
// State is binary. Open means the surface list is empty; closed means it holds
// one surface per display that existed at the last `draw()`. Display changes
// while closed are not reconciled; the next draw re-enumerates from scratch.

use log::{debug, info, warn};

use crate::surface::{Bounds, PresentationSurface, SurfacePlatform};

pub struct OverlayManager<P: SurfacePlatform> {
    platform: P,
    surfaces: Vec<P::Surface>,
    closed: bool,
    /// Applied to live surfaces immediately, and to the next draw when open.
    intensity: f64,
}

impl<P: SurfacePlatform> OverlayManager<P> {
    pub fn new(platform: P, intensity: f64) -> Self {
        Self {
            platform,
            surfaces: Vec::new(),
            closed: false,
            intensity,
        }
    }

    /// Cover every connected display with a fresh surface.
    ///
    /// Any surfaces left over from a previous draw are released first, so
    /// calling this while closed rebuilds the set against the current displays.
    pub fn draw(&mut self) {
        if !self.surfaces.is_empty() {
            self.release_all();
        }

        let displays = self.platform.displays();
        for bounds in displays.iter().copied() {
            match self.platform.create_surface(bounds, self.intensity) {
                Ok(mut surface) => {
                    surface.show();
                    self.surfaces.push(surface);
                }
                Err(e) => warn!("Skipping display {:?}: {}", bounds, e),
            }
        }

        self.closed = true;
        info!(
            "Curtains drawn on {}/{} display(s) at {:.2}",
            self.surfaces.len(),
            displays.len(),
            self.intensity
        );
    }

    /// Hide and drop every surface. Calling this while open does nothing.
    pub fn undraw(&mut self) {
        if !self.closed && self.surfaces.is_empty() {
            return;
        }
        let released = self.release_all();
        self.closed = false;
        info!("Curtains opened, released {} surface(s)", released);
    }

    /// Update opacity on live surfaces in place; cached for the next draw otherwise.
    pub fn set_intensity(&mut self, intensity: f64) {
        self.intensity = intensity;
        for surface in self.surfaces.iter_mut() {
            surface.set_opacity(intensity);
        }
        debug!(
            "Intensity {:.2} applied to {} surface(s)",
            intensity,
            self.surfaces.len()
        );
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Geometry of every owned surface, in creation order.
    pub fn bounds(&self) -> Vec<Bounds> {
        self.surfaces.iter().map(|s| s.bounds()).collect()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    fn release_all(&mut self) -> usize {
        let count = self.surfaces.len();
        for mut surface in self.surfaces.drain(..) {
            surface.hide();
        }
        count
    }
}

impl<P: SurfacePlatform> Drop for OverlayManager<P> {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPlatform;
    use crate::surface::SurfaceError;

    fn two_displays() -> MockPlatform {
        MockPlatform::with_displays(vec![
            Bounds::new(0.0, 0.0, 1440.0, 900.0),
            Bounds::new(1440.0, 0.0, 1920.0, 1080.0),
        ])
    }

    #[test]
    fn test_new_manager_is_open() {
        let manager = OverlayManager::new(two_displays(), 0.5);
        assert!(!manager.is_closed());
        assert_eq!(manager.count(), 0);
        assert_eq!(manager.platform().created(), 0);
    }

    #[test]
    fn test_draw_covers_every_display() {
        let platform = two_displays();
        let mut manager = OverlayManager::new(platform.clone(), 0.5);
        manager.draw();

        assert!(manager.is_closed());
        assert_eq!(manager.count(), 2);
        assert_eq!(manager.bounds(), platform.displays());
        assert_eq!(platform.visible_count(), 2);
        assert_eq!(platform.live_opacities(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_undraw_releases_everything() {
        let platform = two_displays();
        let mut manager = OverlayManager::new(platform.clone(), 0.5);
        manager.draw();
        manager.undraw();

        assert!(!manager.is_closed());
        assert_eq!(manager.count(), 0);
        assert_eq!(platform.visible_count(), 0);
        assert_eq!(platform.live_count(), 0);
    }

    #[test]
    fn test_undraw_is_idempotent() {
        let platform = two_displays();
        let mut manager = OverlayManager::new(platform.clone(), 0.5);
        manager.undraw();
        assert_eq!(manager.count(), 0);

        manager.draw();
        manager.undraw();
        manager.undraw();
        assert_eq!(manager.count(), 0);
        assert_eq!(platform.hidden(), 2);
    }

    #[test]
    fn test_intensity_while_open_applies_on_next_draw() {
        let platform = two_displays();
        let mut manager = OverlayManager::new(platform.clone(), 0.5);
        manager.set_intensity(0.7);
        assert_eq!(platform.created(), 0);

        manager.draw();
        assert_eq!(platform.live_opacities(), vec![0.7, 0.7]);
    }

    #[test]
    fn test_intensity_while_closed_updates_in_place() {
        let platform = two_displays();
        let mut manager = OverlayManager::new(platform.clone(), 0.5);
        manager.draw();
        manager.set_intensity(0.3);

        assert_eq!(manager.count(), 2);
        assert_eq!(platform.created(), 2);
        assert_eq!(platform.live_opacities(), vec![0.3, 0.3]);
    }

    #[test]
    fn test_redraw_while_closed_rebuilds_set() {
        let platform = two_displays();
        let mut manager = OverlayManager::new(platform.clone(), 0.5);
        manager.draw();
        platform.set_displays(vec![Bounds::new(0.0, 0.0, 1440.0, 900.0)]);

        // No reconciliation until the next draw.
        assert_eq!(manager.count(), 2);

        manager.draw();
        assert_eq!(manager.count(), 1);
        assert_eq!(platform.live_count(), 1);
        assert_eq!(platform.created(), 3);
    }

    #[test]
    fn test_redraw_while_closed_uses_latest_intensity() {
        let platform = two_displays();
        let mut manager = OverlayManager::new(platform.clone(), 0.5);
        manager.draw();
        manager.set_intensity(0.8);
        manager.draw();

        assert_eq!(manager.count(), 2);
        assert_eq!(platform.live_count(), 2);
        assert_eq!(platform.live_opacities(), vec![0.8, 0.8]);
    }

    #[test]
    fn test_failed_surface_is_skipped() {
        let platform = two_displays();
        platform.fail_next(SurfaceError::Platform("no window".into()));
        let mut manager = OverlayManager::new(platform.clone(), 0.5);
        manager.draw();

        assert!(manager.is_closed());
        assert_eq!(manager.count(), 1);
        assert_eq!(manager.bounds(), vec![Bounds::new(1440.0, 0.0, 1920.0, 1080.0)]);
    }

    #[test]
    fn test_no_displays_yields_degenerate_closed_state() {
        let platform = MockPlatform::with_displays(vec![]);
        let mut manager = OverlayManager::new(platform, 0.5);
        manager.draw();
        assert!(manager.is_closed());
        assert_eq!(manager.count(), 0);

        manager.undraw();
        assert!(!manager.is_closed());
    }

    #[test]
    fn test_drop_hides_live_surfaces() {
        let platform = two_displays();
        {
            let mut manager = OverlayManager::new(platform.clone(), 0.5);
            manager.draw();
        }
        assert_eq!(platform.live_count(), 0);
        assert_eq!(platform.visible_count(), 0);
    }
}
