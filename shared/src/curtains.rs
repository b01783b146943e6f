// Application state owned by the process entry point.
//
// Every user action from the status item funnels through here: the overlay
// set, the cached intensity and the persisted preference stay in step without
// any global state.

use log::info;

use crate::dimming::clamp_intensity;
use crate::overlay::OverlayManager;
use crate::prefs::{DimPreference, KeyValueStore};
use crate::status::StatusPresentation;
use crate::surface::SurfacePlatform;

pub struct Curtains<P: SurfacePlatform, S: KeyValueStore> {
    overlays: OverlayManager<P>,
    prefs: DimPreference<S>,
}

impl<P: SurfacePlatform, S: KeyValueStore> Curtains<P, S> {
    /// Starts open, with the intensity read once from `store`.
    pub fn new(platform: P, store: S) -> Self {
        let prefs = DimPreference::new(store);
        let intensity = prefs.load();
        info!("Starting with intensity {:.2}", intensity);
        Self {
            overlays: OverlayManager::new(platform, intensity),
            prefs,
        }
    }

    /// Draw when open, open when drawn. Returns what the status item should show.
    pub fn toggle(&mut self) -> StatusPresentation {
        if self.overlays.is_closed() {
            self.overlays.undraw();
        } else {
            self.overlays.draw();
        }
        self.presentation()
    }

    /// Slider input: clamp, apply live, persist.
    pub fn set_intensity(&mut self, value: f64) -> f64 {
        let intensity = clamp_intensity(value);
        self.overlays.set_intensity(intensity);
        self.prefs.save(intensity);
        intensity
    }

    /// Tear down overlays before the process exits.
    pub fn close_all(&mut self) {
        self.overlays.undraw();
    }

    pub fn presentation(&self) -> StatusPresentation {
        StatusPresentation::for_state(self.overlays.is_closed())
    }

    pub fn is_closed(&self) -> bool {
        self.overlays.is_closed()
    }

    pub fn intensity(&self) -> f64 {
        self.overlays.intensity()
    }

    pub fn overlays(&self) -> &OverlayManager<P> {
        &self.overlays
    }

    pub fn prefs(&self) -> &DimPreference<S> {
        &self.prefs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimming::{DEFAULT_INTENSITY, MAX_INTENSITY, MIN_INTENSITY};
    use crate::mock::MockPlatform;
    use crate::prefs::{MemoryStore, DIM_AMOUNT_KEY};
    use crate::surface::Bounds;

    fn single_display() -> MockPlatform {
        MockPlatform::with_displays(vec![Bounds::new(0.0, 0.0, 1512.0, 982.0)])
    }

    #[test]
    fn test_starts_open_with_default_intensity() {
        let curtains = Curtains::new(single_display(), MemoryStore::new());
        assert!(!curtains.is_closed());
        assert_eq!(curtains.intensity(), DEFAULT_INTENSITY);
        assert_eq!(curtains.presentation().toggle_title, "Draw Curtains");
    }

    #[test]
    fn test_starts_with_persisted_intensity() {
        let mut store = MemoryStore::new();
        store.set_f64(DIM_AMOUNT_KEY, 0.25).unwrap();
        let curtains = Curtains::new(single_display(), store);
        assert_eq!(curtains.intensity(), 0.25);
    }

    #[test]
    fn test_toggle_flips_presentation() {
        let platform = single_display();
        let mut curtains = Curtains::new(platform.clone(), MemoryStore::new());

        let shown = curtains.toggle();
        assert!(shown.closed);
        assert_eq!(shown.toggle_title, "Open Curtains");
        assert_eq!(platform.visible_count(), 1);

        let shown = curtains.toggle();
        assert!(!shown.closed);
        assert_eq!(shown.toggle_title, "Draw Curtains");
        assert_eq!(platform.visible_count(), 0);
    }

    #[test]
    fn test_set_intensity_clamps_and_persists() {
        let mut curtains = Curtains::new(single_display(), MemoryStore::new());

        assert_eq!(curtains.set_intensity(0.95), MAX_INTENSITY);
        assert_eq!(curtains.prefs().load(), MAX_INTENSITY);

        assert_eq!(curtains.set_intensity(0.0), MIN_INTENSITY);
        assert_eq!(curtains.prefs().load(), MIN_INTENSITY);
        assert_eq!(curtains.intensity(), MIN_INTENSITY);
    }

    #[test]
    fn test_open_state_is_not_persisted() {
        let platform = single_display();
        let mut first = Curtains::new(platform.clone(), MemoryStore::new());
        first.toggle();
        first.set_intensity(0.6);
        let store = first.prefs().store().clone();
        first.close_all();
        drop(first);

        let second = Curtains::new(platform, store);
        assert!(!second.is_closed());
        assert_eq!(second.intensity(), 0.6);
    }

    #[test]
    fn test_close_all_releases_overlays() {
        let platform = single_display();
        let mut curtains = Curtains::new(platform.clone(), MemoryStore::new());
        curtains.toggle();
        curtains.close_all();
        assert_eq!(curtains.overlays().count(), 0);
        assert_eq!(platform.live_count(), 0);
    }
}
