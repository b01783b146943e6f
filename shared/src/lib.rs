// Curtains — portable core shared by the platform front-ends.
//
// Everything in this crate runs on whichever thread the front-end drives it
// from; nothing here touches a window server directly. Platform code plugs in
// through the `surface` traits and the `prefs::KeyValueStore` seam.

pub mod config;
pub mod curtains;
pub mod dimming;
pub mod logger;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;
pub mod overlay;
pub mod prefs;
pub mod status;
pub mod surface;

pub use curtains::Curtains;
pub use dimming::{clamp_intensity, DEFAULT_INTENSITY, MAX_INTENSITY, MIN_INTENSITY};
pub use overlay::OverlayManager;
pub use status::{ButtonFace, StatusPresentation};
pub use surface::{Bounds, PresentationSurface, SurfaceError, SurfacePlatform, SurfaceResult};
