// Presentation-surface seam between the overlay manager and a window server.
//
// A platform hands out one surface per display. The manager only ever asks a
// surface to show, hide, change opacity or report its geometry; every other
// window attribute (level, click-through, spaces behaviour) is fixed by the
// platform at construction time.

use thiserror::Error;

/// Display rectangle in the platform's global screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("display bounds {0:?} are empty")]
    EmptyBounds(Bounds),
    #[error("window server refused to create a surface: {0}")]
    Platform(String),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// One translucent, click-through, topmost window covering a display.
pub trait PresentationSurface {
    fn show(&mut self);

    fn hide(&mut self);

    /// Change the alpha of the black background without recreating the window.
    fn set_opacity(&mut self, intensity: f64);

    fn bounds(&self) -> Bounds;
}

/// Enumerates displays and builds surfaces for them.
pub trait SurfacePlatform {
    type Surface: PresentationSurface;

    /// Bounds of every currently connected display.
    fn displays(&self) -> Vec<Bounds>;

    /// Build a hidden surface covering `bounds` with its background at `intensity`.
    fn create_surface(&self, bounds: Bounds, intensity: f64) -> SurfaceResult<Self::Surface>;
}
