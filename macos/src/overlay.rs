// macOS screen dimming using layered overlay windows.
//
// Strategy:
//   • One borderless NSWindow per NSScreen, sized to the screen frame.
//   • Window level is the screen-saver level, above the menu bar, the Dock
//     and full-screen spaces.
//   • The window itself is transparent; its background colour is black with
//     alpha = intensity, so only the alpha ever changes after creation.
//   • ignoresMouseEvents makes it click-through; collection behaviour keeps
//     it on every space and alongside full-screen apps.

use objc2::rc::Retained;
use objc2::MainThreadMarker;
use objc2_app_kit::{
    NSBackingStoreType, NSColor, NSScreen, NSWindow, NSWindowCollectionBehavior,
    NSWindowStyleMask,
};
use objc2_core_graphics::kCGScreenSaverWindowLevel;
use objc2_foundation::{NSPoint, NSRect, NSSize};

use curtains_shared::{Bounds, PresentationSurface, SurfaceError, SurfacePlatform, SurfaceResult};

/// Surface factory backed by AppKit. Only constructible on the main thread.
pub struct MacPlatform {
    mtm: MainThreadMarker,
}

impl MacPlatform {
    pub fn new(mtm: MainThreadMarker) -> Self {
        Self { mtm }
    }
}

impl SurfacePlatform for MacPlatform {
    type Surface = OverlayWindow;

    fn displays(&self) -> Vec<Bounds> {
        NSScreen::screens(self.mtm)
            .iter()
            .map(|screen| to_bounds(screen.frame()))
            .collect()
    }

    fn create_surface(&self, bounds: Bounds, intensity: f64) -> SurfaceResult<OverlayWindow> {
        if bounds.is_empty() {
            return Err(SurfaceError::EmptyBounds(bounds));
        }
        Ok(OverlayWindow::new(self.mtm, bounds, intensity))
    }
}

pub struct OverlayWindow {
    window: Retained<NSWindow>,
    bounds: Bounds,
}

impl OverlayWindow {
    fn new(mtm: MainThreadMarker, bounds: Bounds, intensity: f64) -> Self {
        let window = unsafe {
            NSWindow::initWithContentRect_styleMask_backing_defer(
                mtm.alloc(),
                to_rect(bounds),
                NSWindowStyleMask::Borderless,
                NSBackingStoreType::Buffered,
                false,
            )
        };
        // Retained owns the window; close() must not free it a second time.
        unsafe { window.setReleasedWhenClosed(false) };

        window.setLevel(kCGScreenSaverWindowLevel as _);
        window.setOpaque(false);
        window.setHasShadow(false);
        window.setIgnoresMouseEvents(true);
        window.setCollectionBehavior(
            NSWindowCollectionBehavior::CanJoinAllSpaces
                | NSWindowCollectionBehavior::FullScreenAuxiliary
                | NSWindowCollectionBehavior::Stationary
                | NSWindowCollectionBehavior::IgnoresCycle,
        );

        let overlay = Self { window, bounds };
        overlay.apply_background(intensity);
        overlay
    }

    fn apply_background(&self, intensity: f64) {
        let color = NSColor::blackColor().colorWithAlphaComponent(intensity);
        self.window.setBackgroundColor(Some(&color));
    }
}

impl PresentationSurface for OverlayWindow {
    fn show(&mut self) {
        // Accessory apps are never active; order front without activation.
        self.window.orderFrontRegardless();
    }

    fn hide(&mut self) {
        self.window.orderOut(None);
    }

    fn set_opacity(&mut self, intensity: f64) {
        self.apply_background(intensity);
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }
}

impl Drop for OverlayWindow {
    fn drop(&mut self) {
        self.window.close();
    }
}

fn to_bounds(frame: NSRect) -> Bounds {
    Bounds::new(
        frame.origin.x,
        frame.origin.y,
        frame.size.width,
        frame.size.height,
    )
}

fn to_rect(bounds: Bounds) -> NSRect {
    NSRect::new(
        NSPoint::new(bounds.x, bounds.y),
        NSSize::new(bounds.width, bounds.height),
    )
}
