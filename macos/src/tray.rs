// macOS menu bar status item using NSStatusBar.
//
// Creates an NSStatusItem with a menu containing:
//   • Draw / Open Curtains toggle
//   • Dimming slider (custom view item, live while the menu is open)
//   • About Curtains
//   • Quit

use objc2::rc::Retained;
use objc2::runtime::{AnyObject, Sel};
use objc2::{sel, MainThreadMarker};
use objc2_app_kit::{
    NSImage, NSMenu, NSMenuItem, NSSlider, NSStatusBar, NSStatusItem, NSTextField, NSView,
    NSVariableStatusItemLength,
};
use objc2_foundation::{NSPoint, NSRect, NSSize, NSString};

use curtains_shared::{StatusPresentation, MAX_INTENSITY, MIN_INTENSITY};

const SLIDER_VIEW_W: f64 = 220.0;
const SLIDER_VIEW_H: f64 = 48.0;
const SLIDER_INSET: f64 = 18.0;

pub struct StatusBar {
    status_item: Retained<NSStatusItem>,
    toggle_item: Retained<NSMenuItem>,
    intensity_label: Retained<NSTextField>,
}

impl StatusBar {
    /// Install the status item. Menu actions are sent to `target`.
    pub fn new(mtm: MainThreadMarker, target: &AnyObject, intensity: f64) -> Self {
        let status_bar = NSStatusBar::systemStatusBar();
        let status_item = status_bar.statusItemWithLength(NSVariableStatusItemLength);

        let menu = NSMenu::new(mtm);

        let toggle_item = menu_item(mtm, "Draw Curtains", sel!(toggleCurtains:), "", Some(target));
        menu.addItem(&toggle_item);

        menu.addItem(&NSMenuItem::separatorItem(mtm));

        let (slider_view, intensity_label) = build_slider_view(mtm, target, intensity);
        let slider_item = NSMenuItem::new(mtm);
        slider_item.setView(Some(&slider_view));
        menu.addItem(&slider_item);

        menu.addItem(&NSMenuItem::separatorItem(mtm));

        let about_item = menu_item(mtm, "About Curtains", sel!(showAbout:), "", Some(target));
        menu.addItem(&about_item);

        // terminate: routes through the responder chain to NSApp
        let quit_item = menu_item(mtm, "Quit Curtains", sel!(terminate:), "q", None);
        menu.addItem(&quit_item);

        status_item.setMenu(Some(&menu));

        let bar = StatusBar {
            status_item,
            toggle_item,
            intensity_label,
        };
        bar.apply(mtm, StatusPresentation::for_state(false));
        bar
    }

    /// Swap toggle title and status icon.
    pub fn apply(&self, mtm: MainThreadMarker, presentation: StatusPresentation) {
        self.toggle_item
            .setTitle(&NSString::from_str(presentation.toggle_title));

        if let Some(button) = self.status_item.button(mtm) {
            let image = NSImage::imageWithSystemSymbolName_accessibilityDescription(
                &NSString::from_str(presentation.icon),
                Some(&NSString::from_str(presentation.accessibility)),
            );
            // Symbol missing on older systems; the face falls back to a text title.
            let face = presentation.button_face(image.is_some());
            if let Some(image) = &image {
                image.setTemplate(true);
            }
            button.setImage(image.as_deref());
            button.setTitle(&NSString::from_str(face.title));
        }
    }

    pub fn set_intensity_label(&self, intensity: f64) {
        self.intensity_label
            .setStringValue(&NSString::from_str(&slider_caption(intensity)));
    }
}

fn slider_caption(intensity: f64) -> String {
    format!("Dimming  {}", StatusPresentation::percent_label(intensity))
}

fn menu_item(
    mtm: MainThreadMarker,
    title: &str,
    action: Sel,
    key: &str,
    target: Option<&AnyObject>,
) -> Retained<NSMenuItem> {
    let item = unsafe {
        NSMenuItem::initWithTitle_action_keyEquivalent(
            mtm.alloc(),
            &NSString::from_str(title),
            Some(action),
            &NSString::from_str(key),
        )
    };
    if let Some(target) = target {
        unsafe { item.setTarget(Some(target)) };
    }
    item
}

fn build_slider_view(
    mtm: MainThreadMarker,
    target: &AnyObject,
    intensity: f64,
) -> (Retained<NSView>, Retained<NSTextField>) {
    let view = NSView::initWithFrame(
        mtm.alloc(),
        NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(SLIDER_VIEW_W, SLIDER_VIEW_H)),
    );

    let label = NSTextField::labelWithString(&NSString::from_str(&slider_caption(intensity)), mtm);
    label.setFrame(NSRect::new(
        NSPoint::new(SLIDER_INSET + 2.0, 26.0),
        NSSize::new(SLIDER_VIEW_W - 2.0 * SLIDER_INSET, 16.0),
    ));
    view.addSubview(&label);

    let slider = NSSlider::initWithFrame(
        mtm.alloc(),
        NSRect::new(
            NSPoint::new(SLIDER_INSET, 4.0),
            NSSize::new(SLIDER_VIEW_W - 2.0 * SLIDER_INSET, 20.0),
        ),
    );
    slider.setMinValue(MIN_INTENSITY);
    slider.setMaxValue(MAX_INTENSITY);
    slider.setDoubleValue(intensity);
    slider.setContinuous(true);
    unsafe {
        slider.setTarget(Some(target));
        slider.setAction(Some(sel!(intensityChanged:)));
    }
    view.addSubview(&slider);

    (view, label)
}
