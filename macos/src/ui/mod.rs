use log::{info, warn};
use objc2::MainThreadMarker;
use objc2_app_kit::{NSAlert, NSAlertSecondButtonReturn, NSAlertStyle, NSApplication, NSWorkspace};
use objc2_foundation::{NSString, NSURL};

/// Show the About dialog; its second button opens `url` in the browser.
pub fn show_about(mtm: MainThreadMarker, url: &str) {
    // Accessory apps must activate or the alert opens behind other windows.
    #[allow(deprecated)]
    NSApplication::sharedApplication(mtm).activateIgnoringOtherApps(true);

    let alert = NSAlert::new(mtm);
    alert.setAlertStyle(NSAlertStyle::Informational);
    alert.setMessageText(&NSString::from_str("Curtains"));
    alert.setInformativeText(&NSString::from_str(&format!(
        "Version {}\n\nDims every display with a click-through overlay.\n{}",
        env!("CARGO_PKG_VERSION"),
        url
    )));
    alert.addButtonWithTitle(&NSString::from_str("OK"));
    alert.addButtonWithTitle(&NSString::from_str("Open Website"));

    if alert.runModal() == NSAlertSecondButtonReturn {
        open_url(url);
    }
}

/// Open a URL in the default browser.
pub fn open_url(url: &str) {
    match NSURL::URLWithString(&NSString::from_str(url)) {
        Some(ns_url) => {
            if NSWorkspace::sharedWorkspace().openURL(&ns_url) {
                info!("Opened {}", url);
            } else {
                warn!("Workspace refused to open {}", url);
            }
        }
        None => warn!("Not a valid URL: {}", url),
    }
}
