// macOS application lifecycle — NSApplication setup, status item, and run loop.
//
// This is the entry point for the Cocoa application. It:
//   • Creates the NSApplication singleton as an accessory (no Dock icon)
//   • Owns the Curtains state inside the app delegate's ivars
//   • Installs the status bar item and routes its actions
//   • Starts the run loop

use std::cell::RefCell;

use log::{error, info};
use objc2::rc::Retained;
use objc2::runtime::{AnyObject, ProtocolObject};
use objc2::{define_class, msg_send, DefinedClass, MainThreadMarker, MainThreadOnly};
use objc2_app_kit::{
    NSApplication, NSApplicationActivationPolicy, NSApplicationDelegate, NSSlider,
};
use objc2_foundation::{NSNotification, NSObject, NSObjectProtocol};

use curtains_shared::config::AppConfig;
use curtains_shared::prefs::{JsonFileStore, KeyValueStore};
use curtains_shared::Curtains;

use crate::defaults::UserDefaultsStore;
use crate::overlay::MacPlatform;
use crate::tray::StatusBar;
use crate::ui;

type AppCurtains = Curtains<MacPlatform, Box<dyn KeyValueStore>>;

pub struct AppDelegateIvars {
    config: AppConfig,
    curtains: RefCell<Option<AppCurtains>>,
    status_bar: RefCell<Option<StatusBar>>,
}

define_class!(
    #[unsafe(super(NSObject))]
    #[thread_kind = MainThreadOnly]
    #[name = "CurtainsAppDelegate"]
    #[ivars = AppDelegateIvars]
    pub struct AppDelegate;

    unsafe impl NSObjectProtocol for AppDelegate {}

    unsafe impl NSApplicationDelegate for AppDelegate {
        #[unsafe(method(applicationDidFinishLaunching:))]
        fn did_finish_launching(&self, _notification: &NSNotification) {
            let mtm = MainThreadMarker::from(self);

            let curtains = Curtains::new(MacPlatform::new(mtm), self.preference_store());
            let target: &AnyObject = self;
            let status_bar = StatusBar::new(mtm, target, curtains.intensity());

            *self.ivars().curtains.borrow_mut() = Some(curtains);
            *self.ivars().status_bar.borrow_mut() = Some(status_bar);

            info!("Curtains {} started", env!("CARGO_PKG_VERSION"));
        }

        #[unsafe(method(applicationWillTerminate:))]
        fn will_terminate(&self, _notification: &NSNotification) {
            if let Some(curtains) = self.ivars().curtains.borrow_mut().as_mut() {
                curtains.close_all();
            }
            info!("Curtains exiting");
        }
    }

    // --- Status menu actions ---
    impl AppDelegate {
        #[unsafe(method(toggleCurtains:))]
        fn toggle_curtains(&self, _sender: &AnyObject) {
            let mtm = MainThreadMarker::from(self);
            let presentation = match self.ivars().curtains.borrow_mut().as_mut() {
                Some(curtains) => curtains.toggle(),
                None => return,
            };
            if let Some(status_bar) = self.ivars().status_bar.borrow().as_ref() {
                status_bar.apply(mtm, presentation);
            }
        }

        #[unsafe(method(intensityChanged:))]
        fn intensity_changed(&self, sender: &NSSlider) {
            let applied = match self.ivars().curtains.borrow_mut().as_mut() {
                Some(curtains) => curtains.set_intensity(sender.doubleValue()),
                None => return,
            };
            if let Some(status_bar) = self.ivars().status_bar.borrow().as_ref() {
                status_bar.set_intensity_label(applied);
            }
        }

        #[unsafe(method(showAbout:))]
        fn show_about(&self, _sender: &AnyObject) {
            ui::show_about(MainThreadMarker::from(self), &self.ivars().config.about_url);
        }
    }
);

impl AppDelegate {
    fn new(mtm: MainThreadMarker, config: AppConfig) -> Retained<Self> {
        let this = mtm.alloc().set_ivars(AppDelegateIvars {
            config,
            curtains: RefCell::new(None),
            status_bar: RefCell::new(None),
        });
        unsafe { msg_send![super(this), init] }
    }

    fn preference_store(&self) -> Box<dyn KeyValueStore> {
        match &self.ivars().config.preferences_file {
            Some(path) => {
                info!("Keeping preferences in {}", path.display());
                Box::new(JsonFileStore::new(path))
            }
            None => Box::new(UserDefaultsStore::standard()),
        }
    }
}

pub fn run(config: AppConfig) {
    let Some(mtm) = MainThreadMarker::new() else {
        error!("Curtains must be run on the main thread");
        return;
    };

    let app = NSApplication::sharedApplication(mtm);
    app.setActivationPolicy(NSApplicationActivationPolicy::Accessory);

    let delegate = AppDelegate::new(mtm, config);
    let delegate_proto = ProtocolObject::from_ref(&*delegate);
    app.setDelegate(Some(delegate_proto));

    app.run();
}
