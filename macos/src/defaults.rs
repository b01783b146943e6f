// NSUserDefaults-backed preference store.

use objc2::rc::Retained;
use objc2_foundation::{NSString, NSUserDefaults};

use curtains_shared::prefs::{KeyValueStore, PrefsResult};

pub struct UserDefaultsStore {
    defaults: Retained<NSUserDefaults>,
}

impl UserDefaultsStore {
    pub fn standard() -> Self {
        Self {
            defaults: NSUserDefaults::standardUserDefaults(),
        }
    }
}

impl KeyValueStore for UserDefaultsStore {
    fn get_f64(&self, key: &str) -> PrefsResult<Option<f64>> {
        let key = NSString::from_str(key);
        // doubleForKey: returns 0.0 for a missing key; check presence first.
        if self.defaults.objectForKey(&key).is_none() {
            return Ok(None);
        }
        Ok(Some(self.defaults.doubleForKey(&key)))
    }

    fn set_f64(&mut self, key: &str, value: f64) -> PrefsResult<()> {
        let key = NSString::from_str(key);
        self.defaults.setDouble_forKey(value, &key);
        Ok(())
    }
}
