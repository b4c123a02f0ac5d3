//! System light/dark signal
//!
//! The resolver only consults this on a first-ever visit. Detection goes
//! through the `dark-light` crate and can be replaced with
//! [`set_system_detector`], e.g. for tests.

use std::sync::RwLock;

use crate::debug;

type SystemDetector = fn() -> bool;

static SYSTEM_DETECTOR: RwLock<SystemDetector> = RwLock::new(os_prefers_dark);

/// Replace the function used to answer "does the system prefer dark?"
pub fn set_system_detector(detector: SystemDetector) {
    match SYSTEM_DETECTOR.write() {
        Ok(mut guard) => *guard = detector,
        Err(e) => *e.into_inner() = detector,
    }
}

/// Restore OS detection
pub fn reset_system_detector() {
    set_system_detector(os_prefers_dark);
}

/// Whether the system currently prefers a dark color scheme
pub fn system_prefers_dark() -> bool {
    let detector = *SYSTEM_DETECTOR.read().unwrap_or_else(|e| e.into_inner());
    detector()
}

/// Config or CLI override first, then the detector
pub fn prefers_dark_with_override(override_value: Option<bool>) -> bool {
    override_value.unwrap_or_else(system_prefers_dark)
}

fn os_prefers_dark() -> bool {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => true,
        Ok(_) => false,
        Err(e) => {
            debug::log_category("SYSTEM", &format!("color scheme detection failed: {e:?}"));
            false
        }
    }
}
