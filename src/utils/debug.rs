use std::sync::atomic::{AtomicBool, Ordering};

static LOAD_DEBUG: AtomicBool = AtomicBool::new(false);

pub(crate) fn set_load_debug(enabled: bool) {
    LOAD_DEBUG.store(enabled, Ordering::Relaxed);
}

pub(crate) fn load_debug_enabled() -> bool {
    LOAD_DEBUG.load(Ordering::Relaxed)
}
