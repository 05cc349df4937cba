//! Bridges a Rust closure to the plain C function pointer the shim expects.
//!
//! Native function pointers cannot carry captured state, so the active
//! callable is parked in a thread-local slot and a fixed `extern "C"` relay
//! reads it back out on every invocation. Each invocation runs under
//! `catch_unwind`: letting a panic unwind into the shim's C frame would be
//! undefined behavior, so the first panic is stashed, the remaining native
//! iterations become no-ops, and the unwind resumes once the native call
//! returns.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

struct ActiveCallback {
    // Lifetime-erased; valid only while the owning `with_callback` frame is
    // on the stack.
    callable: *mut (dyn FnMut() + 'static),
    payload: Option<Box<dyn Any + Send + 'static>>,
}

thread_local! {
    static ACTIVE: Cell<*mut ActiveCallback> = const { Cell::new(ptr::null_mut()) };
}

extern "C" fn relay() {
    ACTIVE.with(|slot| {
        let active = slot.get();
        if active.is_null() {
            return;
        }
        let active = unsafe { &mut *active };
        if active.payload.is_some() {
            // An earlier invocation panicked; the rest of the native loop
            // runs as no-ops until control returns to with_callback.
            return;
        }
        let callable = unsafe { &mut *active.callable };
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callable())) {
            active.payload = Some(payload);
        }
    });
}

/// Restores the previous slot value even if `invoke` unwinds, so nested
/// bridged calls see their own callable.
struct SlotGuard {
    previous: *mut ActiveCallback,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        ACTIVE.with(|slot| slot.set(self.previous));
    }
}

/// Parks `callable` in the dispatch slot, hands `invoke` the relay pointer,
/// and resumes any unwind the callable raised while the slot was active.
pub(super) fn with_callback<R>(
    callable: &mut dyn FnMut(),
    invoke: impl FnOnce(unsafe extern "C" fn()) -> R,
) -> R {
    let raw: *mut (dyn FnMut() + '_) = callable;
    // The erased pointer never outlives this frame: the guard clears the
    // slot before `active` is dropped.
    let erased =
        unsafe { std::mem::transmute::<*mut (dyn FnMut() + '_), *mut (dyn FnMut() + 'static)>(raw) };
    let mut active = ActiveCallback {
        callable: erased,
        payload: None,
    };

    let guard = SlotGuard {
        previous: ACTIVE.with(|slot| slot.replace(&mut active)),
    };
    let result = invoke(relay as unsafe extern "C" fn());
    drop(guard);

    if let Some(payload) = active.payload.take() {
        panic::resume_unwind(payload);
    }
    result
}
