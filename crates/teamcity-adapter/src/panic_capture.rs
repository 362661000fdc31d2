// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Capturing panics raised inside reported bodies
//!
//! A panic hook is installed once per process. While a thread is running a
//! reported body, the hook records the panic location and a backtrace for
//! that thread instead of printing them; outside reported bodies it defers to
//! the hook that was installed before it.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe, PanicHookInfo};
use std::sync::Once;

use crate::failure::{Failure, PanicContext};

static INSTALL_HOOK: Once = Once::new();

thread_local! {
    /// Number of reported bodies currently running on this thread
    static CAPTURE_DEPTH: Cell<usize> = const { Cell::new(0) };
    /// Context of the most recent panic on this thread
    static LAST_PANIC: RefCell<Option<PanicContext>> = const { RefCell::new(None) };
}

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
            if CAPTURE_DEPTH.with(Cell::get) == 0 {
                previous(info);
                return;
            }

            let backtrace = Backtrace::capture();
            let context = PanicContext {
                location: info.location().map(ToString::to_string),
                backtrace: (backtrace.status() == BacktraceStatus::Captured)
                    .then(|| backtrace.to_string()),
            };
            LAST_PANIC.with(|slot| *slot.borrow_mut() = Some(context));
        }));
    });
}

/// Run `body`, turning a panic into a [`Failure`] carrying its location and,
/// when backtraces are enabled, its backtrace
pub(crate) fn catch_panic<R>(body: impl FnOnce() -> R) -> Result<R, Failure> {
    install_hook();

    LAST_PANIC.with(|slot| slot.borrow_mut().take());
    CAPTURE_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let result = panic::catch_unwind(AssertUnwindSafe(body));
    CAPTURE_DEPTH.with(|depth| depth.set(depth.get() - 1));

    result.map_err(|payload| {
        let context = LAST_PANIC.with(|slot| slot.borrow_mut().take());
        Failure::from_panic(payload.as_ref(), context.as_ref())
    })
}
