//! Dual-path callable timing.
//!
//! `timeit` invokes a zero-argument callable a given number of times in a
//! tight loop and reports total elapsed wall-clock seconds. Two tiers back
//! it: an in-process compiled loop (the `compiled-timer` cargo feature,
//! enabled by default) and a fallback that dynamically loads the
//! `fasttimer-shim` library adjacent to the running executable and bridges
//! the callable to its exported C `timeit` symbol.
//!
//! The tier is selected once per process, on first use. When neither tier is
//! available the selection error is surfaced to the first and every later
//! caller; there is no third pure-interpreted loop, since that would
//! reintroduce the dispatch overhead this utility exists to avoid.
//!
//! Environment overrides, used by the test suite:
//! `FASTTIMER_BACKEND=auto|compiled|dynamic` forces a tier and
//! `FASTTIMER_LIB=<path>` pins the shared-library location.

use std::env;
use std::path::PathBuf;

#[cfg(feature = "compiled-timer")]
mod compiled;
mod dynamic;
mod trampoline;

/// Repetition count used by the original benchmark scripts.
pub const DEFAULT_NUMBER: u32 = 1_000_000;

#[derive(Debug, Clone, thiserror::Error)]
pub enum TimerError {
    #[error("timing library not found (searched {searched:?})")]
    LibraryNotFound { searched: Vec<PathBuf> },
    #[error("failed to open timing library {path}: {detail}")]
    LibraryOpenFailed { path: PathBuf, detail: String },
    #[error("symbol `{symbol}` not found in {path}")]
    SymbolNotFound { symbol: &'static str, path: PathBuf },
    #[error("compiled timer backend was not built into this binary")]
    Unavailable,
    #[error("unknown FASTTIMER_BACKEND value `{0}` (expected auto, compiled or dynamic)")]
    UnknownBackend(String),
    #[error("count {0} exceeds the native timer's supported range")]
    CountTooLarge(u32),
}

/// The tier selected for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Compiled,
    Dynamic,
}

enum Selected {
    #[cfg(feature = "compiled-timer")]
    Compiled,
    Dynamic(dynamic::NativeTimer),
}

lazy_static::lazy_static! {
    static ref SELECTED: Result<Selected, TimerError> = select_backend();
}

fn select_backend() -> Result<Selected, TimerError> {
    match env::var("FASTTIMER_BACKEND").as_deref() {
        Ok("compiled") => compiled_backend(),
        Ok("dynamic") => Ok(Selected::Dynamic(dynamic::load()?)),
        Ok("auto") | Err(_) => auto_backend(),
        Ok(other) => Err(TimerError::UnknownBackend(other.to_string())),
    }
}

#[cfg(feature = "compiled-timer")]
fn compiled_backend() -> Result<Selected, TimerError> {
    Ok(Selected::Compiled)
}

#[cfg(not(feature = "compiled-timer"))]
fn compiled_backend() -> Result<Selected, TimerError> {
    Err(TimerError::Unavailable)
}

#[cfg(feature = "compiled-timer")]
fn auto_backend() -> Result<Selected, TimerError> {
    Ok(Selected::Compiled)
}

#[cfg(not(feature = "compiled-timer"))]
fn auto_backend() -> Result<Selected, TimerError> {
    Ok(Selected::Dynamic(dynamic::load()?))
}

/// Reports which tier this process selected, forcing selection if it has not
/// happened yet.
pub fn backend() -> Result<Backend, TimerError> {
    match &*SELECTED {
        #[cfg(feature = "compiled-timer")]
        Ok(Selected::Compiled) => Ok(Backend::Compiled),
        Ok(Selected::Dynamic(_)) => Ok(Backend::Dynamic),
        Err(e) => Err(e.clone()),
    }
}

/// Path of the dynamically loaded timing library, when the dynamic tier is
/// active.
pub fn library_path() -> Option<PathBuf> {
    match &*SELECTED {
        Ok(Selected::Dynamic(native)) => Some(native.path().to_path_buf()),
        _ => None,
    }
}

/// Invokes `callable` exactly `number` times and returns total elapsed
/// wall-clock seconds.
///
/// A panic raised by the callable aborts the remaining iterations and
/// unwinds out of this call; no partial timing is returned. `Err` is
/// reserved for backend problems (selection failure, or a count the native
/// shim cannot represent).
pub fn timeit<F: FnMut()>(mut callable: F, number: u32) -> Result<f64, TimerError> {
    match &*SELECTED {
        #[cfg(feature = "compiled-timer")]
        Ok(Selected::Compiled) => Ok(compiled::run(&mut callable, number)),
        Ok(Selected::Dynamic(native)) => dynamic::run(native, &mut callable, number),
        Err(e) => Err(e.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::timeit;

    #[test]
    fn invokes_exactly_number_times() {
        let mut calls = 0u32;
        let elapsed = timeit(|| calls += 1, 123).unwrap();
        assert_eq!(calls, 123);
        assert!(elapsed >= 0.0);
    }

    #[test]
    fn zero_count_runs_nothing() {
        let mut calls = 0u32;
        let elapsed = timeit(|| calls += 1, 0).unwrap();
        assert_eq!(calls, 0);
        assert!(elapsed >= 0.0);
    }
}
