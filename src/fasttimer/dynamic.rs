//! Dynamic fallback tier: loads the `fasttimer-shim` library at runtime and
//! drives its exported `timeit` symbol through the trampoline.
//!
//! The library handle is loaded at most once per process and deliberately
//! never closed; after selection it is process-wide read-only state.

use std::env;
use std::os::raw::c_int;
use std::path::{Path, PathBuf};

use super::{trampoline, TimerError};

/// `double timeit(void (*callback)(void), int count)`
type RawTimeit = unsafe extern "C" fn(Option<unsafe extern "C" fn()>, c_int) -> f64;

const SYMBOL: &str = "timeit";

#[cfg(target_os = "windows")]
const LIB_NAME: &str = "fasttimer_shim.dll";
#[cfg(target_os = "macos")]
const LIB_NAME: &str = "libfasttimer_shim.dylib";
#[cfg(all(unix, not(target_os = "macos")))]
const LIB_NAME: &str = "libfasttimer_shim.so";

pub(super) struct NativeTimer {
    timeit: RawTimeit,
    path: PathBuf,
}

impl NativeTimer {
    pub(super) fn path(&self) -> &Path {
        &self.path
    }
}

pub(super) fn load() -> Result<NativeTimer, TimerError> {
    let path = locate()?;
    let timeit = open_symbol(&path)?;
    Ok(NativeTimer { timeit, path })
}

/// Probe order: explicit `FASTTIMER_LIB` pin, then the executable's own
/// directory, then its parent. The parent covers cargo's
/// `target/<profile>/deps` layout, where test binaries live one level below
/// the cdylib.
fn locate() -> Result<PathBuf, TimerError> {
    let mut searched = Vec::new();

    if let Ok(pinned) = env::var("FASTTIMER_LIB") {
        let pinned = PathBuf::from(pinned);
        if pinned.exists() {
            return Ok(pinned);
        }
        searched.push(pinned);
    }

    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(LIB_NAME);
            if candidate.exists() {
                return Ok(candidate);
            }
            searched.push(candidate);

            if let Some(parent) = dir.parent() {
                let candidate = parent.join(LIB_NAME);
                if candidate.exists() {
                    return Ok(candidate);
                }
                searched.push(candidate);
            }
        }
    }

    Err(TimerError::LibraryNotFound { searched })
}

#[cfg(unix)]
fn open_symbol(path: &Path) -> Result<RawTimeit, TimerError> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        TimerError::LibraryOpenFailed {
            path: path.to_path_buf(),
            detail: "path contains a NUL byte".to_string(),
        }
    })?;

    // The handle is intentionally leaked: the library stays mapped for the
    // life of the process.
    let handle = unsafe { libc::dlopen(c_path.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
    if handle.is_null() {
        return Err(TimerError::LibraryOpenFailed {
            path: path.to_path_buf(),
            detail: dl_error(),
        });
    }

    let symbol = unsafe { libc::dlsym(handle, b"timeit\0".as_ptr().cast()) };
    if symbol.is_null() {
        return Err(TimerError::SymbolNotFound {
            symbol: SYMBOL,
            path: path.to_path_buf(),
        });
    }

    Ok(unsafe { std::mem::transmute::<*mut libc::c_void, RawTimeit>(symbol) })
}

#[cfg(unix)]
fn dl_error() -> String {
    use std::ffi::CStr;

    let err = unsafe { libc::dlerror() };
    if err.is_null() {
        "unknown dynamic linker error".to_string()
    } else {
        unsafe { CStr::from_ptr(err) }.to_string_lossy().into_owned()
    }
}

#[cfg(windows)]
fn open_symbol(path: &Path) -> Result<RawTimeit, TimerError> {
    use std::os::windows::ffi::OsStrExt;

    use windows_sys::Win32::Foundation::GetLastError;
    use windows_sys::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let handle = unsafe { LoadLibraryW(wide.as_ptr()) };
    if handle.is_null() {
        return Err(TimerError::LibraryOpenFailed {
            path: path.to_path_buf(),
            detail: format!("LoadLibraryW failed (error {})", unsafe { GetLastError() }),
        });
    }

    match unsafe { GetProcAddress(handle, b"timeit\0".as_ptr()) } {
        Some(farproc) => Ok(unsafe {
            std::mem::transmute::<unsafe extern "system" fn() -> isize, RawTimeit>(farproc)
        }),
        None => Err(TimerError::SymbolNotFound {
            symbol: SYMBOL,
            path: path.to_path_buf(),
        }),
    }
}

pub(super) fn run(
    native: &NativeTimer,
    callable: &mut dyn FnMut(),
    number: u32,
) -> Result<f64, TimerError> {
    let count = c_int::try_from(number).map_err(|_| TimerError::CountTooLarge(number))?;
    let raw = native.timeit;
    Ok(trampoline::with_callback(callable, |relay| unsafe {
        raw(Some(relay), count)
    }))
}
