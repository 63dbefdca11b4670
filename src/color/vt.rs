//! Windows virtual terminal processing
//!
//! Windows consoles only interpret ANSI sequences once
//! `ENABLE_VIRTUAL_TERMINAL_PROCESSING` is set on the output handle.

use thiserror::Error;
use tracing::debug;

/// How virtual terminal processing became available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VtStatus {
    /// The console already had the flag set
    AlreadyEnabled,
    /// The flag was set by this call
    Enabled,
}

#[derive(Error, Debug)]
pub enum VtError {
    #[error("virtual terminal processing only exists on Windows")]
    Unsupported,

    #[error("standard output has no usable handle")]
    NoHandle,

    #[error("failed to query console mode: {0}")]
    GetMode(std::io::Error),

    #[error("failed to update console mode: {0}")]
    SetMode(std::io::Error),
}

/// Try to turn on ANSI interpretation for stdout
///
/// Returns false on non-Windows platforms and whenever any step fails.
pub fn enable_windows_vt() -> bool {
    match enable_virtual_terminal() {
        Ok(status) => {
            debug!(?status, "virtual terminal processing enabled");
            true
        }
        Err(e) => {
            debug!(error = %e, "virtual terminal processing unavailable");
            false
        }
    }
}

#[cfg(windows)]
fn enable_virtual_terminal() -> Result<VtStatus, VtError> {
    use std::io;
    use winapi::shared::minwindef::DWORD;
    use winapi::um::consoleapi::{GetConsoleMode, SetConsoleMode};
    use winapi::um::handleapi::INVALID_HANDLE_VALUE;
    use winapi::um::processenv::GetStdHandle;
    use winapi::um::winbase::STD_OUTPUT_HANDLE;
    use winapi::um::wincon::ENABLE_VIRTUAL_TERMINAL_PROCESSING;

    unsafe {
        let handle = GetStdHandle(STD_OUTPUT_HANDLE);
        // NULL means no handle was attached, INVALID_HANDLE_VALUE means the call failed
        if handle.is_null() || handle == INVALID_HANDLE_VALUE {
            return Err(VtError::NoHandle);
        }

        let mut mode: DWORD = 0;
        if GetConsoleMode(handle, &mut mode) == 0 {
            return Err(VtError::GetMode(io::Error::last_os_error()));
        }

        if mode & ENABLE_VIRTUAL_TERMINAL_PROCESSING != 0 {
            return Ok(VtStatus::AlreadyEnabled);
        }

        if SetConsoleMode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING) == 0 {
            return Err(VtError::SetMode(io::Error::last_os_error()));
        }
    }

    Ok(VtStatus::Enabled)
}

#[cfg(not(windows))]
fn enable_virtual_terminal() -> Result<VtStatus, VtError> {
    Err(VtError::Unsupported)
}
