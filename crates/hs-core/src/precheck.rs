//! Platform and privilege preconditions.
//!
//! Checked before the scan log exists, so violations can only be reported
//! on the console.

use thiserror::Error;
use tracing::debug;

/// Platform the collectors are written for.
pub const REQUIRED_OS: &str = "linux";

/// A precondition that blocks the scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("hostscan must run on Linux.")]
    UnsupportedPlatform { os: String },

    #[error("hostscan must run as root (use sudo).")]
    NotRoot { euid: u32 },
}

impl PreconditionError {
    /// The single line printed on stdout.
    pub fn console_line(&self) -> String {
        format!("Error: {}", self)
    }
}

impl From<PreconditionError> for hs_common::Error {
    fn from(err: PreconditionError) -> Self {
        match err {
            PreconditionError::UnsupportedPlatform { os } => {
                hs_common::Error::UnsupportedPlatform(os)
            }
            PreconditionError::NotRoot { euid } => {
                hs_common::Error::InsufficientPrivilege(format!("effective uid {}", euid))
            }
        }
    }
}

/// Effective UID of this process.
pub fn effective_uid() -> u32 {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() }
}

pub fn is_effective_root() -> bool {
    effective_uid() == 0
}

pub fn check_platform_for(os: &str) -> Result<(), PreconditionError> {
    if os == REQUIRED_OS {
        Ok(())
    } else {
        Err(PreconditionError::UnsupportedPlatform { os: os.to_string() })
    }
}

pub fn check_privilege_for(euid: u32) -> Result<(), PreconditionError> {
    if euid == 0 {
        Ok(())
    } else {
        Err(PreconditionError::NotRoot { euid })
    }
}

/// Check the running platform.
pub fn check_platform() -> Result<(), PreconditionError> {
    check_platform_for(std::env::consts::OS)
}

/// Check the effective UID.
pub fn check_privilege() -> Result<(), PreconditionError> {
    check_privilege_for(effective_uid())
}

/// Platform first, then privilege.
pub fn check_preconditions() -> Result<(), PreconditionError> {
    check_platform()?;
    check_privilege()?;
    debug!(os = std::env::consts::OS, euid = effective_uid(), "preconditions passed");
    Ok(())
}
