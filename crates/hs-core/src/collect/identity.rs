//! Invoking-user resolution.
//!
//! The displayed user comes from the environment, not from a subprocess:
//! `SUDO_USER` first, then `USER`, then the literal `unknown`. When the
//! process is running as root and `SUDO_USER` names some other account,
//! the name is annotated so "ran as root directly" and "elevated via sudo"
//! read differently.

/// Sentinel shown when no user variable is set.
pub const UNKNOWN_USER: &str = "unknown";

/// Snapshot of the identity-relevant environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityEnv {
    pub sudo_user: Option<String>,
    pub user: Option<String>,
    pub effective_root: bool,
}

impl IdentityEnv {
    /// Capture the current process environment and effective UID.
    pub fn from_process_env() -> Self {
        Self {
            sudo_user: std::env::var("SUDO_USER").ok(),
            user: std::env::var("USER").ok(),
            effective_root: crate::precheck::is_effective_root(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve the user name to display.
pub fn resolve_identity(env: &IdentityEnv) -> String {
    let sudo_user = non_empty(&env.sudo_user);
    let user = non_empty(&env.user);

    match (sudo_user, user) {
        (Some(sudo), _) => {
            if env.effective_root && sudo != "root" {
                format!("{} (via elevation)", sudo)
            } else {
                sudo.to_string()
            }
        }
        (None, Some(plain)) => plain.to_string(),
        (None, None) => UNKNOWN_USER.to_string(),
    }
}
