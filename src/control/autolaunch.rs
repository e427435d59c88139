//! Launch-at-login registration
//!
//! # Platform Support
//! - Linux: XDG autostart entry `<config_dir>/autostart/sticky-notes.desktop`
//! - macOS 13+: SMAppService main-app login item
//! - Windows: value under `HKCU\Software\Microsoft\Windows\CurrentVersion\Run`
//! - Other platforms: no-op, status always `false`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::constants::{autolaunch, defaults};

#[derive(Debug, Clone)]
enum Mechanism {
    DesktopEntry(PathBuf),
    #[cfg(target_os = "macos")]
    AppService,
    #[cfg(windows)]
    RunKey,
    Unsupported,
}

#[derive(Debug, Clone)]
pub struct AutoLaunch {
    mechanism: Mechanism,
}

impl AutoLaunch {
    #[cfg(target_os = "linux")]
    pub fn for_platform() -> Self {
        let mechanism = match dirs::config_dir() {
            Some(dir) => Mechanism::DesktopEntry(
                dir.join(autolaunch::AUTOSTART_DIR)
                    .join(autolaunch::DESKTOP_ENTRY_FILENAME),
            ),
            None => {
                debug!("No config directory, launch at login unavailable");
                Mechanism::Unsupported
            }
        };
        Self { mechanism }
    }

    #[cfg(target_os = "macos")]
    pub fn for_platform() -> Self {
        Self {
            mechanism: Mechanism::AppService,
        }
    }

    #[cfg(windows)]
    pub fn for_platform() -> Self {
        Self {
            mechanism: Mechanism::RunKey,
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
    pub fn for_platform() -> Self {
        debug!("Launch at login is a no-op on this platform");
        Self {
            mechanism: Mechanism::Unsupported,
        }
    }

    /// Manage the entry inside an explicit autostart directory
    pub fn with_autostart_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            mechanism: Mechanism::DesktopEntry(
                dir.as_ref().join(autolaunch::DESKTOP_ENTRY_FILENAME),
            ),
        }
    }

    pub fn set_enabled(&self, enable: bool) -> Result<()> {
        match &self.mechanism {
            Mechanism::DesktopEntry(path) => set_desktop_entry(path, enable),
            #[cfg(target_os = "macos")]
            Mechanism::AppService => app_service::set_enabled(enable),
            #[cfg(windows)]
            Mechanism::RunKey => run_key::set_enabled(enable),
            Mechanism::Unsupported => {
                debug!(enable, "set_enabled: no-op on unsupported platform");
                Ok(())
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        match &self.mechanism {
            Mechanism::DesktopEntry(path) => path.exists(),
            #[cfg(target_os = "macos")]
            Mechanism::AppService => app_service::is_enabled(),
            #[cfg(windows)]
            Mechanism::RunKey => run_key::is_enabled(),
            Mechanism::Unsupported => false,
        }
    }
}

fn set_desktop_entry(path: &Path, enable: bool) -> Result<()> {
    if enable {
        let exe = std::env::current_exe().context("Failed to resolve current executable")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create autostart directory {:?}", parent))?;
        }
        fs::write(path, desktop_entry(&exe))
            .with_context(|| format!("Failed to write autostart entry {:?}", path))?;
        info!(path = %path.display(), "Enabled launch at login");
    } else if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove autostart entry {:?}", path))?;
        info!(path = %path.display(), "Disabled launch at login");
    }
    Ok(())
}

fn desktop_entry(exe: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={}\n\
         Exec={}\n\
         Terminal=false\n\
         X-GNOME-Autostart-enabled=true\n",
        defaults::window::TITLE,
        launch_command(exe)
    )
}

/// Quoted executable path, as stored in the autostart entry and the Run key
fn launch_command(exe: &Path) -> String {
    format!("\"{}\"", exe.display())
}

#[cfg(target_os = "macos")]
mod app_service {
    use anyhow::{Result, anyhow};
    use smappservice_rs::{AppService, ServiceStatus, ServiceType};
    use tracing::{debug, info, warn};

    pub fn set_enabled(enable: bool) -> Result<()> {
        let service = AppService::new(ServiceType::MainApp);
        if enable {
            service
                .register()
                .map_err(|e| anyhow!("Failed to register login item: {e}"))?;
            info!("Enabled launch at login");
        } else if is_enabled() {
            service.unregister().map_err(|e| {
                warn!(error = %e, "Failed to unregister login item");
                anyhow!("Failed to unregister login item: {e}")
            })?;
            info!("Disabled launch at login");
        }
        Ok(())
    }

    pub fn is_enabled() -> bool {
        let status = AppService::new(ServiceType::MainApp).status();
        debug!(?status, "Login item status");
        matches!(status, ServiceStatus::Enabled)
    }
}

#[cfg(windows)]
mod run_key {
    use std::io;

    use anyhow::{Context, Result};
    use tracing::info;
    use winreg::RegKey;
    use winreg::enums::{HKEY_CURRENT_USER, KEY_READ};

    use crate::constants::autolaunch::{RUN_KEY, RUN_VALUE_NAME};

    pub fn set_enabled(enable: bool) -> Result<()> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let (key, _) = hkcu
            .create_subkey(RUN_KEY)
            .context("Failed to open the Run registry key")?;

        if enable {
            let exe = std::env::current_exe().context("Failed to resolve current executable")?;
            key.set_value(RUN_VALUE_NAME, &super::launch_command(&exe))
                .context("Failed to write the Run registry value")?;
            info!("Enabled launch at login");
        } else {
            match key.delete_value(RUN_VALUE_NAME) {
                Ok(()) => info!("Disabled launch at login"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e).context("Failed to remove the Run registry value"),
            }
        }
        Ok(())
    }

    pub fn is_enabled() -> bool {
        RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey_with_flags(RUN_KEY, KEY_READ)
            .and_then(|key| key.get_value::<String, _>(RUN_VALUE_NAME))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_disable_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let autostart = temp_dir.path().join("autostart");
        let launcher = AutoLaunch::with_autostart_dir(&autostart);

        assert!(!launcher.is_enabled());
        launcher.set_enabled(true).unwrap();
        assert!(launcher.is_enabled());

        let entry = fs::read_to_string(autostart.join("sticky-notes.desktop")).unwrap();
        assert!(entry.starts_with("[Desktop Entry]\n"));
        assert!(entry.contains("Exec=\""));

        launcher.set_enabled(false).unwrap();
        assert!(!launcher.is_enabled());
        // Disabling twice is fine
        launcher.set_enabled(false).unwrap();
    }

    #[test]
    fn test_unsupported_platform_is_noop() {
        let launcher = AutoLaunch {
            mechanism: Mechanism::Unsupported,
        };
        launcher.set_enabled(true).unwrap();
        assert!(!launcher.is_enabled());
    }

    #[test]
    fn test_launch_command_quotes_path_with_spaces() {
        let command = launch_command(Path::new("/Applications/Sticky Notes/sticky-notes"));
        assert_eq!(command, "\"/Applications/Sticky Notes/sticky-notes\"");
    }

    #[cfg(any(target_os = "macos", windows))]
    #[test]
    fn test_macos_and_windows_have_a_login_mechanism() {
        let launcher = AutoLaunch::for_platform();
        assert!(!matches!(launcher.mechanism, Mechanism::Unsupported));
    }
}
