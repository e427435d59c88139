use std::path::Path;

use tracing::{info, warn};

/// Log a short environment summary at startup
pub fn log_system_info(data_dir: &Path) {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        "Starting Sticky Notes"
    );

    if let Some(name) = os_pretty_name() {
        info!("OS: {}", name);
    }

    // Global hotkeys depend on the display server
    if let Ok(session) = std::env::var("XDG_SESSION_TYPE") {
        info!("Session Type: {}", session);
        if session.eq_ignore_ascii_case("wayland") && std::env::var_os("DISPLAY").is_none() {
            warn!("Wayland session without XWayland, global hotkeys will not work");
        }
    }
    if let Ok(desktop) = std::env::var("XDG_CURRENT_DESKTOP") {
        info!("Desktop Environment: {}", desktop);
    }

    info!(path = %data_dir.display(), "Data directory");
}

fn os_pretty_name() -> Option<String> {
    let os_release = std::fs::read_to_string("/etc/os-release").ok()?;
    parse_pretty_name(&os_release)
}

fn parse_pretty_name(os_release: &str) -> Option<String> {
    os_release
        .lines()
        .find_map(|line| line.strip_prefix("PRETTY_NAME="))
        .map(|name| name.trim_matches('"').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pretty_name() {
        let sample = "NAME=\"Arch Linux\"\nPRETTY_NAME=\"Arch Linux\"\nID=arch\n";
        assert_eq!(parse_pretty_name(sample).as_deref(), Some("Arch Linux"));
        assert_eq!(parse_pretty_name("ID=arch\n"), None);
    }
}
