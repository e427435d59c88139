//! Hotkey backend abstraction layer
//!
//! Provides a trait-based interface over the OS global-hotkey service so the
//! registrar can be driven by a fake in tests. Currently supports:
//! - `global-hotkey` crate (X11, Windows, macOS)

use anyhow::Result;

use crate::config::KeyCombo;

/// Opaque id the backend assigns to a successful binding
pub type BindingId = u32;

/// Hotkey backend trait
///
/// A backend owns whatever OS registrations it has made. The registrar always
/// calls `unbind_all` before binding, so a backend never needs to track more
/// than one generation of bindings.
pub trait HotkeyBackend {
    /// Register `combo` globally
    ///
    /// Fails when the combination cannot be expressed on this platform or is
    /// already claimed by another process.
    fn bind(&mut self, combo: &KeyCombo) -> Result<BindingId>;

    /// Drop every registration made by this backend
    fn unbind_all(&mut self);

    /// Ids of bindings pressed since the last call, oldest first
    fn drain_fired(&mut self) -> Vec<BindingId>;

    /// Get human-readable backend name
    fn name(&self) -> &'static str;
}

#[cfg(test)]
pub mod fake {
    //! In-memory backend used by registrar and control tests

    use std::collections::{HashMap, HashSet};

    use anyhow::{Result, anyhow};

    use super::{BindingId, HotkeyBackend};
    use crate::config::KeyCombo;

    #[derive(Debug, Default)]
    pub struct FakeBackend {
        next_id: BindingId,
        bound: HashMap<KeyCombo, BindingId>,
        fired: Vec<BindingId>,
        /// Combinations owned by "another process"
        pub claimed: HashSet<KeyCombo>,
        pub unbind_calls: usize,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Simulate the user pressing `combo`; only bound combos fire
        pub fn press(&mut self, combo: &str) {
            let combo: KeyCombo = combo.parse().expect("valid combo in test");
            if let Some(id) = self.bound.get(&combo) {
                self.fired.push(*id);
            }
        }

        pub fn is_bound(&self, combo: &str) -> bool {
            let combo: KeyCombo = combo.parse().expect("valid combo in test");
            self.bound.contains_key(&combo)
        }

        pub fn bound_count(&self) -> usize {
            self.bound.len()
        }
    }

    impl HotkeyBackend for FakeBackend {
        fn bind(&mut self, combo: &KeyCombo) -> Result<BindingId> {
            if self.claimed.contains(combo) {
                return Err(anyhow!("'{}' is already registered", combo));
            }
            self.next_id += 1;
            self.bound.insert(combo.clone(), self.next_id);
            Ok(self.next_id)
        }

        fn unbind_all(&mut self) {
            self.unbind_calls += 1;
            self.bound.clear();
        }

        fn drain_fired(&mut self) -> Vec<BindingId> {
            std::mem::take(&mut self.fired)
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }
}
