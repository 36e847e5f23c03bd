use swiper_core::Action;
use swiper_core::config::{Keybinding, Modifier};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT, MOD_SHIFT, MOD_WIN, RegisterHotKey,
    UnregisterHotKey,
};

use crate::keys;
use crate::notify;

/// A registered global hotkey.
struct Hotkey {
    id: i32,
    action: Action,
}

/// Global hotkey registrations for the daemon thread.
///
/// Hotkeys are bound to the calling thread's message queue, so `WM_HOTKEY`
/// arrives through the same loop that owns this manager.
pub struct HotkeyManager {
    hotkeys: Vec<Hotkey>,
}

impl HotkeyManager {
    /// Registers every binding it can.
    ///
    /// A chord that is unknown or already taken by another program does
    /// not stop the daemon. All failures are reported in a single warning
    /// box so the user knows which shortcuts are dead.
    pub fn register(bindings: &[Keybinding]) -> Self {
        let mut manager = Self {
            hotkeys: Vec::new(),
        };
        let mut failed = Vec::new();

        for (i, binding) in bindings.iter().enumerate() {
            let id = (i + 1) as i32;
            let chord = binding.chord();

            let Some(vk) = keys::vk_from_name(&binding.key) else {
                swiper_core::log_warn!("Unknown key name in {chord}");
                failed.push(format!("{chord} (unknown key)"));
                continue;
            };

            let mut modifiers = MOD_NOREPEAT;
            for m in &binding.modifiers {
                modifiers |= modifier_to_flag(*m);
            }

            // SAFETY: registers on the current thread's queue with a unique id.
            if unsafe { RegisterHotKey(None, id, modifiers, vk) }.is_err() {
                swiper_core::log_warn!("Failed to register {chord} (vk=0x{vk:02X})");
                failed.push(format!("{chord} (in use by another program)"));
                continue;
            }

            swiper_core::log_info!("Registered {chord} -> {:?}", binding.action);
            manager.hotkeys.push(Hotkey {
                id,
                action: binding.action,
            });
        }

        if !failed.is_empty() {
            notify::warn(
                "Swiper",
                &format!(
                    "Some hotkeys could not be registered:\n\n{}",
                    failed.join("\n")
                ),
            );
        }
        manager
    }

    /// The action bound to a `WM_HOTKEY` id.
    pub fn action_for(&self, hotkey_id: i32) -> Option<Action> {
        self.hotkeys
            .iter()
            .find(|h| h.id == hotkey_id)
            .map(|h| h.action)
    }

    pub fn len(&self) -> usize {
        self.hotkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotkeys.is_empty()
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        for hotkey in &self.hotkeys {
            // SAFETY: removes a registration made by this thread.
            unsafe {
                let _ = UnregisterHotKey(None, hotkey.id);
            }
        }
    }
}

fn modifier_to_flag(modifier: Modifier) -> HOT_KEY_MODIFIERS {
    match modifier {
        Modifier::Alt => MOD_ALT,
        Modifier::Shift => MOD_SHIFT,
        Modifier::Ctrl => MOD_CONTROL,
        Modifier::Win => MOD_WIN,
    }
}
