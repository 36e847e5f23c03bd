//! Reversible changes to OS-owned window state.
//!
//! Every change this crate makes to a window it does not own goes through
//! [`Mutation::apply`], which returns a [`Token`] holding what is needed to
//! put the window back. Tokens are collected in a [`MutationLog`] and
//! restored in reverse order, or held by a [`MutationGuard`] that restores
//! on drop.

use crate::rect::Rect;

/// Window style bits touched while sampling window content.
pub mod style {
    pub const CAPTION: u32 = 0x00C0_0000;
    pub const THICKFRAME: u32 = 0x0004_0000;
    pub const SYSMENU: u32 = 0x0008_0000;
    pub const MINIMIZEBOX: u32 = 0x0002_0000;
    pub const MAXIMIZEBOX: u32 = 0x0001_0000;
    pub const MAXIMIZE: u32 = 0x0100_0000;
    pub const VISIBLE: u32 = 0x1000_0000;

    /// Bits stripped before capture so the sample contains client content only.
    pub const CHROME: u32 = CAPTION | THICKFRAME;
}

/// Show states a mutation can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Show without taking focus or changing Z order.
    ShowNoActivate,
    Hide,
}

/// Compositor effects that fight the slide animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The window manager's own minimize/restore transitions.
    Transitions,
    /// Immersive dark mode title bar.
    DarkMode,
    /// Mica/acrylic system backdrop.
    Backdrop,
    /// Compositor bypass hint (undocumented attribute 22).
    BypassCompositor,
    /// Legacy pre-22H2 Mica switch.
    Mica,
}

impl Effect {
    pub const ALL: [Effect; 5] = [
        Effect::Transitions,
        Effect::DarkMode,
        Effect::Backdrop,
        Effect::BypassCompositor,
        Effect::Mica,
    ];

    /// Value written while a transition is running.
    pub fn suppressed(self) -> u32 {
        match self {
            Self::Transitions => 1,
            Self::DarkMode => 0,
            // DWMSBT_NONE
            Self::Backdrop => 1,
            Self::BypassCompositor => 1,
            Self::Mica => 0,
        }
    }
}

/// Primitive window operations the mutations are built from.
pub trait WindowOps {
    /// Current `GWL_STYLE` bits.
    fn style(&self, hwnd: usize) -> u32;

    /// Replaces the style bits and asks the window to recompute its frame.
    fn set_style(&self, hwnd: usize, style: u32);

    /// Forces an immediate repaint of the whole window.
    fn redraw(&self, hwnd: usize);

    fn rect(&self, hwnd: usize) -> Option<Rect>;

    /// Re-applies a position and size without activating or reordering.
    fn pin(&self, hwnd: usize, rect: Rect);

    fn is_visible(&self, hwnd: usize) -> bool;

    fn set_visibility(&self, hwnd: usize, visibility: Visibility);

    /// Reads a compositor attribute, `None` if the query failed.
    fn effect(&self, hwnd: usize, effect: Effect) -> Option<u32>;

    fn set_effect(&self, hwnd: usize, effect: Effect, value: u32);
}

/// A reversible change to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Makes the window visible without activating it.
    ShowNoActivate,
    /// Changes nothing; restores style bits and bounds on undo.
    SnapshotStyle,
    /// Writes [`Effect::suppressed`] for every effect.
    SuppressEffects,
    /// Strips the given style bits while keeping the window in place.
    Lock { strip: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Saved {
    Visibility { was_visible: bool },
    Style { style: u32, rect: Option<Rect> },
    Effects(Vec<(Effect, Option<u32>)>),
}

/// Undo information for one applied [`Mutation`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "dropping a token leaves the window mutated"]
pub struct Token {
    hwnd: usize,
    saved: Saved,
}

impl Mutation {
    /// Applies the change and returns what is needed to undo it.
    pub fn apply(self, ops: &dyn WindowOps, hwnd: usize) -> Token {
        let saved = match self {
            Self::ShowNoActivate => {
                let was_visible = ops.is_visible(hwnd);
                ops.set_visibility(hwnd, Visibility::ShowNoActivate);
                Saved::Visibility { was_visible }
            }
            Self::SnapshotStyle => Saved::Style {
                style: ops.style(hwnd),
                rect: ops.rect(hwnd),
            },
            Self::SuppressEffects => {
                let effects = Effect::ALL
                    .iter()
                    .map(|&effect| (effect, ops.effect(hwnd, effect)))
                    .collect();
                for effect in Effect::ALL {
                    ops.set_effect(hwnd, effect, effect.suppressed());
                }
                Saved::Effects(effects)
            }
            Self::Lock { strip } => {
                let style = ops.style(hwnd);
                let rect = ops.rect(hwnd);
                ops.set_style(hwnd, style & !strip);
                if let Some(rect) = rect {
                    ops.pin(hwnd, rect);
                }
                Saved::Style { style, rect }
            }
        };
        Token { hwnd, saved }
    }
}

impl Token {
    pub fn hwnd(&self) -> usize {
        self.hwnd
    }

    /// Puts the window back the way it was before the mutation.
    pub fn restore(self, ops: &dyn WindowOps) {
        let hwnd = self.hwnd;
        match self.saved {
            Saved::Visibility { was_visible } => {
                if !was_visible {
                    ops.set_visibility(hwnd, Visibility::Hide);
                }
            }
            Saved::Style { style, rect } => {
                ops.set_style(hwnd, style);
                if let Some(rect) = rect {
                    ops.pin(hwnd, rect);
                }
                ops.redraw(hwnd);
            }
            // Zero is the system default for every effect.
            Saved::Effects(effects) => {
                for (effect, value) in effects {
                    ops.set_effect(hwnd, effect, value.unwrap_or(0));
                }
            }
        }
    }
}

/// Applied mutations, restored last-in first-out.
#[derive(Debug, Default)]
pub struct MutationLog {
    tokens: Vec<Token>,
}

impl MutationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, ops: &dyn WindowOps, hwnd: usize, mutation: Mutation) {
        self.tokens.push(mutation.apply(ops, hwnd));
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Undoes everything in reverse order. Returns how many tokens ran.
    ///
    /// Safe to call repeatedly; the log is empty afterwards.
    pub fn restore_all(&mut self, ops: &dyn WindowOps) -> usize {
        let count = self.tokens.len();
        while let Some(token) = self.tokens.pop() {
            token.restore(ops);
        }
        count
    }
}

/// Holds a single mutation and restores it when dropped.
pub struct MutationGuard<'a> {
    ops: &'a dyn WindowOps,
    token: Option<Token>,
}

impl<'a> MutationGuard<'a> {
    pub fn new(ops: &'a dyn WindowOps, hwnd: usize, mutation: Mutation) -> Self {
        Self {
            ops,
            token: Some(mutation.apply(ops, hwnd)),
        }
    }
}

impl Drop for MutationGuard<'_> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            token.restore(self.ops);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    #[derive(Default, Clone)]
    struct FakeState {
        style: u32,
        rect: Option<Rect>,
        visible: bool,
        effects: HashMap<u8, u32>,
    }

    fn key(effect: Effect) -> u8 {
        effect as u8
    }

    #[derive(Default)]
    struct FakeOps {
        windows: RefCell<HashMap<usize, FakeState>>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeOps {
        fn with(hwnd: usize, state: FakeState) -> Self {
            let ops = Self::default();
            ops.windows.borrow_mut().insert(hwnd, state);
            ops
        }

        fn get(&self, hwnd: usize) -> FakeState {
            self.windows.borrow().get(&hwnd).cloned().unwrap_or_default()
        }

        fn log(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }
    }

    impl WindowOps for FakeOps {
        fn style(&self, hwnd: usize) -> u32 {
            self.get(hwnd).style
        }
        fn set_style(&self, hwnd: usize, style: u32) {
            self.log(format!("style {style:#x}"));
            self.windows.borrow_mut().entry(hwnd).or_default().style = style;
        }
        fn redraw(&self, _hwnd: usize) {
            self.log("redraw");
        }
        fn rect(&self, hwnd: usize) -> Option<Rect> {
            self.get(hwnd).rect
        }
        fn pin(&self, _hwnd: usize, _rect: Rect) {
            self.log("pin");
        }
        fn is_visible(&self, hwnd: usize) -> bool {
            self.get(hwnd).visible
        }
        fn set_visibility(&self, hwnd: usize, visibility: Visibility) {
            self.log(format!("{visibility:?}"));
            self.windows.borrow_mut().entry(hwnd).or_default().visible =
                visibility != Visibility::Hide;
        }
        fn effect(&self, hwnd: usize, effect: Effect) -> Option<u32> {
            self.get(hwnd).effects.get(&key(effect)).copied()
        }
        fn set_effect(&self, hwnd: usize, effect: Effect, value: u32) {
            self.windows
                .borrow_mut()
                .entry(hwnd)
                .or_default()
                .effects
                .insert(key(effect), value);
        }
    }

    const HWND: usize = 0x42;
    const STYLE: u32 = style::CAPTION | style::THICKFRAME | style::MAXIMIZE | style::VISIBLE;

    fn maximized(visible: bool) -> FakeState {
        FakeState {
            style: STYLE,
            rect: Some(Rect::new(-8, -8, 1936, 1056)),
            visible,
            effects: HashMap::new(),
        }
    }

    #[test]
    fn show_restores_hidden_window_to_hidden() {
        let ops = FakeOps::with(HWND, maximized(false));

        let token = Mutation::ShowNoActivate.apply(&ops, HWND);
        assert!(ops.get(HWND).visible);
        token.restore(&ops);

        assert!(!ops.get(HWND).visible);
    }

    #[test]
    fn show_leaves_visible_window_visible() {
        let ops = FakeOps::with(HWND, maximized(true));

        Mutation::ShowNoActivate.apply(&ops, HWND).restore(&ops);

        assert!(ops.get(HWND).visible);
        assert!(!ops.calls.borrow().contains(&"Hide".to_string()));
    }

    #[test]
    fn lock_strips_bits_and_restores_exact_style() {
        let ops = FakeOps::with(HWND, maximized(true));

        let token = Mutation::Lock {
            strip: style::CHROME,
        }
        .apply(&ops, HWND);
        assert_eq!(ops.get(HWND).style & style::CHROME, 0);
        assert_eq!(ops.get(HWND).style & style::MAXIMIZE, style::MAXIMIZE);
        token.restore(&ops);

        assert_eq!(ops.get(HWND).style, STYLE);
    }

    #[test]
    fn snapshot_restores_style_changed_by_someone_else() {
        let ops = FakeOps::with(HWND, maximized(true));

        let token = Mutation::SnapshotStyle.apply(&ops, HWND);
        ops.set_style(HWND, 0);
        token.restore(&ops);

        assert_eq!(ops.get(HWND).style, STYLE);
    }

    #[test]
    fn effects_are_suppressed_then_restored() {
        let mut state = maximized(true);
        state.effects.insert(key(Effect::DarkMode), 1);
        state.effects.insert(key(Effect::Backdrop), 2);
        state.effects.insert(key(Effect::BypassCompositor), 0);
        state.effects.insert(key(Effect::Mica), 1);
        let ops = FakeOps::with(HWND, state);

        let token = Mutation::SuppressEffects.apply(&ops, HWND);
        assert_eq!(ops.effect(HWND, Effect::Transitions), Some(1));
        assert_eq!(ops.effect(HWND, Effect::DarkMode), Some(0));
        assert_eq!(ops.effect(HWND, Effect::Backdrop), Some(1));
        assert_eq!(ops.effect(HWND, Effect::BypassCompositor), Some(1));
        assert_eq!(ops.effect(HWND, Effect::Mica), Some(0));
        token.restore(&ops);

        assert_eq!(ops.effect(HWND, Effect::Transitions), Some(0));
        assert_eq!(ops.effect(HWND, Effect::DarkMode), Some(1));
        assert_eq!(ops.effect(HWND, Effect::Backdrop), Some(2));
        assert_eq!(ops.effect(HWND, Effect::BypassCompositor), Some(0));
        assert_eq!(ops.effect(HWND, Effect::Mica), Some(1));
    }

    #[test]
    fn every_compositor_effect_is_suppressed() {
        let ops = FakeOps::with(HWND, maximized(true));

        let _token = Mutation::SuppressEffects.apply(&ops, HWND);

        for effect in Effect::ALL {
            assert_eq!(ops.effect(HWND, effect), Some(effect.suppressed()));
        }
        assert!(Effect::ALL.contains(&Effect::BypassCompositor));
        assert!(Effect::ALL.contains(&Effect::Mica));
    }

    #[test]
    fn log_restores_in_reverse_order() {
        let ops = FakeOps::with(HWND, maximized(false));
        let mut log = MutationLog::new();
        log.apply(&ops, HWND, Mutation::ShowNoActivate);
        log.apply(&ops, HWND, Mutation::SnapshotStyle);
        ops.calls.borrow_mut().clear();

        let restored = log.restore_all(&ops);

        // Style comes back before the window is hidden again.
        assert_eq!(restored, 2);
        let calls = ops.calls.borrow();
        let style_at = calls.iter().position(|c| c.starts_with("style"));
        let hide_at = calls.iter().position(|c| c == "Hide");
        assert!(style_at < hide_at);
        assert!(log.is_empty());
    }

    #[test]
    fn restore_all_is_idempotent() {
        let ops = FakeOps::with(HWND, maximized(false));
        let mut log = MutationLog::new();
        log.apply(&ops, HWND, Mutation::ShowNoActivate);

        assert_eq!(log.restore_all(&ops), 1);
        assert_eq!(log.restore_all(&ops), 0);
    }

    #[test]
    fn guard_restores_on_drop() {
        let ops = FakeOps::with(HWND, maximized(true));

        {
            let _guard = MutationGuard::new(
                &ops,
                HWND,
                Mutation::Lock {
                    strip: style::CHROME,
                },
            );
            assert_ne!(ops.get(HWND).style, STYLE);
        }

        assert_eq!(ops.get(HWND).style, STYLE);
    }
}
