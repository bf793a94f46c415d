//! Fullscreen presentation state machine.
//!
//! Pure transitions only. The client performs the platform calls
//! (request/exit fullscreen, CSS classes, scroll reset) and feeds the
//! results back in.

use serde::{Deserialize, Serialize};

/// Presentation mode of the player region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PresentationState {
    #[default]
    Normal,
    /// Platform-native fullscreen on the wrapper element.
    Fullscreen,
    /// CSS-only full-viewport fallback.
    PseudoFullscreen,
}

/// What `toggle` asks the client to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// Leave immersive mode; release native fullscreen first if held.
    Exit { release_native: bool },
    /// Ask the platform for native fullscreen; on rejection the client
    /// calls [`PresentationMachine::fallback_pseudo`].
    Enter(EnterOutcome),
}

/// How immersive mode is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterOutcome {
    RequestNative,
    Pseudo,
}

/// Tracks the presentation state across toggles and platform events.
#[derive(Debug, Default)]
pub struct PresentationMachine {
    state: PresentationState,
}

impl PresentationMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// The app-level immersive flag: anything but `Normal`.
    pub fn is_immersive(&self) -> bool {
        self.state != PresentationState::Normal
    }

    /// The exit affordance is laid out whenever immersive.
    pub fn exit_control_visible(&self) -> bool {
        self.is_immersive()
    }

    /// Decides the next action for the toggle control. Restricted
    /// platforms (no native fullscreen on the element) enter pseudo
    /// mode directly.
    pub fn toggle(&mut self, restricted_platform: bool) -> ToggleAction {
        match self.state {
            PresentationState::Fullscreen => {
                self.state = PresentationState::Normal;
                ToggleAction::Exit { release_native: true }
            }
            PresentationState::PseudoFullscreen => {
                self.state = PresentationState::Normal;
                ToggleAction::Exit { release_native: false }
            }
            PresentationState::Normal => {
                if restricted_platform {
                    self.state = PresentationState::PseudoFullscreen;
                    ToggleAction::Enter(EnterOutcome::Pseudo)
                } else {
                    self.state = PresentationState::Fullscreen;
                    ToggleAction::Enter(EnterOutcome::RequestNative)
                }
            }
        }
    }

    /// The native request was rejected or threw; fall back to CSS.
    pub fn fallback_pseudo(&mut self) {
        if self.state == PresentationState::Fullscreen {
            self.state = PresentationState::PseudoFullscreen;
        }
    }

    /// Reconciles a platform fullscreenchange notification.
    ///
    /// `forced_exit` means the machine held native fullscreen and was
    /// pushed back to `Normal`; the client clears immersive styling.
    /// `close_drawer` is set on every "no longer fullscreen" report,
    /// whatever state the machine was in.
    pub fn reconcile_platform(&mut self, platform_fullscreen: bool) -> PlatformReconciliation {
        let forced_exit = !platform_fullscreen && self.state == PresentationState::Fullscreen;
        if forced_exit {
            self.state = PresentationState::Normal;
        }
        PlatformReconciliation {
            forced_exit,
            close_drawer: !platform_fullscreen,
        }
    }
}

/// Client obligations after a platform fullscreenchange notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformReconciliation {
    pub forced_exit: bool,
    pub close_drawer: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_native_then_exit() {
        let mut fsm = PresentationMachine::new();
        assert_eq!(
            fsm.toggle(false),
            ToggleAction::Enter(EnterOutcome::RequestNative)
        );
        assert_eq!(fsm.state(), PresentationState::Fullscreen);
        assert!(fsm.is_immersive());
        assert_eq!(fsm.toggle(false), ToggleAction::Exit { release_native: true });
        assert_eq!(fsm.state(), PresentationState::Normal);
    }

    #[test]
    fn test_restricted_platform_goes_pseudo() {
        let mut fsm = PresentationMachine::new();
        assert_eq!(fsm.toggle(true), ToggleAction::Enter(EnterOutcome::Pseudo));
        assert_eq!(fsm.state(), PresentationState::PseudoFullscreen);
        assert_eq!(fsm.toggle(true), ToggleAction::Exit { release_native: false });
    }

    #[test]
    fn test_native_rejection_falls_back() {
        let mut fsm = PresentationMachine::new();
        fsm.toggle(false);
        fsm.fallback_pseudo();
        assert_eq!(fsm.state(), PresentationState::PseudoFullscreen);
        // exiting pseudo never releases native fullscreen
        assert_eq!(fsm.toggle(false), ToggleAction::Exit { release_native: false });
    }

    #[test]
    fn test_late_rejection_after_exit_is_ignored() {
        // the request promise can reject after the viewer has already
        // toggled back out; the stale fallback must not re-enter
        let mut fsm = PresentationMachine::new();
        fsm.toggle(false);
        fsm.toggle(false);
        assert_eq!(fsm.state(), PresentationState::Normal);
        fsm.fallback_pseudo();
        assert_eq!(fsm.state(), PresentationState::Normal);
    }

    #[test]
    fn test_platform_escape_forces_normal() {
        let mut fsm = PresentationMachine::new();
        fsm.toggle(false);
        let r = fsm.reconcile_platform(false);
        assert!(r.forced_exit);
        assert!(r.close_drawer);
        assert_eq!(fsm.state(), PresentationState::Normal);
        assert!(!fsm.is_immersive());
    }

    #[test]
    fn test_platform_event_ignored_in_pseudo() {
        let mut fsm = PresentationMachine::new();
        fsm.toggle(true);
        // a native fullscreenchange from some other element does not
        // tear down the CSS fallback, but the drawer still closes
        let r = fsm.reconcile_platform(false);
        assert!(!r.forced_exit);
        assert!(r.close_drawer);
        assert_eq!(fsm.state(), PresentationState::PseudoFullscreen);
    }

    #[test]
    fn test_exit_report_closes_drawer_from_any_state() {
        let mut fsm = PresentationMachine::new();
        assert!(fsm.reconcile_platform(false).close_drawer);
        assert!(!fsm.reconcile_platform(true).close_drawer);
        fsm.toggle(true);
        assert!(fsm.reconcile_platform(false).close_drawer);
    }

    #[test]
    fn test_exit_control_visibility_is_derived() {
        let mut fsm = PresentationMachine::new();
        assert!(!fsm.exit_control_visible());
        fsm.toggle(false);
        assert!(fsm.exit_control_visible());
        fsm.reconcile_platform(false);
        assert!(!fsm.exit_control_visible());
    }
}
