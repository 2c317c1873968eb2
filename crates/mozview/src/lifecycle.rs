//! The view lifecycle and its per-operation gating policy.
//!
//! ```text
//! Uncreated --create--> Created --initialized--> Initialized
//!     \                    \                         /
//!      `-------------------`----- destroy ----------`--> Destroyed
//! ```
//!
//! Every public page operation consults [`policy`] before touching the
//! engine view, so what happens in each phase is decided in one table.

use crate::engine::EngineView;
use crate::listener::ListenerAttachment;

/// An engine view together with the listener attached to it.
pub(crate) struct LiveView {
    pub(crate) view: Box<dyn EngineView>,
    pub(crate) listener: ListenerAttachment,
}

pub(crate) enum Lifecycle {
    Uncreated,
    Created(LiveView),
    Initialized(LiveView),
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Uncreated,
    Created,
    Initialized,
    Destroyed,
}

impl Lifecycle {
    pub(crate) fn phase(&self) -> Phase {
        match self {
            Self::Uncreated => Phase::Uncreated,
            Self::Created(_) => Phase::Created,
            Self::Initialized(_) => Phase::Initialized,
            Self::Destroyed => Phase::Destroyed,
        }
    }

    pub(crate) fn live(&self) -> Option<&LiveView> {
        match self {
            Self::Created(live) | Self::Initialized(live) => Some(live),
            Self::Uncreated | Self::Destroyed => None,
        }
    }

    pub(crate) fn view_mut(&mut self) -> Option<&mut dyn EngineView> {
        match self {
            Self::Created(live) | Self::Initialized(live) => Some(live.view.as_mut()),
            Self::Uncreated | Self::Destroyed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Create,
    Initialize,
    SetActive,
    ForceFocus,
    SuspendResume,
    Navigate,
    LoadUrl,
    UpdateSize,
    Input,
    Messaging,
    SetPrivateMode,
    SyntheticTouch,
    MouseInjection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Disposition {
    /// Apply now and forward to the engine view.
    Forward,
    /// Remember the request and apply it at a later transition.
    Defer,
    /// Drop silently.
    Ignore,
    /// Programmer error; the caller must not reach this state.
    Fatal,
}

pub(crate) fn policy(op: Op, phase: Phase) -> Disposition {
    use Disposition::*;
    use Phase::*;

    match (op, phase) {
        (Op::Create, Uncreated) => Forward,
        (Op::Create, _) => Ignore,

        (Op::Initialize, Created) => Forward,
        (Op::Initialize, Uncreated) => Fatal,
        (Op::Initialize, _) => Ignore,

        (Op::SetActive, Uncreated | Created) => Defer,
        (Op::SetActive, Initialized) => Forward,
        (Op::SetActive, Destroyed) => Ignore,

        (Op::ForceFocus, Uncreated | Created) => Fatal,
        (Op::ForceFocus, Initialized) => Forward,
        (Op::ForceFocus, Destroyed) => Ignore,

        (Op::SuspendResume | Op::UpdateSize | Op::Input, Created | Initialized) => Forward,
        (Op::SuspendResume | Op::UpdateSize | Op::Input, _) => Ignore,

        (Op::Navigate, Initialized) => Forward,
        (Op::Navigate, _) => Ignore,

        (Op::LoadUrl, Initialized) => Forward,
        (Op::LoadUrl, Uncreated | Created) => Defer,
        (Op::LoadUrl, Destroyed) => Ignore,

        (Op::Messaging, Created | Initialized) => Forward,
        (Op::Messaging, Uncreated) => Defer,
        (Op::Messaging, Destroyed) => Ignore,

        (Op::SetPrivateMode, Uncreated) => Forward,
        (Op::SetPrivateMode, _) => Ignore,

        (Op::SyntheticTouch, _) => Ignore,
        (Op::MouseInjection, _) => Fatal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASES: [Phase; 4] = [
        Phase::Uncreated,
        Phase::Created,
        Phase::Initialized,
        Phase::Destroyed,
    ];

    #[test]
    fn nothing_forwards_after_destroy() {
        for op in [
            Op::Create,
            Op::Initialize,
            Op::SetActive,
            Op::ForceFocus,
            Op::SuspendResume,
            Op::Navigate,
            Op::LoadUrl,
            Op::UpdateSize,
            Op::Input,
            Op::Messaging,
            Op::SetPrivateMode,
        ] {
            let disposition = policy(op, Phase::Destroyed);
            assert_eq!(disposition, Disposition::Ignore, "{op:?}");
        }
    }

    #[test]
    fn activation_defers_until_initialized() {
        assert_eq!(policy(Op::SetActive, Phase::Uncreated), Disposition::Defer);
        assert_eq!(policy(Op::SetActive, Phase::Created), Disposition::Defer);
        assert_eq!(policy(Op::SetActive, Phase::Initialized), Disposition::Forward);
    }

    #[test]
    fn focus_before_initialization_is_fatal() {
        assert_eq!(policy(Op::ForceFocus, Phase::Uncreated), Disposition::Fatal);
        assert_eq!(policy(Op::ForceFocus, Phase::Created), Disposition::Fatal);
    }

    #[test]
    fn navigation_needs_initialization_but_messaging_does_not() {
        assert_eq!(policy(Op::Navigate, Phase::Created), Disposition::Ignore);
        assert_eq!(policy(Op::Messaging, Phase::Created), Disposition::Forward);
        assert_eq!(policy(Op::Messaging, Phase::Uncreated), Disposition::Defer);
    }

    #[test]
    fn private_mode_is_writable_only_before_creation() {
        assert_eq!(policy(Op::SetPrivateMode, Phase::Uncreated), Disposition::Forward);
        for phase in &PHASES[1..] {
            assert_eq!(policy(Op::SetPrivateMode, *phase), Disposition::Ignore);
        }
    }

    #[test]
    fn injection_variants_differ() {
        for phase in PHASES {
            assert_eq!(policy(Op::SyntheticTouch, phase), Disposition::Ignore);
            assert_eq!(policy(Op::MouseInjection, phase), Disposition::Fatal);
        }
    }
}
