//! Add-to-cart controls and their submission state.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::sync::watch;

use crate::error::SubmitError;

/// Submission state of a single control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl ButtonState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonState::Idle => "idle",
            ButtonState::Loading => "loading",
            ButtonState::Success => "success",
            ButtonState::Error => "error",
        }
    }

    /// Rendered representation of this state.
    ///
    /// Every non-idle state keeps the control disabled; success and error
    /// keep the loading marker until the settle reset clears them all.
    pub fn appearance(self) -> ButtonAppearance {
        match self {
            ButtonState::Idle => ButtonAppearance {
                disabled: false,
                markers: &[],
            },
            ButtonState::Loading => ButtonAppearance {
                disabled: true,
                markers: &["loading"],
            },
            ButtonState::Success => ButtonAppearance {
                disabled: true,
                markers: &["loading", "success"],
            },
            ButtonState::Error => ButtonAppearance {
                disabled: true,
                markers: &["loading", "error"],
            },
        }
    }

    /// Whether `next` is a legal successor.
    pub fn can_transition_to(self, next: ButtonState) -> bool {
        matches!(
            (self, next),
            (ButtonState::Idle, ButtonState::Loading)
                | (ButtonState::Loading, ButtonState::Success)
                | (ButtonState::Loading, ButtonState::Error)
                | (ButtonState::Success, ButtonState::Idle)
                | (ButtonState::Error, ButtonState::Idle)
                // abandoned cycle
                | (ButtonState::Loading, ButtonState::Idle)
        )
    }
}

impl fmt::Display for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a [`ButtonState`] is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonAppearance {
    pub disabled: bool,
    /// Visual markers (CSS classes on a web page).
    pub markers: &'static [&'static str],
}

/// Everything a renderer needs to draw a control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlView {
    pub label: String,
    pub state: ButtonState,
    pub disabled: bool,
    pub markers: &'static [&'static str],
}

#[derive(Debug)]
struct ControlSlot {
    state: ButtonState,
    label: String,
    blocked: bool,
    cycles: u64,
}

impl ControlSlot {
    fn view(&self) -> ControlView {
        let appearance = self.state.appearance();
        ControlView {
            label: self.label.clone(),
            state: self.state,
            disabled: appearance.disabled || self.blocked,
            markers: appearance.markers,
        }
    }
}

#[derive(Debug)]
struct ControlInner {
    id: String,
    slot: Mutex<ControlSlot>,
    updates: watch::Sender<ControlView>,
}

/// An interactive add-to-cart element (inline button or picker confirm).
///
/// Cloning yields another handle to the same control; its state lives for
/// as long as any handle does.
#[derive(Debug, Clone)]
pub struct CartControl {
    inner: Arc<ControlInner>,
}

impl CartControl {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let slot = ControlSlot {
            state: ButtonState::Idle,
            label: label.into(),
            blocked: false,
            cycles: 0,
        };
        let (updates, _) = watch::channel(slot.view());
        Self {
            inner: Arc::new(ControlInner {
                id: id.into(),
                slot: Mutex::new(slot),
                updates,
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn state(&self) -> ButtonState {
        self.slot().state
    }

    pub fn label(&self) -> String {
        self.slot().label.clone()
    }

    /// Whether clicks on this control should be ignored.
    pub fn is_disabled(&self) -> bool {
        self.slot().view().disabled
    }

    /// Number of completed submission cycles.
    pub fn cycles_completed(&self) -> u64 {
        self.slot().cycles
    }

    pub fn view(&self) -> ControlView {
        self.slot().view()
    }

    /// Watch rendered updates.
    pub fn subscribe(&self) -> watch::Receiver<ControlView> {
        self.inner.updates.subscribe()
    }

    pub fn set_label(&self, label: impl Into<String>) {
        self.update(|slot| slot.label = label.into());
    }

    /// Disable or re-enable the control independently of its submission
    /// state.
    pub fn set_blocked(&self, blocked: bool) {
        self.update(|slot| slot.blocked = blocked);
    }

    /// Claim the control for a new cycle: idle -> loading.
    pub(crate) fn try_begin(&self) -> Result<(), SubmitError> {
        let mut slot = self.slot();
        if slot.state != ButtonState::Idle {
            return Err(SubmitError::ControlBusy(self.inner.id.clone()));
        }
        if slot.blocked {
            return Err(SubmitError::ControlDisabled(self.inner.id.clone()));
        }
        slot.state = ButtonState::Loading;
        self.inner.updates.send_replace(slot.view());
        Ok(())
    }

    /// Record the outcome: loading -> success | error.
    pub(crate) fn settle(&self, outcome: ButtonState) {
        self.transition(outcome);
    }

    /// End the cycle and clear all markers.
    pub(crate) fn reset(&self) {
        self.update(|slot| {
            if slot.state != ButtonState::Idle {
                slot.state = ButtonState::Idle;
                slot.cycles += 1;
            }
        });
    }

    fn transition(&self, next: ButtonState) {
        self.update(|slot| {
            if slot.state.can_transition_to(next) {
                slot.state = next;
            } else {
                tracing::warn!(
                    control = %self.inner.id,
                    from = %slot.state,
                    to = %next,
                    "ignoring invalid control transition"
                );
            }
        });
    }

    fn update(&self, f: impl FnOnce(&mut ControlSlot)) {
        let mut slot = self.slot();
        f(&mut slot);
        self.inner.updates.send_replace(slot.view());
    }

    fn slot(&self) -> MutexGuard<'_, ControlSlot> {
        self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
