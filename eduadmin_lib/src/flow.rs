//! Add/edit modal lifecycle.
//!
//! Every editor walks the same path: `Idle` to `Loading` while prefill
//! data is fetched, `FormOpen` while the operator edits, `Submitting`
//! while the save is in flight, then back to `Idle` or into `Error`.
//! Add flows with nothing to prefill pass through `Loading` without
//! awaiting anything. Illegal transitions are rejected and leave the
//! state untouched.

use std::mem;

/// Attempted transition that the current state does not permit.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot {action} from the {state} state")]
pub struct FlowError {
    action: &'static str,
    state: &'static str,
}

impl FlowError {
    fn new(action: &'static str, state: &'static str) -> Self {
        Self { action, state }
    }
}

/// State of one editor, parameterized over its form payload.
#[derive(Debug, Default)]
pub enum EditorFlow<F> {
    #[default]
    Idle,
    Loading,
    FormOpen(F),
    Submitting(F),
    Error(String),
}

impl<F> EditorFlow<F> {
    pub fn new() -> Self {
        EditorFlow::Idle
    }

    fn name(&self) -> &'static str {
        match self {
            EditorFlow::Idle => "idle",
            EditorFlow::Loading => "loading",
            EditorFlow::FormOpen(_) => "form-open",
            EditorFlow::Submitting(_) => "submitting",
            EditorFlow::Error(_) => "error",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorFlow::Idle)
    }

    /// The form, while one is open or being submitted.
    pub fn form(&self) -> Option<&F> {
        match self {
            EditorFlow::FormOpen(form) | EditorFlow::Submitting(form) => Some(form),
            _ => None,
        }
    }

    /// Mutable access to an open form. Submitting forms are frozen.
    pub fn form_mut(&mut self) -> Option<&mut F> {
        match self {
            EditorFlow::FormOpen(form) => Some(form),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            EditorFlow::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Starts the prefill fetch for this editor.
    pub fn begin_loading(&mut self) -> Result<(), FlowError> {
        match self {
            EditorFlow::Idle => {
                *self = EditorFlow::Loading;
                Ok(())
            }
            other => Err(FlowError::new("begin loading", other.name())),
        }
    }

    /// Opens the form once prefill data is in hand.
    pub fn open(&mut self, form: F) -> Result<(), FlowError> {
        match self {
            EditorFlow::Loading => {
                *self = EditorFlow::FormOpen(form);
                Ok(())
            }
            other => Err(FlowError::new("open a form", other.name())),
        }
    }

    /// Freezes the form and marks the save as in flight.
    pub fn submit(&mut self) -> Result<(), FlowError> {
        match mem::replace(self, EditorFlow::Idle) {
            EditorFlow::FormOpen(form) => {
                *self = EditorFlow::Submitting(form);
                Ok(())
            }
            other => {
                let err = FlowError::new("submit", other.name());
                *self = other;
                Err(err)
            }
        }
    }

    /// Completes a successful save.
    pub fn finish(&mut self) -> Result<(), FlowError> {
        match self {
            EditorFlow::Submitting(_) => {
                *self = EditorFlow::Idle;
                Ok(())
            }
            other => Err(FlowError::new("finish", other.name())),
        }
    }

    /// Records a failed prefill or save. The form is discarded; the
    /// message is what the operator sees.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), FlowError> {
        match self {
            EditorFlow::Loading | EditorFlow::Submitting(_) => {
                *self = EditorFlow::Error(message.into());
                Ok(())
            }
            other => Err(FlowError::new("fail", other.name())),
        }
    }

    /// Abandons an open form.
    pub fn cancel(&mut self) -> Result<(), FlowError> {
        match self {
            EditorFlow::FormOpen(_) => {
                *self = EditorFlow::Idle;
                Ok(())
            }
            other => Err(FlowError::new("cancel", other.name())),
        }
    }

    /// Dismisses a displayed error.
    pub fn acknowledge(&mut self) -> Result<(), FlowError> {
        match self {
            EditorFlow::Error(_) => {
                *self = EditorFlow::Idle;
                Ok(())
            }
            other => Err(FlowError::new("acknowledge", other.name())),
        }
    }
}
