// src/focus.rs

/// Which suggestion the user most recently opened for external verification.
///
/// Purely visual state. Kept apart from the stores so that highlighting a row
/// never touches its verification status.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FocusTracker {
    focused: Option<String>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&mut self, case_id: impl Into<String>) {
        self.focused = Some(case_id.into());
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn is_focused(&self, case_id: &str) -> bool {
        self.focused.as_deref() == Some(case_id)
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }
}
