//! Which barcode panel is focused.

use serde::{Deserialize, Serialize};

use crate::model::BarcodeId;

/// Panel focus state. Starts as [`Selection::AllVisible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    AllVisible,
    FocusedOn(BarcodeId),
}

impl Selection {
    /// State after clicking `clicked`.
    ///
    /// Clicking the focused panel returns to all-visible; clicking any other
    /// panel focuses it directly.
    pub fn toggle(self, clicked: BarcodeId) -> Self {
        toggle(self, clicked)
    }

    /// Whether `id` is shown in this state.
    pub fn is_visible(self, id: BarcodeId) -> bool {
        is_visible(self, id)
    }

    /// The focused id, if any.
    pub fn focused(self) -> Option<BarcodeId> {
        match self {
            Selection::AllVisible => None,
            Selection::FocusedOn(id) => Some(id),
        }
    }
}

impl From<Option<BarcodeId>> for Selection {
    fn from(focus: Option<BarcodeId>) -> Self {
        focus.map_or(Selection::AllVisible, Selection::FocusedOn)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::AllVisible => write!(f, "all"),
            Selection::FocusedOn(id) => write!(f, "{}", id),
        }
    }
}

/// Transition function for a click on `clicked`.
pub fn toggle(current: Selection, clicked: BarcodeId) -> Selection {
    if current == Selection::FocusedOn(clicked) {
        Selection::AllVisible
    } else {
        Selection::FocusedOn(clicked)
    }
}

/// Visibility predicate used by generation and rendering.
pub fn is_visible(current: Selection, id: BarcodeId) -> bool {
    match current {
        Selection::AllVisible => true,
        Selection::FocusedOn(focused) => focused == id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(Selection::default(), Selection::AllVisible);
    }

    #[test]
    fn test_toggle_twice_returns_to_all() {
        let once = toggle(Selection::AllVisible, BarcodeId::Ndc);
        assert_eq!(once, Selection::FocusedOn(BarcodeId::Ndc));
        assert_eq!(toggle(once, BarcodeId::Ndc), Selection::AllVisible);
    }

    #[test]
    fn test_toggle_switches_focus_directly() {
        assert_eq!(
            toggle(Selection::FocusedOn(BarcodeId::Rx), BarcodeId::Ndc),
            Selection::FocusedOn(BarcodeId::Ndc)
        );
    }

    #[test]
    fn test_toggle_is_total() {
        let states = std::iter::once(Selection::AllVisible)
            .chain(BarcodeId::ALL.into_iter().map(Selection::FocusedOn));
        for state in states {
            for id in BarcodeId::ALL {
                let next = state.toggle(id);
                assert!(next == Selection::AllVisible || next == Selection::FocusedOn(id));
                assert!(next.is_visible(id));
            }
        }
    }

    #[test]
    fn test_is_visible() {
        for id in BarcodeId::ALL {
            assert!(is_visible(Selection::AllVisible, id));
        }
        let focused = Selection::FocusedOn(BarcodeId::Gs1);
        assert!(focused.is_visible(BarcodeId::Gs1));
        assert!(!focused.is_visible(BarcodeId::Rx));
        assert_eq!(focused.focused(), Some(BarcodeId::Gs1));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Selection::from(None), Selection::AllVisible);
        assert_eq!(
            Selection::from(Some(BarcodeId::Barcode2)),
            Selection::FocusedOn(BarcodeId::Barcode2)
        );
    }
}
