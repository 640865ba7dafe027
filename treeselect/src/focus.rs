//! Virtual focus: a logical current item, independent of real input focus.

use serde::{Deserialize, Serialize};

/// Where focus lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusRegion {
    /// Chips, the field input and the clear-all control.
    Field,
    /// Dropdown rows.
    Dropdown,
}

/// Something that can hold virtual focus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusTarget {
    /// A selected node shown in the field.
    Chip(String),
    FieldInput,
    ClearAll,
    /// Search input pinned in the dropdown.
    DropdownInput,
    SelectAll,
    /// A node row in the dropdown.
    Node(String),
}

impl FocusTarget {
    pub fn region(&self) -> FocusRegion {
        match self {
            Self::Chip(_) | Self::FieldInput | Self::ClearAll => FocusRegion::Field,
            Self::DropdownInput | Self::SelectAll | Self::Node(_) => FocusRegion::Dropdown,
        }
    }

    /// Node addressed by the target, if any.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Self::Chip(id) | Self::Node(id) => Some(id),
            _ => None,
        }
    }
}

/// Direction of a focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    First,
    Last,
    Prev,
    Next,
}

/// Pick the next focus among `items`.
///
/// Prev/next from a target that is not in `items` start from the opposite
/// end; moves saturate at the ends.
pub fn step(
    items: &[FocusTarget],
    current: Option<&FocusTarget>,
    direction: FocusMove,
) -> Option<FocusTarget> {
    let last = items.len().checked_sub(1)?;
    let position = current.and_then(|c| items.iter().position(|t| t == c));

    let index = match (direction, position) {
        (FocusMove::First, _) | (FocusMove::Next, None) => 0,
        (FocusMove::Last, _) | (FocusMove::Prev, None) => last,
        (FocusMove::Prev, Some(i)) => i.saturating_sub(1),
        (FocusMove::Next, Some(i)) => (i + 1).min(last),
    };
    items.get(index).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<FocusTarget> {
        vec![
            FocusTarget::SelectAll,
            FocusTarget::Node("a".into()),
            FocusTarget::Node("b".into()),
        ]
    }

    #[test]
    fn test_step_from_nothing() {
        assert_eq!(
            step(&items(), None, FocusMove::Next),
            Some(FocusTarget::SelectAll)
        );
        assert_eq!(
            step(&items(), None, FocusMove::Prev),
            Some(FocusTarget::Node("b".into()))
        );
    }

    #[test]
    fn test_step_saturates() {
        let last = FocusTarget::Node("b".into());
        assert_eq!(step(&items(), Some(&last), FocusMove::Next), Some(last));
        assert_eq!(
            step(&items(), Some(&FocusTarget::SelectAll), FocusMove::Prev),
            Some(FocusTarget::SelectAll)
        );
    }

    #[test]
    fn test_step_empty() {
        assert_eq!(step(&[], None, FocusMove::First), None);
    }
}
