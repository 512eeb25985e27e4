use crate::Lang;

/// Where a button sits in the segmented control, for rounding its corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPosition {
    Only,
    First,
    Middle,
    Last,
}

impl ButtonPosition {
    fn of(index: usize, count: usize) -> Self {
        match (index, count) {
            (_, 1) => Self::Only,
            (0, _) => Self::First,
            (i, n) if i + 1 == n => Self::Last,
            _ => Self::Middle,
        }
    }

    pub fn rounds_left(self) -> bool {
        matches!(self, Self::Only | Self::First)
    }

    pub fn rounds_right(self) -> bool {
        matches!(self, Self::Only | Self::Last)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchButton {
    pub lang: Lang,
    pub label: String,
    pub aria_label: String,
    pub active: bool,
    pub position: ButtonPosition,
}

/// One button per supported language, in declaration order, with `current`
/// marked active.
pub fn switch_buttons(current: Lang) -> Vec<SwitchButton> {
    let count = Lang::all().len();
    Lang::iter()
        .enumerate()
        .map(|(i, &lang)| SwitchButton {
            lang,
            label: lang.label(),
            aria_label: format!("Switch to {}", lang.label()),
            active: lang == current,
            position: ButtonPosition::of(i, count),
        })
        .collect()
}
