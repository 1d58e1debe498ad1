//! Color swatch and size dropdown state.
//!
//! These replace DOM classes like `selected` and `open` with plain values.
//! A UI adapter renders them and forwards clicks and key presses here.

use serde::{Deserialize, Serialize};

use crate::catalog::VariantOptions;
use crate::composer::Selection;

/// Placeholder shown by the size dropdown before a size is chosen.
pub const SIZE_PLACEHOLDER: &str = "Choose your size";

/// Swatch color used for names missing from the palette.
pub const FALLBACK_SWATCH_HEX: &str = "#000000";

const PALETTE: &[(&str, &str)] = &[
    ("red", "#ff0000"),
    ("blue", "#0000ff"),
    ("green", "#008000"),
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("yellow", "#ffff00"),
    ("pink", "#ffc0cb"),
    ("purple", "#800080"),
    ("orange", "#ffa500"),
    ("brown", "#a52a2a"),
    ("gray", "#808080"),
    ("grey", "#808080"),
];

/// Hex value for a color name. Lookup is case-insensitive.
#[must_use]
pub fn swatch_hex(color: &str) -> &'static str {
    let name = color.to_lowercase();
    PALETTE
        .iter()
        .find(|(known, _)| *known == name)
        .map_or(FALLBACK_SWATCH_HEX, |&(_, hex)| hex)
}

/// One color option rendered as a swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSwatch {
    /// Position in the picker.
    pub index: usize,
    /// Color label as stored on the variant.
    pub name: String,
    /// Border color, e.g. `#000000`.
    pub hex: String,
}

/// Single-select color picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorPicker {
    swatches: Vec<ColorSwatch>,
    selected: Option<usize>,
}

impl ColorPicker {
    /// Build swatches for the given color labels.
    #[must_use]
    pub fn new(colors: &[String]) -> Self {
        let swatches = colors
            .iter()
            .enumerate()
            .map(|(index, name)| ColorSwatch {
                index,
                name: name.clone(),
                hex: swatch_hex(name).to_owned(),
            })
            .collect();

        Self {
            swatches,
            selected: None,
        }
    }

    #[must_use]
    pub fn swatches(&self) -> &[ColorSwatch] {
        &self.swatches
    }

    /// Select the swatch at `index`, replacing any previous selection.
    ///
    /// Returns `false` and leaves the state untouched if `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.swatches.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Select the swatch whose label equals `name` exactly.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        self.swatches
            .iter()
            .position(|s| s.name == name)
            .is_some_and(|index| self.select(index))
    }

    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Label of the selected swatch.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.swatches.get(i))
            .map(|s| s.name.as_str())
    }

    #[must_use]
    pub const fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    pub const fn reset(&mut self) {
        self.selected = None;
    }
}

/// Whether the size dropdown list is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

impl DropdownState {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Custom single-select size dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeDropdown {
    options: Vec<String>,
    selected: Option<String>,
    state: DropdownState,
}

impl SizeDropdown {
    #[must_use]
    pub fn new(sizes: &[String]) -> Self {
        Self {
            options: sizes.to_vec(),
            selected: None,
            state: DropdownState::Closed,
        }
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub const fn state(&self) -> DropdownState {
        self.state
    }

    /// Click on the dropdown header.
    pub const fn toggle(&mut self) {
        self.state = self.state.toggled();
    }

    /// Click on an option: select it and close the list.
    ///
    /// Unknown sizes are ignored and leave the dropdown as it was.
    pub fn choose(&mut self, size: &str) -> bool {
        if !self.options.iter().any(|o| o == size) {
            return false;
        }
        self.selected = Some(size.to_owned());
        self.state = DropdownState::Closed;
        true
    }

    /// Escape key or a click outside the dropdown. Keeps the selection.
    pub const fn dismiss(&mut self) {
        self.state = DropdownState::Closed;
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Text for the dropdown header.
    #[must_use]
    pub fn label(&self) -> &str {
        self.selected.as_deref().unwrap_or(SIZE_PLACEHOLDER)
    }

    pub fn reset(&mut self) {
        self.selected = None;
        self.state = DropdownState::Closed;
    }
}

/// Color and size pickers for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionPickers {
    pub colors: ColorPicker,
    pub sizes: SizeDropdown,
}

impl OptionPickers {
    #[must_use]
    pub fn new(options: &VariantOptions) -> Self {
        Self {
            colors: ColorPicker::new(&options.colors),
            sizes: SizeDropdown::new(&options.sizes),
        }
    }

    /// Current choices as a [`Selection`].
    #[must_use]
    pub fn selection(&self) -> Selection {
        Selection {
            size: self.sizes.selected().map(String::from),
            color: self.colors.selected().map(String::from),
        }
    }

    /// Clear both pickers, as when the modal closes.
    pub fn reset(&mut self) {
        self.colors.reset();
        self.sizes.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_swatch_hex_palette() {
        assert_eq!(swatch_hex("Red"), "#ff0000");
        assert_eq!(swatch_hex("BLACK"), "#000000");
        assert_eq!(swatch_hex("grey"), "#808080");
        assert_eq!(swatch_hex("Gray"), "#808080");
    }

    #[test]
    fn test_swatch_hex_unknown_falls_back() {
        assert_eq!(swatch_hex("Teal"), FALLBACK_SWATCH_HEX);
        assert_eq!(swatch_hex(""), FALLBACK_SWATCH_HEX);
    }

    #[test]
    fn test_color_picker_single_selection() {
        let mut picker = ColorPicker::new(&strings(&["Red", "Black"]));
        assert!(!picker.has_selection());
        assert_eq!(picker.swatches()[1].hex, "#000000");

        assert!(picker.select(0));
        assert_eq!(picker.selected(), Some("Red"));

        assert!(picker.select(1));
        assert_eq!(picker.selected(), Some("Black"));
        assert_eq!(picker.selected_index(), Some(1));

        assert!(!picker.select(2));
        assert_eq!(picker.selected(), Some("Black"));

        picker.reset();
        assert!(picker.selected().is_none());
    }

    #[test]
    fn test_color_picker_select_by_name_is_exact() {
        let mut picker = ColorPicker::new(&strings(&["Red", "Black"]));
        assert!(!picker.select_by_name("black"));
        assert!(picker.select_by_name("Black"));
        assert_eq!(picker.selected_index(), Some(1));
    }

    #[test]
    fn test_dropdown_toggle_and_choose() {
        let mut dropdown = SizeDropdown::new(&strings(&["S", "M"]));
        assert_eq!(dropdown.label(), SIZE_PLACEHOLDER);
        assert_eq!(dropdown.state(), DropdownState::Closed);

        dropdown.toggle();
        assert!(dropdown.state().is_open());

        assert!(dropdown.choose("M"));
        assert_eq!(dropdown.selected(), Some("M"));
        assert_eq!(dropdown.label(), "M");
        assert_eq!(dropdown.state(), DropdownState::Closed);
    }

    #[test]
    fn test_dropdown_choose_unknown_size_is_ignored() {
        let mut dropdown = SizeDropdown::new(&strings(&["S"]));
        dropdown.toggle();
        assert!(!dropdown.choose("XL"));
        assert!(dropdown.selected().is_none());
        assert!(dropdown.state().is_open());
    }

    #[test]
    fn test_dropdown_dismiss_keeps_selection() {
        let mut dropdown = SizeDropdown::new(&strings(&["S", "M"]));
        dropdown.choose("S");
        dropdown.toggle();
        dropdown.dismiss();
        assert_eq!(dropdown.state(), DropdownState::Closed);
        assert_eq!(dropdown.selected(), Some("S"));

        dropdown.dismiss();
        assert_eq!(dropdown.state(), DropdownState::Closed);
    }

    #[test]
    fn test_pickers_build_selection_and_reset() {
        let options = VariantOptions {
            sizes: strings(&["S", "M"]),
            colors: strings(&["Red", "Black"]),
        };
        let mut pickers = OptionPickers::new(&options);
        assert_eq!(pickers.selection(), Selection::default());

        pickers.colors.select(1);
        pickers.sizes.choose("M");
        assert_eq!(pickers.selection(), Selection::new("M", "Black"));

        pickers.sizes.toggle();
        pickers.reset();
        assert_eq!(pickers.selection(), Selection::default());
        assert_eq!(pickers.sizes.state(), DropdownState::Closed);
    }
}
