//! Indentation units.

/// One level of indentation in emitted code.
///
/// Tabs are represented with a width of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    width: u8,
}

impl Indent {
    pub const JAVASCRIPT: Self = Self::spaces(2);
    pub const TAB: Self = Self { width: 0 };

    /// Space indentation, clamped to `1..=8` columns.
    pub const fn spaces(width: u8) -> Self {
        let width = if width == 0 {
            1
        } else if width > 8 {
            8
        } else {
            width
        };
        Self { width }
    }

    pub fn is_tab(&self) -> bool {
        self.width == 0
    }

    /// Text for `depth` levels.
    pub fn repeat(&self, depth: usize) -> String {
        if self.is_tab() {
            "\t".repeat(depth)
        } else {
            " ".repeat(usize::from(self.width) * depth)
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::JAVASCRIPT
    }
}
