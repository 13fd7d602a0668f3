//! Font-wide identity and style information.

/// The `FontInfo` dictionary entries and the font name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostScriptInfo {
    pub font_name: String,
    pub full_name: String,
    pub family_name: String,
    pub version: String,
    pub notice: String,
    pub copyright: String,
    pub weight: String,
    pub italic_angle: f32,
    pub is_fixed_pitch: bool,
    pub underline_position: f32,
    pub underline_thickness: f32,
}

/// Style information inferred from `PostScriptInfo`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Style {
    pub is_italic: bool,
    pub is_bold: bool,
    pub family_name: String,
    pub style_name: String,
}

/// A summary of the face, for font selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontSummary {
    pub is_italic: bool,
    pub is_bold: bool,
    pub family: String,
    pub style: String,
    pub has_scalable_glyphs: bool,
    pub has_bitmap_glyphs: bool,
    pub has_color_glyphs: bool,
}

const REGULAR: &str = "Regular";

impl PostScriptInfo {
    /// Infer the family and style names, along with the italic and bold flags.
    ///
    /// The style name is what remains of the full name after the family name, ignoring spaces
    /// and hyphens. When that is empty the weight is used instead, and failing that `Regular`.
    pub fn style(&self) -> Style {
        let mut style_name = "";
        if !self.family_name.is_empty() {
            style_name = style_suffix(self.full_name.as_bytes(), self.family_name.as_bytes())
                .map(|suffix| &self.full_name[suffix..])
                .unwrap_or(REGULAR);
        }

        let mut style_name = style_name.trim();
        if style_name.is_empty() {
            style_name = self.weight.trim();
        }
        if style_name.is_empty() {
            style_name = REGULAR;
        }

        Style {
            is_italic: self.is_italic(),
            is_bold: self.is_bold(),
            family_name: self.family_name.clone(),
            style_name: style_name.to_string(),
        }
    }

    pub fn is_italic(&self) -> bool {
        self.italic_angle != 0.
    }

    pub fn is_bold(&self) -> bool {
        matches!(self.weight.as_str(), "Bold" | "Black")
    }
}

/// Compare `full` and `family` byte by byte, skipping spaces and hyphens.
///
/// Returns `None` when the full name has nothing beyond the family name. Otherwise returns the
/// offset in `full` where the style begins, which is the end of `full` when the two names
/// diverge before the family name is exhausted.
fn style_suffix(full: &[u8], family: &[u8]) -> Option<usize> {
    let (mut i, mut j) = (0, 0);
    while i < full.len() {
        if j < family.len() && full[i] == family[j] {
            i += 1;
            j += 1;
        } else if full[i] == b' ' || full[i] == b'-' {
            i += 1;
        } else if j < family.len() && (family[j] == b' ' || family[j] == b'-') {
            j += 1;
        } else if j == family.len() {
            return Some(i);
        } else {
            return Some(full.len());
        }
    }
    None
}
