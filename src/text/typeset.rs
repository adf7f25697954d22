//! Font roles, shaping and measurement.
//!
//! Each role's font lives in its own parley font context so that a shaped run always comes from
//! the file configured for that role, and no system fonts are consulted. A role without a font
//! still measures (with a fixed per-character advance) so layout stays defined; its text is
//! simply not drawn.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::error::{PromoError, PromoResult};

/// Typographic role of a piece of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontRole {
    /// Headline and product name ("Mona Sans", 600).
    Display,
    /// Badge label ("Monaspace Neon", 400).
    Mono,
    /// Model names ("SF Pro", 400).
    Ui,
    /// Dropdown and hero rows on the social card ("SF Pro", 500).
    UiMedium,
}

impl FontRole {
    pub const ALL: [FontRole; 4] = [
        FontRole::Display,
        FontRole::Mono,
        FontRole::Ui,
        FontRole::UiMedium,
    ];

    pub fn weight(self) -> f32 {
        match self {
            Self::Display => 600.0,
            Self::Mono | Self::Ui => 400.0,
            Self::UiMedium => 500.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Mono => "mono",
            Self::Ui => "ui",
            Self::UiMedium => "ui-medium",
        }
    }

    /// Advance per character, as a fraction of the font size, used without a font.
    fn fallback_advance(self) -> f64 {
        match self {
            Self::Mono => 0.6,
            Self::Display | Self::Ui | Self::UiMedium => 0.56,
        }
    }
}

/// Font, size and tracking for one run of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub role: FontRole,
    pub size: f64,
    /// Extra advance after every character, in pixels.
    pub letter_spacing: f64,
}

impl TextStyle {
    pub fn new(role: FontRole, size: f64) -> Self {
        Self {
            role,
            size,
            letter_spacing: 0.0,
        }
    }

    pub fn with_letter_spacing(self, letter_spacing: f64) -> Self {
        Self {
            letter_spacing,
            ..self
        }
    }
}

/// One glyph, positioned relative to the line origin (left edge, baseline).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPos {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// A single shaped line ready for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedLine {
    pub role: FontRole,
    pub size: f32,
    pub width: f64,
    pub glyphs: Vec<GlyphPos>,
}

struct RoleFont {
    font_ctx: parley::FontContext,
    family: String,
    bytes: Arc<Vec<u8>>,
    data: vello_cpu::peniko::FontData,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ShapeKey {
    role: FontRole,
    size_bits: u64,
    spacing_bits: u64,
    text: String,
}

/// Font bytes per role, shareable across threads.
#[derive(Clone, Debug, Default)]
pub struct FontSet(Vec<(FontRole, Arc<Vec<u8>>)>);

impl FontSet {
    pub fn roles(&self) -> impl Iterator<Item = FontRole> + '_ {
        self.0.iter().map(|(role, _)| *role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Stateful shaper holding one font per role and a cache of shaped lines.
pub struct Typesetter {
    fonts: HashMap<FontRole, RoleFont>,
    layout_ctx: parley::LayoutContext<()>,
    cache: HashMap<ShapeKey, Arc<ShapedLine>>,
}

impl Default for Typesetter {
    fn default() -> Self {
        Self::new()
    }
}

impl Typesetter {
    /// A typesetter with no fonts: everything measures with the fallback advance.
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            layout_ctx: parley::LayoutContext::new(),
            cache: HashMap::new(),
        }
    }

    /// Register `bytes` as the font for `role`, replacing any previous one.
    pub fn set_font(&mut self, role: FontRole, bytes: Vec<u8>) -> PromoResult<()> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            PromoError::validation(format!(
                "no font families registered for role '{}'",
                role.name()
            ))
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PromoError::validation("registered font family has no name"))?
            .to_string();

        let bytes = Arc::new(bytes);
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        tracing::debug!(role = role.name(), %family, "font registered");
        self.fonts.insert(
            role,
            RoleFont {
                font_ctx,
                family,
                bytes,
                data,
            },
        );
        self.cache.retain(|k, _| k.role != role);
        Ok(())
    }

    pub fn has_font(&self, role: FontRole) -> bool {
        self.fonts.contains_key(&role)
    }

    pub fn family(&self, role: FontRole) -> Option<&str> {
        self.fonts.get(&role).map(|f| f.family.as_str())
    }

    pub fn font_bytes(&self, role: FontRole) -> Option<&[u8]> {
        self.fonts.get(&role).map(|f| f.bytes.as_slice())
    }

    /// Registered font bytes, for building an equivalent typesetter on another thread.
    pub fn font_set(&self) -> FontSet {
        let mut fonts: Vec<(FontRole, Arc<Vec<u8>>)> = self
            .fonts
            .iter()
            .map(|(role, f)| (*role, Arc::clone(&f.bytes)))
            .collect();
        fonts.sort_by_key(|(role, _)| *role);
        FontSet(fonts)
    }

    /// A fresh typesetter with the same fonts registered. The shaping cache starts empty.
    pub fn from_font_set(set: &FontSet) -> PromoResult<Self> {
        let mut ts = Self::new();
        for (role, bytes) in &set.0 {
            ts.set_font(*role, bytes.as_ref().clone())?;
        }
        Ok(ts)
    }

    pub(crate) fn font_data(&self, role: FontRole) -> Option<&vello_cpu::peniko::FontData> {
        self.fonts.get(&role).map(|f| &f.data)
    }

    /// Advance width of `text` on a single line.
    pub fn measure(&mut self, text: &str, style: TextStyle) -> f64 {
        match self.shape(text, style) {
            Some(line) => line.width,
            None => fallback_width(text, style),
        }
    }

    /// Shape `text` as one unbroken line. `None` when the role has no font.
    pub fn shape(&mut self, text: &str, style: TextStyle) -> Option<Arc<ShapedLine>> {
        let key = ShapeKey {
            role: style.role,
            size_bits: style.size.to_bits(),
            spacing_bits: style.letter_spacing.to_bits(),
            text: text.to_string(),
        };
        if let Some(hit) = self.cache.get(&key) {
            return Some(Arc::clone(hit));
        }
        let font = self.fonts.get_mut(&style.role)?;
        let line = Arc::new(shape_line(&mut self.layout_ctx, font, text, style));
        self.cache.insert(key, Arc::clone(&line));
        Some(line)
    }
}

impl std::fmt::Debug for Typesetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut roles: Vec<&str> = self.fonts.keys().map(|r| r.name()).collect();
        roles.sort_unstable();
        f.debug_struct("Typesetter").field("fonts", &roles).finish()
    }
}

fn shape_line(
    layout_ctx: &mut parley::LayoutContext<()>,
    font: &mut RoleFont,
    text: &str,
    style: TextStyle,
) -> ShapedLine {
    let size = style.size as f32;
    let mut builder = layout_ctx.ranged_builder(&mut font.font_ctx, text, 1.0, true);
    builder.push_default(parley::style::StyleProperty::FontStack(
        parley::style::FontStack::Source(Cow::Owned(font.family.clone())),
    ));
    builder.push_default(parley::style::StyleProperty::FontSize(size));
    builder.push_default(parley::style::StyleProperty::FontWeight(
        parley::style::FontWeight::new(style.role.weight()),
    ));
    builder.push_default(parley::style::StyleProperty::LetterSpacing(
        style.letter_spacing as f32,
    ));

    let mut layout: parley::Layout<()> = builder.build(text);
    layout.break_all_lines(None);

    let mut glyphs = Vec::new();
    if let Some(line) = layout.lines().next() {
        let baseline = line.metrics().baseline;
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            glyphs.extend(run.positioned_glyphs().map(|g| GlyphPos {
                id: g.id,
                x: g.x,
                y: g.y - baseline,
            }));
        }
    }

    ShapedLine {
        role: style.role,
        size,
        width: f64::from(layout.width()),
        glyphs,
    }
}

/// Deterministic width estimate used when a role has no font.
pub fn fallback_width(text: &str, style: TextStyle) -> f64 {
    let n = text.chars().count() as f64;
    n * (style.size * style.role.fallback_advance() + style.letter_spacing)
}

#[cfg(test)]
#[path = "../../tests/unit/text/typeset.rs"]
mod tests;
