//! Glyph layout
//!
//! Packs the glyphs of a rune set into a near-square grid and records
//! their pixel metrics. Rasterising into the frames is left to the
//! renderer.

use std::iter;

use glam::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};
use ttf_parser::Face;

use super::face::FontFace;
use super::rect::GlyphFrame;

/// Space between neighbouring frames, in pixels
const PADDING: f32 = 2.0;

/// The printable ASCII runes, `' '` through `'~'`
#[must_use]
pub fn ascii() -> Vec<char> {
    (' '..='~').collect()
}

/// Metrics and frame placement of one glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Glyph index in the face
    pub id: u16,
    /// Horizontal advance in pixels
    pub advance: f32,
    /// Bottom-left of the outline relative to the pen, y up
    pub bounds_min: Vec2,
    /// Top-right of the outline relative to the pen, y up
    pub bounds_max: Vec2,
    /// Where the glyph sits in the packed layout
    pub frame: GlyphFrame,
}

/// Frame placement and metrics for a fixed set of runes
///
/// Holds no pixels. A renderer rasterises each glyph into its [`Glyph::frame`].
#[derive(Debug, Clone)]
pub struct GlyphLayout {
    glyphs: FxHashMap<char, Glyph>,
    size: Vec2,
    ascent: f32,
    descent: f32,
    line_height: f32,
}

impl GlyphLayout {
    /// Lay out every rune of `rune_sets` the face can map.
    ///
    /// An empty list means [`ascii`]. U+FFFD is always included when the
    /// face has it; duplicates and unmapped runes are skipped.
    #[must_use]
    pub fn build(face: &Face<'_>, metrics: &FontFace, rune_sets: &[Vec<char>]) -> Self {
        let fallback;
        let sets = if rune_sets.is_empty() {
            fallback = [ascii()];
            &fallback[..]
        } else {
            rune_sets
        };

        let mut seen = FxHashSet::default();
        let runes = iter::once(char::REPLACEMENT_CHARACTER)
            .chain(sets.iter().flatten().copied())
            .filter(|rune| seen.insert(*rune));

        let scale = metrics.scale();
        let hinting = metrics.hinting();
        let mut measured = Vec::new();
        for rune in runes {
            let Some(id) = face.glyph_index(rune) else {
                continue;
            };
            let advance = hinting.round_x(f32::from(face.glyph_hor_advance(id).unwrap_or(0)) * scale);
            let (bounds_min, bounds_max) = face
                .glyph_bounding_box(id)
                .map(|b| {
                    (
                        Vec2::new(
                            hinting.round_x(f32::from(b.x_min) * scale),
                            hinting.round_y(f32::from(b.y_min) * scale),
                        ),
                        Vec2::new(
                            hinting.round_x(f32::from(b.x_max) * scale),
                            hinting.round_y(f32::from(b.y_max) * scale),
                        ),
                    )
                })
                .unwrap_or((Vec2::ZERO, Vec2::ZERO));
            measured.push((rune, id.0, advance, bounds_min, bounds_max));
        }

        let cell = measured
            .iter()
            .fold(Vec2::ZERO, |acc, &(.., min, max)| acc.max(max - min))
            .ceil()
            + Vec2::splat(PADDING);
        let columns = ((measured.len() as f32).sqrt().ceil() as usize).max(1);
        let rows = measured.len().div_ceil(columns);

        let glyphs = measured
            .into_iter()
            .enumerate()
            .map(|(i, (rune, id, advance, bounds_min, bounds_max))| {
                let size = (bounds_max - bounds_min).ceil();
                let col = (i % columns) as f32;
                let row = (i / columns) as f32;
                let frame = GlyphFrame::new(col * cell.x, row * cell.y, size.x, size.y);
                (
                    rune,
                    Glyph {
                        id,
                        advance,
                        bounds_min,
                        bounds_max,
                        frame,
                    },
                )
            })
            .collect();

        Self {
            glyphs,
            size: Vec2::new(columns as f32 * cell.x, rows as f32 * cell.y),
            ascent: metrics.ascent(),
            descent: metrics.descent(),
            line_height: metrics.line_height(),
        }
    }

    /// Look up a rune
    #[must_use]
    pub fn glyph(&self, rune: char) -> Option<&Glyph> {
        self.glyphs.get(&rune)
    }

    /// Whether the layout covers `rune`
    #[must_use]
    pub fn contains(&self, rune: char) -> bool {
        self.glyphs.contains_key(&rune)
    }

    /// Iterate over covered runes, in unspecified order
    pub fn runes(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.keys().copied()
    }

    /// Number of glyphs
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether no rune could be mapped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Dimensions of the packed frames, in pixels
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Baseline to line top
    #[must_use]
    pub const fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Baseline to line bottom (negative)
    #[must_use]
    pub const fn descent(&self) -> f32 {
        self.descent
    }

    /// Baseline-to-baseline distance
    #[must_use]
    pub const fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Sum of advances for a single line of text.
    ///
    /// Runes outside the layout use the U+FFFD advance, or nothing if that
    /// is missing too.
    #[must_use]
    pub fn text_width(&self, text: &str) -> f32 {
        let fallback = self
            .glyph(char::REPLACEMENT_CHARACTER)
            .map_or(0.0, |glyph| glyph.advance);
        text.chars()
            .map(|rune| self.glyph(rune).map_or(fallback, |glyph| glyph.advance))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontOptions, Hinting};
    use crate::test_support::fixture;

    fn layout_for(options: &FontOptions) -> GlyphLayout {
        let bytes = std::fs::read(fixture("sans.ttf")).unwrap();
        let metrics = FontFace::parse(bytes, options).unwrap();
        let face = metrics.face().unwrap();
        GlyphLayout::build(&face, &metrics, &options.rune_sets)
    }

    #[test]
    fn test_ascii_set() {
        let runes = ascii();
        assert_eq!(runes.len(), 95);
        assert_eq!(runes.first(), Some(&' '));
        assert_eq!(runes.last(), Some(&'~'));
    }

    #[test]
    fn test_defaults_to_ascii() {
        let layout = layout_for(&FontOptions::default());
        for rune in ascii() {
            assert!(layout.contains(rune), "missing {rune:?}");
        }
        assert!(layout.len() >= 95);
        assert!(!layout.contains('é'));
    }

    #[test]
    fn test_custom_rune_sets_dedup_and_skip_unmapped() {
        let options = FontOptions::default()
            .with_rune_set(['A', 'B', 'A'])
            .with_rune_set(['B', 'é', '\u{10FFFD}']);
        let layout = layout_for(&options);

        assert!(layout.contains('A'));
        assert!(layout.contains('B'));
        assert!(layout.contains('é'));
        assert!(!layout.contains('\u{10FFFD}'));
        assert!(!layout.contains('z'));
        let expected = 3 + usize::from(layout.contains(char::REPLACEMENT_CHARACTER));
        assert_eq!(layout.len(), expected);
    }

    #[test]
    fn test_frames_do_not_overlap_and_fit() {
        let layout = layout_for(&FontOptions::default().with_size(16.0));
        let glyphs: Vec<&Glyph> = layout.runes().filter_map(|r| layout.glyph(r)).collect();

        for (i, a) in glyphs.iter().enumerate() {
            let (_, max) = a.frame.bounds();
            assert!(max.x <= layout.size().x && max.y <= layout.size().y);
            for b in &glyphs[i + 1..] {
                assert!(!a.frame.overlaps(&b.frame));
            }
        }

        let space = layout.glyph(' ').unwrap();
        assert!(space.frame.is_empty());
        assert!(space.advance > 0.0);
    }

    #[test]
    fn test_monospace_text_width() {
        let layout = layout_for(&FontOptions::default());
        let advance = layout.glyph('i').unwrap().advance;
        assert_eq!(layout.glyph('W').unwrap().advance, advance);
        assert!((layout.text_width("iWi") - advance * 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_full_hinting_snaps_advances() {
        let layout = layout_for(&FontOptions::default().with_size(11.0).with_hinting(Hinting::Full));
        let glyph = layout.glyph('g').unwrap();
        assert_eq!(glyph.advance.fract(), 0.0);
        assert_eq!(glyph.bounds_min.y.fract(), 0.0);
        assert!(glyph.bounds_min.y < 0.0);
    }
}
