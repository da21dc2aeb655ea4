//! Colors of scene actors.
//!
//! Actor colors are opaque RGB triples with `f32` components in `[0.0, 1.0]`;
//! transparency is a separate actor attribute (its opacity).
//!
//! # Example
//! ```
//! # use lightfield::color::{self, Color};
//! let torso = color::BLUE;
//! let clamped = color::clamp(Color::new(1.5, -0.2, 0.5));
//! assert_eq!(clamped, Color::new(1.0, 0.0, 0.5));
//! # let _ = torso;
//! ```

pub use rgb::Rgb;

/// The color type used by scene actors. RGB with f32 components in [0.0, 1.0].
pub type Color = Rgb<f32>;

// ============================================================================
// Basic Colors
// ============================================================================

/// <div style="margin:2px 0"><span style="background-color:rgb(0, 0, 0);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Black (0, 0, 0)</div>
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 255, 255);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>White (255, 255, 255), the default actor color</div>
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 0, 0);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Red (255, 0, 0)</div>
pub const RED: Color = Color::new(1.0, 0.0, 0.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(0, 255, 0);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Green (0, 255, 0)</div>
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(0, 0, 255);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Blue (0, 0, 255)</div>
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 255, 0);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Yellow (255, 255, 0)</div>
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(0, 255, 255);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Cyan (0, 255, 255)</div>
pub const CYAN: Color = Color::new(0.0, 1.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 0, 255);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Magenta (255, 0, 255)</div>
pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(204, 204, 204);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Light gray (204, 204, 204)</div>
pub const LIGHT_GRAY: Color = Color::new(0.8, 0.8, 0.8);

/// <div style="margin:2px 0"><span style="background-color:rgb(128, 128, 128);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Gray (128, 128, 128)</div>
pub const GRAY: Color = Color::new(0.5019608, 0.5019608, 0.5019608);

// ============================================================================
// Helpers
// ============================================================================

/// Clamps every component of `color` into `[0.0, 1.0]`.
///
/// NaN components are mapped to `0.0`.
#[inline]
pub fn clamp(color: Color) -> Color {
    Color::new(clamp_unit(color.r), clamp_unit(color.g), clamp_unit(color.b))
}

/// Builds a color from an `[r, g, b]` array, as sent by remote callers.
#[inline]
pub fn from_array(rgb: [f32; 3]) -> Color {
    Color::new(rgb[0], rgb[1], rgb[2])
}

#[inline]
pub(crate) fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_keeps_valid_colors() {
        assert_eq!(clamp(LIGHT_GRAY), LIGHT_GRAY);
        assert_eq!(clamp(WHITE), WHITE);
    }

    #[test]
    fn test_clamp_out_of_range_components() {
        let c = clamp(Color::new(2.0, -1.0, f32::NAN));
        assert_eq!(c, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_array() {
        assert_eq!(from_array([0.0, 0.0, 1.0]), BLUE);
    }
}
