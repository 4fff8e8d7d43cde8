use crate::{
    foundation::core::{Align, PixelRect},
    foundation::error::{TesseraError, TesseraResult},
    foundation::scalar::Scalar,
};

/// Alignment of a reference point and an own point, per axis.
///
/// Written as `"<reference>@<own>"`. Each side is one letter applied to both axes (`c`) or two
/// letters for x then y (`se`), from `s`, `c`, `e`. `"c@c"` centers on the reference and
/// `"es@ss"` docks the layer's top-left corner to the reference's top-right corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlignPair {
    /// Point on the reference rectangle, `(x, y)`.
    pub reference: (Align, Align),
    /// Point on this layer's rectangle, `(x, y)`.
    pub own: (Align, Align),
}

impl AlignPair {
    /// Same alignment on both axes and both rectangles.
    pub const fn uniform(align: Align) -> Self {
        Self {
            reference: (align, align),
            own: (align, align),
        }
    }

    /// Parse the `"<reference>@<own>"` form.
    pub fn parse(code: &str) -> TesseraResult<Self> {
        let Some((reference, own)) = code.split_once('@') else {
            return Err(TesseraError::validation(format!(
                "anchor alignment must look like 'c@c' or 'se@se', got '{code}'"
            )));
        };
        Ok(Self {
            reference: parse_side(reference, code)?,
            own: parse_side(own, code)?,
        })
    }

    /// Top-left of an `own_w` x `own_h` rectangle aligned against `reference`.
    ///
    /// Points are resolved in half-pixel units and floored once at the end. Fails with a
    /// geometry error when the position leaves the `i64` range.
    pub fn place(
        self,
        reference: PixelRect,
        own_w: i64,
        own_h: i64,
    ) -> TesseraResult<(i64, i64)> {
        let (rx, ry) = self.reference;
        let (ox, oy) = self.own;
        let x = align_axis(reference.x, rx, reference.width, ox, own_w);
        let y = align_axis(reference.y, ry, reference.height, oy, own_h);
        match (x, y) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(TesseraError::geometry(format!(
                "anchor '{self}' against {reference:?} overflows the coordinate range"
            ))),
        }
    }
}

fn align_axis(origin: i64, at: Align, len: i64, own_at: Align, own_len: i64) -> Option<i64> {
    let half = origin
        .checked_mul(2)?
        .checked_add(at.half_point(len)?)?
        .checked_sub(own_at.half_point(own_len)?)?;
    Some(half.div_euclid(2))
}

fn parse_side(side: &str, code: &str) -> TesseraResult<(Align, Align)> {
    let letters: Vec<char> = side.chars().collect();
    match letters.as_slice() {
        [a] => {
            let a = Align::from_letter(*a)?;
            Ok((a, a))
        }
        [x, y] => Ok((Align::from_letter(*x)?, Align::from_letter(*y)?)),
        _ => Err(TesseraError::validation(format!(
            "anchor alignment side must be 1 or 2 letters, got '{side}' in '{code}'"
        ))),
    }
}

fn letter(a: Align) -> char {
    match a {
        Align::Start => 's',
        Align::Center => 'c',
        Align::End => 'e',
    }
}

impl std::fmt::Display for AlignPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = |(x, y): (Align, Align)| {
            if x == y {
                letter(x).to_string()
            } else {
                format!("{}{}", letter(x), letter(y))
            }
        };
        write!(f, "{}@{}", side(self.reference), side(self.own))
    }
}

impl TryFrom<String> for AlignPair {
    type Error = TesseraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AlignPair> for String {
    fn from(value: AlignPair) -> Self {
        value.to_string()
    }
}

/// Where a layer goes on the canvas.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Anchor {
    /// Top-left corner at a fixed canvas coordinate.
    Absolute {
        /// Canvas x.
        #[serde(deserialize_with = "coordinate")]
        x: i64,
        /// Canvas y.
        #[serde(deserialize_with = "coordinate")]
        y: i64,
    },
    /// Aligned against an earlier layer, then shifted by (`dx`, `dy`).
    Relative {
        /// Id of a layer placed earlier.
        #[serde(rename = "ref")]
        reference: String,
        /// Reference point and own point.
        align: AlignPair,
        /// Extra horizontal offset.
        #[serde(default, deserialize_with = "coordinate")]
        dx: i64,
        /// Extra vertical offset.
        #[serde(default, deserialize_with = "coordinate")]
        dy: i64,
    },
}

/// Anchor coordinates take any [`Scalar`] form and truncate toward zero.
fn coordinate<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <Scalar as serde::Deserialize>::deserialize(deserializer)?;
    value
        .to_int_truncated("gfx:composite", "anchor coordinate")
        .map_err(serde::de::Error::custom)
}

impl Anchor {
    /// Absolute anchor at (`x`, `y`).
    pub fn absolute(x: i64, y: i64) -> Self {
        Self::Absolute { x, y }
    }

    /// Relative anchor with alignment code `align` (see [`AlignPair::parse`]).
    pub fn relative(
        reference: impl Into<String>,
        align: &str,
        dx: i64,
        dy: i64,
    ) -> TesseraResult<Self> {
        Ok(Self::Relative {
            reference: reference.into(),
            align: AlignPair::parse(align)?,
            dx,
            dy,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/anchor.rs"]
mod tests;
