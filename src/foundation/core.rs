use crate::foundation::error::{TesseraError, TesseraResult};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Build a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels in `[r, g, b, a]` order.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Validate four integer components, rejecting anything outside `0..=255`.
    ///
    /// `op` names the calling operation for diagnostics.
    pub fn from_components(op: &str, components: &[i64]) -> TesseraResult<Self> {
        let [r, g, b, a] = components else {
            return Err(TesseraError::validation(format!(
                "{op}: color must have exactly 4 RGBA components, got {}",
                components.len()
            )));
        };
        let channel = |v: i64| {
            u8::try_from(v).map_err(|_| {
                TesseraError::validation(format!(
                    "{op}: color values must be integers in 0-255, got {components:?}"
                ))
            })
        };
        Ok(Self::new(channel(*r)?, channel(*g)?, channel(*b)?, channel(*a)?))
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl TryFrom<serde_json::Value> for Rgba8 {
    type Error = TesseraError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Array(items) = value else {
            return Err(TesseraError::validation(format!(
                "color must be an array of 4 integers, got {value}"
            )));
        };
        let mut components = Vec::with_capacity(items.len());
        for item in &items {
            let v = item.as_i64().ok_or_else(|| {
                TesseraError::validation(format!("color values must be integers, got {item}"))
            })?;
            components.push(v);
        }
        Self::from_components("color", &components)
    }
}

/// Position along one axis: leading edge, midpoint or trailing edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left or top edge.
    #[serde(alias = "s")]
    Start,
    /// Midpoint.
    #[serde(alias = "c")]
    Center,
    /// Right or bottom edge.
    #[serde(alias = "e")]
    End,
}

impl Align {
    /// Parse a single alignment code: `s`/`start`, `c`/`center`, `e`/`end`.
    pub fn parse(code: &str) -> TesseraResult<Self> {
        match code {
            "s" | "start" => Ok(Self::Start),
            "c" | "center" => Ok(Self::Center),
            "e" | "end" => Ok(Self::End),
            other => Err(TesseraError::validation(format!(
                "alignment must be one of s, c, e (start, center, end), got '{other}'"
            ))),
        }
    }

    /// Parse a one-letter code (`s`, `c`, `e`).
    pub fn from_letter(letter: char) -> TesseraResult<Self> {
        match letter {
            's' => Ok(Self::Start),
            'c' => Ok(Self::Center),
            'e' => Ok(Self::End),
            other => Err(TesseraError::validation(format!(
                "alignment letter must be one of s, c, e, got '{other}'"
            ))),
        }
    }

    /// Offset of `content` inside `container` along one axis; centering floors.
    pub fn offset(self, container: i64, content: i64) -> i64 {
        match self {
            Self::Start => 0,
            Self::Center => (container - content).div_euclid(2),
            Self::End => container - content,
        }
    }

    /// Point on a span of length `len`, in half-pixel units. `None` on overflow.
    pub(crate) fn half_point(self, len: i64) -> Option<i64> {
        match self {
            Self::Start => Some(0),
            Self::Center => Some(len),
            Self::End => len.checked_mul(2),
        }
    }
}

/// Integer rectangle in canvas space (top-left origin, y down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Width in pixels.
    pub width: i64,
    /// Height in pixels.
    pub height: i64,
}

impl PixelRect {
    /// Build a rectangle from its top-left corner and size.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge, saturating at `i64::MAX`.
    pub fn right(self) -> i64 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `i64::MAX`.
    pub fn bottom(self) -> i64 {
        self.y.saturating_add(self.height)
    }

    /// Overlap with `other`, or `None` when they do not intersect.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self::new(x0, y0, x1 - x0, y1 - y0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
