//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use super::*;
use std::{fmt, str::FromStr};

/// Resolved extent in pixels.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct PixelSize {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl PixelSize {
    /// Creates a size.
    pub const fn new(width: f32, height: f32) -> Self { Self { width, height } }

    /// Rounds both components to whole pixels.
    pub fn aligned(&self) -> Self { Self::new(align_to_pixels(self.width), align_to_pixels(self.height)) }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "w:{} h:{}", self.width, self.height) }
}

/// Axis aligned rectangle in pixels, stored as its four edges.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct PixelRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge (exclusive).
    pub right: f32,
    /// Bottom edge (exclusive).
    pub bottom: f32,
}

impl PixelRect {
    /// Creates a rect from its edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self { Self { left, top, right, bottom } }

    /// Creates a rect at `position` with extent `size`.
    pub fn from_position_size(position: Vec2f, size: PixelSize) -> Self { Self::new(position.x, position.y, position.x + size.width, position.y + size.height) }

    /// Rect covering `(0, 0)` to `size`.
    pub fn from_size(size: PixelSize) -> Self { Self::new(0.0, 0.0, size.width, size.height) }

    /// Horizontal extent.
    pub fn width(&self) -> f32 { self.right - self.left }

    /// Vertical extent.
    pub fn height(&self) -> f32 { self.bottom - self.top }

    /// Extent of the rect.
    pub fn size(&self) -> PixelSize { PixelSize::new(self.width(), self.height()) }

    /// Top-left corner.
    pub fn position(&self) -> Vec2f { Vec2f::new(self.left, self.top) }

    /// Returns `true` when either extent is zero.
    pub fn is_empty(&self) -> bool { self.width() == 0.0 || self.height() == 0.0 }

    /// Returns the overlapping area, or an all-zero rect when the two do not overlap.
    pub fn intersection(&self, other: &PixelRect) -> PixelRect {
        if self.right > other.left && self.left < other.right && self.bottom > other.top && self.top < other.bottom {
            PixelRect::new(self.left.max(other.left), self.top.max(other.top), self.right.min(other.right), self.bottom.min(other.bottom))
        } else {
            PixelRect::default()
        }
    }

    /// Point containment; left/top edges are inside, right/bottom edges are outside.
    pub fn contains(&self, point: Vec2f) -> bool { !(self.left > point.x || self.right <= point.x || self.top > point.y || self.bottom <= point.y) }

    /// Returns the rect moved by `delta`.
    pub fn offset(&self, delta: Vec2f) -> PixelRect { PixelRect::new(self.left + delta.x, self.top + delta.y, self.right + delta.x, self.bottom + delta.y) }

    /// Returns the rect shrunk by `amount` on every edge.
    pub fn inset(&self, amount: f32) -> PixelRect { PixelRect::new(self.left + amount, self.top + amount, self.right - amount, self.bottom - amount) }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "l:{} t:{} r:{} b:{}", self.left, self.top, self.right, self.bottom) }
}

/// Rounds a coordinate to the nearest whole pixel, halves away from zero.
pub fn align_to_pixels(v: f32) -> f32 { v.round() }

/// Horizontal placement of a window inside its parent's content area.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Position is measured from the left edge.
    #[default]
    Left,
    /// Position is measured from the centred position.
    Centre,
    /// Position is measured from the right-aligned position.
    Right,
}

/// Vertical placement of a window inside its parent's content area.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum VerticalAlignment {
    /// Position is measured from the top edge.
    #[default]
    Top,
    /// Position is measured from the centred position.
    Centre,
    /// Position is measured from the bottom-aligned position.
    Bottom,
}

impl fmt::Display for HorizontalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "Left",
            Self::Centre => "Centre",
            Self::Right => "Right",
        })
    }
}

impl FromStr for HorizontalAlignment {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Left" => Ok(Self::Left),
            "Centre" => Ok(Self::Centre),
            "Right" => Ok(Self::Right),
            _ => Err(Error::InvalidRequest(format!("'{}' is not a horizontal alignment", s))),
        }
    }
}

impl fmt::Display for VerticalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "Top",
            Self::Centre => "Centre",
            Self::Bottom => "Bottom",
        })
    }
}

impl FromStr for VerticalAlignment {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Top" => Ok(Self::Top),
            "Centre" => Ok(Self::Centre),
            "Bottom" => Ok(Self::Bottom),
            _ => Err(Error::InvalidRequest(format!("'{}' is not a vertical alignment", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_and_disjoint() {
        let a = PixelRect::new(0.0, 0.0, 100.0, 100.0);
        let b = PixelRect::new(50.0, 25.0, 150.0, 75.0);
        assert_eq!(a.intersection(&b), PixelRect::new(50.0, 25.0, 100.0, 75.0));
        let c = PixelRect::new(100.0, 0.0, 200.0, 100.0);
        assert_eq!(a.intersection(&c), PixelRect::default());
        assert!(a.intersection(&c).is_empty());
    }

    #[test]
    fn containment_is_half_open() {
        let r = PixelRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Vec2f::new(10.0, 10.0)));
        assert!(r.contains(Vec2f::new(19.5, 19.5)));
        assert!(!r.contains(Vec2f::new(20.0, 15.0)));
        assert!(!r.contains(Vec2f::new(15.0, 9.9)));
    }

    #[test]
    fn pixel_alignment_rounds_half_away() {
        assert_eq!(align_to_pixels(2.5), 3.0);
        assert_eq!(align_to_pixels(-2.5), -3.0);
        assert_eq!(PixelSize::new(10.4, 10.6).aligned(), PixelSize::new(10.0, 11.0));
    }
}
