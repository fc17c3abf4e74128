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
use std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
    str::FromStr,
};

/// Resolution independent coordinate made of a relative and an absolute part.
///
/// A `UDim` resolves to `scale * base + offset` pixels once the base dimension is known.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct UDim {
    /// Fraction of the base dimension.
    pub scale: f32,
    /// Absolute pixel offset.
    pub offset: f32,
}

impl UDim {
    /// Creates a coordinate from its two components.
    pub const fn new(scale: f32, offset: f32) -> Self { Self { scale, offset } }

    /// A coordinate resolving to zero for every base.
    pub const fn zero() -> Self { Self::new(0.0, 0.0) }

    /// A purely proportional coordinate.
    pub const fn relative(scale: f32) -> Self { Self::new(scale, 0.0) }

    /// A purely absolute coordinate.
    pub const fn absolute(offset: f32) -> Self { Self::new(0.0, offset) }

    /// Resolves the coordinate against `base` pixels.
    pub fn to_pixels(&self, base: f32) -> f32 { self.scale * base + self.offset }

    /// Component-wise linear interpolation towards `other`.
    pub fn lerp(&self, other: &UDim, t: f32) -> UDim {
        UDim::new(self.scale + (other.scale - self.scale) * t, self.offset + (other.offset - self.offset) * t)
    }
}

impl Add for UDim {
    type Output = UDim;
    fn add(self, rhs: UDim) -> UDim { UDim::new(self.scale + rhs.scale, self.offset + rhs.offset) }
}

impl Sub for UDim {
    type Output = UDim;
    fn sub(self, rhs: UDim) -> UDim { UDim::new(self.scale - rhs.scale, self.offset - rhs.offset) }
}

impl Mul<f32> for UDim {
    type Output = UDim;
    fn mul(self, rhs: f32) -> UDim { UDim::new(self.scale * rhs, self.offset * rhs) }
}

impl Neg for UDim {
    type Output = UDim;
    fn neg(self) -> UDim { UDim::new(-self.scale, -self.offset) }
}

impl fmt::Display for UDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{{{},{}}}", self.scale, self.offset) }
}

impl FromStr for UDim {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let v = parse_components::<2>(s)?;
        Ok(UDim::new(v[0], v[1]))
    }
}

/// Pair of scaled coordinates describing a position.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct UVector2 {
    /// Horizontal component.
    pub x: UDim,
    /// Vertical component.
    pub y: UDim,
}

impl UVector2 {
    /// Creates a vector from its components.
    pub const fn new(x: UDim, y: UDim) -> Self { Self { x, y } }

    /// A vector resolving to the origin.
    pub const fn zero() -> Self { Self::new(UDim::zero(), UDim::zero()) }

    /// Resolves both axes against `base`.
    pub fn to_pixels(&self, base: PixelSize) -> Vec2f { Vec2f::new(self.x.to_pixels(base.width), self.y.to_pixels(base.height)) }

    /// Component-wise interpolation.
    pub fn lerp(&self, other: &UVector2, t: f32) -> UVector2 { UVector2::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t)) }
}

impl Add for UVector2 {
    type Output = UVector2;
    fn add(self, rhs: UVector2) -> UVector2 { UVector2::new(self.x + rhs.x, self.y + rhs.y) }
}

impl Sub for UVector2 {
    type Output = UVector2;
    fn sub(self, rhs: UVector2) -> UVector2 { UVector2::new(self.x - rhs.x, self.y - rhs.y) }
}

impl Mul<f32> for UVector2 {
    type Output = UVector2;
    fn mul(self, rhs: f32) -> UVector2 { UVector2::new(self.x * rhs, self.y * rhs) }
}

impl From<USize> for UVector2 {
    fn from(size: USize) -> Self { UVector2::new(size.width, size.height) }
}

impl fmt::Display for UVector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{{{},{}}}", self.x, self.y) }
}

impl FromStr for UVector2 {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let v = parse_components::<4>(s)?;
        Ok(UVector2::new(UDim::new(v[0], v[1]), UDim::new(v[2], v[3])))
    }
}

/// Pair of scaled coordinates describing an extent.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct USize {
    /// Horizontal extent.
    pub width: UDim,
    /// Vertical extent.
    pub height: UDim,
}

impl USize {
    /// Creates a size from its components.
    pub const fn new(width: UDim, height: UDim) -> Self { Self { width, height } }

    /// Size resolving to nothing.
    pub const fn zero() -> Self { Self::new(UDim::zero(), UDim::zero()) }

    /// Resolves both axes against `base`.
    pub fn to_pixels(&self, base: PixelSize) -> PixelSize { PixelSize::new(self.width.to_pixels(base.width), self.height.to_pixels(base.height)) }
}

impl Add for USize {
    type Output = USize;
    fn add(self, rhs: USize) -> USize { USize::new(self.width + rhs.width, self.height + rhs.height) }
}

impl Sub for USize {
    type Output = USize;
    fn sub(self, rhs: USize) -> USize { USize::new(self.width - rhs.width, self.height - rhs.height) }
}

impl From<UVector2> for USize {
    fn from(v: UVector2) -> Self { USize::new(v.x, v.y) }
}

impl fmt::Display for USize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{{{},{}}}", self.width, self.height) }
}

impl FromStr for USize {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> { Ok(USize::from(s.parse::<UVector2>()?)) }
}

/// Scaled rectangle, stored as two corners.
///
/// `max` is not kept above `min`; callers that need a normalized rect resolve it first.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct URect {
    /// Top-left corner.
    pub min: UVector2,
    /// Bottom-right corner.
    pub max: UVector2,
}

impl URect {
    /// Creates a rect from its corners.
    pub const fn new(min: UVector2, max: UVector2) -> Self { Self { min, max } }

    /// Creates a rect from scale/offset pairs for left, top, right and bottom.
    pub const fn from_parts(left: UDim, top: UDim, right: UDim, bottom: UDim) -> Self { Self::new(UVector2::new(left, top), UVector2::new(right, bottom)) }

    /// Creates a rect from a position and a size.
    pub fn from_position_size(position: UVector2, size: USize) -> Self { Self::new(position, position + UVector2::from(size)) }

    /// Top-left corner.
    pub fn position(&self) -> UVector2 { self.min }

    /// Extent of the rect.
    pub fn size(&self) -> USize { USize::from(self.max - self.min) }

    /// Moves the rect, keeping its size.
    pub fn set_position(&mut self, position: UVector2) {
        let size = self.size();
        self.min = position;
        self.max = position + UVector2::from(size);
    }

    /// Changes the extent, keeping the top-left corner.
    pub fn set_size(&mut self, size: USize) { self.max = self.min + UVector2::from(size); }

    /// Resolves the rect against `base`.
    pub fn to_pixels(&self, base: PixelSize) -> PixelRect {
        let min = self.min.to_pixels(base);
        let max = self.max.to_pixels(base);
        PixelRect::new(min.x, min.y, max.x, max.y)
    }
}

impl fmt::Display for URect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{{{},{},{},{}}}", self.min.x, self.min.y, self.max.x, self.max.y) }
}

impl FromStr for URect {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let v = parse_components::<8>(s)?;
        Ok(URect::from_parts(UDim::new(v[0], v[1]), UDim::new(v[2], v[3]), UDim::new(v[4], v[5]), UDim::new(v[6], v[7])))
    }
}

fn parse_components<const N: usize>(s: &str) -> Result<[f32; N]> {
    let cleaned: String = s.chars().filter(|c| !matches!(c, '{' | '}') && !c.is_whitespace()).collect();
    let mut out = [0.0; N];
    let mut count = 0;
    for part in cleaned.split(',') {
        if count == N {
            return Err(Error::InvalidRequest(format!("too many components in '{}'", s)));
        }
        out[count] = part.parse::<f32>().map_err(|_| Error::InvalidRequest(format!("'{}' is not a number in '{}'", part, s)))?;
        count += 1;
    }
    if count != N {
        return Err(Error::InvalidRequest(format!("expected {} components in '{}'", N, s)));
    }
    Ok(out)
}
