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
use std::{collections::BTreeMap, rc::Rc};

/// Named resources of one kind. Handles are shared, so a resource outlives its undefinition
/// for holders that already fetched it.
pub struct ResourceRegistry<T> {
    kind: &'static str,
    items: BTreeMap<String, Rc<T>>,
}

impl<T> ResourceRegistry<T> {
    /// Creates an empty registry; `kind` names the resource in error messages.
    pub fn new(kind: &'static str) -> Self { Self { kind, items: BTreeMap::new() } }

    /// Registers `value` under `name`.
    pub fn define(&mut self, name: &str, value: T) -> Result<Rc<T>> {
        if self.items.contains_key(name) {
            return Err(Error::AlreadyExists(format!("{} '{}'", self.kind, name)));
        }
        let value = Rc::new(value);
        self.items.insert(name.to_string(), value.clone());
        Ok(value)
    }

    /// Returns `true` if `name` is registered.
    pub fn is_defined(&self, name: &str) -> bool { self.items.contains_key(name) }

    /// Looks `name` up.
    pub fn get(&self, name: &str) -> Result<Rc<T>> {
        self.items.get(name).cloned().ok_or_else(|| Error::UnknownObject(format!("{} '{}' is not defined", self.kind, name)))
    }

    /// Removes `name`; returns `false` if it was not registered.
    pub fn undefine(&mut self, name: &str) -> bool { self.items.remove(name).is_some() }

    /// First registered entry in name order.
    pub fn first(&self) -> Option<(&str, Rc<T>)> { self.items.iter().next().map(|(k, v)| (k.as_str(), v.clone())) }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> { self.items.keys().map(|k| k.as_str()) }
}

/// Fixed-advance font metrics; enough to size text-driven windows.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Distance between baselines.
    pub line_spacing: f32,
    /// Horizontal advance of one glyph.
    pub advance: f32,
}

impl Font {
    /// Creates font metrics.
    pub fn new(line_spacing: f32, advance: f32) -> Self { Self { line_spacing, advance } }

    /// Pixel width of the longest line of `text`.
    pub fn text_extent(&self, text: &str) -> f32 { text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f32 * self.advance }

    /// Pixel height of `text`.
    pub fn text_height(&self, text: &str) -> f32 { text.lines().count().max(1) as f32 * self.line_spacing }
}

/// Sub-area of a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Texture holding the pixels.
    pub texture: TextureId,
    /// Area of the texture, in texture pixels.
    pub area: PixelRect,
}
