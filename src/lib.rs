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
#![warn(missing_docs)]
//! `wintree` is the retained-mode window hierarchy core of a GUI toolkit.
//!
//! Windows live in an arena owned by a [`GuiContext`]. The context resolves scaled
//! coordinates into pixel rectangles, keeps the z-ordered draw lists, runs the
//! activation and capture state machines, bubbles input events from leaf to root
//! and walks the tree into [`GeometryBuffer`]s supplied by an embedding [`Renderer`].

mod behavior;
mod context;
mod error;
mod event;
mod input;
mod look;
mod manager;
mod properties;
mod rect;
mod render;
mod resources;
mod surface;
mod text;
mod udim;
mod window;
mod xml;

#[cfg(test)]
mod test_support;

pub use behavior::*;
pub use context::*;
pub use error::*;
pub use event::*;
pub use input::*;
pub use look::*;
pub use manager::*;
pub use properties::PropertyInfo;
pub use rect::*;
pub use render::*;
pub use resources::*;
pub use rs_math3d::{Color4b, Vec2f, Vec3f, color4b};
pub use surface::*;
pub use text::*;
pub use udim::*;
pub use window::*;
pub use xml::*;

use bitflags::*;
use log::{debug, error, info, warn};
