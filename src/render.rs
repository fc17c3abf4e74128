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
use std::sync::{Arc, RwLock};

#[derive(Default, Copy, Clone)]
#[repr(C)]
/// Vertex appended to a geometry buffer, in window-local pixels.
pub struct Vertex {
    pos: Vec2f,
    tex: Vec2f,
    color: Color4b,
}

impl Vertex {
    /// Creates a vertex with the provided position, texture coordinate, and color.
    pub fn new(pos: Vec2f, tex: Vec2f, color: Color4b) -> Self { Self { pos, tex, color } }

    /// Returns the vertex position.
    pub fn position(&self) -> Vec2f { self.pos }

    /// Returns the texture coordinates associated with the vertex.
    pub fn tex_coord(&self) -> Vec2f { self.tex }

    /// Returns the vertex color.
    pub fn color(&self) -> Color4b { self.color }
}

/// Builds the two triangles covering `rect`, with texture coordinates spanning `uv`.
pub fn quad_vertices(rect: PixelRect, uv: PixelRect, color: Color4b) -> [Vertex; 6] {
    let v = |x: f32, y: f32, u: f32, w: f32| Vertex::new(Vec2f::new(x, y), Vec2f::new(u, w), color);
    [
        v(rect.left, rect.top, uv.left, uv.top),
        v(rect.left, rect.bottom, uv.left, uv.bottom),
        v(rect.right, rect.bottom, uv.right, uv.bottom),
        v(rect.right, rect.bottom, uv.right, uv.bottom),
        v(rect.right, rect.top, uv.right, uv.top),
        v(rect.left, rect.top, uv.left, uv.top),
    ]
}

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// Identifier of a renderer-owned texture.
pub struct TextureId(pub u32);

/// Cached geometry owned by a window or a rendering window.
pub trait GeometryBuffer {
    /// Drops all buffered vertices.
    fn reset(&mut self);
    /// Appends vertices using the current texture.
    fn append_vertices(&mut self, vertices: &[Vertex]);
    /// Selects the texture used by subsequently appended vertices.
    fn set_active_texture(&mut self, texture: Option<TextureId>);
    /// Sets the clip region, in target pixels.
    fn set_clipping_region(&mut self, region: PixelRect);
    /// Sets the translation applied when drawing.
    fn set_translation(&mut self, translation: Vec3f);
    /// Sets the opacity applied when drawing.
    fn set_alpha(&mut self, alpha: f32);
    /// Number of buffered vertices.
    fn vertex_count(&self) -> usize;
    /// Draws the buffered geometry into the active render target.
    fn draw(&self);
}

/// Something geometry can be drawn into.
pub trait RenderTarget {
    /// Makes the target current for subsequent draws.
    fn activate(&mut self);
    /// Restores the previous target.
    fn deactivate(&mut self);
}

/// Off-screen render target backed by a texture.
pub trait TextureTarget: RenderTarget {
    /// Clears the texture content.
    fn clear(&mut self);
    /// Ensures the backing texture can hold `size` pixels.
    fn declare_render_size(&mut self, size: PixelSize);
    /// Texture that receives the rendered content.
    fn texture(&self) -> TextureId;
    /// Returns `true` when the texture is stored upside down.
    fn is_rendering_inverted(&self) -> bool { false }
}

/// Rendering backend consumed by the window tree.
pub trait Renderer {
    /// Creates an empty geometry buffer.
    fn create_geometry_buffer(&mut self) -> Box<dyn GeometryBuffer>;
    /// Releases a geometry buffer created by this renderer.
    fn destroy_geometry_buffer(&mut self, buffer: Box<dyn GeometryBuffer>);
    /// Creates a texture target, or `None` when off-screen rendering is unsupported.
    fn create_texture_target(&mut self) -> Option<Box<dyn TextureTarget>>;
    /// Releases a texture target created by this renderer.
    fn destroy_texture_target(&mut self, target: Box<dyn TextureTarget>);
    /// The default target, used by the root surface.
    fn default_target(&mut self) -> &mut dyn RenderTarget;
    /// Size of the display in pixels.
    fn display_size(&self) -> PixelSize;
}

/// Shared handle to a [`Renderer`].
pub struct RendererHandle {
    handle: Arc<RwLock<dyn Renderer>>,
}

// seems there's a bug in #[derive(Clone)] as it's unable to induce that Arc is sufficient
impl Clone for RendererHandle {
    fn clone(&self) -> Self { Self { handle: self.handle.clone() } }
}

impl RendererHandle {
    /// Wraps a renderer inside an [`Arc<RwLock<...>>`] so it can be shared.
    pub fn new<R: Renderer + 'static>(renderer: R) -> Self { Self { handle: Arc::new(RwLock::new(renderer)) } }

    /// Executes the provided closure with a shared reference to the renderer.
    pub fn scope<Res, F: FnOnce(&dyn Renderer) -> Res>(&self, f: F) -> Res {
        match self.handle.read() {
            Ok(guard) => f(&*guard),
            // a panicking draw call must not take the whole tree down with it
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    /// Executes the provided closure with a mutable reference to the renderer.
    pub fn scope_mut<Res, F: FnOnce(&mut dyn Renderer) -> Res>(&mut self, f: F) -> Res {
        match self.handle.write() {
            Ok(mut guard) => f(&mut *guard),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn handle_shares_one_renderer() {
        let log = RenderLog::default();
        let mut a = RendererHandle::new(MockRenderer::new(log.clone(), PixelSize::new(640.0, 480.0)));
        let b = a.clone();
        let buffer = a.scope_mut(|r| r.create_geometry_buffer());
        assert_eq!(b.scope(|r| r.display_size()), PixelSize::new(640.0, 480.0));
        a.scope_mut(|r| r.destroy_geometry_buffer(buffer));
        assert_eq!(log.count("create_buffer"), 1);
        assert_eq!(log.count("destroy_buffer"), 1);
    }

    #[test]
    fn quad_covers_rect() {
        let q = quad_vertices(PixelRect::new(1.0, 2.0, 3.0, 4.0), PixelRect::new(0.0, 0.0, 1.0, 1.0), color4b(255, 255, 255, 255));
        assert_eq!(q[0].position().x, 1.0);
        assert_eq!(q[2].position().y, 4.0);
        assert_eq!(q[4].tex_coord().x, 1.0);
    }
}
