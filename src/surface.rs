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
//! Rendering surfaces: the context's root surface and texture-backed rendering windows.
use super::*;
use slotmap::new_key_type;
use std::collections::BTreeMap;

new_key_type! {
    /// Handle of a rendering surface inside its context.
    pub struct SurfaceId;
}

/// Queues are drawn in ascending order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderQueueId {
    /// Drawn before everything else.
    Underlay,
    /// Normal window content.
    Base,
    /// Drawn after everything else.
    Overlay,
}

/// Geometry queued on a surface. Buffers stay owned by their window or rendering window.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QueuedGeometry {
    /// The geometry buffer of a window.
    Window(WindowId),
    /// The textured quad of a rendering window.
    Surface(SurfaceId),
}

/// A texture target composited into its owner surface as a textured quad.
pub struct RenderingWindow {
    pub(crate) target: Box<dyn TextureTarget>,
    pub(crate) geometry: Box<dyn GeometryBuffer>,
    pub(crate) owner: SurfaceId,
    pub(crate) window: WindowId,
    pub(crate) position: Vec2f,
    pub(crate) size: PixelSize,
    pub(crate) clip: PixelRect,
    pub(crate) geometry_valid: bool,
}

impl RenderingWindow {
    /// Surface this rendering window draws into.
    pub fn owner(&self) -> SurfaceId { self.owner }
    /// Window whose content fills the texture.
    pub fn window(&self) -> WindowId { self.window }
    /// Position inside the owner surface.
    pub fn position(&self) -> Vec2f { self.position }
    /// Texture size.
    pub fn size(&self) -> PixelSize { self.size }
    /// Clip region inside the owner surface.
    pub fn clipping_region(&self) -> PixelRect { self.clip }

    fn realise_geometry(&mut self) {
        let area = PixelRect::from_size(self.size);
        let uv = if self.target.is_rendering_inverted() { PixelRect::new(0.0, 1.0, 1.0, 0.0) } else { PixelRect::new(0.0, 0.0, 1.0, 1.0) };
        self.geometry.reset();
        self.geometry.set_active_texture(Some(self.target.texture()));
        self.geometry.append_vertices(&quad_vertices(area, uv, color4b(255, 255, 255, 255)));
        self.geometry.set_translation(Vec3f::new(self.position.x, self.position.y, 0.0));
        self.geometry.set_clipping_region(self.clip);
        self.geometry_valid = true;
    }
}

pub(crate) enum SurfaceKind {
    Root,
    Window(RenderingWindow),
}

/// Collects geometry in render queues and draws it into a target.
pub struct RenderingSurface {
    pub(crate) kind: SurfaceKind,
    pub(crate) queues: BTreeMap<RenderQueueId, Vec<QueuedGeometry>>,
    pub(crate) windows: Vec<SurfaceId>,
    pub(crate) invalidated: bool,
}

impl RenderingSurface {
    pub(crate) fn root() -> Self { Self { kind: SurfaceKind::Root, queues: BTreeMap::new(), windows: Vec::new(), invalidated: true } }

    /// Returns `true` for a texture-backed rendering window.
    pub fn is_rendering_window(&self) -> bool { matches!(self.kind, SurfaceKind::Window(_)) }

    /// The rendering window, for texture-backed surfaces.
    pub fn rendering_window(&self) -> Option<&RenderingWindow> {
        match &self.kind {
            SurfaceKind::Window(rw) => Some(rw),
            SurfaceKind::Root => None,
        }
    }

    fn rendering_window_mut(&mut self) -> Option<&mut RenderingWindow> {
        match &mut self.kind {
            SurfaceKind::Window(rw) => Some(rw),
            SurfaceKind::Root => None,
        }
    }

    /// Queues `geometry` on `queue`.
    pub fn add_geometry(&mut self, queue: RenderQueueId, geometry: QueuedGeometry) { self.queues.entry(queue).or_default().push(geometry) }

    /// Empties every queue.
    pub fn clear_geometry(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear();
        }
    }

    /// Geometry queued on `queue`.
    pub fn queued(&self, queue: RenderQueueId) -> &[QueuedGeometry] { self.queues.get(&queue).map(|q| q.as_slice()).unwrap_or(&[]) }

    /// Returns `true` if the content must be redrawn.
    pub fn is_invalidated(&self) -> bool { self.invalidated }

    /// Rendering windows drawing into this surface.
    pub fn rendering_windows(&self) -> &[SurfaceId] { &self.windows }
}

impl GuiContext {
    /// Surface the root window draws into.
    pub fn root_surface(&self) -> SurfaceId { self.root_surface }

    /// Looks a surface up.
    pub fn surface(&self, surface: SurfaceId) -> Option<&RenderingSurface> { self.surfaces.get(surface) }

    /// Marks `surface` for redraw, cascading to the surfaces it draws into.
    pub(crate) fn invalidate_surface(&mut self, surface: SurfaceId) {
        let mut current = Some(surface);
        while let Some(id) = current {
            let Some(s) = self.surfaces.get_mut(id) else { return };
            s.invalidated = true;
            current = match &mut s.kind {
                SurfaceKind::Window(rw) => {
                    rw.target.clear();
                    Some(rw.owner)
                }
                SurfaceKind::Root => {
                    self.dirty = true;
                    None
                }
            };
        }
    }

    /// Creates a rendering window drawing into `owner`.
    pub(crate) fn create_rendering_window(&mut self, owner: SurfaceId, window: WindowId, target: Box<dyn TextureTarget>, geometry: Box<dyn GeometryBuffer>) -> SurfaceId {
        let rw = RenderingWindow { target, geometry, owner, window, position: Vec2f::default(), size: PixelSize::default(), clip: PixelRect::default(), geometry_valid: false };
        let id = self.surfaces.insert(RenderingSurface { kind: SurfaceKind::Window(rw), queues: BTreeMap::new(), windows: Vec::new(), invalidated: true });
        if let Some(o) = self.surfaces.get_mut(owner) {
            o.windows.push(id);
        }
        id
    }

    /// Removes a rendering window and hands back its target and geometry for destruction.
    pub(crate) fn destroy_rendering_window(&mut self, surface: SurfaceId) -> Option<(Box<dyn TextureTarget>, Box<dyn GeometryBuffer>)> {
        let removed = self.surfaces.remove(surface)?;
        let SurfaceKind::Window(rw) = removed.kind else { return None };
        if let Some(o) = self.surfaces.get_mut(rw.owner) {
            o.windows.retain(|w| *w != surface);
        }
        Some((rw.target, rw.geometry))
    }

    /// Re-parents a rendering window onto `new_owner`.
    pub(crate) fn transfer_rendering_window(&mut self, new_owner: SurfaceId, surface: SurfaceId) {
        if new_owner == surface {
            return;
        }
        let old_owner = match self.surfaces.get_mut(surface).and_then(|s| s.rendering_window_mut()) {
            Some(rw) if rw.owner != new_owner => {
                let old = rw.owner;
                rw.owner = new_owner;
                old
            }
            _ => return,
        };
        if let Some(o) = self.surfaces.get_mut(old_owner) {
            o.windows.retain(|w| *w != surface);
        }
        if let Some(o) = self.surfaces.get_mut(new_owner) {
            o.windows.push(surface);
        }
    }

    pub(crate) fn resize_rendering_window(&mut self, surface: SurfaceId, size: PixelSize) {
        if let Some(rw) = self.surfaces.get_mut(surface).and_then(|s| s.rendering_window_mut()) {
            if rw.size != size {
                rw.size = size;
                rw.target.declare_render_size(size);
                rw.geometry_valid = false;
            }
        }
    }

    pub(crate) fn place_rendering_window(&mut self, surface: SurfaceId, position: Vec2f, clip: PixelRect) {
        if let Some(rw) = self.surfaces.get_mut(surface).and_then(|s| s.rendering_window_mut()) {
            rw.position = position;
            rw.clip = clip;
            rw.geometry_valid = false;
        }
    }

    /// Draws the queued content of `surface`. A rendering window redraws its texture only while
    /// invalidated, then queues its quad on the owner.
    pub(crate) fn draw_surface(&mut self, surface: SurfaceId) {
        let is_root = match self.surfaces.get(surface) {
            Some(s) => !s.is_rendering_window(),
            None => return,
        };
        if is_root {
            self.renderer.scope_mut(|r| r.default_target().activate());
            self.draw_queues(surface);
            self.renderer.scope_mut(|r| r.default_target().deactivate());
            return;
        }

        let Some(s) = self.surfaces.get_mut(surface) else { return };
        let invalidated = s.invalidated;
        let Some(rw) = s.rendering_window_mut() else { return };
        if !rw.geometry_valid {
            rw.realise_geometry();
        }
        if invalidated {
            rw.target.activate();
            rw.target.clear();
            self.draw_queues(surface);
            if let Some(s) = self.surfaces.get_mut(surface) {
                s.invalidated = false;
                if let Some(rw) = s.rendering_window_mut() {
                    rw.target.deactivate();
                }
            }
        }

        let owner = self.surfaces.get(surface).and_then(|s| s.rendering_window()).map(|rw| rw.owner);
        if let Some(o) = owner.and_then(|o| self.surfaces.get_mut(o)) {
            o.add_geometry(RenderQueueId::Base, QueuedGeometry::Surface(surface));
        }
    }

    fn draw_queues(&self, surface: SurfaceId) {
        let Some(s) = self.surfaces.get(surface) else { return };
        for queue in s.queues.values() {
            for item in queue {
                match item {
                    QueuedGeometry::Window(w) => {
                        if let Some(geometry) = self.manager.get(*w).and_then(|w| w.geometry.as_ref()) {
                            geometry.draw();
                        }
                    }
                    QueuedGeometry::Surface(rw) => {
                        if let Some(rw) = self.surfaces.get(*rw).and_then(|s| s.rendering_window()) {
                            rw.geometry.draw();
                        }
                    }
                }
            }
        }
    }
}
