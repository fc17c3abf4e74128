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

/// Where a window's geometry goes: the surface, the window owning it, and that window's
/// screen offset.
#[derive(Debug, Copy, Clone)]
pub struct RenderingContext {
    /// Surface receiving the geometry.
    pub surface: SurfaceId,
    /// Window owning the surface; `None` for the root surface.
    pub owner: Option<WindowId>,
    /// Screen position of the surface origin.
    pub offset: Vec2f,
    /// Queue the geometry is added to.
    pub queue: RenderQueueId,
}

impl GuiContext {
    /// Own surface if any, else the parent's context, else the root surface.
    pub fn rendering_context(&self, window: WindowId) -> RenderingContext {
        match self.manager.get(window) {
            Some(w) => match (w.surface, w.parent) {
                (Some(surface), _) => RenderingContext { surface, owner: Some(window), offset: self.unclipped_outer_rect(window).position(), queue: RenderQueueId::Base },
                (None, Some(parent)) => self.rendering_context(parent),
                (None, None) => self.root_rendering_context(),
            },
            None => self.root_rendering_context(),
        }
    }

    fn root_rendering_context(&self) -> RenderingContext {
        RenderingContext { surface: self.root_surface, owner: None, offset: Vec2f::default(), queue: RenderQueueId::Base }
    }

    /// Places the geometry buffer (or the owned rendering window) and sets its clip.
    pub(crate) fn update_geometry_render_settings(&mut self, window: WindowId) {
        let Some(w) = self.manager.get(window) else { return };
        let parent = w.parent;
        let non_client = w.is_non_client();
        let clipped = w.is_clipped_by_parent();
        let pixel_size = w.pixel_size;
        let ctx = self.rendering_context(window);
        let outer = self.unclipped_outer_rect(window);
        let own_rw = ctx.owner == Some(window) && self.surfaces.get(ctx.surface).map(|s| s.is_rendering_window()).unwrap_or(false);

        if own_rw {
            let parent_offset = parent.map(|p| self.rendering_context(p).offset).unwrap_or_default();
            let screen = PixelRect::from_size(self.surface_size);
            let clip = match parent {
                Some(p) if clipped => self.clip_rect(p, non_client),
                _ => screen,
            };
            let position = Vec2f::new(outer.left - parent_offset.x, outer.top - parent_offset.y);
            self.place_rendering_window(ctx.surface, position, clip.offset(Vec2f::new(-parent_offset.x, -parent_offset.y)));
            if let Some(geometry) = self.manager.get_mut(window).and_then(|w| w.geometry.as_mut()) {
                geometry.set_translation(Vec3f::new(0.0, 0.0, 0.0));
                geometry.set_clipping_region(PixelRect::from_size(pixel_size));
            }
        } else {
            let translation = Vec2f::new(outer.left - ctx.offset.x, outer.top - ctx.offset.y);
            let mut clip = self.outer_rect_clipper(window);
            if clip.width() != 0.0 && clip.height() != 0.0 {
                clip = clip.offset(Vec2f::new(-ctx.offset.x, -ctx.offset.y));
            }
            if let Some(geometry) = self.manager.get_mut(window).and_then(|w| w.geometry.as_mut()) {
                geometry.set_translation(Vec3f::new(translation.x, translation.y, 0.0));
                geometry.set_clipping_region(clip);
            }
        }
    }

    /// Schedules a redraw of `window`, and of its subtree when `recursive`.
    pub fn invalidate(&mut self, window: WindowId, recursive: bool) {
        self.invalidate_impl(window, recursive);
        self.mark_as_dirty();
    }

    fn invalidate_impl(&mut self, window: WindowId, recursive: bool) {
        let Some(w) = self.manager.get_mut(window) else { return };
        w.needs_redraw = true;
        self.invalidate_rendering_surface(window);
        self.notify(window, EventKind::Invalidated);
        if recursive {
            let children = self.manager.get(window).map(|w| w.children.clone()).unwrap_or_default();
            for child in children {
                self.invalidate_impl(child, true);
            }
        }
    }

    /// Invalidates the surface `window` draws into.
    pub fn invalidate_rendering_surface(&mut self, window: WindowId) {
        let surface = self.rendering_context(window).surface;
        self.invalidate_surface(surface);
    }

    /// Draws `window` and its subtree into their surfaces.
    pub(crate) fn draw_window(&mut self, window: WindowId) {
        if !self.is_effective_visible(window) {
            return;
        }
        let ctx = self.rendering_context(window);
        let owns_surface = ctx.owner == Some(window);
        if owns_surface {
            if let Some(s) = self.surfaces.get_mut(ctx.surface) {
                s.clear_geometry();
            }
        }

        let redraw = match self.manager.get(window).and_then(|w| w.surface) {
            Some(surface) => self.surfaces.get(surface).map(|s| s.invalidated).unwrap_or(true),
            None => true,
        };
        if redraw {
            self.draw_self(window, &ctx);
            let draw_list = self.manager.get(window).map(|w| w.draw_list.clone()).unwrap_or_default();
            for child in draw_list {
                self.draw_window(child);
            }
        }

        if owns_surface {
            self.draw_surface(ctx.surface);
        }
    }

    fn draw_self(&mut self, window: WindowId, ctx: &RenderingContext) {
        self.buffer_geometry(window);
        if let Some(s) = self.surfaces.get_mut(ctx.surface) {
            s.add_geometry(ctx.queue, QueuedGeometry::Window(window));
        }
    }

    /// Repopulates the geometry buffer if the window changed since the last draw.
    fn buffer_geometry(&mut self, window: WindowId) {
        let Some(w) = self.manager.get_mut(window) else { return };
        if !w.needs_redraw {
            return;
        }
        if let Some(geometry) = w.geometry.as_mut() {
            geometry.reset();
        }
        self.notify(window, EventKind::RenderingStarted);

        let alpha = self.effective_alpha(window);
        let Some(w) = self.manager.get_mut(window) else { return };
        let renderer = w.window_renderer.take();
        let mut geometry = w.geometry.take();
        if let (Some(renderer), Some(geometry)) = (renderer.as_ref(), geometry.as_mut()) {
            renderer.render(self, window, geometry.as_mut());
        }
        if let Some(geometry) = geometry.as_mut() {
            geometry.set_alpha(alpha);
        }
        if let Some(w) = self.manager.get_mut(window) {
            w.window_renderer = renderer;
            w.geometry = geometry;
        }

        self.notify(window, EventKind::RenderingEnded);
        if let Some(w) = self.manager.get_mut(window) {
            w.needs_redraw = false;
        }
    }

    /// Asks for (or gives up) a texture-backed surface for `window`.
    pub fn set_auto_rendering_surface(&mut self, window: WindowId, enabled: bool) -> Result<()> {
        self.window_mut(window)?.flags.set(WindowFlags::AUTO_RENDERING_SURFACE, enabled);
        if enabled {
            self.allocate_rendering_window(window);
        } else {
            self.release_rendering_window(window);
        }
        self.notify_screen_area_changed(window, true);
        self.invalidate(window, true);
        Ok(())
    }

    fn allocate_rendering_window(&mut self, window: WindowId) {
        let Some(w) = self.manager.get(window) else { return };
        if w.surface.is_some() {
            return;
        }
        let Some(target) = self.renderer.scope_mut(|r| r.create_texture_target()) else {
            warn!("renderer has no texture targets; '{}' keeps drawing into its parent surface", w.name);
            return;
        };
        let geometry = self.renderer.scope_mut(|r| r.create_geometry_buffer());
        let owner = self.rendering_context(window).surface;
        let size = w.pixel_size;
        let surface = self.create_rendering_window(owner, window, target, geometry);
        if let Some(w) = self.manager.get_mut(window) {
            w.surface = Some(surface);
        }
        self.transfer_child_surfaces(window);
        self.resize_rendering_window(surface, size);
        self.mark_as_dirty();
    }

    pub(crate) fn release_rendering_window(&mut self, window: WindowId) {
        let Some(surface) = self.manager.get(window).and_then(|w| w.surface) else { return };
        if let Some(w) = self.manager.get_mut(window) {
            w.surface = None;
        }
        self.transfer_child_surfaces(window);
        if let Some((target, geometry)) = self.destroy_rendering_window(surface) {
            self.renderer.scope_mut(|r| {
                r.destroy_texture_target(target);
                r.destroy_geometry_buffer(geometry);
            });
        }
        self.mark_as_dirty();
    }

    /// Moves the rendering windows of descendants onto the surface `window` now draws into.
    pub(crate) fn transfer_child_surfaces(&mut self, window: WindowId) {
        let target = self.rendering_context(window).surface;
        let children = self.manager.get(window).map(|w| w.children.clone()).unwrap_or_default();
        for child in children {
            match self.manager.get(child).and_then(|c| c.surface) {
                Some(surface) => self.transfer_rendering_window(target, surface),
                None => self.transfer_child_surfaces(child),
            }
        }
    }

    /// Re-targets surfaces after `window` moved in the tree.
    pub(crate) fn sync_target_surface(&mut self, window: WindowId) {
        let Some(w) = self.manager.get(window) else { return };
        match w.surface {
            None => self.transfer_child_surfaces(window),
            Some(surface) => {
                let target = match w.parent {
                    Some(p) => self.rendering_context(p).surface,
                    None => self.root_surface,
                };
                self.transfer_rendering_window(target, surface);
            }
        }
    }
}
