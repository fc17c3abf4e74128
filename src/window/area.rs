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

fn clamp_axis(v: f32, min: f32, max: f32) -> f32 {
    let hi = if max > 0.0 { max } else { f32::INFINITY };
    let lo = min.min(hi);
    v.max(lo).min(hi)
}

impl GuiContext {
    /// Sets position and size in one go. The size is clamped to the min/max constraints.
    pub fn set_area(&mut self, window: WindowId, area: URect) -> Result<()> { self.set_area_parts(window, area.position(), area.size()) }

    /// Sets position and size from separate values.
    pub fn set_area_parts(&mut self, window: WindowId, position: UVector2, size: USize) -> Result<()> {
        self.window(window)?;
        let size = self.constrain_size(window, size);
        self.set_area_impl(window, position, size, false, true);
        Ok(())
    }

    /// Area change issued while dragging the top or left edge: the position only follows
    /// when the size actually changed.
    pub fn set_area_top_left_sizing(&mut self, window: WindowId, area: URect) -> Result<()> {
        self.window(window)?;
        let size = self.constrain_size(window, area.size());
        self.set_area_impl(window, area.position(), size, true, true);
        Ok(())
    }

    /// Moves the window, keeping its size.
    pub fn set_position(&mut self, window: WindowId, position: UVector2) -> Result<()> {
        let size = self.window(window)?.size();
        self.set_area_impl(window, position, size, false, true);
        Ok(())
    }

    /// Sets the horizontal position only.
    pub fn set_x_position(&mut self, window: WindowId, x: UDim) -> Result<()> {
        let pos = self.window(window)?.position();
        self.set_position(window, UVector2::new(x, pos.y))
    }

    /// Sets the vertical position only.
    pub fn set_y_position(&mut self, window: WindowId, y: UDim) -> Result<()> {
        let pos = self.window(window)?.position();
        self.set_position(window, UVector2::new(pos.x, y))
    }

    /// Resizes the window. The stored size is the clamped one.
    pub fn set_size(&mut self, window: WindowId, size: USize) -> Result<()> {
        let pos = self.window(window)?.position();
        let size = self.constrain_size(window, size);
        self.set_area_impl(window, pos, size, false, true);
        Ok(())
    }

    /// Sets the width only.
    pub fn set_width(&mut self, window: WindowId, width: UDim) -> Result<()> {
        let size = self.window(window)?.size();
        self.set_size(window, USize::new(width, size.height))
    }

    /// Sets the height only.
    pub fn set_height(&mut self, window: WindowId, height: UDim) -> Result<()> {
        let size = self.window(window)?.size();
        self.set_size(window, USize::new(size.width, height))
    }

    /// Sets the minimum size and re-applies it to the current size.
    pub fn set_min_size(&mut self, window: WindowId, size: USize) -> Result<()> {
        self.window_mut(window)?.min_size = size;
        let base = self.base_size(window);
        let mut current = self.window(window)?.size();
        if self.constrain_to_min_size(window, base, &mut current) {
            self.set_size(window, current)?;
        }
        Ok(())
    }

    /// Sets the maximum size and re-applies it to the current size. Zero components are unbounded.
    pub fn set_max_size(&mut self, window: WindowId, size: USize) -> Result<()> {
        self.window_mut(window)?.max_size = size;
        let base = self.base_size(window);
        let mut current = self.window(window)?.size();
        if self.constrain_to_max_size(window, base, &mut current) {
            self.set_size(window, current)?;
        }
        Ok(())
    }

    /// Pixel size of the parent, or of the surface for a detached window.
    pub fn parent_pixel_size(&self, window: WindowId) -> PixelSize {
        match self.manager.get(window).and_then(|w| w.parent).and_then(|p| self.manager.get(p)) {
            Some(p) => p.pixel_size,
            None => self.surface_size,
        }
    }

    /// Size the scaled area of `window` resolves against.
    pub(crate) fn base_size(&self, window: WindowId) -> PixelSize {
        match self.manager.get(window) {
            Some(w) => match w.parent {
                Some(p) if !w.is_non_client() => self.unclipped_inner_rect(p).size(),
                _ => self.parent_pixel_size(window),
            },
            None => self.surface_size,
        }
    }

    fn constrain_size(&self, window: WindowId, size: USize) -> USize {
        let base = self.base_size(window);
        let mut size = size;
        self.constrain_to_min_size(window, base, &mut size);
        self.constrain_to_max_size(window, base, &mut size);
        size
    }

    /// Rewrites `size` so it resolves to at least the minimum, keeping the offset where possible.
    pub(crate) fn constrain_to_min_size(&self, window: WindowId, base: PixelSize, size: &mut USize) -> bool {
        let Some(w) = self.manager.get(window) else { return false };
        let px = size.to_pixels(base);
        let min = w.min_size.to_pixels(base);
        let mut changed = false;
        if px.width < min.width {
            size.width.offset = size.width.offset.min(w.min_size.width.offset);
            size.width.scale = if base.width != 0.0 { (min.width - size.width.offset) / base.width } else { 0.0 };
            changed = true;
        }
        if px.height < min.height {
            size.height.offset = size.height.offset.min(w.min_size.height.offset);
            size.height.scale = if base.height != 0.0 { (min.height - size.height.offset) / base.height } else { 0.0 };
            changed = true;
        }
        changed
    }

    /// Rewrites `size` so it resolves to at most the maximum.
    pub(crate) fn constrain_to_max_size(&self, window: WindowId, base: PixelSize, size: &mut USize) -> bool {
        let Some(w) = self.manager.get(window) else { return false };
        let px = size.to_pixels(base);
        let max = w.max_size.to_pixels(base);
        let mut changed = false;
        if max.width > 0.0 && px.width > max.width {
            size.width.offset = size.width.offset.max(w.max_size.width.offset);
            size.width.scale = if base.width != 0.0 { (max.width - size.width.offset) / base.width } else { 0.0 };
            changed = true;
        }
        if max.height > 0.0 && px.height > max.height {
            size.height.offset = size.height.offset.max(w.max_size.height.offset);
            size.height.scale = if base.height != 0.0 { (max.height - size.height.offset) / base.height } else { 0.0 };
            changed = true;
        }
        changed
    }

    /// Resolves `size` against `base` and clamps it to the constraints of `window`.
    pub(crate) fn calculate_pixel_size(&self, window: WindowId, base: PixelSize, size: USize) -> PixelSize {
        let Some(w) = self.manager.get(window) else { return PixelSize::default() };
        let px = size.to_pixels(base);
        let min = w.min_size.to_pixels(base);
        let max = w.max_size.to_pixels(base);
        let px = PixelSize::new(clamp_axis(px.width, min.width, max.width), clamp_axis(px.height, min.height, max.height));
        if w.is_pixel_aligned() { px.aligned() } else { px }
    }

    pub(crate) fn set_area_impl(&mut self, window: WindowId, position: UVector2, size: USize, top_left_sizing: bool, fire_events: bool) {
        self.bump_generation();
        let base = self.base_size(window);
        let pixel_size = self.calculate_pixel_size(window, base, size);

        let Some(w) = self.manager.get_mut(window) else { return };
        let old_size = w.pixel_size;
        w.pixel_size = pixel_size;
        w.area.set_size(size);
        let sized = pixel_size != old_size;

        let mut moved = false;
        if (!top_left_sizing || sized) && position != w.area.min {
            w.area.set_position(position);
            moved = true;
        }

        if fire_events {
            if moved {
                self.on_moved(window);
            }
            if sized {
                self.on_sized(window);
            }
        }
        if moved || sized {
            self.mark_pointer_stale();
        }
        self.update_geometry_render_settings(window);
    }

    /// Re-applies the area against a parent whose size changed.
    pub(crate) fn on_parent_sized(&mut self, window: WindowId) {
        let Some(w) = self.manager.get(window) else { return };
        let (position, size) = (w.position(), w.size());
        let old_inner = self.unclipped_inner_rect(window).size();

        self.set_area_impl(window, position, size, false, false);

        let Some(w) = self.manager.get(window) else { return };
        let moved = w.area.min.x.scale != 0.0
            || w.area.min.y.scale != 0.0
            || w.horizontal_alignment != HorizontalAlignment::Left
            || w.vertical_alignment != VerticalAlignment::Top;
        let sized = w.area.max.x.scale != 0.0 || w.area.max.y.scale != 0.0 || self.unclipped_inner_rect(window).size() != old_inner;

        if moved {
            self.on_moved(window);
        }
        if sized {
            self.on_sized(window);
        }
        if !(moved || sized) {
            self.perform_child_window_layout(window);
        }
    }

    fn on_moved(&mut self, window: WindowId) {
        self.notify_screen_area_changed(window, true);
        if let Some(parent) = self.manager.get(window).and_then(|w| w.parent) {
            self.invalidate_rendering_surface(parent);
            let target = self.rendering_context(parent).surface;
            if self.surfaces.get(target).map(|s| s.is_rendering_window()).unwrap_or(false) {
                self.dirty = true;
            }
        }
        self.notify(window, EventKind::Moved);
    }

    fn on_sized(&mut self, window: WindowId) {
        let Some(w) = self.manager.get(window) else { return };
        if let Some(surface) = w.surface {
            let size = w.pixel_size;
            self.resize_rendering_window(surface, size);
        }
        self.notify_screen_area_changed(window, false);
        self.perform_child_window_layout(window);
        let children = self.manager.get(window).map(|w| w.children.clone()).unwrap_or_default();
        for child in children {
            self.on_parent_sized(child);
        }
        self.invalidate(window, false);
        self.notify(window, EventKind::Sized);
    }

    /// Drops cached rectangles and refreshes geometry placement, optionally for the subtree.
    pub(crate) fn notify_screen_area_changed(&mut self, window: WindowId, recursive: bool) {
        self.bump_generation();
        self.update_geometry_render_settings(window);
        if recursive {
            let children = self.manager.get(window).map(|w| w.children.clone()).unwrap_or_default();
            for child in children {
                self.notify_screen_area_changed(child, true);
            }
        }
    }

    pub(crate) fn bump_generation(&mut self) { self.generation += 1; }

    fn screen_rect(&self) -> PixelRect { PixelRect::from_size(self.surface_size) }

    /// Outer rect in screen pixels, before any clipping.
    pub fn unclipped_outer_rect(&self, window: WindowId) -> PixelRect {
        let Some(w) = self.manager.get(window) else { return PixelRect::default() };
        w.cache.unclipped_outer.get_or(self.generation, || {
            let parent_rect = match w.parent {
                Some(p) => self.child_content_area(p, w.is_non_client()),
                None => self.screen_rect(),
            };
            let parent_size = parent_rect.size();
            let pos = w.area.min.to_pixels(parent_size);
            let mut x = parent_rect.left + pos.x;
            let mut y = parent_rect.top + pos.y;

            match w.horizontal_alignment {
                HorizontalAlignment::Centre => x += (parent_size.width - w.pixel_size.width) * 0.5,
                HorizontalAlignment::Right => x += parent_size.width - w.pixel_size.width,
                HorizontalAlignment::Left => (),
            }
            match w.vertical_alignment {
                VerticalAlignment::Centre => y += (parent_size.height - w.pixel_size.height) * 0.5,
                VerticalAlignment::Bottom => y += parent_size.height - w.pixel_size.height,
                VerticalAlignment::Top => (),
            }
            if w.is_pixel_aligned() {
                x = align_to_pixels(x);
                y = align_to_pixels(y);
            }
            PixelRect::from_position_size(Vec2f::new(x, y), w.pixel_size)
        })
    }

    /// Inner (client) rect in screen pixels; the window renderer may shrink it.
    pub fn unclipped_inner_rect(&self, window: WindowId) -> PixelRect {
        let Some(w) = self.manager.get(window) else { return PixelRect::default() };
        w.cache.unclipped_inner.get_or(self.generation, || {
            w.window_renderer.as_ref().and_then(|r| r.unclipped_inner_rect(self, window)).unwrap_or_else(|| self.unclipped_outer_rect(window))
        })
    }

    /// Outer rect clipped by the parent chain.
    pub fn outer_rect_clipper(&self, window: WindowId) -> PixelRect {
        let Some(w) = self.manager.get(window) else { return PixelRect::default() };
        w.cache.outer_clipper.get_or(self.generation, || {
            let outer = self.unclipped_outer_rect(window);
            if w.surface.is_some() { outer } else { self.parent_clip_intersection(window, &outer) }
        })
    }

    /// Inner rect clipped by the parent chain.
    pub fn inner_rect_clipper(&self, window: WindowId) -> PixelRect {
        let Some(w) = self.manager.get(window) else { return PixelRect::default() };
        w.cache.inner_clipper.get_or(self.generation, || {
            let inner = self.unclipped_inner_rect(window);
            if w.surface.is_some() { inner } else { self.parent_clip_intersection(window, &inner) }
        })
    }

    /// Clip rect applied to children: the outer clipper for non-client children, the inner one otherwise.
    pub fn clip_rect(&self, window: WindowId, non_client: bool) -> PixelRect {
        if non_client { self.outer_rect_clipper(window) } else { self.inner_rect_clipper(window) }
    }

    /// Area children are positioned in.
    pub fn child_content_area(&self, window: WindowId, non_client: bool) -> PixelRect {
        if non_client { self.unclipped_outer_rect(window) } else { self.unclipped_inner_rect(window) }
    }

    fn parent_clip_intersection(&self, window: WindowId, area: &PixelRect) -> PixelRect {
        let Some(w) = self.manager.get(window) else { return PixelRect::default() };
        match w.parent {
            Some(p) if w.is_clipped_by_parent() => area.intersection(&self.clip_rect(p, w.is_non_client())),
            _ => area.intersection(&self.screen_rect()),
        }
    }

    /// Area that accepts pointer hits.
    pub fn hit_test_rect(&self, window: WindowId) -> PixelRect {
        let Some(w) = self.manager.get(window) else { return PixelRect::default() };
        w.cache.hit_test.get_or(self.generation, || {
            let outer = self.unclipped_outer_rect(window);
            match w.parent {
                Some(p) if w.is_clipped_by_parent() => outer.intersection(&self.hit_test_rect(p).intersection(&self.clip_rect(p, w.is_non_client()))),
                _ => outer.intersection(&self.screen_rect()),
            }
        })
    }

    /// Returns `true` if `point` lies in the hit area of `window`.
    pub fn is_hit(&self, window: WindowId, point: Vec2f, allow_disabled: bool) -> bool {
        if !allow_disabled && self.is_effective_disabled(window) {
            return false;
        }
        let area = self.hit_test_rect(window);
        if area.width() == 0.0 || area.height() == 0.0 {
            return false;
        }
        area.contains(point)
    }

    /// Topmost visible descendant hit at `point`.
    pub fn child_at_position(&self, window: WindowId, point: Vec2f) -> Option<WindowId> { self.child_at_position_impl(window, point, false, false) }

    /// Topmost visible descendant hit at `point` that accepts pointer input.
    /// Pass-through windows are skipped, but their descendants are still considered.
    pub fn target_child_at_position(&self, window: WindowId, point: Vec2f, allow_disabled: bool) -> Option<WindowId> {
        self.child_at_position_impl(window, point, allow_disabled, true)
    }

    fn child_at_position_impl(&self, window: WindowId, point: Vec2f, allow_disabled: bool, targets_only: bool) -> Option<WindowId> {
        let w = self.manager.get(window)?;
        for child in w.draw_list.iter().rev().copied() {
            let Some(c) = self.manager.get(child) else { continue };
            if !c.is_visible() {
                continue;
            }
            if let Some(hit) = self.child_at_position_impl(child, point, allow_disabled, targets_only) {
                return Some(hit);
            }
            let passes_through = targets_only && c.is_cursor_pass_through_enabled();
            if !passes_through && self.is_hit(child, point, allow_disabled) {
                return Some(child);
            }
        }
        None
    }

    /// Sets the horizontal alignment.
    pub fn set_horizontal_alignment(&mut self, window: WindowId, alignment: HorizontalAlignment) -> Result<()> {
        let w = self.window_mut(window)?;
        if w.horizontal_alignment == alignment {
            return Ok(());
        }
        w.horizontal_alignment = alignment;
        self.notify_screen_area_changed(window, true);
        self.mark_pointer_stale();
        self.notify(window, EventKind::HorizontalAlignmentChanged);
        Ok(())
    }

    /// Sets the vertical alignment.
    pub fn set_vertical_alignment(&mut self, window: WindowId, alignment: VerticalAlignment) -> Result<()> {
        let w = self.window_mut(window)?;
        if w.vertical_alignment == alignment {
            return Ok(());
        }
        w.vertical_alignment = alignment;
        self.notify_screen_area_changed(window, true);
        self.mark_pointer_stale();
        self.notify(window, EventKind::VerticalAlignmentChanged);
        Ok(())
    }

    /// Sets whether the window is clipped by its parent.
    pub fn set_clipped_by_parent(&mut self, window: WindowId, clipped: bool) -> Result<()> {
        let w = self.window_mut(window)?;
        if w.is_clipped_by_parent() == clipped {
            return Ok(());
        }
        w.flags.set(WindowFlags::CLIPPED_BY_PARENT, clipped);
        self.notify_screen_area_changed(window, true);
        self.notify(window, EventKind::ClippedByParentChanged);
        Ok(())
    }

    /// Moves the window between the parent's client and non-client areas.
    pub fn set_non_client(&mut self, window: WindowId, non_client: bool) -> Result<()> {
        let w = self.window_mut(window)?;
        if w.is_non_client() == non_client {
            return Ok(());
        }
        w.flags.set(WindowFlags::NON_CLIENT, non_client);
        self.on_parent_sized(window);
        self.notify_screen_area_changed(window, true);
        self.notify(window, EventKind::NonClientChanged);
        Ok(())
    }

    /// Sets whether sizes and positions snap to whole pixels.
    pub fn set_pixel_aligned(&mut self, window: WindowId, aligned: bool) -> Result<()> {
        self.window_mut(window)?.flags.set(WindowFlags::PIXEL_ALIGNED, aligned);
        self.on_parent_sized(window);
        self.notify_screen_area_changed(window, true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn relative_area(l: f32, t: f32, r: f32, b: f32) -> URect { URect::from_parts(UDim::relative(l), UDim::relative(t), UDim::relative(r), UDim::relative(b)) }

    #[test]
    fn relative_areas_follow_the_surface() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let frame = ctx.create_window("FrameWindow", "F").unwrap();
        ctx.set_area(frame, relative_area(0.25, 0.25, 0.5, 0.5)).unwrap();
        ctx.add_child(root, frame).unwrap();
        assert_eq!(ctx.unclipped_outer_rect(frame), PixelRect::new(200.0, 150.0, 400.0, 300.0));

        ctx.set_surface_size(PixelSize::new(1600.0, 1200.0));
        assert_eq!(ctx.window(root).unwrap().pixel_size(), PixelSize::new(1600.0, 1200.0));
        assert_eq!(ctx.unclipped_outer_rect(frame), PixelRect::new(400.0, 300.0, 800.0, 600.0));
        assert_eq!(ctx.window(frame).unwrap().area(), relative_area(0.25, 0.25, 0.5, 0.5));
    }

    #[test]
    fn minimum_size_wins_over_requested_size() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let parent = child_at(&mut ctx, root, "parent", 0.0, 0.0, 500.0, 500.0);
        let w = child_at(&mut ctx, parent, "w", 0.0, 0.0, 200.0, 200.0);
        ctx.set_min_size(w, USize::new(UDim::absolute(100.0), UDim::absolute(100.0))).unwrap();
        ctx.set_size(w, USize::new(UDim::absolute(50.0), UDim::absolute(50.0))).unwrap();
        assert_eq!(ctx.window(w).unwrap().pixel_size(), PixelSize::new(100.0, 100.0));
        // the stored size resolves to the clamp bound
        let stored = ctx.window(w).unwrap().size();
        assert_eq!(stored.to_pixels(PixelSize::new(500.0, 500.0)), PixelSize::new(100.0, 100.0));
        assert_eq!(stored.width.offset, 50.0);
    }

    #[test]
    fn maximum_size_and_unbounded_zero() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let w = child_at(&mut ctx, root, "w", 0.0, 0.0, 300.0, 300.0);
        ctx.set_max_size(w, USize::new(UDim::absolute(120.0), UDim::zero())).unwrap();
        assert_eq!(ctx.window(w).unwrap().pixel_size(), PixelSize::new(120.0, 300.0));
        ctx.set_size(w, USize::new(UDim::relative(1.0), UDim::relative(1.0))).unwrap();
        assert_eq!(ctx.window(w).unwrap().pixel_size(), PixelSize::new(120.0, 600.0));
    }

    #[test]
    fn min_above_max_resolves_to_max() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let w = child_at(&mut ctx, root, "w", 0.0, 0.0, 300.0, 300.0);
        ctx.set_max_size(w, USize::new(UDim::absolute(80.0), UDim::absolute(80.0))).unwrap();
        ctx.set_min_size(w, USize::new(UDim::absolute(100.0), UDim::absolute(100.0))).unwrap();
        ctx.set_size(w, USize::new(UDim::absolute(10.0), UDim::absolute(10.0))).unwrap();
        assert_eq!(ctx.window(w).unwrap().pixel_size(), PixelSize::new(80.0, 80.0));
    }

    #[test]
    fn zero_base_forces_scale_to_zero() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let parent = child_at(&mut ctx, root, "parent", 0.0, 0.0, 0.0, 0.0);
        let w = child_at(&mut ctx, parent, "w", 0.0, 0.0, 10.0, 10.0);
        ctx.set_min_size(w, USize::new(UDim::absolute(40.0), UDim::absolute(40.0))).unwrap();
        assert_eq!(ctx.window(w).unwrap().size().width, UDim::new(0.0, 10.0));
        assert_eq!(ctx.window(w).unwrap().pixel_size(), PixelSize::new(40.0, 40.0));

        // growing the parent later does not bring a proportional size back
        ctx.set_size(parent, USize::new(UDim::absolute(400.0), UDim::absolute(400.0))).unwrap();
        assert_eq!(ctx.window(w).unwrap().size().width.scale, 0.0);
        assert_eq!(ctx.window(w).unwrap().pixel_size(), PixelSize::new(40.0, 40.0));
    }

    #[test]
    fn top_left_sizing_holds_position_when_size_is_stuck() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let w = child_at(&mut ctx, root, "w", 100.0, 100.0, 100.0, 100.0);
        ctx.set_min_size(w, USize::new(UDim::absolute(100.0), UDim::absolute(100.0))).unwrap();
        let moved = count_events(&mut ctx, w, EventKind::Moved);
        let dragged = URect::from_parts(UDim::absolute(120.0), UDim::absolute(100.0), UDim::absolute(200.0), UDim::absolute(200.0));
        ctx.set_area_top_left_sizing(w, dragged).unwrap();
        assert_eq!(*moved.borrow(), 0);
        assert_eq!(ctx.unclipped_outer_rect(w).left, 100.0);
        ctx.set_area(w, dragged).unwrap();
        assert_eq!(*moved.borrow(), 1);
    }

    #[test]
    fn moved_then_sized_events() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let w = child_at(&mut ctx, root, "w", 0.0, 0.0, 100.0, 100.0);
        let trace = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        trace_events(&mut ctx, w, EventKind::Moved, "moved", &trace);
        trace_events(&mut ctx, w, EventKind::Sized, "sized", &trace);
        ctx.set_area(w, URect::from_parts(UDim::absolute(5.0), UDim::absolute(5.0), UDim::absolute(55.0), UDim::absolute(55.0))).unwrap();
        ctx.set_size(w, USize::new(UDim::absolute(20.0), UDim::absolute(20.0))).unwrap();
        assert_eq!(*trace.borrow(), vec!["moved:w", "sized:w", "sized:w"]);
    }

    #[test]
    fn alignment_offsets_the_outer_rect() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let w = child_at(&mut ctx, root, "w", 0.0, 0.0, 100.0, 50.0);
        ctx.set_horizontal_alignment(w, HorizontalAlignment::Centre).unwrap();
        ctx.set_vertical_alignment(w, VerticalAlignment::Bottom).unwrap();
        assert_eq!(ctx.unclipped_outer_rect(w), PixelRect::new(350.0, 550.0, 450.0, 600.0));
    }

    #[test]
    fn clipping_and_hit_testing() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let p = child_at(&mut ctx, root, "p", 100.0, 100.0, 100.0, 100.0);
        let c = child_at(&mut ctx, p, "c", 50.0, 50.0, 100.0, 100.0);
        assert_eq!(ctx.unclipped_outer_rect(c), PixelRect::new(150.0, 150.0, 250.0, 250.0));
        assert_eq!(ctx.outer_rect_clipper(c), PixelRect::new(150.0, 150.0, 200.0, 200.0));
        assert_eq!(ctx.hit_test_rect(c), PixelRect::new(150.0, 150.0, 200.0, 200.0));
        assert!(ctx.is_hit(c, Vec2f::new(160.0, 160.0), false));
        assert!(!ctx.is_hit(c, Vec2f::new(220.0, 220.0), false));

        ctx.set_clipped_by_parent(c, false).unwrap();
        assert!(ctx.is_hit(c, Vec2f::new(220.0, 220.0), false));

        ctx.set_enabled(c, false).unwrap();
        assert!(!ctx.is_hit(c, Vec2f::new(160.0, 160.0), false));
        assert!(ctx.is_hit(c, Vec2f::new(160.0, 160.0), true));

        let empty = child_at(&mut ctx, p, "empty", 0.0, 0.0, 0.0, 10.0);
        assert!(!ctx.is_hit(empty, Vec2f::new(100.0, 105.0), false));
    }

    #[test]
    fn topmost_descendant_wins_and_pass_through_is_skipped() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let back = child_at(&mut ctx, root, "back", 0.0, 0.0, 300.0, 300.0);
        let front = child_at(&mut ctx, root, "front", 100.0, 100.0, 300.0, 300.0);
        let inner = child_at(&mut ctx, front, "inner", 0.0, 0.0, 50.0, 50.0);
        let pt = Vec2f::new(120.0, 120.0);
        assert_eq!(ctx.target_child_at_position(root, pt, false), Some(inner));

        ctx.set_cursor_pass_through_enabled(front, true).unwrap();
        assert_eq!(ctx.target_child_at_position(root, Vec2f::new(200.0, 200.0), false), Some(back));
        assert_eq!(ctx.target_child_at_position(root, pt, false), Some(inner));
        assert_eq!(ctx.child_at_position(root, Vec2f::new(200.0, 200.0)), Some(front));

        ctx.hide(front).unwrap();
        assert_eq!(ctx.target_child_at_position(root, pt, false), Some(back));
        assert_eq!(ctx.target_child_at_position(root, Vec2f::new(700.0, 500.0), false), None);
    }
}
