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
//! The UI session: one window tree, its surfaces, and the input and render entry points.
use super::*;
use slotmap::SlotMap;
use std::rc::Rc;

/// Programmatic configuration of a [`GuiContext`].
#[derive(Debug, Clone)]
pub struct ContextConfig {
    /// Size of the root surface; the renderer's display size when `None`.
    pub surface_size: Option<PixelSize>,
    /// Window type used for the lazily created default tooltip.
    pub default_tooltip_type: Option<String>,
    /// Prefix of generated window names.
    pub auto_window_name_prefix: String,
}

impl Default for ContextConfig {
    fn default() -> Self { Self { surface_size: None, default_tooltip_type: None, auto_window_name_prefix: "__auto_window_".into() } }
}

/// Owns a window tree and drives input, time and rendering for it.
pub struct GuiContext {
    pub(crate) manager: WindowManager,
    pub(crate) surfaces: SlotMap<SurfaceId, RenderingSurface>,
    pub(crate) root_surface: SurfaceId,
    pub(crate) renderer: RendererHandle,

    pub(crate) root: Option<WindowId>,
    pub(crate) capture: Option<WindowId>,
    pub(crate) modal: Option<WindowId>,

    pub(crate) pointer_position: Vec2f,
    pub(crate) pointer_window: Option<WindowId>,
    pub(crate) pointer_stale: bool,

    pub(crate) dirty: bool,
    pub(crate) surface_size: PixelSize,
    pub(crate) generation: u64,

    pub(crate) default_font: Option<String>,
    pub(crate) default_tooltip_type: Option<String>,
    pub(crate) default_tooltip: Option<WindowId>,

    pub(crate) fonts: ResourceRegistry<Font>,
    pub(crate) images: ResourceRegistry<Image>,
    pub(crate) looks: LookRegistry,
    pub(crate) events: EventSet,
}

impl GuiContext {
    /// Creates an empty context drawing through `renderer`.
    pub fn new(renderer: RendererHandle, config: ContextConfig) -> Self {
        let surface_size = config.surface_size.unwrap_or_else(|| renderer.scope(|r| r.display_size()));
        let mut surfaces = SlotMap::with_key();
        let root_surface = surfaces.insert(RenderingSurface::root());
        Self {
            manager: WindowManager::new(&config.auto_window_name_prefix),
            surfaces,
            root_surface,
            renderer,
            root: None,
            capture: None,
            modal: None,
            pointer_position: Vec2f::default(),
            pointer_window: None,
            pointer_stale: true,
            dirty: true,
            surface_size,
            generation: 0,
            default_font: None,
            default_tooltip_type: config.default_tooltip_type,
            default_tooltip: None,
            fonts: ResourceRegistry::new("font"),
            images: ResourceRegistry::new("image"),
            looks: LookRegistry::default(),
            events: EventSet::default(),
        }
    }

    /// Looks a window up.
    pub fn window(&self, window: WindowId) -> Result<&Window> { self.manager.get(window).ok_or_else(|| Error::UnknownObject(format!("window {:?} does not exist", window))) }

    /// Looks a window up for mutation.
    pub fn window_mut(&mut self, window: WindowId) -> Result<&mut Window> {
        self.manager.get_mut(window).ok_or_else(|| Error::UnknownObject(format!("window {:?} does not exist", window)))
    }

    /// The renderer shared with the embedding application.
    pub fn renderer(&self) -> &RendererHandle { &self.renderer }

    /// Registered fonts.
    pub fn fonts(&self) -> &ResourceRegistry<Font> { &self.fonts }
    /// Registered fonts, for definition.
    pub fn fonts_mut(&mut self) -> &mut ResourceRegistry<Font> { &mut self.fonts }
    /// Registered images.
    pub fn images(&self) -> &ResourceRegistry<Image> { &self.images }
    /// Registered images, for definition.
    pub fn images_mut(&mut self) -> &mut ResourceRegistry<Image> { &mut self.images }

    /// Subscribers of context level events.
    pub fn events(&self) -> &EventSet { &self.events }

    /// Window the tree hangs from.
    pub fn root_window(&self) -> Option<WindowId> { self.root }

    /// Replaces the root window.
    pub fn set_root_window(&mut self, root: Option<WindowId>) {
        if self.root == root {
            return;
        }
        self.root = root;
        if let Some(root) = root {
            self.sync_target_surface(root);
            self.notify_screen_area_changed(root, true);
            self.invalidate(root, true);
        }
        self.mark_as_dirty();
        self.mark_pointer_stale();
        let mut args = EventArgs::new(root);
        self.fire_context_event(EventKind::RootWindowChanged, &mut args);
    }

    /// Size of the root surface.
    pub fn surface_size(&self) -> PixelSize { self.surface_size }

    /// Resizes the root surface and re-lays out the root window.
    pub fn set_surface_size(&mut self, size: PixelSize) {
        if self.surface_size == size {
            return;
        }
        self.surface_size = size;
        self.bump_generation();
        if let Some(root) = self.root {
            self.on_parent_sized(root);
        }
        self.invalidate_surface(self.root_surface);
        self.mark_pointer_stale();
        let mut args = EventArgs::new(self.root);
        self.fire_context_event(EventKind::SurfaceSizeChanged, &mut args);
    }

    /// Last injected pointer position.
    pub fn pointer_position(&self) -> Vec2f { self.pointer_position }

    /// Window under the pointer, as of the last refresh.
    pub fn window_containing_pointer(&self) -> Option<WindowId> { self.pointer_window }

    /// Returns `true` if the next [`GuiContext::draw`] walks the tree.
    pub fn is_dirty(&self) -> bool { self.dirty }

    /// Forces the next [`GuiContext::draw`] to walk the tree.
    pub fn mark_as_dirty(&mut self) { self.dirty = true; }

    pub(crate) fn mark_pointer_stale(&mut self) { self.pointer_stale = true; }

    /// Renders the frame, then reclaims windows destroyed since the last one.
    pub fn draw(&mut self) {
        if self.dirty {
            if let Some(s) = self.surfaces.get_mut(self.root_surface) {
                s.clear_geometry();
            }
            if let Some(root) = self.root.filter(|r| self.is_effective_visible(*r)) {
                self.draw_window(root);
            }
            self.dirty = false;
        }
        self.draw_surface(self.root_surface);
        self.cleanup_dead_pool();
    }

    /// Advances timers of the whole tree by `elapsed` seconds.
    pub fn inject_time_pulse(&mut self, elapsed: f32) -> bool {
        if self.pointer_stale {
            self.update_window_containing_pointer();
        }
        if let Some(root) = self.root {
            self.update_window(root, elapsed);
        }
        true
    }

    /// Tells the context the pointer left the display.
    pub fn inject_cursor_leave(&mut self) -> bool { self.inject_input_event(InputEvent::CursorLeave) }

    /// Delivers one semantic input event. Returns `true` if some window handled it.
    pub fn inject_input_event(&mut self, event: InputEvent) -> bool {
        let position = self.pointer_position;
        let cursor = |delta: Vec2f, source: Option<CursorInputSource>, scroll: f32| EventPayload::Cursor { position, delta, source, scroll };
        match event {
            InputEvent::CursorMove { position: to } => {
                let delta = Vec2f::new(to.x - position.x, to.y - position.y);
                self.pointer_position = to;
                self.update_window_containing_pointer();
                let payload = EventPayload::Cursor { position: to, delta, source: None, scroll: 0.0 };
                self.dispatch_to_pointer_target(EventKind::CursorMove, payload)
            }
            InputEvent::CursorPressHold(source) => self.dispatch_to_pointer_target(EventKind::CursorPressHold, cursor(Vec2f::default(), Some(source), 0.0)),
            InputEvent::CursorActivate(source) => self.dispatch_to_pointer_target(EventKind::CursorActivate, cursor(Vec2f::default(), Some(source), 0.0)),
            InputEvent::Scroll(delta) => self.dispatch_to_pointer_target(EventKind::Scroll, cursor(Vec2f::default(), None, delta)),
            InputEvent::Text(character) => self.dispatch_to_input_target(EventKind::Character, EventPayload::Text { character }),
            InputEvent::Semantic(value) => self.dispatch_to_input_target(EventKind::SemanticInput, EventPayload::Semantic { value }),
            InputEvent::CursorLeave => {
                let had_window = self.pointer_window.is_some();
                self.set_window_containing_pointer(None);
                had_window
            }
        }
    }

    fn dispatch_to_pointer_target(&mut self, kind: EventKind, payload: EventPayload) -> bool {
        match self.target_window(self.pointer_position, false) {
            Some(target) => self.dispatch_input(target, kind, EventArgs::with_payload(Some(target), payload)) > 0,
            None => false,
        }
    }

    fn dispatch_to_input_target(&mut self, kind: EventKind, payload: EventPayload) -> bool {
        match self.input_target_window() {
            Some(target) => self.dispatch_input(target, kind, EventArgs::with_payload(Some(target), payload)) > 0,
            None => false,
        }
    }

    /// Window pointer input at `point` is delivered to: the capture window (or its descendant
    /// under the point when it distributes input), else the topmost hit window, fenced by the
    /// modal target.
    pub fn target_window(&self, point: Vec2f, allow_disabled: bool) -> Option<WindowId> {
        let root = self.root?;
        if !self.is_effective_visible(root) {
            return None;
        }
        let mut target = match self.capture {
            Some(capture) => {
                let distributes = self.manager.get(capture).map(|w| w.distributes_captured_inputs()).unwrap_or(false);
                match self.target_child_at_position(capture, point, allow_disabled) {
                    Some(child) if distributes => child,
                    _ => capture,
                }
            }
            None => self.target_child_at_position(root, point, allow_disabled).unwrap_or(root),
        };
        if let Some(modal) = self.modal {
            if target != modal && !self.is_ancestor(target, modal) {
                target = modal;
            }
        }
        Some(target)
    }

    /// Window keyboard-like input is delivered to: the deepest active window under the modal
    /// target or the root.
    pub fn input_target_window(&self) -> Option<WindowId> {
        if !self.root.map(|r| self.is_effective_visible(r)).unwrap_or(false) {
            return None;
        }
        match self.modal {
            Some(modal) => self.active_child(modal).or(Some(modal)),
            None => self.root.and_then(|r| self.active_child(r)),
        }
    }

    /// Re-resolves the window under the pointer, firing leave and enter events on change.
    pub fn update_window_containing_pointer(&mut self) -> bool {
        self.pointer_stale = false;
        let current = self.target_window(self.pointer_position, true);
        self.set_window_containing_pointer(current)
    }

    fn set_window_containing_pointer(&mut self, current: Option<WindowId>) -> bool {
        if current == self.pointer_window {
            return false;
        }
        let old = self.pointer_window.filter(|w| self.manager.contains(*w));
        let payload = EventPayload::Cursor { position: self.pointer_position, delta: Vec2f::default(), source: None, scroll: 0.0 };

        if let Some(old) = old {
            self.on_cursor_leaves_surface(old, current, payload.clone());
        }
        self.pointer_window = current;

        let common = match (old, current) {
            (Some(a), Some(b)) => self.common_ancestor(a, b),
            _ => None,
        };
        let mut leaving = old;
        while let Some(w) = leaving.filter(|w| Some(*w) != common) {
            let mut args = EventArgs::with_payload(Some(w), payload.clone());
            self.fire_event(w, EventKind::CursorLeavesArea, &mut args);
            leaving = self.manager.get(w).and_then(|w| w.parent);
        }

        let mut entering = Vec::new();
        let mut walk = current;
        while let Some(w) = walk.filter(|w| Some(*w) != common) {
            entering.push(w);
            walk = self.manager.get(w).and_then(|w| w.parent);
        }
        for w in entering.into_iter().rev() {
            let mut args = EventArgs::with_payload(Some(w), payload.clone());
            self.fire_event(w, EventKind::CursorEntersArea, &mut args);
        }

        if let Some(current) = current {
            self.on_cursor_enters_surface(current, payload);
        }
        true
    }

    fn on_cursor_enters_surface(&mut self, window: WindowId, payload: EventPayload) {
        self.default_tooltip_object();
        if let Some(tip) = self.tooltip_window(window) {
            if tip != window && !self.is_ancestor(window, tip) {
                self.set_tooltip_target(tip, Some(window));
            }
        }
        let mut args = EventArgs::with_payload(Some(window), payload);
        self.fire_event(window, EventKind::CursorEntersSurface, &mut args);
    }

    fn on_cursor_leaves_surface(&mut self, window: WindowId, next: Option<WindowId>, payload: EventPayload) {
        if let Some(tip) = self.tooltip_window(window) {
            let entering_tip = next.map(|n| n == tip || self.is_ancestor(n, tip)).unwrap_or(false);
            if !entering_tip {
                self.set_tooltip_target(tip, None);
            }
        }
        self.behavior_cursor_left(window);
        let mut args = EventArgs::with_payload(Some(window), payload);
        self.fire_event(window, EventKind::CursorLeavesSurface, &mut args);
    }

    /// Name of the context default font.
    pub fn default_font_name(&self) -> Option<&str> { self.default_font.as_deref() }

    /// The context default font, else the first defined font.
    pub fn default_font(&self) -> Option<Rc<Font>> {
        match &self.default_font {
            Some(name) => self.fonts.get(name).ok(),
            None => self.fonts.first().map(|(_, font)| font),
        }
    }

    /// Sets the font used by windows without their own.
    pub fn set_default_font(&mut self, font: Option<&str>) -> Result<()> {
        if let Some(name) = font {
            self.fonts.get(name)?;
        }
        if self.default_font.as_deref() == font {
            return Ok(());
        }
        self.default_font = font.map(str::to_string);
        if let Some(root) = self.root {
            self.notify_default_font_changed(root);
        }
        let mut args = EventArgs::new(None);
        self.fire_context_event(EventKind::DefaultFontChanged, &mut args);
        Ok(())
    }

    fn notify_default_font_changed(&mut self, window: WindowId) {
        let Some(w) = self.manager.get(window) else { return };
        let children = w.children.clone();
        if w.font.is_none() {
            self.on_font_changed(window);
        }
        for child in children {
            self.notify_default_font_changed(child);
        }
    }

    /// Drops every reference the context holds to a window being torn down.
    pub(crate) fn on_window_destroyed(&mut self, window: WindowId) {
        let clear = |slot: &mut Option<WindowId>| {
            if *slot == Some(window) {
                *slot = None;
            }
        };
        clear(&mut self.root);
        clear(&mut self.capture);
        clear(&mut self.modal);
        clear(&mut self.pointer_window);
        clear(&mut self.default_tooltip);
        self.manager.forget_old_capture(window);
        self.mark_pointer_stale();
        self.mark_as_dirty();
    }
}
