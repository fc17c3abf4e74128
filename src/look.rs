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
//! Skinning seams: widget looks shape a window's children and properties, window renderers
//! turn it into geometry.
use super::*;
use std::{collections::BTreeMap, rc::Rc};

/// Named skin for a window type.
pub trait WidgetLook {
    /// Registered name.
    fn name(&self) -> &str;
    /// Creates the children and properties the look needs.
    fn initialise_widget(&self, ctx: &mut GuiContext, window: WindowId) -> Result<()>;
    /// Removes what [`WidgetLook::initialise_widget`] created.
    fn clean_up_widget(&self, ctx: &mut GuiContext, window: WindowId);
    /// Re-positions the children the look created.
    fn layout_child_widgets(&self, ctx: &mut GuiContext, window: WindowId);
}

/// Produces the geometry of a window.
pub trait WindowRenderer {
    /// Factory name the renderer was created under.
    fn name(&self) -> &str;
    /// Appends the window's geometry, in window-local pixels.
    fn render(&self, ctx: &GuiContext, window: WindowId, geometry: &mut dyn GeometryBuffer);
    /// Client area in screen pixels; `None` means the outer rect.
    fn unclipped_inner_rect(&self, _ctx: &GuiContext, _window: WindowId) -> Option<PixelRect> { None }
    /// Time pulse.
    fn update(&mut self, _ctx: &mut GuiContext, _window: WindowId, _elapsed: f32) {}
    /// Called once the renderer is attached to `window`.
    fn on_attach(&mut self, _ctx: &mut GuiContext, _window: WindowId) {}
    /// Called before the renderer leaves `window`.
    fn on_detach(&mut self, _ctx: &mut GuiContext, _window: WindowId) {}
    /// Called after a look was assigned to the window.
    fn on_look_assigned(&mut self, _ctx: &mut GuiContext, _window: WindowId) {}
    /// Called before the look is removed from the window.
    fn on_look_unassigned(&mut self, _ctx: &mut GuiContext, _window: WindowId) {}
}

/// Creates window renderers of one kind.
pub type WindowRendererFactory = Box<dyn Fn() -> Box<dyn WindowRenderer>>;

/// Looks and window renderer factories known to a context.
pub struct LookRegistry {
    looks: BTreeMap<String, Rc<dyn WidgetLook>>,
    renderers: BTreeMap<String, WindowRendererFactory>,
}

impl Default for LookRegistry {
    fn default() -> Self {
        let mut renderers: BTreeMap<String, WindowRendererFactory> = BTreeMap::new();
        renderers.insert(FrameRenderer::NAME.into(), Box::new(|| Box::new(FrameRenderer::default())));
        Self { looks: BTreeMap::new(), renderers }
    }
}

impl LookRegistry {
    /// Returns `true` if a look called `name` exists.
    pub fn is_look_defined(&self, name: &str) -> bool { self.looks.contains_key(name) }

    /// Returns `true` if a renderer factory called `name` exists.
    pub fn is_renderer_available(&self, name: &str) -> bool { self.renderers.contains_key(name) }

    fn look(&self, name: &str) -> Result<Rc<dyn WidgetLook>> {
        self.looks.get(name).cloned().ok_or_else(|| Error::UnknownObject(format!("widget look '{}' is not defined", name)))
    }
}

/// Solid box with an optional border; the border is excluded from the client area.
pub struct FrameRenderer {
    /// Fill colour.
    pub colour: Color4b,
    /// Border width in pixels.
    pub border: f32,
}

impl FrameRenderer {
    /// Factory name.
    pub const NAME: &'static str = "Core/Frame";
}

impl Default for FrameRenderer {
    fn default() -> Self { Self { colour: color4b(0x80, 0x80, 0x80, 0xff), border: 4.0 } }
}

impl WindowRenderer for FrameRenderer {
    fn name(&self) -> &str { Self::NAME }

    fn render(&self, ctx: &GuiContext, window: WindowId, geometry: &mut dyn GeometryBuffer) {
        let Ok(w) = ctx.window(window) else { return };
        let area = PixelRect::from_size(w.pixel_size());
        geometry.set_active_texture(None);
        geometry.append_vertices(&quad_vertices(area, PixelRect::default(), self.colour));
    }

    fn unclipped_inner_rect(&self, ctx: &GuiContext, window: WindowId) -> Option<PixelRect> { Some(ctx.unclipped_outer_rect(window).inset(self.border)) }
}

/// Look described by data: property definitions and auto children at fixed areas.
#[derive(Debug, Clone)]
pub struct WidgetLookFeel {
    name: String,
    properties: Vec<(String, String)>,
    children: Vec<ChildSpec>,
}

#[derive(Debug, Clone)]
struct ChildSpec {
    window_type: String,
    suffix: String,
    area: URect,
    non_client: bool,
}

impl WidgetLookFeel {
    /// Empty look called `name`.
    pub fn new(name: &str) -> Self { Self { name: name.to_string(), properties: Vec::new(), children: Vec::new() } }

    /// Adds a property definition created on every window using the look.
    pub fn with_property(mut self, name: &str, default: &str) -> Self {
        self.properties.push((name.to_string(), default.to_string()));
        self
    }

    /// Adds an auto child named `<window name><suffix>` placed at `area`.
    pub fn with_child(mut self, window_type: &str, suffix: &str, area: URect) -> Self {
        self.children.push(ChildSpec { window_type: window_type.to_string(), suffix: suffix.to_string(), area, non_client: false });
        self
    }

    /// Like [`WidgetLookFeel::with_child`], but the child is placed over the frame rather than the client area.
    pub fn with_non_client_child(mut self, window_type: &str, suffix: &str, area: URect) -> Self {
        self.children.push(ChildSpec { window_type: window_type.to_string(), suffix: suffix.to_string(), area, non_client: true });
        self
    }

    fn child_of(&self, ctx: &GuiContext, window: WindowId, spec: &ChildSpec) -> Option<WindowId> {
        let name = format!("{}{}", ctx.window(window).ok()?.name(), spec.suffix);
        ctx.child_by_name(window, &name).ok()
    }
}

impl WidgetLook for WidgetLookFeel {
    fn name(&self) -> &str { &self.name }

    fn initialise_widget(&self, ctx: &mut GuiContext, window: WindowId) -> Result<()> {
        for (name, default) in &self.properties {
            ctx.add_property(window, name, default)?;
        }
        for spec in &self.children {
            let child = ctx.create_auto_child(window, &spec.window_type, &spec.suffix)?;
            ctx.set_non_client(child, spec.non_client)?;
            ctx.set_area(child, spec.area)?;
        }
        Ok(())
    }

    fn clean_up_widget(&self, ctx: &mut GuiContext, window: WindowId) {
        for spec in &self.children {
            if let Some(child) = self.child_of(ctx, window, spec) {
                ctx.destroy(child);
            }
        }
        for (name, _) in &self.properties {
            ctx.remove_property(window, name);
        }
    }

    fn layout_child_widgets(&self, ctx: &mut GuiContext, window: WindowId) {
        for spec in &self.children {
            if let Some(child) = self.child_of(ctx, window, spec) {
                if let Err(err) = ctx.set_area(child, spec.area) {
                    warn!("laying out '{}': {}", spec.suffix, err);
                }
            }
        }
    }
}

impl GuiContext {
    /// Registered looks and renderer factories.
    pub fn looks(&self) -> &LookRegistry { &self.looks }

    /// Registers a look.
    pub fn define_look<L: WidgetLook + 'static>(&mut self, look: L) -> Result<()> {
        let name = look.name().to_string();
        if self.looks.looks.contains_key(&name) {
            return Err(Error::AlreadyExists(format!("widget look '{}'", name)));
        }
        self.looks.looks.insert(name, Rc::new(look));
        Ok(())
    }

    /// Registers a window renderer factory.
    pub fn register_window_renderer<F>(&mut self, name: &str, factory: F) -> Result<()>
    where
        F: Fn() -> Box<dyn WindowRenderer> + 'static,
    {
        if self.looks.renderers.contains_key(name) {
            return Err(Error::AlreadyExists(format!("window renderer '{}'", name)));
        }
        self.looks.renderers.insert(name.to_string(), Box::new(factory));
        Ok(())
    }

    /// Replaces the window renderer of `window` with a fresh one from the `name` factory.
    pub fn set_window_renderer(&mut self, window: WindowId, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidRequest("window renderer name must not be empty".into()));
        }
        if self.window(window)?.window_renderer_name() == Some(name) {
            return Ok(());
        }
        let factory = self.looks.renderers.get(name).ok_or_else(|| Error::UnknownObject(format!("window renderer '{}' is not registered", name)))?;
        let mut renderer = factory();

        if let Some(mut old) = self.manager.get_mut(window).and_then(|w| w.window_renderer.take()) {
            old.on_detach(self, window);
            self.notify(window, EventKind::WindowRendererDetached);
        }
        renderer.on_attach(self, window);
        self.window_mut(window)?.window_renderer = Some(renderer);
        self.notify(window, EventKind::WindowRendererAttached);
        self.bump_generation();
        self.invalidate(window, false);
        Ok(())
    }

    /// Assigns the look `look` to `window`, replacing the current one.
    pub fn set_look_n_feel(&mut self, window: WindowId, look: &str) -> Result<()> {
        let w = self.window(window)?;
        if w.window_renderer.is_none() {
            return Err(Error::NullObject(format!("'{}' has no window renderer to apply look '{}'", w.name, look)));
        }
        if w.look_name == look {
            return Ok(());
        }
        let new_look = self.looks.look(look)?;
        if !w.look_name.is_empty() {
            self.clean_up_look(window);
        }

        self.window_mut(window)?.look_name = look.to_string();
        info!("look '{}' assigned to '{}'", look, self.name_of(window));
        new_look.initialise_widget(self, window)?;
        self.with_window_renderer(window, |r, ctx| r.on_look_assigned(ctx, window));
        self.perform_child_window_layout(window);
        self.invalidate(window, false);
        Ok(())
    }

    /// Undoes the current look of `window`.
    pub(crate) fn clean_up_look(&mut self, window: WindowId) {
        let Some(name) = self.manager.get(window).map(|w| w.look_name.clone()).filter(|n| !n.is_empty()) else { return };
        self.with_window_renderer(window, |r, ctx| r.on_look_unassigned(ctx, window));
        match self.looks.look(&name) {
            Ok(look) => look.clean_up_widget(self, window),
            Err(err) => warn!("cleaning up '{}': {}", self.name_of(window), err),
        }
        if let Some(w) = self.manager.get_mut(window) {
            w.look_name.clear();
        }
    }

    /// Lets the look place the children it created.
    pub(crate) fn perform_child_window_layout(&mut self, window: WindowId) {
        let Some(name) = self.manager.get(window).map(|w| w.look_name.clone()).filter(|n| !n.is_empty()) else { return };
        if let Ok(look) = self.looks.look(&name) {
            look.layout_child_widgets(self, window);
        }
    }

    fn with_window_renderer<F: FnOnce(&mut dyn WindowRenderer, &mut GuiContext)>(&mut self, window: WindowId, f: F) {
        let Some(mut renderer) = self.manager.get_mut(window).and_then(|w| w.window_renderer.take()) else { return };
        f(renderer.as_mut(), self);
        if let Some(w) = self.manager.get_mut(window) {
            w.window_renderer = Some(renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn frame_look() -> WidgetLookFeel {
        WidgetLookFeel::new("Test/Frame").with_property("FrameColour", "ff808080").with_non_client_child(
            "PushButton",
            "__auto_close__",
            URect::from_parts(UDim::new(1.0, -20.0), UDim::zero(), UDim::relative(1.0), UDim::absolute(20.0)),
        )
    }

    #[test]
    fn renderer_and_look_preconditions() {
        let (mut ctx, _) = mock_context();
        ctx.define_look(frame_look()).unwrap();
        let w = ctx.create_window("FrameWindow", "f").unwrap();
        assert!(matches!(ctx.set_window_renderer(w, ""), Err(Error::InvalidRequest(_))));
        assert!(matches!(ctx.set_window_renderer(w, "Core/Nope"), Err(Error::UnknownObject(_))));
        assert!(matches!(ctx.set_look_n_feel(w, "Test/Frame"), Err(Error::NullObject(_))));
        ctx.set_window_renderer(w, FrameRenderer::NAME).unwrap();
        assert!(matches!(ctx.set_look_n_feel(w, "Test/Nope"), Err(Error::UnknownObject(_))));
        assert!(matches!(ctx.define_look(frame_look()), Err(Error::AlreadyExists(_))));
    }

    #[test]
    fn mapped_type_gets_look_children_and_properties() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        ctx.define_look(frame_look()).unwrap();
        ctx.add_falagard_mapping("Test/FrameWindow", "FrameWindow", "Test/Frame", FrameRenderer::NAME).unwrap();
        let f = ctx.create_window("Test/FrameWindow", "f").unwrap();
        ctx.add_child(root, f).unwrap();
        ctx.set_area(f, URect::from_parts(UDim::absolute(100.0), UDim::absolute(100.0), UDim::absolute(300.0), UDim::absolute(200.0))).unwrap();

        let w = ctx.window(f).unwrap();
        assert_eq!(w.falagard_type(), "Test/FrameWindow");
        assert_eq!(w.type_name(), "FrameWindow");
        assert_eq!(w.look_name(), "Test/Frame");
        assert_eq!(w.window_renderer_name(), Some(FrameRenderer::NAME));
        assert_eq!(ctx.get_property(f, "FrameColour").unwrap(), "ff808080");

        let close = ctx.get_window("f__auto_close__").unwrap();
        assert!(ctx.window(close).unwrap().is_auto_window());
        assert!(ctx.window(close).unwrap().is_non_client());
        assert_eq!(ctx.unclipped_outer_rect(close), PixelRect::new(280.0, 100.0, 300.0, 120.0));

        ctx.set_width(f, UDim::absolute(400.0)).unwrap();
        assert_eq!(ctx.unclipped_outer_rect(close).left, 480.0);
    }

    #[test]
    fn client_look_children_sit_inside_the_frame() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let area = URect::from_parts(UDim::new(1.0, -20.0), UDim::zero(), UDim::relative(1.0), UDim::absolute(20.0));
        ctx.define_look(WidgetLookFeel::new("Test/Panel").with_child("PushButton", "__auto_pin__", area)).unwrap();
        let f = child_at(&mut ctx, root, "f", 100.0, 100.0, 200.0, 100.0);
        ctx.set_window_renderer(f, FrameRenderer::NAME).unwrap();
        ctx.set_look_n_feel(f, "Test/Panel").unwrap();
        let pin = ctx.get_window("f__auto_pin__").unwrap();
        assert!(!ctx.window(pin).unwrap().is_non_client());
        assert_eq!(ctx.unclipped_outer_rect(pin), PixelRect::new(276.0, 104.0, 296.0, 124.0));
    }

    #[test]
    fn frame_renderer_insets_the_client_area() {
        let (mut ctx, log) = mock_context();
        let root = with_root(&mut ctx);
        let f = child_at(&mut ctx, root, "f", 10.0, 10.0, 100.0, 50.0);
        ctx.set_window_renderer(f, FrameRenderer::NAME).unwrap();
        assert_eq!(ctx.unclipped_inner_rect(f), PixelRect::new(14.0, 14.0, 106.0, 56.0));
        ctx.draw();
        assert_eq!(log.count("draw_buffer #2 verts=6"), 1);
    }

    #[test]
    fn replacing_the_look_cleans_up_the_old_one() {
        let (mut ctx, _) = mock_context();
        ctx.define_look(frame_look()).unwrap();
        ctx.define_look(WidgetLookFeel::new("Test/Plain")).unwrap();
        let f = ctx.create_window("FrameWindow", "f").unwrap();
        ctx.set_window_renderer(f, FrameRenderer::NAME).unwrap();
        ctx.set_look_n_feel(f, "Test/Frame").unwrap();
        assert!(ctx.is_alive("f__auto_close__"));
        ctx.set_look_n_feel(f, "Test/Plain").unwrap();
        assert!(!ctx.is_alive("f__auto_close__"));
        assert!(matches!(ctx.get_property(f, "FrameColour"), Err(Error::UnknownObject(_))));
    }

    #[test]
    fn destroying_detaches_the_renderer() {
        let (mut ctx, _) = mock_context();
        let f = ctx.create_window("FrameWindow", "f").unwrap();
        ctx.set_window_renderer(f, FrameRenderer::NAME).unwrap();
        let detached = count_events(&mut ctx, f, EventKind::WindowRendererDetached);
        ctx.destroy(f);
        assert_eq!(*detached.borrow(), 1);
    }
}
