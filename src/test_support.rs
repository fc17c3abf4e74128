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
//! Recording renderer used by the unit tests.
use super::*;
use std::{cell::RefCell, rc::Rc};

#[derive(Clone, Default)]
pub struct RenderLog {
    entries: Rc<RefCell<Vec<String>>>,
}

impl RenderLog {
    pub fn push(&self, entry: String) { self.entries.borrow_mut().push(entry) }
    pub fn entries(&self) -> Vec<String> { self.entries.borrow().clone() }
    pub fn count(&self, prefix: &str) -> usize { self.entries.borrow().iter().filter(|e| e.starts_with(prefix)).count() }
    pub fn clear(&self) { self.entries.borrow_mut().clear() }
}

pub struct MockBuffer {
    serial: usize,
    log: RenderLog,
    vertices: usize,
    alpha: f32,
    translation: (f32, f32),
    clip: PixelRect,
}

impl GeometryBuffer for MockBuffer {
    fn reset(&mut self) { self.vertices = 0 }
    fn append_vertices(&mut self, vertices: &[Vertex]) { self.vertices += vertices.len() }
    fn set_active_texture(&mut self, _texture: Option<TextureId>) {}
    fn set_clipping_region(&mut self, region: PixelRect) { self.clip = region }
    fn set_translation(&mut self, translation: Vec3f) { self.translation = (translation.x, translation.y) }
    fn set_alpha(&mut self, alpha: f32) { self.alpha = alpha }
    fn vertex_count(&self) -> usize { self.vertices }
    fn draw(&self) {
        self.log.push(format!(
            "draw_buffer #{} verts={} alpha={} at=({},{}) clip=({},{},{},{})",
            self.serial, self.vertices, self.alpha, self.translation.0, self.translation.1, self.clip.left, self.clip.top, self.clip.right, self.clip.bottom
        ))
    }
}

pub struct MockTarget {
    name: String,
    log: RenderLog,
    texture: TextureId,
}

impl RenderTarget for MockTarget {
    fn activate(&mut self) { self.log.push(format!("activate {}", self.name)) }
    fn deactivate(&mut self) { self.log.push(format!("deactivate {}", self.name)) }
}

impl TextureTarget for MockTarget {
    fn clear(&mut self) { self.log.push(format!("clear {}", self.name)) }
    fn declare_render_size(&mut self, size: PixelSize) { self.log.push(format!("declare {} {}x{}", self.name, size.width, size.height)) }
    fn texture(&self) -> TextureId { self.texture }
}

pub struct MockRenderer {
    log: RenderLog,
    display: PixelSize,
    default_target: MockTarget,
    next_serial: usize,
    pub supports_texture_targets: bool,
}

impl MockRenderer {
    pub fn new(log: RenderLog, display: PixelSize) -> Self {
        Self {
            default_target: MockTarget { name: "default".into(), log: log.clone(), texture: TextureId(0) },
            log,
            display,
            next_serial: 0,
            supports_texture_targets: true,
        }
    }
}

impl Renderer for MockRenderer {
    fn create_geometry_buffer(&mut self) -> Box<dyn GeometryBuffer> {
        self.next_serial += 1;
        self.log.push(format!("create_buffer #{}", self.next_serial));
        Box::new(MockBuffer {
            serial: self.next_serial,
            log: self.log.clone(),
            vertices: 0,
            alpha: 1.0,
            translation: (0.0, 0.0),
            clip: PixelRect::default(),
        })
    }

    fn destroy_geometry_buffer(&mut self, _buffer: Box<dyn GeometryBuffer>) { self.log.push("destroy_buffer".into()) }

    fn create_texture_target(&mut self) -> Option<Box<dyn TextureTarget>> {
        if !self.supports_texture_targets {
            return None;
        }
        self.next_serial += 1;
        self.log.push(format!("create_target #{}", self.next_serial));
        Some(Box::new(MockTarget { name: format!("target#{}", self.next_serial), log: self.log.clone(), texture: TextureId(self.next_serial as u32) }))
    }

    fn destroy_texture_target(&mut self, _target: Box<dyn TextureTarget>) { self.log.push("destroy_target".into()) }

    fn default_target(&mut self) -> &mut dyn RenderTarget { &mut self.default_target }

    fn display_size(&self) -> PixelSize { self.display }
}

/// A context over an 800x600 mock display, plus the log it records into.
pub fn mock_context() -> (GuiContext, RenderLog) { mock_context_sized(PixelSize::new(800.0, 600.0)) }

pub fn mock_context_sized(size: PixelSize) -> (GuiContext, RenderLog) {
    let log = RenderLog::default();
    let renderer = RendererHandle::new(MockRenderer::new(log.clone(), size));
    (GuiContext::new(renderer, ContextConfig::default()), log)
}

/// Creates a full-size `DefaultWindow` root.
pub fn with_root(ctx: &mut GuiContext) -> WindowId {
    let root = ctx.create_window("DefaultWindow", "root").unwrap();
    ctx.set_area(root, URect::from_parts(UDim::zero(), UDim::zero(), UDim::relative(1.0), UDim::relative(1.0))).unwrap();
    ctx.set_root_window(Some(root));
    root
}

/// Creates a window of `type_name` attached to `parent` with an absolute area.
pub fn child_at(ctx: &mut GuiContext, parent: WindowId, name: &str, x: f32, y: f32, w: f32, h: f32) -> WindowId {
    let id = ctx.create_window("DefaultWindow", name).unwrap();
    ctx.set_area(id, URect::from_parts(UDim::absolute(x), UDim::absolute(y), UDim::absolute(x + w), UDim::absolute(y + h))).unwrap();
    ctx.add_child(parent, id).unwrap();
    id
}

/// Subscribes a counter to `kind` on `window`; the counter sees every firing.
pub fn count_events(ctx: &mut GuiContext, window: WindowId, kind: EventKind) -> Rc<RefCell<usize>> {
    let counter = Rc::new(RefCell::new(0));
    let c = counter.clone();
    ctx.subscribe(window, kind, move |_, _| {
        *c.borrow_mut() += 1;
        false
    })
    .unwrap();
    counter
}

/// Records `(label, window)` pairs into `trace` whenever `kind` fires on `window`.
pub fn trace_events(ctx: &mut GuiContext, window: WindowId, kind: EventKind, label: &'static str, trace: &Rc<RefCell<Vec<String>>>) {
    let t = trace.clone();
    ctx.subscribe(window, kind, move |ctx, args| {
        let name = args.window.and_then(|w| ctx.window(w).ok()).map(|w| w.name().to_string()).unwrap_or_default();
        t.borrow_mut().push(format!("{}:{}", label, name));
        false
    })
    .unwrap();
}
