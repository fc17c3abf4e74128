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
//! The window node and the tree operations the [`GuiContext`] runs over it.
use super::*;
use slotmap::new_key_type;
use std::{
    cell::Cell,
    collections::{BTreeMap, BTreeSet},
};

mod area;
mod destroy;
mod dispatch;
mod draw;
mod state;
mod tree;
mod zorder;

pub use draw::RenderingContext;

new_key_type! {
    /// Generational handle of a window inside its context.
    pub struct WindowId;
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Per-window options.
    pub struct WindowFlags : u32 {
        /// The window is shown when its ancestors are.
        const VISIBLE = 1 << 0;
        /// The window refuses input.
        const DISABLED = 1 << 1;
        /// The window holds activation among its siblings.
        const ACTIVE = 1 << 2;
        /// The window stays above normal siblings.
        const ALWAYS_ON_TOP = 1 << 3;
        /// Geometry and hit area are clipped to the parent.
        const CLIPPED_BY_PARENT = 1 << 4;
        /// Activation may change the draw order.
        const Z_ORDERING = 1 << 5;
        /// Clicking brings the window forward.
        const RISE_ON_CLICK = 1 << 6;
        /// Alpha is multiplied with the parent's.
        const INHERITS_ALPHA = 1 << 7;
        /// The window sits in the parent's non-client area.
        const NON_CLIENT = 1 << 8;
        /// The parent destroys the window along with itself.
        const DESTROYED_BY_PARENT = 1 << 9;
        /// Pointer hits fall through to what is behind.
        const CURSOR_PASS_THROUGH = 1 << 10;
        /// Releasing capture gives it back to the previous holder.
        const RESTORE_OLD_CAPTURE = 1 << 11;
        /// Captured input is offered to the descendant under the pointer.
        const DISTRIBUTE_CAPTURED_INPUTS = 1 << 12;
        /// Unhandled pointer input bubbles to the parent.
        const PROPAGATE_POINTER_INPUTS = 1 << 13;
        /// Held buttons re-fire press events.
        const AUTO_REPEAT = 1 << 14;
        /// An empty tooltip text falls back to the parent's.
        const INHERITS_TOOLTIP_TEXT = 1 << 15;
        /// The window was created by its parent's look.
        const AUTO_WINDOW = 1 << 16;
        /// The window is written out by the XML serializer.
        const WRITE_XML = 1 << 17;
        /// The window renders through its own texture-backed surface.
        const AUTO_RENDERING_SURFACE = 1 << 18;
        /// Sizes and positions are rounded to whole pixels.
        const PIXEL_ALIGNED = 1 << 19;
    }
}

impl WindowFlags {
    /// Options of a freshly created window.
    pub const fn defaults() -> Self {
        Self::VISIBLE
            .union(Self::CLIPPED_BY_PARENT)
            .union(Self::Z_ORDERING)
            .union(Self::RISE_ON_CLICK)
            .union(Self::INHERITS_ALPHA)
            .union(Self::DESTROYED_BY_PARENT)
            .union(Self::INHERITS_TOOLTIP_TEXT)
            .union(Self::WRITE_XML)
            .union(Self::PIXEL_ALIGNED)
    }
}

/// When the time pulse reaches a window.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum UpdateMode {
    /// Every pulse.
    Always,
    /// Never.
    Never,
    /// Only while effectively visible.
    #[default]
    Visible,
}

/// Value cached against the context's layout generation.
pub(crate) struct Memo<T: Copy> {
    slot: Cell<Option<(u64, T)>>,
}

impl<T: Copy> Default for Memo<T> {
    fn default() -> Self { Self { slot: Cell::new(None) } }
}

impl<T: Copy> Memo<T> {
    pub(crate) fn get_or(&self, generation: u64, compute: impl FnOnce() -> T) -> T {
        match self.slot.get() {
            Some((g, v)) if g == generation => v,
            _ => {
                let v = compute();
                self.slot.set(Some((generation, v)));
                v
            }
        }
    }
}

#[derive(Default)]
pub(crate) struct RectCache {
    pub(crate) unclipped_outer: Memo<PixelRect>,
    pub(crate) unclipped_inner: Memo<PixelRect>,
    pub(crate) outer_clipper: Memo<PixelRect>,
    pub(crate) inner_clipper: Memo<PixelRect>,
    pub(crate) hit_test: Memo<PixelRect>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AutoRepeat {
    pub(crate) button: Option<CursorInputSource>,
    pub(crate) delay: f32,
    pub(crate) rate: f32,
    pub(crate) elapsed: f32,
    pub(crate) repeating: bool,
}

impl Default for AutoRepeat {
    fn default() -> Self { Self { button: None, delay: 0.3, rate: 0.06, elapsed: 0.0, repeating: false } }
}

pub(crate) struct CustomProperty {
    pub(crate) value: String,
    pub(crate) default: String,
}

/// One node of the window tree.
pub struct Window {
    pub(crate) type_name: String,
    pub(crate) falagard_type: String,
    pub(crate) name: String,
    pub(crate) id: u32,

    pub(crate) parent: Option<WindowId>,
    pub(crate) children: Vec<WindowId>,
    pub(crate) draw_list: Vec<WindowId>,

    pub(crate) area: URect,
    pub(crate) pixel_size: PixelSize,
    pub(crate) min_size: USize,
    pub(crate) max_size: USize,
    pub(crate) horizontal_alignment: HorizontalAlignment,
    pub(crate) vertical_alignment: VerticalAlignment,
    pub(crate) cache: RectCache,

    pub(crate) flags: WindowFlags,
    pub(crate) alpha: f32,
    pub(crate) update_mode: UpdateMode,
    pub(crate) auto_repeat: AutoRepeat,
    pub(crate) old_capture: Option<WindowId>,

    pub(crate) geometry: Option<Box<dyn GeometryBuffer>>,
    pub(crate) surface: Option<SurfaceId>,
    pub(crate) needs_redraw: bool,

    pub(crate) text: WindowText,
    pub(crate) font: Option<String>,
    pub(crate) tooltip_text: String,
    pub(crate) custom_tooltip: Option<WindowId>,
    pub(crate) look_name: String,
    pub(crate) window_renderer: Option<Box<dyn WindowRenderer>>,
    pub(crate) custom_properties: BTreeMap<String, CustomProperty>,
    pub(crate) banned_properties: BTreeSet<String>,
    pub(crate) user_strings: BTreeMap<String, String>,

    pub(crate) behavior: Behavior,
    pub(crate) events: EventSet,
    pub(crate) destruction_started: bool,
}

impl Window {
    pub(crate) fn new(type_name: &str, name: &str, geometry: Box<dyn GeometryBuffer>) -> Self {
        Self {
            type_name: type_name.to_string(),
            falagard_type: String::new(),
            name: name.to_string(),
            id: 0,
            parent: None,
            children: Vec::new(),
            draw_list: Vec::new(),
            area: URect::default(),
            pixel_size: PixelSize::default(),
            min_size: USize::zero(),
            max_size: USize::zero(),
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
            cache: RectCache::default(),
            flags: WindowFlags::defaults(),
            alpha: 1.0,
            update_mode: UpdateMode::Visible,
            auto_repeat: AutoRepeat::default(),
            old_capture: None,
            geometry: Some(geometry),
            surface: None,
            needs_redraw: true,
            text: WindowText::new(),
            font: None,
            tooltip_text: String::new(),
            custom_tooltip: None,
            look_name: String::new(),
            window_renderer: None,
            custom_properties: BTreeMap::new(),
            banned_properties: BTreeSet::new(),
            user_strings: BTreeMap::new(),
            behavior: Behavior::Plain,
            events: EventSet::default(),
            destruction_started: false,
        }
    }

    /// Widget type the window was created as.
    pub fn type_name(&self) -> &str { &self.type_name }
    /// Skin-qualified type, empty when the window was not created through a mapping.
    pub fn falagard_type(&self) -> &str { &self.falagard_type }
    /// Registry-unique name.
    pub fn name(&self) -> &str { &self.name }
    /// Application defined numeric id; not required to be unique.
    pub fn id(&self) -> u32 { self.id }
    /// Parent window, if attached.
    pub fn parent(&self) -> Option<WindowId> { self.parent }
    /// Children in attachment order.
    pub fn children(&self) -> &[WindowId] { &self.children }
    /// Children in z order, back to front.
    pub fn draw_list(&self) -> &[WindowId] { &self.draw_list }
    /// Number of attached children.
    pub fn child_count(&self) -> usize { self.children.len() }
    /// Area in parent-relative scaled units.
    pub fn area(&self) -> URect { self.area }
    /// Scaled position.
    pub fn position(&self) -> UVector2 { self.area.min }
    /// Scaled size, after min/max constraints.
    pub fn size(&self) -> USize { self.area.size() }
    /// Resolved size in pixels.
    pub fn pixel_size(&self) -> PixelSize { self.pixel_size }
    /// Minimum size constraint.
    pub fn min_size(&self) -> USize { self.min_size }
    /// Maximum size constraint; zero components are unbounded.
    pub fn max_size(&self) -> USize { self.max_size }
    /// Horizontal alignment inside the parent.
    pub fn horizontal_alignment(&self) -> HorizontalAlignment { self.horizontal_alignment }
    /// Vertical alignment inside the parent.
    pub fn vertical_alignment(&self) -> VerticalAlignment { self.vertical_alignment }
    /// All option bits.
    pub fn flags(&self) -> WindowFlags { self.flags }
    /// Own alpha, before inheritance.
    pub fn alpha(&self) -> f32 { self.alpha }
    /// Time pulse policy.
    pub fn update_mode(&self) -> UpdateMode { self.update_mode }
    /// Logical text.
    pub fn text(&self) -> &str { self.text.logical() }
    /// Text in display order.
    pub fn text_visual(&self) -> String { self.text.visual() }
    /// Text broken into display lines.
    pub fn rendered_text(&self) -> RenderedString { self.text.rendered() }
    /// Own font name, without fallback.
    pub fn font_name(&self) -> Option<&str> { self.font.as_deref() }
    /// Own tooltip text, without inheritance.
    pub fn tooltip_text(&self) -> &str { &self.tooltip_text }
    /// Assigned look name, empty if none.
    pub fn look_name(&self) -> &str { &self.look_name }
    /// Name of the attached window renderer.
    pub fn window_renderer_name(&self) -> Option<&str> { self.window_renderer.as_ref().map(|r| r.name()) }
    /// Behaviour state.
    pub fn behavior(&self) -> &Behavior { &self.behavior }
    /// Subscribers of this window.
    pub fn events(&self) -> &EventSet { &self.events }
    /// Surface owned by this window, if any.
    pub fn rendering_surface(&self) -> Option<SurfaceId> { self.surface }
    /// Returns `true` until the next geometry population.
    pub fn needs_redraw(&self) -> bool { self.needs_redraw }
    /// Returns `true` once teardown began.
    pub fn is_destruction_started(&self) -> bool { self.destruction_started }

    /// Own visibility flag; see [`GuiContext::is_effective_visible`].
    pub fn is_visible(&self) -> bool { self.flags.contains(WindowFlags::VISIBLE) }
    /// Own disabled flag; see [`GuiContext::is_effective_disabled`].
    pub fn is_disabled(&self) -> bool { self.flags.contains(WindowFlags::DISABLED) }
    /// Returns `true` if the window stays above normal siblings.
    pub fn is_always_on_top(&self) -> bool { self.flags.contains(WindowFlags::ALWAYS_ON_TOP) }
    /// Returns `true` if clipped to the parent.
    pub fn is_clipped_by_parent(&self) -> bool { self.flags.contains(WindowFlags::CLIPPED_BY_PARENT) }
    /// Returns `true` if activation may reorder the window.
    pub fn is_z_ordering_enabled(&self) -> bool { self.flags.contains(WindowFlags::Z_ORDERING) }
    /// Returns `true` if clicks raise the window.
    pub fn is_rise_on_click_enabled(&self) -> bool { self.flags.contains(WindowFlags::RISE_ON_CLICK) }
    /// Returns `true` if alpha is inherited.
    pub fn inherits_alpha(&self) -> bool { self.flags.contains(WindowFlags::INHERITS_ALPHA) }
    /// Returns `true` for non-client content.
    pub fn is_non_client(&self) -> bool { self.flags.contains(WindowFlags::NON_CLIENT) }
    /// Returns `true` if the parent destroys this window.
    pub fn is_destroyed_by_parent(&self) -> bool { self.flags.contains(WindowFlags::DESTROYED_BY_PARENT) }
    /// Returns `true` if pointer hits pass through.
    pub fn is_cursor_pass_through_enabled(&self) -> bool { self.flags.contains(WindowFlags::CURSOR_PASS_THROUGH) }
    /// Returns `true` if releasing capture restores the previous holder.
    pub fn restores_old_capture(&self) -> bool { self.flags.contains(WindowFlags::RESTORE_OLD_CAPTURE) }
    /// Returns `true` if captured input is distributed to descendants.
    pub fn distributes_captured_inputs(&self) -> bool { self.flags.contains(WindowFlags::DISTRIBUTE_CAPTURED_INPUTS) }
    /// Returns `true` if unhandled pointer input bubbles.
    pub fn is_pointer_propagation_enabled(&self) -> bool { self.flags.contains(WindowFlags::PROPAGATE_POINTER_INPUTS) }
    /// Returns `true` if held buttons repeat.
    pub fn is_auto_repeat_enabled(&self) -> bool { self.flags.contains(WindowFlags::AUTO_REPEAT) }
    /// Returns `true` if tooltip text is inherited.
    pub fn inherits_tooltip_text(&self) -> bool { self.flags.contains(WindowFlags::INHERITS_TOOLTIP_TEXT) }
    /// Returns `true` for look-created children.
    pub fn is_auto_window(&self) -> bool { self.flags.contains(WindowFlags::AUTO_WINDOW) }
    /// Returns `true` if the serializer writes this window.
    pub fn is_writing_xml_allowed(&self) -> bool { self.flags.contains(WindowFlags::WRITE_XML) }
    /// Returns `true` if the window asked for its own surface.
    pub fn is_auto_rendering_surface_enabled(&self) -> bool { self.flags.contains(WindowFlags::AUTO_RENDERING_SURFACE) }
    /// Returns `true` if geometry is pixel aligned.
    pub fn is_pixel_aligned(&self) -> bool { self.flags.contains(WindowFlags::PIXEL_ALIGNED) }
    /// Auto-repeat delay in seconds.
    pub fn auto_repeat_delay(&self) -> f32 { self.auto_repeat.delay }
    /// Auto-repeat interval in seconds.
    pub fn auto_repeat_rate(&self) -> f32 { self.auto_repeat.rate }

    /// Looks up a user string.
    pub fn user_string(&self, name: &str) -> Result<&str> {
        self.user_strings
            .get(name)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::UnknownObject(format!("user string '{}' is not defined for window '{}'", name, self.name)))
    }

    /// Returns `true` if a user string named `name` exists.
    pub fn is_user_string_defined(&self, name: &str) -> bool { self.user_strings.contains_key(name) }

    /// Returns `true` if `name` is excluded from serialization.
    pub fn is_property_banned_from_xml(&self, name: &str) -> bool { self.banned_properties.contains(name) }
}

impl GuiContext {
    /// Sets an arbitrary named string on `window`.
    pub fn set_user_string(&mut self, window: WindowId, name: &str, value: &str) -> Result<()> {
        self.window_mut(window)?.user_strings.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Sets the application id.
    pub fn set_id(&mut self, window: WindowId, id: u32) -> Result<()> {
        let w = self.window_mut(window)?;
        if w.id == id {
            return Ok(());
        }
        w.id = id;
        self.notify(window, EventKind::IdChanged);
        Ok(())
    }

    /// Sets the time pulse policy.
    pub fn set_update_mode(&mut self, window: WindowId, mode: UpdateMode) -> Result<()> {
        self.window_mut(window)?.update_mode = mode;
        Ok(())
    }

    /// Sets whether the serializer writes `window`.
    pub fn set_writing_xml_allowed(&mut self, window: WindowId, allowed: bool) -> Result<()> {
        self.window_mut(window)?.flags.set(WindowFlags::WRITE_XML, allowed);
        Ok(())
    }
}
