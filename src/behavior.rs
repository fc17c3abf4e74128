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
//! Built-in per-type behaviour: push buttons and tooltips.
use super::*;

/// Hover and push state of a push button.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    hovering: bool,
    pushed: bool,
}

impl ButtonState {
    /// Returns `true` while the pointer is over the button.
    pub fn is_hovering(&self) -> bool { self.hovering }
    /// Returns `true` between press and release.
    pub fn is_pushed(&self) -> bool { self.pushed }
}

/// Timer state of a tooltip window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipState {
    target: Option<WindowId>,
    active: bool,
    elapsed: f32,
    hover_time: f32,
    display_time: f32,
}

impl Default for TooltipState {
    fn default() -> Self { Self { target: None, active: false, elapsed: 0.0, hover_time: 0.4, display_time: 7.5 } }
}

impl TooltipState {
    /// Window whose tooltip text is shown.
    pub fn target(&self) -> Option<WindowId> { self.target }
    /// Returns `true` while the tooltip is displayed.
    pub fn is_active(&self) -> bool { self.active }
    /// Seconds of hovering before the tooltip appears.
    pub fn hover_time(&self) -> f32 { self.hover_time }
    /// Seconds the tooltip stays up; zero or less keeps it up indefinitely.
    pub fn display_time(&self) -> f32 { self.display_time }
}

/// Input and timer reactions layered on top of the generic window.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Behavior {
    /// No reaction beyond the generic window.
    #[default]
    Plain,
    /// Clickable button.
    PushButton(ButtonState),
    /// Hover tooltip.
    Tooltip(TooltipState),
}

impl GuiContext {
    fn button_state_mut(&mut self, window: WindowId) -> Option<&mut ButtonState> {
        match self.manager.get_mut(window).map(|w| &mut w.behavior) {
            Some(Behavior::PushButton(state)) => Some(state),
            _ => None,
        }
    }

    fn tooltip_state(&self, tip: WindowId) -> Option<&TooltipState> {
        match self.manager.get(tip).map(|w| &w.behavior) {
            Some(Behavior::Tooltip(state)) => Some(state),
            _ => None,
        }
    }

    fn tooltip_state_mut(&mut self, tip: WindowId) -> Option<&mut TooltipState> {
        match self.manager.get_mut(tip).map(|w| &mut w.behavior) {
            Some(Behavior::Tooltip(state)) => Some(state),
            _ => None,
        }
    }

    fn set_hovering(&mut self, window: WindowId, hovering: bool) {
        let Some(state) = self.button_state_mut(window) else { return };
        if state.hovering != hovering {
            state.hovering = hovering;
            self.invalidate(window, false);
        }
    }

    fn update_hover_state(&mut self, window: WindowId, position: Vec2f) {
        let hovering = match self.capture {
            Some(capture) if capture != window => false,
            _ => self.is_hit(window, position, false),
        };
        self.set_hovering(window, hovering);
    }

    pub(crate) fn behavior_cursor_move(&mut self, window: WindowId, args: &mut EventArgs) {
        if self.button_state_mut(window).is_some() {
            let position = args.cursor_position().unwrap_or(self.pointer_position);
            self.update_hover_state(window, position);
            args.handled += 1;
        }
    }

    pub(crate) fn behavior_cursor_press(&mut self, window: WindowId, args: &mut EventArgs) {
        if self.button_state_mut(window).is_none() || args.cursor_source() != Some(CursorInputSource::Left) {
            return;
        }
        if self.capture_input(window) {
            if let Some(state) = self.button_state_mut(window) {
                state.pushed = true;
            }
            self.update_hover_state(window, self.pointer_position);
            self.invalidate(window, false);
        }
        args.handled += 1;
    }

    pub(crate) fn behavior_cursor_activate(&mut self, window: WindowId, args: &mut EventArgs) {
        let Some(state) = self.button_state_mut(window) else { return };
        if args.cursor_source() != Some(CursorInputSource::Left) {
            return;
        }
        if state.pushed {
            let under = self.root.and_then(|root| self.target_child_at_position(root, self.pointer_position, false));
            if under == Some(window) {
                debug!("'{}' clicked", self.name_of(window));
                self.notify(window, EventKind::Clicked);
            }
        }
        self.release_input(window);
        if let Some(state) = self.button_state_mut(window) {
            state.pushed = false;
        }
        args.handled += 1;
    }

    pub(crate) fn behavior_cursor_left(&mut self, window: WindowId) { self.set_hovering(window, false); }

    pub(crate) fn behavior_capture_lost(&mut self, window: WindowId) {
        let Some(state) = self.button_state_mut(window) else { return };
        if state.pushed {
            state.pushed = false;
            self.invalidate(window, false);
        }
        let over = self.pointer_window == Some(window);
        self.set_hovering(window, over);
    }

    pub(crate) fn update_behavior(&mut self, window: WindowId, elapsed: f32) {
        let Some(state) = self.tooltip_state(window).copied() else { return };
        let text = state.target.map(|t| self.tooltip_text_including_inheritance(t)).unwrap_or_default();
        if state.active {
            if text.is_empty() {
                self.switch_tooltip_inactive(window);
            } else if state.display_time > 0.0 && state.elapsed + elapsed >= state.display_time {
                self.switch_tooltip_inactive(window);
            } else if let Some(s) = self.tooltip_state_mut(window) {
                s.elapsed += elapsed;
            }
        } else if !text.is_empty() {
            let due = match self.tooltip_state_mut(window) {
                Some(s) => {
                    s.elapsed += elapsed;
                    s.elapsed >= s.hover_time
                }
                None => false,
            };
            if due {
                self.switch_tooltip_active(window);
            }
        }
    }

    fn switch_tooltip_active(&mut self, tip: WindowId) {
        self.position_tooltip(tip);
        if let Err(err) = self.show(tip) {
            warn!("showing tooltip '{}': {}", self.name_of(tip), err);
        }
        if let Some(s) = self.tooltip_state_mut(tip) {
            s.active = true;
            s.elapsed = 0.0;
        }
        self.notify(tip, EventKind::TooltipActive);
    }

    fn switch_tooltip_inactive(&mut self, tip: WindowId) {
        if let Err(err) = self.hide(tip) {
            warn!("hiding tooltip '{}': {}", self.name_of(tip), err);
        }
        if let Some(s) = self.tooltip_state_mut(tip) {
            s.active = false;
            s.elapsed = 0.0;
        }
        // target is still readable by the handlers
        self.notify(tip, EventKind::TooltipInactive);
        if let Some(s) = self.tooltip_state_mut(tip) {
            s.target = None;
        }
    }

    fn size_tooltip(&mut self, tip: WindowId) {
        let Some(w) = self.manager.get(tip) else { return };
        let text = w.rendered_text().plain_text();
        let size = match self.font(tip, true) {
            Some(font) => PixelSize::new(font.text_extent(&text), font.text_height(&text)),
            None => PixelSize::default(),
        };
        if let Err(err) = self.set_size(tip, USize::new(UDim::absolute(size.width), UDim::absolute(size.height))) {
            warn!("sizing tooltip '{}': {}", self.name_of(tip), err);
        }
    }

    fn position_tooltip(&mut self, tip: WindowId) {
        let size = self.unclipped_outer_rect(tip).size();
        let screen = PixelRect::from_size(self.surface_size);
        let cursor = self.pointer_position;
        let mut x = cursor.x;
        let mut y = cursor.y;
        if screen.right < x + size.width {
            x = cursor.x - size.width - 5.0;
        }
        if screen.bottom < y + size.height {
            y = cursor.y - size.height - 5.0;
        }
        if let Err(err) = self.set_position(tip, UVector2::new(UDim::absolute(x), UDim::absolute(y))) {
            warn!("positioning tooltip '{}': {}", self.name_of(tip), err);
        }
    }

    /// Tooltip shown for `window`: its own if it has one, else the context default.
    pub fn tooltip_window(&self, window: WindowId) -> Option<WindowId> {
        self.manager.get(window).and_then(|w| w.custom_tooltip).or(self.default_tooltip).filter(|t| self.manager.contains(*t))
    }

    /// Window the tooltip `tip` currently describes.
    pub fn tooltip_target(&self, tip: WindowId) -> Option<WindowId> { self.tooltip_state(tip).and_then(|s| s.target) }

    /// Returns `true` while `tip` is displayed.
    pub fn is_tooltip_active(&self, tip: WindowId) -> bool { self.tooltip_state(tip).map(|s| s.active).unwrap_or(false) }

    /// Points `tip` at `target`, adopting its text. `None` only forgets the target.
    pub(crate) fn set_tooltip_target(&mut self, tip: WindowId, target: Option<WindowId>) {
        let Some(state) = self.tooltip_state(tip).copied() else { return };
        match target {
            None => {
                if let Some(s) = self.tooltip_state_mut(tip) {
                    s.target = None;
                }
            }
            Some(target) if target != tip => {
                if state.target != Some(target) {
                    let parent = self.manager.get(tip).and_then(|w| w.parent);
                    if let Some(root) = self.root.filter(|r| parent != Some(*r) && *r != tip) {
                        if let Err(err) = self.add_child(root, tip) {
                            warn!("attaching tooltip '{}': {}", self.name_of(tip), err);
                        }
                    }
                    if let Some(s) = self.tooltip_state_mut(tip) {
                        s.target = Some(target);
                    }
                }
                let text = self.tooltip_text_including_inheritance(target);
                if let Err(err) = self.set_text(tip, &text) {
                    warn!("setting tooltip text: {}", err);
                }
                self.size_tooltip(tip);
                self.position_tooltip(tip);
            }
            Some(_) => (),
        }
        self.reset_tooltip_timer(tip);
        if state.active {
            self.notify(tip, EventKind::TooltipTransition);
        }
    }

    pub(crate) fn reset_tooltip_timer(&mut self, tip: WindowId) {
        if let Some(s) = self.tooltip_state_mut(tip) {
            s.elapsed = 0.0;
        }
    }

    /// Sets the hover delay of `tip`.
    pub fn set_tooltip_hover_time(&mut self, tip: WindowId, seconds: f32) -> Result<()> {
        let s = self.tooltip_state_mut(tip).ok_or_else(|| Error::InvalidRequest(format!("window {:?} is not a tooltip", tip)))?;
        s.hover_time = seconds;
        Ok(())
    }

    /// Sets how long `tip` stays displayed.
    pub fn set_tooltip_display_time(&mut self, tip: WindowId, seconds: f32) -> Result<()> {
        let s = self.tooltip_state_mut(tip).ok_or_else(|| Error::InvalidRequest(format!("window {:?} is not a tooltip", tip)))?;
        s.display_time = seconds;
        Ok(())
    }

    /// Drops tooltip references to a window being torn down and destroys its own tooltip.
    pub(crate) fn detach_tooltip(&mut self, window: WindowId) {
        if let Some(tip) = self.tooltip_window(window) {
            if self.tooltip_target(tip) == Some(window) {
                self.set_tooltip_target(tip, None);
            }
        }
        if let Some(own) = self.manager.get_mut(window).and_then(|w| w.custom_tooltip.take()) {
            self.destroy(own);
        }
    }

    /// Gives `window` a tooltip of its own of `tooltip_type`; an empty type returns it to the
    /// context default.
    pub fn set_tooltip_type(&mut self, window: WindowId, tooltip_type: &str) -> Result<()> {
        let name = format!("{}__auto_tooltip__", self.window(window)?.name);
        if let Some(old) = self.manager.get_mut(window).and_then(|w| w.custom_tooltip.take()) {
            self.destroy(old);
        }
        if tooltip_type.is_empty() {
            return Ok(());
        }
        let tip = self.create_window(tooltip_type, &name)?;
        self.set_writing_xml_allowed(tip, false)?;
        self.window_mut(window)?.custom_tooltip = Some(tip);
        Ok(())
    }

    /// Type of the tooltip shown for `window`.
    pub fn tooltip_type(&self, window: WindowId) -> Option<String> {
        match self.manager.get(window).and_then(|w| w.custom_tooltip) {
            Some(tip) => self.manager.get(tip).map(|t| t.type_name.clone()),
            None => self.default_tooltip_type.clone(),
        }
    }

    /// Type used for the context default tooltip.
    pub fn default_tooltip_type(&self) -> Option<&str> { self.default_tooltip_type.as_deref() }

    /// Changes the default tooltip type, discarding the current default tooltip.
    pub fn set_default_tooltip_type(&mut self, tooltip_type: Option<&str>) -> Result<()> {
        if let Some(t) = tooltip_type {
            if !self.manager.is_type_available(t) {
                return Err(Error::UnknownObject(format!("no window factory for type '{}'", t)));
            }
        }
        if let Some(old) = self.default_tooltip.take() {
            self.destroy(old);
        }
        self.default_tooltip_type = tooltip_type.map(str::to_string);
        Ok(())
    }

    /// The default tooltip, created on first use when a default type is set.
    pub fn default_tooltip_object(&mut self) -> Option<WindowId> {
        if let Some(tip) = self.default_tooltip.filter(|t| self.manager.is_registered(*t)) {
            return Some(tip);
        }
        let tooltip_type = self.default_tooltip_type.clone()?;
        match self.create_window(&tooltip_type, "") {
            Ok(tip) => {
                if let Err(err) = self.set_writing_xml_allowed(tip, false) {
                    warn!("default tooltip: {}", err);
                }
                self.default_tooltip = Some(tip);
                Some(tip)
            }
            Err(err) => {
                warn!("creating default tooltip of type '{}': {}", tooltip_type, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn move_to(ctx: &mut GuiContext, x: f32, y: f32) { ctx.inject_input_event(InputEvent::CursorMove { position: Vec2f::new(x, y) }); }

    fn button(ctx: &mut GuiContext, parent: WindowId) -> WindowId {
        let b = ctx.create_window("PushButton", "ok").unwrap();
        ctx.set_area(b, URect::from_parts(UDim::absolute(10.0), UDim::absolute(10.0), UDim::absolute(110.0), UDim::absolute(40.0))).unwrap();
        ctx.add_child(parent, b).unwrap();
        b
    }

    fn state(ctx: &GuiContext, b: WindowId) -> ButtonState {
        match ctx.window(b).unwrap().behavior() {
            Behavior::PushButton(s) => *s,
            _ => panic!("not a button"),
        }
    }

    #[test]
    fn button_clicks_on_release_inside() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let b = button(&mut ctx, root);
        let clicks = count_events(&mut ctx, b, EventKind::Clicked);

        move_to(&mut ctx, 20.0, 20.0);
        assert!(state(&ctx, b).is_hovering());
        assert!(ctx.inject_input_event(InputEvent::CursorPressHold(CursorInputSource::Left)));
        assert!(state(&ctx, b).is_pushed());
        assert_eq!(ctx.capture_window(), Some(b));
        ctx.inject_input_event(InputEvent::CursorActivate(CursorInputSource::Left));
        assert_eq!(*clicks.borrow(), 1);
        assert!(!state(&ctx, b).is_pushed());
        assert_eq!(ctx.capture_window(), None);
    }

    #[test]
    fn button_release_outside_does_not_click() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let b = button(&mut ctx, root);
        let clicks = count_events(&mut ctx, b, EventKind::Clicked);

        move_to(&mut ctx, 20.0, 20.0);
        ctx.inject_input_event(InputEvent::CursorPressHold(CursorInputSource::Left));
        move_to(&mut ctx, 300.0, 300.0);
        // capture keeps the moves coming to the button
        assert!(!state(&ctx, b).is_hovering());
        ctx.inject_input_event(InputEvent::CursorActivate(CursorInputSource::Left));
        assert_eq!(*clicks.borrow(), 0);
        assert_eq!(ctx.capture_window(), None);
    }

    #[test]
    fn default_tooltip_follows_hover_and_display_timers() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        ctx.fonts_mut().define("Mono", Font::new(10.0, 6.0)).unwrap();
        ctx.set_default_tooltip_type(Some("Tooltip")).unwrap();
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 100.0, 100.0);
        ctx.set_tooltip_text(a, "hello").unwrap();

        move_to(&mut ctx, 20.0, 20.0);
        let tip = ctx.tooltip_window(a).unwrap();
        assert_eq!(ctx.tooltip_target(tip), Some(a));
        assert_eq!(ctx.window(tip).unwrap().parent(), Some(root));
        assert_eq!(ctx.window(tip).unwrap().text(), "hello");
        assert_eq!(ctx.window(tip).unwrap().pixel_size(), PixelSize::new(30.0, 10.0));
        let shown = count_events(&mut ctx, tip, EventKind::TooltipActive);
        let dismissed = count_events(&mut ctx, tip, EventKind::TooltipInactive);

        ctx.inject_time_pulse(0.3);
        assert!(!ctx.is_tooltip_active(tip));
        ctx.inject_time_pulse(0.2);
        assert!(ctx.is_tooltip_active(tip));
        assert!(ctx.window(tip).unwrap().is_visible());
        let placed = ctx.unclipped_outer_rect(tip);
        assert_eq!((placed.left, placed.top), (20.0, 20.0));
        // the tooltip passes the pointer through to what is below
        assert_eq!(ctx.window_containing_pointer(), Some(a));

        ctx.inject_time_pulse(8.0);
        assert!(!ctx.is_tooltip_active(tip));
        assert!(!ctx.window(tip).unwrap().is_visible());
        assert_eq!(ctx.tooltip_target(tip), None);
        assert_eq!((*shown.borrow(), *dismissed.borrow()), (1, 1));
    }

    #[test]
    fn leaving_the_target_stops_the_hover_timer() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        ctx.set_default_tooltip_type(Some("Tooltip")).unwrap();
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 100.0, 100.0);
        ctx.set_tooltip_text(a, "hello").unwrap();
        move_to(&mut ctx, 20.0, 20.0);
        let tip = ctx.tooltip_window(a).unwrap();
        move_to(&mut ctx, 500.0, 500.0);
        assert_eq!(ctx.tooltip_target(tip), Some(root));
        ctx.inject_time_pulse(1.0);
        // the root has no tooltip text
        assert!(!ctx.is_tooltip_active(tip));
    }

    #[test]
    fn custom_tooltip_dies_with_its_window() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 100.0, 100.0);
        ctx.set_tooltip_type(a, "Tooltip").unwrap();
        let tip = ctx.tooltip_window(a).unwrap();
        assert_eq!(ctx.window(tip).unwrap().name(), "a__auto_tooltip__");
        assert_eq!(ctx.tooltip_type(a).as_deref(), Some("Tooltip"));
        assert_eq!(ctx.tooltip_window(root), None);
        ctx.destroy(a);
        assert!(!ctx.is_alive("a__auto_tooltip__"));
        assert!(matches!(ctx.set_default_tooltip_type(Some("Balloon")), Err(Error::UnknownObject(_))));
    }
}
