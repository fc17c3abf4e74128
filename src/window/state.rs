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

impl GuiContext {
    /// Own flag and every ancestor's flag set.
    pub fn is_effective_visible(&self, window: WindowId) -> bool {
        match self.manager.get(window) {
            Some(w) => w.is_visible() && w.parent.map(|p| self.is_effective_visible(p)).unwrap_or(true),
            None => false,
        }
    }

    /// Own flag or any ancestor's flag set.
    pub fn is_effective_disabled(&self, window: WindowId) -> bool {
        match self.manager.get(window) {
            Some(w) => w.is_disabled() || w.parent.map(|p| self.is_effective_disabled(p)).unwrap_or(false),
            None => true,
        }
    }

    /// Active flag set on the window and on all of its ancestors.
    pub fn is_active(&self, window: WindowId) -> bool {
        match self.manager.get(window) {
            Some(w) => w.flags.contains(WindowFlags::ACTIVE) && w.parent.map(|p| self.is_active(p)).unwrap_or(true),
            None => false,
        }
    }

    /// Shows or hides the window.
    pub fn set_visible(&mut self, window: WindowId, visible: bool) -> Result<()> {
        let w = self.window_mut(window)?;
        if w.is_visible() == visible {
            return Ok(());
        }
        w.flags.set(WindowFlags::VISIBLE, visible);
        if visible {
            self.invalidate(window, true);
            self.notify(window, EventKind::Shown);
        } else {
            if let Some(parent) = self.manager.get(window).and_then(|w| w.parent) {
                self.invalidate_rendering_surface(parent);
            }
            self.notify(window, EventKind::Hidden);
        }
        self.mark_pointer_stale();
        self.mark_as_dirty();
        Ok(())
    }

    /// Shorthand for `set_visible(window, true)`.
    pub fn show(&mut self, window: WindowId) -> Result<()> { self.set_visible(window, true) }

    /// Shorthand for `set_visible(window, false)`.
    pub fn hide(&mut self, window: WindowId) -> Result<()> { self.set_visible(window, false) }

    /// Enables or disables the window. Descendants follow through the effective state.
    pub fn set_enabled(&mut self, window: WindowId, enabled: bool) -> Result<()> {
        let w = self.window_mut(window)?;
        if w.is_disabled() != enabled {
            return Ok(());
        }
        let parent = w.parent;
        w.flags.set(WindowFlags::DISABLED, !enabled);

        if !enabled {
            if let Some(capture) = self.capture {
                if capture == window || self.is_ancestor(capture, window) {
                    self.release_input(capture);
                }
            }
        }
        let parent_disabled = parent.map(|p| self.is_effective_disabled(p)).unwrap_or(false);
        if !parent_disabled {
            self.propagate_enabled_state(window, enabled);
        }
        self.mark_as_dirty();
        Ok(())
    }

    fn propagate_enabled_state(&mut self, window: WindowId, enabled: bool) {
        let children: Vec<WindowId> = match self.manager.get(window) {
            Some(w) => w.children.clone(),
            None => return,
        };
        for child in children {
            if !self.manager.get(child).map(|c| c.is_disabled()).unwrap_or(true) {
                self.propagate_enabled_state(child, enabled);
            }
        }
        self.invalidate(window, false);
        self.notify(window, if enabled { EventKind::Enabled } else { EventKind::Disabled });
    }

    /// Alpha after multiplying in inherited ancestors.
    pub fn effective_alpha(&self, window: WindowId) -> f32 {
        match self.manager.get(window) {
            Some(w) => match w.parent {
                Some(p) if w.inherits_alpha() => w.alpha * self.effective_alpha(p),
                _ => w.alpha,
            },
            None => 1.0,
        }
    }

    /// Sets the own alpha, clamped to `0..=1`.
    pub fn set_alpha(&mut self, window: WindowId, alpha: f32) -> Result<()> {
        let alpha = alpha.clamp(0.0, 1.0);
        let w = self.window_mut(window)?;
        if w.alpha == alpha {
            return Ok(());
        }
        w.alpha = alpha;
        self.on_alpha_changed(window);
        Ok(())
    }

    /// Sets whether alpha is multiplied with the parent's.
    pub fn set_inherits_alpha(&mut self, window: WindowId, inherits: bool) -> Result<()> {
        let before = self.effective_alpha(window);
        let w = self.window_mut(window)?;
        if w.inherits_alpha() == inherits {
            return Ok(());
        }
        w.flags.set(WindowFlags::INHERITS_ALPHA, inherits);
        if self.effective_alpha(window) != before {
            self.on_alpha_changed(window);
        }
        Ok(())
    }

    fn on_alpha_changed(&mut self, window: WindowId) {
        let children: Vec<WindowId> = self.manager.get(window).map(|w| w.children.clone()).unwrap_or_default();
        for child in children {
            if self.manager.get(child).map(|c| c.inherits_alpha()).unwrap_or(false) {
                self.on_alpha_changed(child);
            }
        }
        self.invalidate(window, false);
        self.notify(window, EventKind::AlphaChanged);
    }

    /// Activates the window, taking capture away from any other holder.
    pub fn activate(&mut self, window: WindowId) {
        if !self.is_effective_visible(window) {
            return;
        }
        if let Some(capture) = self.capture {
            if capture != window {
                self.capture = None;
                self.on_capture_lost(capture);
            }
        }
        self.move_to_front(window);
    }

    /// Deactivates the window and its active descendants.
    pub fn deactivate(&mut self, window: WindowId) { self.on_deactivated(window, None) }

    pub(crate) fn on_activated(&mut self, window: WindowId, other: Option<WindowId>) {
        let Some(w) = self.manager.get_mut(window) else { return };
        w.flags.insert(WindowFlags::ACTIVE);
        self.invalidate(window, false);
        let mut args = EventArgs::with_payload(Some(window), EventPayload::Activation { other });
        self.fire_event(window, EventKind::Activated, &mut args);
    }

    pub(crate) fn on_deactivated(&mut self, window: WindowId, other: Option<WindowId>) {
        let children: Vec<WindowId> = match self.manager.get(window) {
            Some(w) => w.children.clone(),
            None => return,
        };
        for child in children {
            if self.manager.get(child).map(|c| c.flags.contains(WindowFlags::ACTIVE)).unwrap_or(false) {
                self.on_deactivated(child, other);
            }
        }
        if let Some(w) = self.manager.get_mut(window) {
            w.flags.remove(WindowFlags::ACTIVE);
        }
        self.invalidate(window, false);
        let mut args = EventArgs::with_payload(Some(window), EventPayload::Activation { other });
        self.fire_event(window, EventKind::Deactivated, &mut args);
    }

    /// Window holding input capture.
    pub fn capture_window(&self) -> Option<WindowId> { self.capture }

    /// Returns `true` if `window` holds capture.
    pub fn is_captured_by(&self, window: WindowId) -> bool { self.capture == Some(window) }

    /// Returns `true` if a strict ancestor of `window` holds capture.
    pub fn is_captured_by_ancestor(&self, window: WindowId) -> bool { self.capture.map(|c| self.is_ancestor(window, c)).unwrap_or(false) }

    /// Returns `true` if a direct child of `window` holds capture.
    pub fn is_captured_by_child(&self, window: WindowId) -> bool { self.capture.map(|c| self.is_child(window, c)).unwrap_or(false) }

    /// Makes `window` the capture holder. Fails on an inactive window.
    pub fn capture_input(&mut self, window: WindowId) -> bool {
        if self.manager.get_live(window).is_none() || !self.is_active(window) {
            return false;
        }
        let current = self.capture;
        if current != Some(window) {
            self.capture = Some(window);
            let restore = self.manager.get(window).map(|w| w.restores_old_capture()).unwrap_or(false);
            match current {
                Some(previous) if !restore => self.on_capture_lost(previous),
                _ => {
                    if let Some(w) = self.manager.get_mut(window) {
                        w.old_capture = current;
                    }
                }
            }
            self.notify(window, EventKind::InputCaptureGained);
        }
        true
    }

    /// Gives up capture if `window` holds it.
    pub fn release_input(&mut self, window: WindowId) {
        if self.capture != Some(window) {
            return;
        }
        let Some(w) = self.manager.get_mut(window) else { return };
        if w.restores_old_capture() {
            let old = w.old_capture.take();
            let old = old.filter(|o| self.manager.get_live(*o).is_some());
            self.capture = old;
            if let Some(old) = old {
                self.move_to_front(old);
            }
        } else {
            self.capture = None;
        }
        self.on_capture_lost(window);
    }

    pub(crate) fn on_capture_lost(&mut self, window: WindowId) {
        let Some(w) = self.manager.get_mut(window) else { return };
        w.auto_repeat.button = None;
        w.auto_repeat.repeating = false;
        w.auto_repeat.elapsed = 0.0;
        if w.restores_old_capture() {
            if let Some(old) = w.old_capture.take() {
                self.on_capture_lost(old);
            }
        }
        self.behavior_capture_lost(window);
        self.mark_pointer_stale();
        self.notify(window, EventKind::InputCaptureLost);
    }

    /// Sets the restore policy on `window` and its whole subtree.
    pub fn set_restore_old_capture(&mut self, window: WindowId, restore: bool) -> Result<()> {
        let w = self.window_mut(window)?;
        w.flags.set(WindowFlags::RESTORE_OLD_CAPTURE, restore);
        for child in w.children.clone() {
            self.set_restore_old_capture(child, restore)?;
        }
        Ok(())
    }

    /// Window that currently fences input.
    pub fn modal_window(&self) -> Option<WindowId> { self.modal }

    /// Returns `true` if `window` is the modal target.
    pub fn modal_state(&self, window: WindowId) -> bool { self.modal == Some(window) }

    /// Makes `window` the modal target, or clears the modal target if it is `window`.
    pub fn set_modal_state(&mut self, window: WindowId, modal: bool) -> Result<()> {
        self.window(window)?;
        if self.modal_state(window) == modal {
            return Ok(());
        }
        if modal {
            self.activate(window);
            self.modal = Some(window);
        } else {
            self.modal = None;
        }
        self.mark_pointer_stale();
        Ok(())
    }

    /// Replaces the logical text.
    pub fn set_text(&mut self, window: WindowId, text: &str) -> Result<()> {
        self.window_mut(window)?.text.set(text);
        self.on_text_changed(window);
        Ok(())
    }

    /// Inserts `text` at character `position` of the logical text.
    pub fn insert_text(&mut self, window: WindowId, text: &str, position: usize) -> Result<()> {
        self.window_mut(window)?.text.insert(position, text);
        self.on_text_changed(window);
        Ok(())
    }

    /// Appends to the logical text.
    pub fn append_text(&mut self, window: WindowId, text: &str) -> Result<()> {
        self.window_mut(window)?.text.append(text);
        self.on_text_changed(window);
        Ok(())
    }

    /// Toggles markup parsing of the window text.
    pub fn set_text_parsing_enabled(&mut self, window: WindowId, enabled: bool) -> Result<()> {
        self.window_mut(window)?.text.set_parsing_enabled(enabled);
        self.on_text_changed(window);
        Ok(())
    }

    /// Installs a visual reordering step for the window text.
    pub fn set_text_reorder(&mut self, window: WindowId, reorder: Option<TextReorder>) -> Result<()> {
        self.window_mut(window)?.text.set_reorder(reorder);
        self.invalidate(window, false);
        Ok(())
    }

    fn on_text_changed(&mut self, window: WindowId) {
        self.invalidate(window, false);
        self.notify(window, EventKind::TextChanged);
    }

    /// Assigns a font by name; `None` falls back to the context default.
    pub fn set_font(&mut self, window: WindowId, font: Option<&str>) -> Result<()> {
        if let Some(name) = font {
            self.fonts.get(name)?;
        }
        let w = self.window_mut(window)?;
        if w.font.as_deref() == font {
            return Ok(());
        }
        w.font = font.map(str::to_string);
        self.on_font_changed(window);
        Ok(())
    }

    pub(crate) fn on_font_changed(&mut self, window: WindowId) {
        if let Some(w) = self.manager.get_mut(window) {
            w.text.invalidate_rendered();
        }
        self.invalidate(window, false);
        self.notify(window, EventKind::FontChanged);
    }

    /// Font used by `window`, optionally falling back to the context default.
    pub fn font(&self, window: WindowId, use_default: bool) -> Option<std::rc::Rc<Font>> {
        let w = self.manager.get(window)?;
        match &w.font {
            Some(name) => self.fonts.get(name).ok(),
            None if use_default => self.default_font(),
            None => None,
        }
    }

    /// Sets the own tooltip text.
    pub fn set_tooltip_text(&mut self, window: WindowId, text: &str) -> Result<()> {
        self.window_mut(window)?.tooltip_text = text.to_string();
        if let Some(tip) = self.tooltip_window(window) {
            if self.tooltip_target(tip) == Some(window) {
                self.set_text(tip, text)?;
            }
        }
        Ok(())
    }

    /// Tooltip text, taken from the nearest ancestor while inheritance is on and the own text is empty.
    pub fn tooltip_text_including_inheritance(&self, window: WindowId) -> String {
        let Some(w) = self.manager.get(window) else { return String::new() };
        match w.parent {
            Some(p) if w.inherits_tooltip_text() && w.tooltip_text.is_empty() => self.tooltip_text_including_inheritance(p),
            _ => w.tooltip_text.clone(),
        }
    }

    /// Sets whether an empty tooltip text falls back to the parent's.
    pub fn set_inherits_tooltip_text(&mut self, window: WindowId, inherits: bool) -> Result<()> {
        self.window_mut(window)?.flags.set(WindowFlags::INHERITS_TOOLTIP_TEXT, inherits);
        Ok(())
    }

    /// Sets whether the parent destroys `window` along with itself.
    pub fn set_destroyed_by_parent(&mut self, window: WindowId, destroyed: bool) -> Result<()> {
        let w = self.window_mut(window)?;
        if w.is_destroyed_by_parent() == destroyed {
            return Ok(());
        }
        w.flags.set(WindowFlags::DESTROYED_BY_PARENT, destroyed);
        self.notify(window, EventKind::DestroyedByParentChanged);
        Ok(())
    }

    /// Lets pointer hits fall through the window.
    pub fn set_cursor_pass_through_enabled(&mut self, window: WindowId, enabled: bool) -> Result<()> {
        self.window_mut(window)?.flags.set(WindowFlags::CURSOR_PASS_THROUGH, enabled);
        self.mark_pointer_stale();
        Ok(())
    }

    /// Offers captured input to the descendant under the pointer.
    pub fn set_distributes_captured_inputs(&mut self, window: WindowId, distribute: bool) -> Result<()> {
        self.window_mut(window)?.flags.set(WindowFlags::DISTRIBUTE_CAPTURED_INPUTS, distribute);
        Ok(())
    }

    /// Lets unhandled pointer input bubble to the parent.
    pub fn set_pointer_propagation_enabled(&mut self, window: WindowId, enabled: bool) -> Result<()> {
        self.window_mut(window)?.flags.set(WindowFlags::PROPAGATE_POINTER_INPUTS, enabled);
        Ok(())
    }

    /// Makes a held button re-fire press events.
    pub fn set_auto_repeat_enabled(&mut self, window: WindowId, enabled: bool) -> Result<()> {
        let w = self.window_mut(window)?;
        w.flags.set(WindowFlags::AUTO_REPEAT, enabled);
        w.auto_repeat.button = None;
        w.auto_repeat.repeating = false;
        Ok(())
    }

    /// Seconds before the first repeat.
    pub fn set_auto_repeat_delay(&mut self, window: WindowId, delay: f32) -> Result<()> {
        self.window_mut(window)?.auto_repeat.delay = delay;
        Ok(())
    }

    /// Seconds between repeats.
    pub fn set_auto_repeat_rate(&mut self, window: WindowId, rate: f32) -> Result<()> {
        self.window_mut(window)?.auto_repeat.rate = rate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn effective_state_follows_the_ancestor_chain() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 100.0, 100.0);
        let b = child_at(&mut ctx, a, "b", 0.0, 0.0, 10.0, 10.0);

        ctx.hide(a).unwrap();
        assert!(ctx.window(b).unwrap().is_visible());
        assert!(!ctx.is_effective_visible(b));
        ctx.show(a).unwrap();
        assert!(ctx.is_effective_visible(b));

        let disabled = count_events(&mut ctx, b, EventKind::Disabled);
        ctx.set_enabled(a, false).unwrap();
        assert!(ctx.is_effective_disabled(b));
        assert!(!ctx.window(b).unwrap().is_disabled());
        assert_eq!(*disabled.borrow(), 1);
        ctx.set_enabled(a, true).unwrap();
        assert!(!ctx.is_effective_disabled(b));
    }

    #[test]
    fn alpha_multiplies_while_inherited() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 100.0, 100.0);
        let b = child_at(&mut ctx, a, "b", 0.0, 0.0, 10.0, 10.0);
        let changed = count_events(&mut ctx, b, EventKind::AlphaChanged);
        ctx.set_alpha(a, 0.5).unwrap();
        ctx.set_alpha(b, 0.5).unwrap();
        assert_eq!(ctx.effective_alpha(b), 0.25);
        assert_eq!(*changed.borrow(), 2);
        ctx.set_inherits_alpha(b, false).unwrap();
        assert_eq!(ctx.effective_alpha(b), 0.5);
        ctx.set_alpha(a, 7.0).unwrap();
        assert_eq!(ctx.window(a).unwrap().alpha(), 1.0);
    }

    #[test]
    fn capture_requires_activation() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 100.0, 100.0);
        assert!(!ctx.capture_input(a));
        assert_eq!(ctx.capture_window(), None);
        ctx.release_input(a);
        assert_eq!(ctx.capture_window(), None);

        ctx.activate(a);
        assert!(ctx.is_active(a));
        assert!(ctx.capture_input(a));
        assert!(ctx.is_captured_by(a));
    }

    #[test]
    fn restore_old_capture_hands_capture_back() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 100.0, 100.0);
        let b = child_at(&mut ctx, a, "b", 0.0, 0.0, 10.0, 10.0);
        ctx.set_restore_old_capture(b, true).unwrap();
        ctx.activate(b);
        assert!(ctx.capture_input(a));
        let a_lost = count_events(&mut ctx, a, EventKind::InputCaptureLost);
        let b_lost = count_events(&mut ctx, b, EventKind::InputCaptureLost);

        assert!(ctx.capture_input(b));
        assert_eq!(*a_lost.borrow(), 0);
        assert!(ctx.is_captured_by_child(a));

        ctx.release_input(b);
        assert_eq!(ctx.capture_window(), Some(a));
        assert_eq!(*b_lost.borrow(), 1);
        assert_eq!(*a_lost.borrow(), 0);
    }

    #[test]
    fn capture_is_never_restored_to_a_destroyed_window() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let q = child_at(&mut ctx, root, "q", 0.0, 0.0, 100.0, 100.0);
        let p = child_at(&mut ctx, q, "p", 0.0, 0.0, 10.0, 10.0);
        ctx.set_restore_old_capture(q, true).unwrap();
        ctx.activate(p);
        assert!(ctx.capture_input(p));
        assert!(ctx.capture_input(q));

        ctx.destroy(p);
        assert_eq!(ctx.window(q).unwrap().old_capture, None);
        ctx.release_input(q);
        assert_eq!(ctx.capture_window(), None);
        ctx.draw();
        assert_eq!(ctx.capture_window(), None);
    }

    #[test]
    fn capture_without_restore_notifies_previous_holder() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 100.0, 100.0);
        let b = child_at(&mut ctx, a, "b", 0.0, 0.0, 10.0, 10.0);
        ctx.activate(b);
        ctx.capture_input(a);
        let a_lost = count_events(&mut ctx, a, EventKind::InputCaptureLost);
        ctx.capture_input(b);
        assert_eq!(*a_lost.borrow(), 1);
        assert!(!ctx.is_captured_by_ancestor(b));
        ctx.release_input(b);
        assert_eq!(ctx.capture_window(), None);
    }

    #[test]
    fn activating_another_window_breaks_capture() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 100.0, 100.0);
        let b = child_at(&mut ctx, root, "b", 200.0, 0.0, 100.0, 100.0);
        ctx.activate(a);
        ctx.capture_input(a);
        let lost = count_events(&mut ctx, a, EventKind::InputCaptureLost);
        ctx.activate(b);
        assert_eq!(ctx.capture_window(), None);
        assert_eq!(*lost.borrow(), 1);
        assert!(!ctx.is_active(a));
        assert!(ctx.is_active(b));
    }

    #[test]
    fn hidden_windows_cannot_activate() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 100.0, 100.0);
        ctx.hide(a).unwrap();
        ctx.activate(a);
        assert!(!ctx.is_active(a));
    }

    #[test]
    fn modal_state_activates() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let dialog = child_at(&mut ctx, root, "dialog", 0.0, 0.0, 100.0, 100.0);
        ctx.set_modal_state(dialog, true).unwrap();
        assert_eq!(ctx.modal_window(), Some(dialog));
        assert!(ctx.is_active(dialog));
        ctx.set_modal_state(dialog, false).unwrap();
        assert_eq!(ctx.modal_window(), None);
    }

    #[test]
    fn tooltip_text_inherits_when_empty() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 100.0, 100.0);
        let b = child_at(&mut ctx, a, "b", 0.0, 0.0, 10.0, 10.0);
        ctx.set_tooltip_text(a, "parent tip").unwrap();
        assert_eq!(ctx.tooltip_text_including_inheritance(b), "parent tip");
        ctx.set_inherits_tooltip_text(b, false).unwrap();
        assert_eq!(ctx.tooltip_text_including_inheritance(b), "");
    }

    #[test]
    fn unknown_font_is_rejected() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        assert!(matches!(ctx.set_font(root, Some("Nope")), Err(Error::UnknownObject(_))));
        ctx.fonts.define("Mono", Font::new(12.0, 7.0)).unwrap();
        let changed = count_events(&mut ctx, root, EventKind::FontChanged);
        ctx.set_font(root, Some("Mono")).unwrap();
        assert_eq!(*changed.borrow(), 1);
        assert_eq!(ctx.font(root, false).map(|f| f.line_spacing), Some(12.0));
    }
}
