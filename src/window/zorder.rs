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
    /// Activates `window` and raises it above its siblings, recursing up the tree.
    pub fn move_to_front(&mut self, window: WindowId) { self.move_to_front_impl(window, false); }

    /// Returns `true` if anything changed: an activation or a reorder.
    pub(crate) fn move_to_front_impl(&mut self, window: WindowId, was_clicked: bool) -> bool {
        let Some(w) = self.manager.get(window) else { return false };
        let Some(parent) = w.parent else {
            if self.is_active(window) {
                return false;
            }
            self.on_activated(window, None);
            return true;
        };

        let mut took_action = self.move_to_front_impl(parent, was_clicked);

        let active = self.active_sibling(window);
        if active != Some(window) {
            took_action = true;
            self.on_activated(window, active);
            if let Some(previous) = active {
                self.on_deactivated(previous, Some(window));
            }
        }

        let Some(w) = self.manager.get(window) else { return took_action };
        if w.is_z_ordering_enabled() && (!was_clicked || w.is_rise_on_click_enabled()) && !self.is_top_of_z_order(window) {
            took_action = true;
            self.remove_from_draw_list(parent, window);
            self.add_to_draw_list(parent, window, false);
            self.on_z_change(window);
        }
        took_action
    }

    /// `window` if it is active, else the topmost active sibling.
    fn active_sibling(&self, window: WindowId) -> Option<WindowId> {
        if self.is_active(window) {
            return Some(window);
        }
        let parent = self.manager.get(window)?.parent?;
        self.manager.get(parent)?.draw_list.iter().rev().copied().find(|s| self.is_active(*s))
    }

    /// Deactivates `window` and sends it behind its siblings, recursing up the tree.
    pub fn move_to_back(&mut self, window: WindowId) -> Result<()> {
        self.window(window)?;
        if self.is_active(window) {
            self.on_deactivated(window, None);
        }
        let Some(parent) = self.manager.get(window).and_then(|w| w.parent) else { return Ok(()) };
        if self.manager.get(window).map(|w| w.is_z_ordering_enabled()).unwrap_or(false) {
            self.remove_from_draw_list(parent, window);
            self.add_to_draw_list(parent, window, true);
            self.on_z_change(window);
        }
        self.move_to_back(parent)
    }

    /// Places `window` directly in front of `sibling`. Ignored unless both share a parent and a group.
    pub fn move_in_front(&mut self, window: WindowId, sibling: WindowId) { self.move_relative_to(window, sibling, true) }

    /// Places `window` directly behind `sibling`. Ignored unless both share a parent and a group.
    pub fn move_behind(&mut self, window: WindowId, sibling: WindowId) { self.move_relative_to(window, sibling, false) }

    fn move_relative_to(&mut self, window: WindowId, sibling: WindowId, in_front: bool) {
        let (Some(w), Some(s)) = (self.manager.get(window), self.manager.get(sibling)) else { return };
        let Some(parent) = w.parent else { return };
        if window == sibling || s.parent != Some(parent) || s.is_always_on_top() != w.is_always_on_top() || !w.is_z_ordering_enabled() {
            return;
        }
        let Some(p) = self.manager.get_mut(parent) else { return };
        p.draw_list.retain(|c| *c != window);
        let Some(at) = p.draw_list.iter().position(|c| *c == sibling) else { return };
        p.draw_list.insert(if in_front { at + 1 } else { at }, window);
        self.on_z_change(window);
    }

    /// Returns `true` if no sibling of the same group is drawn above `window`.
    pub fn is_top_of_z_order(&self, window: WindowId) -> bool {
        let Some(w) = self.manager.get(window) else { return true };
        let Some(p) = w.parent.and_then(|p| self.manager.get(p)) else { return true };
        let on_top = w.is_always_on_top();
        p.draw_list
            .iter()
            .rev()
            .find(|c| on_top || !self.manager.get(**c).map(|c| c.is_always_on_top()).unwrap_or(false))
            .map(|c| *c == window)
            .unwrap_or(false)
    }

    /// Position of `window` in its parent's draw list; 0 when detached.
    pub fn z_index(&self, window: WindowId) -> Result<usize> {
        let w = self.window(window)?;
        let Some(parent) = w.parent else { return Ok(0) };
        self.window(parent)?
            .draw_list
            .iter()
            .position(|c| *c == window)
            .ok_or_else(|| Error::InvalidRequest(format!("'{}' is not in its parent's draw list", w.name)))
    }

    /// Returns `true` if `window` is drawn above `other`. Descendants are in front of their ancestors.
    pub fn is_in_front(&self, window: WindowId, other: WindowId) -> bool {
        if self.is_ancestor(window, other) {
            return true;
        }
        if self.is_ancestor(other, window) {
            return false;
        }
        let Some(common) = self.common_ancestor(window, other) else { return false };
        match (self.branch_below(window, common), self.branch_below(other, common)) {
            (Some(a), Some(b)) => match (self.z_index(a), self.z_index(b)) {
                (Ok(a), Ok(b)) => a > b,
                _ => false,
            },
            _ => false,
        }
    }

    /// Returns `true` if `window` is drawn below `other`.
    pub fn is_behind(&self, window: WindowId, other: WindowId) -> bool { window != other && !self.is_in_front(window, other) }

    /// Ancestor of `window` (or `window` itself) attached directly under `ancestor`.
    fn branch_below(&self, window: WindowId, ancestor: WindowId) -> Option<WindowId> {
        let mut current = window;
        loop {
            let parent = self.manager.get(current)?.parent?;
            if parent == ancestor {
                return Some(current);
            }
            current = parent;
        }
    }

    /// Moves `window` between the normal and the always-on-top group.
    pub fn set_always_on_top(&mut self, window: WindowId, on_top: bool) -> Result<()> {
        let w = self.window_mut(window)?;
        if w.is_always_on_top() == on_top {
            return Ok(());
        }
        w.flags.set(WindowFlags::ALWAYS_ON_TOP, on_top);
        if let Some(parent) = w.parent {
            self.remove_from_draw_list(parent, window);
            self.add_to_draw_list(parent, window, false);
            self.on_z_change(window);
        }
        self.notify(window, EventKind::AlwaysOnTopChanged);
        Ok(())
    }

    /// Allows or forbids activation to reorder `window`.
    pub fn set_z_ordering_enabled(&mut self, window: WindowId, enabled: bool) -> Result<()> {
        self.window_mut(window)?.flags.set(WindowFlags::Z_ORDERING, enabled);
        Ok(())
    }

    /// Sets whether clicking raises `window`.
    pub fn set_rise_on_click_enabled(&mut self, window: WindowId, enabled: bool) -> Result<()> {
        self.window_mut(window)?.flags.set(WindowFlags::RISE_ON_CLICK, enabled);
        Ok(())
    }

    /// Fires `ZChanged` on every child of the parent, or on `window` alone when detached.
    pub(crate) fn on_z_change(&mut self, window: WindowId) {
        let parent = self.manager.get(window).and_then(|w| w.parent);
        match parent {
            None => self.notify(window, EventKind::ZChanged),
            Some(parent) => {
                let siblings = self.manager.get(parent).map(|p| p.children.clone()).unwrap_or_default();
                for sibling in siblings {
                    self.notify(sibling, EventKind::ZChanged);
                }
            }
        }
        self.mark_pointer_stale();
    }
}
