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
    /// Attaches `child` under `parent`, detaching it from any previous parent first.
    ///
    /// The child enters the draw list as the topmost window of its always-on-top group.
    pub fn add_child(&mut self, parent: WindowId, child: WindowId) -> Result<()> {
        if parent == child {
            return Err(Error::InvalidRequest("a window cannot be attached to itself".into()));
        }
        for w in [parent, child] {
            self.window(w)?;
            if self.manager.get_live(w).is_none() {
                return Err(Error::InvalidRequest(format!("'{}' is being destroyed", self.name_of(w))));
            }
        }
        if self.is_ancestor(parent, child) {
            return Err(Error::InvalidRequest(format!("'{}' is an ancestor of '{}'", self.name_of(child), self.name_of(parent))));
        }

        let old_parent = self.manager.get(child).and_then(|w| w.parent);
        let old_parent_size = old_parent.and_then(|p| self.manager.get(p)).map(|p| p.pixel_size);
        if let Some(old) = old_parent {
            self.remove_child(old, child)?;
        }

        self.add_to_draw_list(parent, child, false);
        let new_parent_size = match self.manager.get_mut(parent) {
            Some(p) => {
                p.children.push(child);
                p.pixel_size
            }
            None => return Ok(()),
        };
        if let Some(c) = self.manager.get_mut(child) {
            c.parent = Some(parent);
        }
        self.sync_target_surface(child);

        self.notify_screen_area_changed(child, true);
        self.invalidate(child, true);
        if old_parent_size != Some(new_parent_size) {
            self.on_parent_sized(child);
        }
        self.mark_pointer_stale();

        let mut args = EventArgs::with_payload(Some(parent), EventPayload::Child { child });
        self.fire_event(parent, EventKind::ChildAdded, &mut args);
        self.on_z_change(child);
        Ok(())
    }

    /// Detaches `child` from `parent` without destroying it.
    pub fn remove_child(&mut self, parent: WindowId, child: WindowId) -> Result<()> {
        if !self.window(parent)?.children.contains(&child) {
            return Err(Error::UnknownObject(format!("'{}' is not a child of '{}'", self.name_of(child), self.name_of(parent))));
        }

        if let Some(capture) = self.capture {
            if capture == child || self.is_ancestor(capture, child) {
                self.release_input(capture);
            }
        }

        self.remove_from_draw_list(parent, child);
        if let Some(p) = self.manager.get_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.manager.get_mut(child) {
            c.parent = None;
        }
        self.sync_target_surface(child);
        self.notify_screen_area_changed(child, true);
        self.invalidate(parent, false);
        self.mark_pointer_stale();

        let mut args = EventArgs::with_payload(Some(parent), EventPayload::Child { child });
        self.fire_event(parent, EventKind::ChildRemoved, &mut args);
        self.on_z_change(child);

        // a detached window cannot stay active
        if self.manager.get(child).map(|c| c.flags.contains(WindowFlags::ACTIVE)).unwrap_or(false) {
            self.on_deactivated(child, None);
        }
        Ok(())
    }

    /// Inserts `child` into the draw list of `parent`, at the front or back of its group.
    pub(crate) fn add_to_draw_list(&mut self, parent: WindowId, child: WindowId, at_back: bool) {
        let on_top = self.manager.get(child).map(|c| c.is_always_on_top()).unwrap_or(false);
        let Some(p) = self.manager.get(parent) else { return };
        let groups: Vec<bool> = p.draw_list.iter().map(|w| self.manager.get(*w).map(|w| w.is_always_on_top()).unwrap_or(false)).collect();

        let pos = match (at_back, on_top) {
            (true, true) => groups.iter().position(|t| *t).unwrap_or(groups.len()),
            (true, false) => 0,
            (false, true) => groups.len(),
            (false, false) => groups.iter().rposition(|t| !*t).map(|i| i + 1).unwrap_or(0),
        };
        if let Some(p) = self.manager.get_mut(parent) {
            p.draw_list.insert(pos, child);
        }
    }

    pub(crate) fn remove_from_draw_list(&mut self, parent: WindowId, child: WindowId) {
        if let Some(p) = self.manager.get_mut(parent) {
            p.draw_list.retain(|w| *w != child);
        }
    }

    /// Returns the immediate child called `name`.
    pub fn child_by_name(&self, parent: WindowId, name: &str) -> Result<WindowId> {
        let p = self.window(parent)?;
        p.children
            .iter()
            .copied()
            .find(|c| self.manager.get(*c).map(|w| w.name == name).unwrap_or(false))
            .ok_or_else(|| Error::UnknownObject(format!("no child named '{}' under '{}'", name, p.name)))
    }

    /// Walks a `/` separated path of child names.
    pub fn child_by_path(&self, parent: WindowId, path: &str) -> Result<WindowId> {
        let mut current = parent;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            current = self.child_by_name(current, part)?;
        }
        Ok(current)
    }

    /// Returns the immediate child whose application id is `id`.
    pub fn child_by_id(&self, parent: WindowId, id: u32) -> Result<WindowId> {
        let p = self.window(parent)?;
        p.children
            .iter()
            .copied()
            .find(|c| self.manager.get(*c).map(|w| w.id == id).unwrap_or(false))
            .ok_or_else(|| Error::UnknownObject(format!("no child with id {} under '{}'", id, p.name)))
    }

    /// Breadth-first search for a descendant called `name`.
    pub fn child_recursive_by_name(&self, parent: WindowId, name: &str) -> Option<WindowId> { self.find_descendant(parent, |w| w.name == name) }

    /// Breadth-first search for a descendant with application id `id`.
    pub fn child_recursive_by_id(&self, parent: WindowId, id: u32) -> Option<WindowId> { self.find_descendant(parent, |w| w.id == id) }

    fn find_descendant(&self, parent: WindowId, matches: impl Fn(&Window) -> bool) -> Option<WindowId> {
        let mut queue: std::collections::VecDeque<WindowId> = self.manager.get(parent)?.children.iter().copied().collect();
        while let Some(id) = queue.pop_front() {
            let w = self.manager.get(id)?;
            if matches(w) {
                return Some(id);
            }
            queue.extend(w.children.iter().copied());
        }
        None
    }

    /// Returns `true` if `child` is attached directly under `parent`.
    pub fn is_child(&self, parent: WindowId, child: WindowId) -> bool { self.manager.get(parent).map(|p| p.children.contains(&child)).unwrap_or(false) }

    /// Returns `true` if `candidate` is a strict ancestor of `window`.
    pub fn is_ancestor(&self, window: WindowId, candidate: WindowId) -> bool {
        let mut current = self.manager.get(window).and_then(|w| w.parent);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.manager.get(id).and_then(|w| w.parent);
        }
        false
    }

    /// Topmost ancestor of `window`, or the window itself when detached.
    pub fn root_of(&self, window: WindowId) -> WindowId {
        let mut current = window;
        while let Some(p) = self.manager.get(current).and_then(|w| w.parent) {
            current = p;
        }
        current
    }

    /// Deepest active window below `window`, following the topmost active child at each level.
    pub fn active_child(&self, window: WindowId) -> Option<WindowId> {
        if !self.is_active(window) {
            return None;
        }
        let mut current = window;
        'descend: loop {
            let w = self.manager.get(current)?;
            for child in w.draw_list.iter().rev() {
                if self.manager.get(*child).map(|c| c.flags.contains(WindowFlags::ACTIVE)).unwrap_or(false) {
                    current = *child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// Nearest window that is `a` or `b` or an ancestor of both.
    pub(crate) fn common_ancestor(&self, a: WindowId, b: WindowId) -> Option<WindowId> {
        let mut current = Some(a);
        while let Some(id) = current {
            if id == b || self.is_ancestor(b, id) {
                return Some(id);
            }
            current = self.manager.get(id).and_then(|w| w.parent);
        }
        None
    }

    pub(crate) fn name_of(&self, window: WindowId) -> String { self.manager.get(window).map(|w| w.name.clone()).unwrap_or_else(|| "<dead>".into()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use std::{cell::RefCell, rc::Rc};

    fn assert_lists_agree(ctx: &GuiContext, parent: WindowId) {
        let p = ctx.window(parent).unwrap();
        let mut a = p.children().to_vec();
        let mut b = p.draw_list().to_vec();
        a.sort();
        b.sort();
        assert_eq!(a, b);
        for c in p.children() {
            assert_eq!(ctx.window(*c).unwrap().parent(), Some(parent));
        }
    }

    #[test]
    fn children_and_draw_list_hold_the_same_windows() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 10.0, 10.0);
        let b = child_at(&mut ctx, root, "b", 0.0, 0.0, 10.0, 10.0);
        let c = child_at(&mut ctx, root, "c", 0.0, 0.0, 10.0, 10.0);
        ctx.set_always_on_top(a, true).unwrap();
        ctx.move_to_back(c).unwrap();
        assert_lists_agree(&ctx, root);
        assert_eq!(ctx.window(root).unwrap().children(), &[a, b, c]);
        assert_eq!(ctx.window(root).unwrap().draw_list(), &[c, b, a]);

        ctx.remove_child(root, b).unwrap();
        assert_lists_agree(&ctx, root);
        assert_eq!(ctx.window(b).unwrap().parent(), None);
    }

    #[test]
    fn reattaching_moves_between_parents() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let p1 = child_at(&mut ctx, root, "p1", 0.0, 0.0, 100.0, 100.0);
        let p2 = child_at(&mut ctx, root, "p2", 100.0, 0.0, 200.0, 200.0);
        let c = child_at(&mut ctx, p1, "c", 0.0, 0.0, 10.0, 10.0);
        let removed = count_events(&mut ctx, p1, EventKind::ChildRemoved);
        let added = count_events(&mut ctx, p2, EventKind::ChildAdded);

        ctx.add_child(p2, c).unwrap();
        assert_eq!((*removed.borrow(), *added.borrow()), (1, 1));
        assert!(ctx.window(p1).unwrap().children().is_empty());
        assert_lists_agree(&ctx, p2);
        assert_eq!(ctx.unclipped_outer_rect(c).left, 100.0);
    }

    #[test]
    fn attach_fires_child_added_then_z_change() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let c = ctx.create_window("DefaultWindow", "c").unwrap();
        let trace = Rc::new(RefCell::new(Vec::new()));
        trace_events(&mut ctx, root, EventKind::ChildAdded, "added", &trace);
        trace_events(&mut ctx, c, EventKind::ZChanged, "z", &trace);
        ctx.add_child(root, c).unwrap();
        assert_eq!(*trace.borrow(), vec!["added:root", "z:c"]);
    }

    #[test]
    fn invalid_attachments_are_rejected() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 10.0, 10.0);
        let other = ctx.create_window("DefaultWindow", "other").unwrap();
        assert!(matches!(ctx.add_child(a, a), Err(Error::InvalidRequest(_))));
        assert!(matches!(ctx.add_child(a, root), Err(Error::InvalidRequest(_))));
        assert!(matches!(ctx.remove_child(root, other), Err(Error::UnknownObject(_))));
    }

    #[test]
    fn destroyed_windows_cannot_be_reattached() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let w = child_at(&mut ctx, root, "w", 0.0, 0.0, 10.0, 10.0);
        let other = child_at(&mut ctx, root, "other", 0.0, 0.0, 10.0, 10.0);
        ctx.destroy(w);
        assert!(matches!(ctx.add_child(root, w), Err(Error::InvalidRequest(_))));
        assert!(matches!(ctx.add_child(w, other), Err(Error::InvalidRequest(_))));
        ctx.draw();
        assert_eq!(ctx.window(root).unwrap().children(), &[other]);
        assert!(ctx.window(w).is_err());
    }

    #[test]
    fn detached_window_reports_z_change_only_to_itself() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 10.0, 10.0);
        let b = child_at(&mut ctx, root, "b", 0.0, 0.0, 10.0, 10.0);
        let a_z = count_events(&mut ctx, a, EventKind::ZChanged);
        let b_z = count_events(&mut ctx, b, EventKind::ZChanged);

        ctx.remove_child(root, a).unwrap();
        assert_eq!((*a_z.borrow(), *b_z.borrow()), (1, 0));

        // attached, every sibling hears about it
        ctx.add_child(root, a).unwrap();
        assert_eq!((*a_z.borrow(), *b_z.borrow()), (2, 1));
    }

    #[test]
    fn lookups_by_name_path_and_id() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 10.0, 10.0);
        let b = child_at(&mut ctx, a, "b", 0.0, 0.0, 10.0, 10.0);
        ctx.set_id(b, 42).unwrap();
        assert_eq!(ctx.child_by_path(root, "a/b").unwrap(), b);
        assert_eq!(ctx.child_recursive_by_id(root, 42), Some(b));
        assert_eq!(ctx.child_recursive_by_name(root, "b"), Some(b));
        assert!(matches!(ctx.child_by_name(root, "b"), Err(Error::UnknownObject(_))));
        assert!(matches!(ctx.child_by_id(root, 7), Err(Error::UnknownObject(_))));
        assert!(ctx.is_ancestor(b, root));
        assert!(!ctx.is_ancestor(root, b));
        assert_eq!(ctx.root_of(b), root);
        assert_eq!(ctx.common_ancestor(b, a), Some(a));
    }

    #[test]
    fn removing_a_captured_subtree_releases_capture() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 10.0, 10.0);
        let b = child_at(&mut ctx, a, "b", 0.0, 0.0, 10.0, 10.0);
        ctx.activate(b);
        assert!(ctx.capture_input(b));
        ctx.remove_child(root, a).unwrap();
        assert_eq!(ctx.capture_window(), None);
        assert!(!ctx.window(a).unwrap().flags().contains(WindowFlags::ACTIVE));
    }
}
