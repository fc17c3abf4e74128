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
    /// Destroys `window`. A registered window goes through the registry first; repeated calls
    /// are ignored. Memory is reclaimed at the end of the next [`GuiContext::draw`].
    pub fn destroy(&mut self, window: WindowId) {
        let Some(w) = self.manager.get(window) else { return };
        if w.destruction_started {
            return;
        }
        if self.manager.is_registered(window) {
            // the registry calls back into teardown once the name is released
            if let Err(err) = self.destroy_window(window) {
                warn!("destroying '{}' failed: {}", self.name_of(window), err);
            }
            return;
        }
        self.teardown(window);
    }

    pub(crate) fn teardown(&mut self, window: WindowId) {
        let Some(w) = self.manager.get_mut(window) else { return };
        if w.destruction_started {
            return;
        }
        w.destruction_started = true;
        self.notify(window, EventKind::DestructionStarted);

        self.release_input(window);
        self.detach_tooltip(window);

        if !self.manager.get(window).map(|w| w.look_name.is_empty()).unwrap_or(true) {
            self.clean_up_look(window);
        }
        if let Some(mut renderer) = self.manager.get_mut(window).and_then(|w| w.window_renderer.take()) {
            renderer.on_detach(self, window);
            self.notify(window, EventKind::WindowRendererDetached);
        }

        if let Some(parent) = self.manager.get(window).and_then(|w| w.parent) {
            if let Err(err) = self.remove_child(parent, window) {
                warn!("detaching '{}' during teardown: {}", self.name_of(window), err);
            }
        }

        let children = self.manager.get(window).map(|w| w.children.clone()).unwrap_or_default();
        for child in children {
            if self.manager.get(child).map(|c| c.is_destroyed_by_parent()).unwrap_or(false) {
                self.destroy(child);
            } else if let Err(err) = self.remove_child(window, child) {
                warn!("detaching child '{}' during teardown: {}", self.name_of(child), err);
            }
        }
        // an owned child destroyed above is still attached until its own teardown ran
        if let Some(w) = self.manager.get_mut(window) {
            w.children.clear();
            w.draw_list.clear();
        }

        self.release_rendering_window(window);
        self.invalidate(window, false);
        self.on_window_destroyed(window);
        self.manager.push_dead(window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn destroy_is_idempotent_and_honours_destroyed_by_parent() {
        let (mut ctx, log) = mock_context();
        let root = with_root(&mut ctx);
        let p = child_at(&mut ctx, root, "p", 0.0, 0.0, 100.0, 100.0);
        let owned = child_at(&mut ctx, p, "owned", 0.0, 0.0, 10.0, 10.0);
        let kept = child_at(&mut ctx, p, "kept", 0.0, 0.0, 10.0, 10.0);
        ctx.set_destroyed_by_parent(kept, false).unwrap();
        let started = count_events(&mut ctx, p, EventKind::DestructionStarted);

        ctx.destroy(p);
        ctx.destroy(p);
        assert_eq!(*started.borrow(), 1);
        assert!(!ctx.is_alive("p"));
        assert!(!ctx.is_alive("owned"));
        assert!(ctx.is_alive("kept"));
        assert_eq!(ctx.window(kept).unwrap().parent(), None);
        assert!(!ctx.is_child(root, p));

        log.clear();
        ctx.draw();
        assert_eq!(log.count("destroy_buffer"), 2);
        assert!(ctx.window(p).is_err());
        assert!(ctx.window(owned).is_err());
        assert!(ctx.window(kept).is_ok());
    }

    #[test]
    fn parent_teardown_starts_before_children() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let p = child_at(&mut ctx, root, "p", 0.0, 0.0, 100.0, 100.0);
        let c = child_at(&mut ctx, p, "c", 0.0, 0.0, 10.0, 10.0);
        let trace = Rc::new(RefCell::new(Vec::new()));
        trace_events(&mut ctx, p, EventKind::DestructionStarted, "start", &trace);
        trace_events(&mut ctx, c, EventKind::DestructionStarted, "start", &trace);
        trace_events(&mut ctx, p, EventKind::ChildRemoved, "removed", &trace);
        ctx.destroy(p);
        assert_eq!(*trace.borrow(), vec!["start:p", "start:c", "removed:p"]);
    }

    #[test]
    fn destroying_the_capture_window_clears_references() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let w = child_at(&mut ctx, root, "w", 0.0, 0.0, 100.0, 100.0);
        ctx.set_modal_state(w, true).unwrap();
        assert!(ctx.capture_input(w));
        ctx.destroy(w);
        assert_eq!(ctx.capture_window(), None);
        assert_eq!(ctx.modal_window(), None);
        ctx.destroy(root);
        assert_eq!(ctx.root_window(), None);
    }

    #[test]
    fn handlers_may_destroy_the_window_they_run_on() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let w = child_at(&mut ctx, root, "w", 0.0, 0.0, 100.0, 100.0);
        ctx.subscribe(w, EventKind::CursorPressHold, |ctx, args| {
            if let Some(w) = args.window {
                ctx.destroy(w);
            }
            true
        })
        .unwrap();
        ctx.inject_input_event(InputEvent::CursorMove { position: Vec2f::new(10.0, 10.0) });
        assert!(ctx.inject_input_event(InputEvent::CursorPressHold(CursorInputSource::Left)));
        assert!(!ctx.is_alive("w"));
        ctx.draw();
        assert!(ctx.window(w).is_err());
        assert!(ctx.window(root).unwrap().children().is_empty());
    }
}
