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

impl EventKind {
    fn is_pointer_input(&self) -> bool { matches!(self, EventKind::CursorMove | EventKind::CursorPressHold | EventKind::CursorActivate | EventKind::Scroll) }
    fn is_key_input(&self) -> bool { matches!(self, EventKind::Character | EventKind::SemanticInput) }
}

impl GuiContext {
    /// Runs the input pipeline starting at `target`: default reaction, subscribers, then the
    /// parent while nothing handled the event, the window propagates it and is not modal.
    /// Returns the final handled count.
    pub(crate) fn dispatch_input(&mut self, target: WindowId, kind: EventKind, mut args: EventArgs) -> u32 {
        let mut current = target;
        loop {
            args.window = Some(current);
            self.default_input_reaction(current, &kind, &mut args);
            self.fire_event(current, kind.clone(), &mut args);
            if args.handled > 0 {
                break;
            }

            let Some(w) = self.manager.get(current) else { break };
            let propagates = if kind.is_pointer_input() {
                w.is_pointer_propagation_enabled()
            } else {
                kind.is_key_input()
            };
            if !propagates || self.modal == Some(current) {
                break;
            }
            match w.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        args.handled
    }

    fn default_input_reaction(&mut self, window: WindowId, kind: &EventKind, args: &mut EventArgs) {
        match kind {
            EventKind::CursorMove => {
                if let Some(tip) = self.tooltip_window(window) {
                    if !self.is_ancestor(window, tip) {
                        self.reset_tooltip_timer(tip);
                    }
                }
                self.behavior_cursor_move(window, args);
            }
            EventKind::CursorPressHold => {
                if let Some(tip) = self.tooltip_window(window) {
                    if !self.is_ancestor(window, tip) {
                        self.set_tooltip_target(tip, None);
                    }
                }
                let source = args.cursor_source();
                if source == Some(CursorInputSource::Left) && self.move_to_front_impl(window, true) {
                    args.handled += 1;
                }
                if let Some(source) = source {
                    self.begin_auto_repeat(window, source);
                }
                self.behavior_cursor_press(window, args);
            }
            EventKind::CursorActivate => {
                if let Some(source) = args.cursor_source() {
                    self.end_auto_repeat(window, source);
                }
                self.behavior_cursor_activate(window, args);
            }
            _ => (),
        }
    }

    fn begin_auto_repeat(&mut self, window: WindowId, source: CursorInputSource) {
        let Some(w) = self.manager.get(window) else { return };
        if !w.is_auto_repeat_enabled() || w.auto_repeat.button.is_some() {
            return;
        }
        if self.capture_input(window) {
            if let Some(w) = self.manager.get_mut(window) {
                w.auto_repeat.button = Some(source);
                w.auto_repeat.elapsed = 0.0;
                w.auto_repeat.repeating = false;
            }
        }
    }

    fn end_auto_repeat(&mut self, window: WindowId, source: CursorInputSource) {
        let Some(w) = self.manager.get_mut(window) else { return };
        if w.is_auto_repeat_enabled() && w.auto_repeat.button == Some(source) {
            w.auto_repeat.button = None;
            self.release_input(window);
        }
    }

    fn update_auto_repeat(&mut self, window: WindowId, elapsed: f32) {
        let Some(w) = self.manager.get_mut(window) else { return };
        let Some(button) = w.auto_repeat.button.filter(|_| w.is_auto_repeat_enabled()) else { return };
        let repeat = &mut w.auto_repeat;
        repeat.elapsed += elapsed;
        let fire = if repeat.repeating {
            if repeat.elapsed > repeat.rate {
                repeat.elapsed -= repeat.rate;
                true
            } else {
                false
            }
        } else if repeat.elapsed > repeat.delay {
            repeat.elapsed = 0.0;
            repeat.repeating = true;
            true
        } else {
            false
        };
        if fire {
            let payload = EventPayload::Cursor { position: self.pointer_position(), delta: Vec2f::default(), source: Some(button), scroll: 0.0 };
            self.dispatch_input(window, EventKind::CursorPressHold, EventArgs::with_payload(Some(window), payload));
        }
    }

    /// Advances timers on `window` and, per update mode, its descendants.
    pub fn update_window(&mut self, window: WindowId, elapsed: f32) {
        if !self.manager.contains(window) {
            return;
        }
        self.update_auto_repeat(window, elapsed);
        self.update_behavior(window, elapsed);

        let renderer = self.manager.get_mut(window).and_then(|w| w.window_renderer.take());
        if let Some(mut renderer) = renderer {
            renderer.update(self, window, elapsed);
            if let Some(w) = self.manager.get_mut(window) {
                w.window_renderer = Some(renderer);
            }
        }

        let mut args = EventArgs::with_payload(Some(window), EventPayload::Update { elapsed });
        self.fire_event(window, EventKind::Updated, &mut args);

        let children = self.manager.get(window).map(|w| w.children.clone()).unwrap_or_default();
        for child in children {
            let Some(c) = self.manager.get(child) else { continue };
            let due = match c.update_mode {
                UpdateMode::Always => true,
                UpdateMode::Visible => c.is_visible(),
                UpdateMode::Never => false,
            };
            if due {
                self.update_window(child, elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use std::{cell::RefCell, rc::Rc};

    fn press_left(ctx: &mut GuiContext, x: f32, y: f32) -> bool {
        ctx.inject_input_event(InputEvent::CursorMove { position: Vec2f::new(x, y) });
        ctx.inject_input_event(InputEvent::CursorPressHold(CursorInputSource::Left))
    }

    #[test]
    fn unhandled_press_bubbles_child_then_parent() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let p = child_at(&mut ctx, root, "P", 100.0, 100.0, 200.0, 200.0);
        let c = child_at(&mut ctx, p, "C", 10.0, 10.0, 50.0, 50.0);
        ctx.set_pointer_propagation_enabled(c, true).unwrap();
        ctx.activate(c);

        let trace = Rc::new(RefCell::new(Vec::new()));
        trace_events(&mut ctx, c, EventKind::CursorPressHold, "press", &trace);
        trace_events(&mut ctx, p, EventKind::CursorPressHold, "press", &trace);
        trace_events(&mut ctx, root, EventKind::CursorPressHold, "press", &trace);
        assert!(!press_left(&mut ctx, 120.0, 120.0));
        assert_eq!(*trace.borrow(), vec!["press:C", "press:P"]);
    }

    #[test]
    fn handled_event_stops_bubbling() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let p = child_at(&mut ctx, root, "P", 100.0, 100.0, 200.0, 200.0);
        let c = child_at(&mut ctx, p, "C", 10.0, 10.0, 50.0, 50.0);
        ctx.set_pointer_propagation_enabled(c, true).unwrap();
        ctx.activate(c);
        ctx.subscribe(c, EventKind::CursorPressHold, |_, _| true).unwrap();
        let parent_saw = count_events(&mut ctx, p, EventKind::CursorPressHold);
        assert!(press_left(&mut ctx, 120.0, 120.0));
        assert_eq!(*parent_saw.borrow(), 0);
    }

    #[test]
    fn activation_by_click_counts_as_handled() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let p = child_at(&mut ctx, root, "P", 100.0, 100.0, 200.0, 200.0);
        let c = child_at(&mut ctx, p, "C", 10.0, 10.0, 50.0, 50.0);
        ctx.set_pointer_propagation_enabled(c, true).unwrap();
        let parent_saw = count_events(&mut ctx, p, EventKind::CursorPressHold);
        assert!(press_left(&mut ctx, 120.0, 120.0));
        assert!(ctx.is_active(c));
        assert_eq!(*parent_saw.borrow(), 0);
    }

    #[test]
    fn modal_window_fences_key_bubbling() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let dialog = child_at(&mut ctx, root, "dialog", 100.0, 100.0, 200.0, 200.0);
        let field = child_at(&mut ctx, dialog, "field", 10.0, 10.0, 50.0, 20.0);
        let root_saw = count_events(&mut ctx, root, EventKind::Character);
        let dialog_saw = count_events(&mut ctx, dialog, EventKind::Character);

        ctx.activate(field);
        ctx.inject_input_event(InputEvent::Text('x'));
        assert_eq!((*dialog_saw.borrow(), *root_saw.borrow()), (1, 1));

        ctx.set_modal_state(dialog, true).unwrap();
        ctx.activate(field);
        ctx.inject_input_event(InputEvent::Text('y'));
        assert_eq!((*dialog_saw.borrow(), *root_saw.borrow()), (2, 1));
    }

    #[test]
    fn auto_repeat_refires_press_from_the_time_pulse() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let w = child_at(&mut ctx, root, "w", 0.0, 0.0, 100.0, 100.0);
        ctx.set_auto_repeat_enabled(w, true).unwrap();
        let presses = count_events(&mut ctx, w, EventKind::CursorPressHold);

        press_left(&mut ctx, 10.0, 10.0);
        assert_eq!(ctx.capture_window(), Some(w));
        assert_eq!(*presses.borrow(), 1);
        ctx.inject_time_pulse(0.2);
        assert_eq!(*presses.borrow(), 1);
        ctx.inject_time_pulse(0.15);
        assert_eq!(*presses.borrow(), 2);
        ctx.inject_time_pulse(0.07);
        assert_eq!(*presses.borrow(), 3);

        ctx.inject_input_event(InputEvent::CursorActivate(CursorInputSource::Left));
        assert_eq!(ctx.capture_window(), None);
        ctx.inject_time_pulse(1.0);
        assert_eq!(*presses.borrow(), 3);
    }

    #[test]
    fn update_modes_gate_the_time_pulse() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let hidden = child_at(&mut ctx, root, "hidden", 0.0, 0.0, 10.0, 10.0);
        let always = child_at(&mut ctx, root, "always", 0.0, 0.0, 10.0, 10.0);
        let never = child_at(&mut ctx, root, "never", 0.0, 0.0, 10.0, 10.0);
        ctx.hide(hidden).unwrap();
        ctx.hide(always).unwrap();
        ctx.set_update_mode(always, UpdateMode::Always).unwrap();
        ctx.set_update_mode(never, UpdateMode::Never).unwrap();
        let counts: Vec<_> = [root, hidden, always, never].iter().map(|w| count_events(&mut ctx, *w, EventKind::Updated)).collect();
        ctx.inject_time_pulse(0.016);
        let seen: Vec<usize> = counts.iter().map(|c| *c.borrow()).collect();
        assert_eq!(seen, vec![1, 0, 1, 0]);
    }
}
