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
use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Named notifications fired by windows and contexts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A child was attached; payload is [`EventPayload::Child`].
    ChildAdded,
    /// A child was detached; payload is [`EventPayload::Child`].
    ChildRemoved,
    /// Teardown of the window began.
    DestructionStarted,
    /// Position changed.
    Moved,
    /// Pixel size changed.
    Sized,
    /// Perceived z position changed.
    ZChanged,
    /// The always-on-top setting changed.
    AlwaysOnTopChanged,
    /// The window became active; payload is [`EventPayload::Activation`].
    Activated,
    /// The window lost activation; payload is [`EventPayload::Activation`].
    Deactivated,
    /// The window now receives captured input.
    InputCaptureGained,
    /// The window no longer receives captured input.
    InputCaptureLost,
    /// The window was made visible.
    Shown,
    /// The window was hidden.
    Hidden,
    /// The window was enabled.
    Enabled,
    /// The window was disabled.
    Disabled,
    /// The alpha value or alpha inheritance changed.
    AlphaChanged,
    /// The logical text changed.
    TextChanged,
    /// The font changed.
    FontChanged,
    /// The numeric id changed.
    IdChanged,
    /// The name changed.
    NameChanged,
    /// The window must be redrawn.
    Invalidated,
    /// Geometry population started.
    RenderingStarted,
    /// Geometry population ended.
    RenderingEnded,
    /// The window was updated by the time pulse; payload is [`EventPayload::Update`].
    Updated,
    /// Clipping against the parent was toggled.
    ClippedByParentChanged,
    /// Ownership by the parent was toggled.
    DestroyedByParentChanged,
    /// Non-client placement was toggled.
    NonClientChanged,
    /// Horizontal alignment changed.
    HorizontalAlignmentChanged,
    /// Vertical alignment changed.
    VerticalAlignmentChanged,
    /// A window renderer was attached.
    WindowRendererAttached,
    /// A window renderer was detached.
    WindowRendererDetached,
    /// The pointer entered the window or one of its descendants.
    CursorEntersArea,
    /// The pointer left the window and all of its descendants.
    CursorLeavesArea,
    /// The pointer is now directly over the window.
    CursorEntersSurface,
    /// The pointer is no longer directly over the window.
    CursorLeavesSurface,
    /// The pointer moved; payload is [`EventPayload::Cursor`].
    CursorMove,
    /// A pointer button went down; payload is [`EventPayload::Cursor`].
    CursorPressHold,
    /// A pointer button was released; payload is [`EventPayload::Cursor`].
    CursorActivate,
    /// The scroll wheel moved; payload is [`EventPayload::Cursor`].
    Scroll,
    /// A character was typed; payload is [`EventPayload::Text`].
    Character,
    /// A semantic input arrived; payload is [`EventPayload::Semantic`].
    SemanticInput,
    /// A push button was clicked.
    Clicked,
    /// A tooltip became visible.
    TooltipActive,
    /// A tooltip was dismissed.
    TooltipInactive,
    /// An active tooltip changed target.
    TooltipTransition,
    /// Context: the root window changed.
    RootWindowChanged,
    /// Context: the default font changed.
    DefaultFontChanged,
    /// Context: the surface size changed.
    SurfaceSizeChanged,
    /// User defined event.
    Custom(String),
}

/// Extra data carried by [`EventArgs`].
#[derive(Debug, Clone)]
pub enum EventPayload {
    /// Nothing beyond the window.
    None,
    /// The other party of an activation change.
    Activation {
        /// Window losing or gaining activation in exchange.
        other: Option<WindowId>,
    },
    /// Pointer state at the time of the event.
    Cursor {
        /// Pointer position in screen pixels.
        position: Vec2f,
        /// Movement since the previous position.
        delta: Vec2f,
        /// Button involved, if any.
        source: Option<CursorInputSource>,
        /// Scroll amount for wheel events.
        scroll: f32,
    },
    /// A typed character.
    Text {
        /// The character.
        character: char,
    },
    /// A semantic input value.
    Semantic {
        /// The value.
        value: SemanticValue,
    },
    /// Time pulse data.
    Update {
        /// Seconds since the previous pulse.
        elapsed: f32,
    },
    /// The child involved in a tree change.
    Child {
        /// The child.
        child: WindowId,
    },
}

/// Arguments handed to event subscribers.
#[derive(Debug, Clone)]
pub struct EventArgs {
    /// Window the event is currently delivered to; rewritten while bubbling.
    pub window: Option<WindowId>,
    /// Number of parties that handled the event.
    pub handled: u32,
    /// Event specific data.
    pub payload: EventPayload,
}

impl EventArgs {
    /// Plain arguments for `window`.
    pub fn new(window: Option<WindowId>) -> Self { Self { window, handled: 0, payload: EventPayload::None } }

    /// Arguments for `window` with a payload.
    pub fn with_payload(window: Option<WindowId>, payload: EventPayload) -> Self { Self { window, handled: 0, payload } }

    /// Returns the `other` window of an activation payload.
    pub fn other_window(&self) -> Option<WindowId> {
        match self.payload {
            EventPayload::Activation { other } => other,
            _ => None,
        }
    }

    /// Returns the pointer position of a cursor payload.
    pub fn cursor_position(&self) -> Option<Vec2f> {
        match self.payload {
            EventPayload::Cursor { position, .. } => Some(position),
            _ => None,
        }
    }

    /// Returns the button of a cursor payload.
    pub fn cursor_source(&self) -> Option<CursorInputSource> {
        match self.payload {
            EventPayload::Cursor { source, .. } => source,
            _ => None,
        }
    }
}

/// Subscriber callback; returning `true` marks the event as handled once.
pub type Subscriber = Box<dyn FnMut(&mut GuiContext, &mut EventArgs) -> bool>;

/// Handle identifying one subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    kind: EventKind,
    id: u64,
}

impl Connection {
    /// Event the subscription listens to.
    pub fn kind(&self) -> &EventKind { &self.kind }
}

type SharedSubscriber = Rc<RefCell<Subscriber>>;

/// Subscribers of one window or context, grouped by event.
#[derive(Default)]
pub struct EventSet {
    next_id: u64,
    slots: HashMap<EventKind, Vec<(u64, SharedSubscriber)>>,
    muted: bool,
}

impl EventSet {
    /// Adds a subscriber for `kind`.
    pub fn subscribe(&mut self, kind: EventKind, subscriber: Subscriber) -> Connection {
        self.next_id += 1;
        self.slots.entry(kind.clone()).or_default().push((self.next_id, Rc::new(RefCell::new(subscriber))));
        Connection { kind, id: self.next_id }
    }

    /// Removes a subscription. Returns `false` when it was already gone.
    pub fn unsubscribe(&mut self, connection: &Connection) -> bool {
        if let Some(list) = self.slots.get_mut(&connection.kind) {
            if let Some(pos) = list.iter().position(|(id, _)| *id == connection.id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Number of subscribers currently attached to `kind`.
    pub fn subscriber_count(&self, kind: &EventKind) -> usize { self.slots.get(kind).map(|l| l.len()).unwrap_or(0) }

    /// Returns `true` if events are suppressed.
    pub fn is_muted(&self) -> bool { self.muted }

    /// Suppresses or re-enables firing.
    pub fn set_muted(&mut self, muted: bool) { self.muted = muted }

    /// Subscribers of `kind` at the moment a firing starts.
    pub(crate) fn snapshot(&self, kind: &EventKind) -> Vec<SharedSubscriber> {
        if self.muted {
            return Vec::new();
        }
        self.slots.get(kind).map(|list| list.iter().map(|(_, s)| s.clone()).collect()).unwrap_or_default()
    }
}

// A subscriber already running further up the stack is skipped by nested firings.
fn run_subscribers(ctx: &mut GuiContext, subscribers: Vec<SharedSubscriber>, args: &mut EventArgs) {
    for subscriber in subscribers {
        let Ok(mut f) = subscriber.try_borrow_mut() else { continue };
        if (&mut *f)(ctx, args) {
            args.handled += 1;
        }
    }
}

impl GuiContext {
    /// Subscribes `f` to `kind` on `window`.
    pub fn subscribe<F>(&mut self, window: WindowId, kind: EventKind, f: F) -> Result<Connection>
    where
        F: FnMut(&mut GuiContext, &mut EventArgs) -> bool + 'static,
    {
        Ok(self.window_mut(window)?.events.subscribe(kind, Box::new(f)))
    }

    /// Removes a subscription made with [`GuiContext::subscribe`].
    pub fn unsubscribe(&mut self, window: WindowId, connection: &Connection) -> Result<bool> { Ok(self.window_mut(window)?.events.unsubscribe(connection)) }

    /// Subscribes `f` to a context level event.
    pub fn subscribe_context<F>(&mut self, kind: EventKind, f: F) -> Connection
    where
        F: FnMut(&mut GuiContext, &mut EventArgs) -> bool + 'static,
    {
        self.events.subscribe(kind, Box::new(f))
    }

    /// Suppresses or re-enables every event of `window`.
    pub fn set_mute_events(&mut self, window: WindowId, muted: bool) -> Result<()> {
        self.window_mut(window)?.events.set_muted(muted);
        Ok(())
    }

    /// Fires a user defined event on `window`; returns the handled count.
    pub fn fire_custom_event(&mut self, window: WindowId, name: &str, mut args: EventArgs) -> Result<u32> {
        self.window(window)?;
        self.fire_event(window, EventKind::Custom(name.to_string()), &mut args);
        Ok(args.handled)
    }

    /// Runs the subscribers of `kind` on `window`. Handlers may freely mutate the tree.
    pub(crate) fn fire_event(&mut self, window: WindowId, kind: EventKind, args: &mut EventArgs) {
        let subscribers = match self.manager.get(window) {
            Some(w) => w.events.snapshot(&kind),
            None => return,
        };
        run_subscribers(self, subscribers, args);
    }

    /// Shorthand for firing an event that carries no payload.
    pub(crate) fn notify(&mut self, window: WindowId, kind: EventKind) {
        let mut args = EventArgs::new(Some(window));
        self.fire_event(window, kind, &mut args);
    }

    pub(crate) fn fire_context_event(&mut self, kind: EventKind, args: &mut EventArgs) {
        let subscribers = self.events.snapshot(&kind);
        run_subscribers(self, subscribers, args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn handled_counts_each_true_return() {
        let (mut ctx, _) = mock_context();
        let w = with_root(&mut ctx);
        ctx.subscribe(w, EventKind::Custom("ping".into()), |_, _| true).unwrap();
        ctx.subscribe(w, EventKind::Custom("ping".into()), |_, _| false).unwrap();
        ctx.subscribe(w, EventKind::Custom("ping".into()), |_, _| true).unwrap();
        assert_eq!(ctx.fire_custom_event(w, "ping", EventArgs::new(Some(w))).unwrap(), 2);
    }

    #[test]
    fn handler_may_subscribe_and_disconnect_while_firing() {
        let (mut ctx, _) = mock_context();
        let w = with_root(&mut ctx);
        let kind = EventKind::Custom("tick".into());
        let hits = Rc::new(RefCell::new(Vec::new()));
        let slot: Rc<RefCell<Option<Connection>>> = Rc::new(RefCell::new(None));

        let h = hits.clone();
        let s = slot.clone();
        let k = kind.clone();
        ctx.subscribe(w, kind.clone(), move |ctx, args| {
            h.borrow_mut().push("first");
            let window = args.window.unwrap();
            if let Some(conn) = s.borrow_mut().take() {
                ctx.unsubscribe(window, &conn).unwrap();
            }
            let h2 = h.clone();
            ctx.subscribe(window, k.clone(), move |_, _| {
                h2.borrow_mut().push("late");
                false
            })
            .unwrap();
            false
        })
        .unwrap();
        let h = hits.clone();
        let second = ctx
            .subscribe(w, kind.clone(), move |_, _| {
                h.borrow_mut().push("second");
                false
            })
            .unwrap();
        *slot.borrow_mut() = Some(second);

        ctx.fire_custom_event(w, "tick", EventArgs::new(Some(w))).unwrap();
        // "second" was part of the running snapshot, so it still runs this time
        assert_eq!(*hits.borrow(), vec!["first", "second"]);
        hits.borrow_mut().clear();
        ctx.fire_custom_event(w, "tick", EventArgs::new(Some(w))).unwrap();
        assert_eq!(*hits.borrow(), vec!["first", "late"]);
        assert_eq!(ctx.window(w).unwrap().events.subscriber_count(&kind), 3);
    }

    #[test]
    fn nested_firing_reaches_other_subscribers() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let w = child_at(&mut ctx, root, "w", 0.0, 0.0, 10.0, 10.0);
        let resized = Rc::new(RefCell::new(false));
        let r = resized.clone();
        ctx.subscribe(w, EventKind::Sized, move |ctx, args| {
            if !*r.borrow() {
                *r.borrow_mut() = true;
                let window = args.window.unwrap();
                ctx.set_size(window, USize::new(UDim::absolute(30.0), UDim::absolute(30.0))).unwrap();
            }
            false
        })
        .unwrap();
        let count = count_events(&mut ctx, w, EventKind::Sized);

        ctx.set_size(w, USize::new(UDim::absolute(20.0), UDim::absolute(20.0))).unwrap();
        let size = ctx.window(w).unwrap().pixel_size();
        assert_eq!((size.width, size.height), (30.0, 30.0));
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn running_subscriber_is_not_reentered() {
        let (mut ctx, _) = mock_context();
        let w = with_root(&mut ctx);
        let depth = Rc::new(RefCell::new(0));
        let d = depth.clone();
        ctx.subscribe(w, EventKind::Custom("echo".into()), move |ctx, args| {
            *d.borrow_mut() += 1;
            let window = args.window.unwrap();
            ctx.fire_custom_event(window, "echo", EventArgs::new(Some(window))).unwrap();
            true
        })
        .unwrap();
        assert_eq!(ctx.fire_custom_event(w, "echo", EventArgs::new(Some(w))).unwrap(), 1);
        assert_eq!(*depth.borrow(), 1);
    }

    #[test]
    fn muted_windows_stay_silent() {
        let (mut ctx, _) = mock_context();
        let w = with_root(&mut ctx);
        let count = count_events(&mut ctx, w, EventKind::TextChanged);
        ctx.set_mute_events(w, true).unwrap();
        ctx.set_text(w, "quiet").unwrap();
        ctx.set_mute_events(w, false).unwrap();
        ctx.set_text(w, "loud").unwrap();
        assert_eq!(*count.borrow(), 1);
    }
}
