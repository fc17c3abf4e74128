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
use std::collections::HashMap;

/// Pointer button that produced a press or activation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CursorInputSource {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
}

impl CursorInputSource {
    fn from_buttons(btn: MouseButton) -> Option<Self> {
        if btn.is_left() {
            Some(Self::Left)
        } else if btn.is_right() {
            Some(Self::Right)
        } else if btn.is_middle() {
            Some(Self::Middle)
        } else {
            None
        }
    }
}

/// Device independent input intent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SemanticValue {
    /// Select everything.
    SelectAll,
    /// Copy the selection to the clipboard.
    Copy,
    /// Cut the selection to the clipboard.
    Cut,
    /// Paste from the clipboard.
    Paste,
    /// Undo the last edit.
    Undo,
    /// Redo the last undone edit.
    Redo,
    /// Delete the character before the caret.
    DeletePreviousCharacter,
    /// Delete the character after the caret.
    DeleteNextCharacter,
    /// Move the caret one character back.
    GoToPreviousCharacter,
    /// Move the caret one character forward.
    GoToNextCharacter,
    /// Move the caret one line up.
    GoUp,
    /// Move the caret one line down.
    GoDown,
    /// Move to the start of the line.
    GoToStartOfLine,
    /// Move to the end of the line.
    GoToEndOfLine,
    /// Scroll one page up.
    GoToPreviousPage,
    /// Scroll one page down.
    GoToNextPage,
    /// Move focus to the next widget.
    NavigateToNext,
    /// Move focus to the previous widget.
    NavigateToPrevious,
    /// Confirm the current input.
    Confirm,
    /// Dismiss the current input.
    Cancel,
}

/// Input already translated to semantic form, as consumed by [`GuiContext::inject_input_event`].
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// The pointer moved to an absolute position.
    CursorMove {
        /// New position in screen pixels.
        position: Vec2f,
    },
    /// A pointer button went down.
    CursorPressHold(CursorInputSource),
    /// A pointer button was released.
    CursorActivate(CursorInputSource),
    /// The wheel moved vertically.
    Scroll(f32),
    /// A character was typed.
    Text(char),
    /// A semantic key chord.
    Semantic(SemanticValue),
    /// The pointer left the display.
    CursorLeave,
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the middle mouse button is pressed.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` if the right mouse button is pressed.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left mouse button is pressed.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no mouse buttons are pressed.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    /// Modifier key state tracked by the aggregator.
    pub struct KeyMode : u32 {
        /// Alt key held.
        const ALT = 4;
        /// Control key held.
        const CTRL = 2;
        /// Shift key held.
        const SHIFT = 1;
        /// No modifiers active.
        const NONE = 0;
    }
}

impl KeyMode {
    /// Returns `true` if no modifiers are active.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Alt is held.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
    /// Returns `true` if Control is held.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Shift is held.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
}

/// Physical keys the aggregator understands.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Backspace,
    Delete,
    Return,
    Escape,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    A,
    C,
    V,
    X,
    Y,
    Z,
    /// Any other key, by scan code.
    Other(u32),
}

impl Key {
    fn modifier(&self) -> KeyMode {
        match self {
            Key::LeftShift | Key::RightShift => KeyMode::SHIFT,
            Key::LeftControl | Key::RightControl => KeyMode::CTRL,
            Key::LeftAlt | Key::RightAlt => KeyMode::ALT,
            _ => KeyMode::NONE,
        }
    }
}

/// Translates raw device input into semantic events for a [`GuiContext`].
#[derive(Clone, Debug)]
pub struct InputAggregator {
    mouse_pos: Vec2f,
    mouse_down: MouseButton,
    key_down: KeyMode,
    mappings: HashMap<(Key, KeyMode), SemanticValue>,
}

impl Default for InputAggregator {
    fn default() -> Self {
        let mut mappings = HashMap::new();
        let plain = [
            (Key::Backspace, SemanticValue::DeletePreviousCharacter),
            (Key::Delete, SemanticValue::DeleteNextCharacter),
            (Key::Return, SemanticValue::Confirm),
            (Key::Escape, SemanticValue::Cancel),
            (Key::Tab, SemanticValue::NavigateToNext),
            (Key::Left, SemanticValue::GoToPreviousCharacter),
            (Key::Right, SemanticValue::GoToNextCharacter),
            (Key::Up, SemanticValue::GoUp),
            (Key::Down, SemanticValue::GoDown),
            (Key::Home, SemanticValue::GoToStartOfLine),
            (Key::End, SemanticValue::GoToEndOfLine),
            (Key::PageUp, SemanticValue::GoToPreviousPage),
            (Key::PageDown, SemanticValue::GoToNextPage),
        ];
        for (key, value) in plain {
            mappings.insert((key, KeyMode::NONE), value);
        }
        mappings.insert((Key::Tab, KeyMode::SHIFT), SemanticValue::NavigateToPrevious);
        mappings.insert((Key::A, KeyMode::CTRL), SemanticValue::SelectAll);
        mappings.insert((Key::C, KeyMode::CTRL), SemanticValue::Copy);
        mappings.insert((Key::X, KeyMode::CTRL), SemanticValue::Cut);
        mappings.insert((Key::V, KeyMode::CTRL), SemanticValue::Paste);
        mappings.insert((Key::Z, KeyMode::CTRL), SemanticValue::Undo);
        mappings.insert((Key::Y, KeyMode::CTRL), SemanticValue::Redo);
        mappings.insert((Key::Z, KeyMode::CTRL | KeyMode::SHIFT), SemanticValue::Redo);
        Self { mouse_pos: Vec2f::default(), mouse_down: MouseButton::NONE, key_down: KeyMode::NONE, mappings }
    }
}

impl InputAggregator {
    /// Returns the last known pointer position.
    pub fn mouse_pos(&self) -> Vec2f { self.mouse_pos }

    /// Returns the currently held mouse buttons.
    pub fn get_mouse_buttons(&self) -> MouseButton { self.mouse_down }

    /// Returns the state of all modifier keys.
    pub fn key_state(&self) -> KeyMode { self.key_down }

    /// Maps a key chord to a semantic value, replacing any existing mapping.
    pub fn set_semantic_mapping(&mut self, key: Key, modifiers: KeyMode, value: SemanticValue) { self.mappings.insert((key, modifiers), value); }

    /// Updates the pointer position. Returns `true` if the UI consumed the move.
    pub fn mousemove(&mut self, ctx: &mut GuiContext, x: f32, y: f32) -> bool {
        self.mouse_pos = Vec2f::new(x, y);
        ctx.inject_input_event(InputEvent::CursorMove { position: self.mouse_pos })
    }

    /// Records that the specified mouse button was pressed.
    pub fn mousedown(&mut self, ctx: &mut GuiContext, x: f32, y: f32, btn: MouseButton) -> bool {
        let moved = self.mousemove(ctx, x, y);
        self.mouse_down |= btn;
        match CursorInputSource::from_buttons(btn) {
            Some(source) => ctx.inject_input_event(InputEvent::CursorPressHold(source)),
            None => moved,
        }
    }

    /// Records that the specified mouse button was released.
    pub fn mouseup(&mut self, ctx: &mut GuiContext, x: f32, y: f32, btn: MouseButton) -> bool {
        let moved = self.mousemove(ctx, x, y);
        self.mouse_down &= !btn;
        match CursorInputSource::from_buttons(btn) {
            Some(source) => ctx.inject_input_event(InputEvent::CursorActivate(source)),
            None => moved,
        }
    }

    /// Forwards vertical wheel movement.
    pub fn scroll(&mut self, ctx: &mut GuiContext, delta: f32) -> bool { ctx.inject_input_event(InputEvent::Scroll(delta)) }

    /// Records a key press, forwarding the semantic value mapped to the chord if any.
    pub fn keydown(&mut self, ctx: &mut GuiContext, key: Key) -> bool {
        let modifier = key.modifier();
        if !modifier.is_none() {
            self.key_down |= modifier;
            return false;
        }
        match self.mappings.get(&(key, self.key_down)) {
            Some(value) => ctx.inject_input_event(InputEvent::Semantic(*value)),
            None => false,
        }
    }

    /// Records a key release.
    pub fn keyup(&mut self, key: Key) { self.key_down &= !key.modifier(); }

    /// Forwards typed text, one character at a time.
    pub fn text(&mut self, ctx: &mut GuiContext, text: &str) -> bool {
        let mut handled = false;
        for c in text.chars() {
            handled |= ctx.inject_input_event(InputEvent::Text(c));
        }
        handled
    }

    /// Tells the context the pointer left the display.
    pub fn mouse_leave(&mut self, ctx: &mut GuiContext) -> bool { ctx.inject_input_event(InputEvent::CursorLeave) }
}
