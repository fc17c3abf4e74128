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
use std::cell::RefCell;

/// Reorders logical text into display order.
pub type TextReorder = fn(&str) -> String;

/// Text split into display lines with markup removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedString {
    lines: Vec<String>,
}

impl RenderedString {
    /// Display lines.
    pub fn lines(&self) -> &[String] { &self.lines }

    /// Number of display lines.
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Lines joined back together.
    pub fn plain_text(&self) -> String { self.lines.join("\n") }

    /// Splits `text` into lines without interpreting markup.
    pub fn verbatim(text: &str) -> Self { Self { lines: text.split('\n').map(str::to_string).collect() } }

    /// Splits `text` into lines, dropping `[tag]` markup. `\[` yields a literal bracket.
    pub fn parse(text: &str) -> Self {
        let mut lines = vec![String::new()];
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&'[') => {
                    chars.next();
                    push_char(&mut lines, '[');
                }
                '[' => {
                    let mut tag = String::new();
                    let mut closed = false;
                    for t in chars.by_ref() {
                        if t == ']' {
                            closed = true;
                            break;
                        }
                        tag.push(t);
                    }
                    // an unterminated tag is kept as text
                    if !closed {
                        push_char(&mut lines, '[');
                        for t in tag.chars() {
                            push_char(&mut lines, t);
                        }
                    }
                }
                '\n' => lines.push(String::new()),
                _ => push_char(&mut lines, c),
            }
        }
        Self { lines }
    }
}

fn push_char(lines: &mut Vec<String>, c: char) {
    if let Some(last) = lines.last_mut() {
        last.push(c);
    }
}

/// Logical text of a window together with its derived visual and rendered forms.
#[derive(Default)]
pub struct WindowText {
    logical: String,
    parsing: bool,
    reorder: Option<TextReorder>,
    visual: RefCell<Option<String>>,
    rendered: RefCell<Option<RenderedString>>,
}

impl WindowText {
    /// Creates text with markup parsing enabled.
    pub fn new() -> Self { Self { parsing: true, ..Self::default() } }

    /// Logical text, as set by the application.
    pub fn logical(&self) -> &str { &self.logical }

    /// Replaces the logical text.
    pub fn set(&mut self, text: &str) {
        self.logical = text.to_string();
        self.invalidate();
    }

    /// Inserts `text` before the char at `position`; positions past the end append.
    pub fn insert(&mut self, position: usize, text: &str) {
        let byte = self.logical.char_indices().nth(position).map(|(i, _)| i).unwrap_or(self.logical.len());
        self.logical.insert_str(byte, text);
        self.invalidate();
    }

    /// Appends `text`.
    pub fn append(&mut self, text: &str) {
        self.logical.push_str(text);
        self.invalidate();
    }

    /// Text in display order.
    pub fn visual(&self) -> String {
        if let Some(v) = self.visual.borrow().as_ref() {
            return v.clone();
        }
        let v = match self.reorder {
            Some(f) => f(&self.logical),
            None => self.logical.clone(),
        };
        *self.visual.borrow_mut() = Some(v.clone());
        v
    }

    /// Visual text broken into lines, markup processed when parsing is enabled.
    pub fn rendered(&self) -> RenderedString {
        if let Some(r) = self.rendered.borrow().as_ref() {
            return r.clone();
        }
        let visual = self.visual();
        let r = if self.parsing { RenderedString::parse(&visual) } else { RenderedString::verbatim(&visual) };
        *self.rendered.borrow_mut() = Some(r.clone());
        r
    }

    /// Returns `true` if markup is interpreted.
    pub fn is_parsing_enabled(&self) -> bool { self.parsing }

    /// Enables or disables markup interpretation.
    pub fn set_parsing_enabled(&mut self, enabled: bool) {
        self.parsing = enabled;
        self.invalidate_rendered();
    }

    /// Installs the function producing display order.
    pub fn set_reorder(&mut self, reorder: Option<TextReorder>) {
        self.reorder = reorder;
        self.invalidate();
    }

    /// Drops the rendered form, keeping the visual one.
    pub fn invalidate_rendered(&mut self) { *self.rendered.get_mut() = None; }

    fn invalidate(&mut self) {
        *self.visual.get_mut() = None;
        self.invalidate_rendered();
    }
}
