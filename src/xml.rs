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
//! Writing window subtrees out as XML layouts.
use super::*;
use std::fmt::Write;

/// Streaming XML writer with an open-tag stack.
pub struct XmlSerializer {
    out: String,
    stack: Vec<String>,
    indent: usize,
    start_pending: bool,
    after_text: bool,
    tag_count: usize,
    ok: bool,
}

impl XmlSerializer {
    /// Writer that starts with the XML declaration, indenting nested tags by `indent` spaces.
    pub fn new(indent: usize) -> Self {
        let mut s = Self::fragment(indent);
        s.out.push_str("<?xml version=\"1.0\" ?>\n");
        s
    }

    /// Writer without the XML declaration.
    pub fn fragment(indent: usize) -> Self { Self { out: String::new(), stack: Vec::new(), indent, start_pending: false, after_text: false, tag_count: 0, ok: true } }

    fn finish_start_tag(&mut self, newline: bool) {
        if self.start_pending {
            self.out.push('>');
            if newline {
                self.out.push('\n');
            }
            self.start_pending = false;
        }
    }

    fn pad(&mut self, depth: usize) {
        for _ in 0..depth * self.indent {
            self.out.push(' ');
        }
    }

    /// Starts a nested element.
    pub fn open_tag(&mut self, name: &str) -> &mut Self {
        self.finish_start_tag(true);
        self.pad(self.stack.len());
        self.out.push('<');
        self.out.push_str(name);
        self.stack.push(name.to_string());
        self.start_pending = true;
        self.after_text = false;
        self.tag_count += 1;
        self
    }

    /// Adds an attribute to the element just opened.
    pub fn attribute(&mut self, name: &str, value: &str) -> &mut Self {
        if !self.start_pending {
            self.ok = false;
            return self;
        }
        let _ = write!(self.out, " {}=\"{}\"", name, escape(value));
        self
    }

    /// Adds character data to the current element.
    pub fn text(&mut self, text: &str) -> &mut Self {
        if self.stack.is_empty() {
            self.ok = false;
            return self;
        }
        self.finish_start_tag(false);
        self.out.push_str(&escape(text));
        self.after_text = true;
        self
    }

    /// Ends the current element.
    pub fn close_tag(&mut self) -> &mut Self {
        let Some(name) = self.stack.pop() else {
            self.ok = false;
            return self;
        };
        if self.start_pending {
            self.out.push_str(" />\n");
            self.start_pending = false;
        } else {
            if !self.after_text {
                self.pad(self.stack.len());
            }
            let _ = writeln!(self.out, "</{}>", name);
        }
        self.after_text = false;
        self
    }

    /// Number of elements opened so far.
    pub fn tag_count(&self) -> usize { self.tag_count }

    /// Returns `false` once a call was made out of sequence.
    pub fn is_ok(&self) -> bool { self.ok }

    /// Text written so far.
    pub fn as_str(&self) -> &str { &self.out }

    /// Consumes the writer. Elements still open are closed.
    pub fn into_string(mut self) -> String {
        while !self.stack.is_empty() {
            self.close_tag();
        }
        self.out
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

impl GuiContext {
    /// Writes `window` and its subtree. Windows with writing disabled are skipped.
    pub fn write_xml_to_stream(&self, window: WindowId, xml: &mut XmlSerializer) -> Result<()> {
        let w = self.window(window)?;
        if !w.is_writing_xml_allowed() {
            return Ok(());
        }
        let window_type = if w.falagard_type.is_empty() { &w.type_name } else { &w.falagard_type };
        xml.open_tag("Window").attribute("type", window_type);
        if !self.manager.is_generated_name(&w.name) {
            xml.attribute("name", &w.name);
        }
        self.write_content_xml(window, xml)?;
        xml.close_tag();
        Ok(())
    }

    /// Serializes `window` into a standalone document.
    pub fn window_to_xml(&self, window: WindowId) -> Result<String> {
        let mut xml = XmlSerializer::new(4);
        self.write_xml_to_stream(window, &mut xml)?;
        Ok(xml.into_string())
    }

    fn write_content_xml(&self, window: WindowId, xml: &mut XmlSerializer) -> Result<()> {
        self.write_properties_xml(window, xml)?;
        let w = self.window(window)?;
        for (name, value) in &w.user_strings {
            xml.open_tag("UserString").attribute("name", name).attribute("value", value).close_tag();
        }
        for child in w.children.iter().copied() {
            if self.window(child)?.is_auto_window() {
                self.write_auto_child_xml(window, child, xml)?;
            } else {
                self.write_xml_to_stream(child, xml)?;
            }
        }
        Ok(())
    }

    fn write_properties_xml(&self, window: WindowId, xml: &mut XmlSerializer) -> Result<()> {
        let w = self.window(window)?;
        for info in self.properties(window)? {
            if w.is_property_banned_from_xml(&info.name) {
                continue;
            }
            match self.get_property(window, &info.name) {
                Ok(value) if value != info.default => {
                    xml.open_tag("Property").attribute("name", &info.name).attribute("value", &value).close_tag();
                }
                Ok(_) => (),
                Err(err) => error!("writing property '{}' of '{}': {}", info.name, w.name, err),
            }
        }
        Ok(())
    }

    /// Auto windows are only written when they carry something beyond their defaults.
    fn write_auto_child_xml(&self, parent: WindowId, child: WindowId, xml: &mut XmlSerializer) -> Result<()> {
        let c = self.window(child)?;
        if !c.is_writing_xml_allowed() {
            return Ok(());
        }
        let mut trial = XmlSerializer::fragment(0);
        trial.open_tag("AutoWindow");
        self.write_content_xml(child, &mut trial)?;
        if trial.tag_count() <= 1 {
            return Ok(());
        }
        let parent_name = &self.window(parent)?.name;
        let suffix = c.name.strip_prefix(parent_name.as_str()).unwrap_or(&c.name);
        xml.open_tag("AutoWindow").attribute("namePath", suffix);
        self.write_content_xml(child, xml)?;
        xml.close_tag();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn serializer_nests_and_escapes() {
        let mut xml = XmlSerializer::new(2);
        xml.open_tag("A").attribute("v", "x<\"y\"&").open_tag("B").close_tag().open_tag("C").text("t & u").close_tag().close_tag();
        assert!(xml.is_ok());
        assert_eq!(xml.tag_count(), 3);
        assert_eq!(xml.into_string(), "<?xml version=\"1.0\" ?>\n<A v=\"x&lt;&quot;y&quot;&amp;\">\n  <B />\n  <C>t &amp; u</C>\n</A>\n");
    }

    #[test]
    fn attributes_after_content_are_errors() {
        let mut xml = XmlSerializer::fragment(0);
        xml.open_tag("A").open_tag("B").close_tag().attribute("late", "1");
        assert!(!xml.is_ok());
        assert_eq!(xml.into_string(), "<A>\n<B />\n</A>\n");
    }

    #[test]
    fn subtree_writes_non_default_properties() {
        let (mut ctx, _) = mock_context();
        let panel = ctx.create_window("DefaultWindow", "panel").unwrap();
        ctx.set_text(panel, "a<b").unwrap();
        ctx.set_id(panel, 7).unwrap();
        ctx.ban_property_from_xml(panel, "ID", false).unwrap();
        let ok = ctx.create_window("PushButton", "ok").unwrap();
        ctx.add_child(panel, ok).unwrap();
        ctx.hide(ok).unwrap();
        ctx.set_user_string(ok, "role", "confirm").unwrap();
        let hidden = ctx.create_window("DefaultWindow", "").unwrap();
        ctx.add_child(panel, hidden).unwrap();
        ctx.set_writing_xml_allowed(hidden, false).unwrap();

        let mut xml = XmlSerializer::fragment(4);
        ctx.write_xml_to_stream(panel, &mut xml).unwrap();
        assert_eq!(
            xml.into_string(),
            concat!(
                "<Window type=\"DefaultWindow\" name=\"panel\">\n",
                "    <Property name=\"Text\" value=\"a&lt;b\" />\n",
                "    <Window type=\"PushButton\" name=\"ok\">\n",
                "        <Property name=\"Visible\" value=\"false\" />\n",
                "        <UserString name=\"role\" value=\"confirm\" />\n",
                "    </Window>\n",
                "</Window>\n",
            )
        );
    }

    #[test]
    fn generated_names_are_not_written() {
        let (mut ctx, _) = mock_context();
        let w = ctx.create_window("DefaultWindow", "").unwrap();
        let out = ctx.window_to_xml(w).unwrap();
        assert_eq!(out, "<?xml version=\"1.0\" ?>\n<Window type=\"DefaultWindow\" />\n");
    }

    #[test]
    fn auto_children_only_when_customised() {
        let (mut ctx, _) = mock_context();
        let frame = ctx.create_window("FrameWindow", "frame").unwrap();
        let bar = ctx.create_auto_child(frame, "DefaultWindow", "__auto_bar__").unwrap();
        let plain = ctx.window_to_xml(frame).unwrap();
        assert!(!plain.contains("AutoWindow"));

        ctx.set_text(bar, "Title").unwrap();
        let mut xml = XmlSerializer::fragment(4);
        ctx.write_xml_to_stream(frame, &mut xml).unwrap();
        assert_eq!(
            xml.into_string(),
            concat!(
                "<Window type=\"FrameWindow\" name=\"frame\">\n",
                "    <AutoWindow namePath=\"__auto_bar__\">\n",
                "        <Property name=\"Text\" value=\"Title\" />\n",
                "    </AutoWindow>\n",
                "</Window>\n",
            )
        );
    }
}
