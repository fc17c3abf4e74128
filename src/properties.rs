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
//! String-valued named properties over the window state, plus look-defined ones.
use super::*;
use std::{fmt, str::FromStr};

/// Description of one property of a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    /// Property name.
    pub name: String,
    /// Value a fresh window reports.
    pub default: String,
    /// `false` for properties added by a look or the application.
    pub builtin: bool,
}

const BUILTIN_PROPERTIES: &[(&str, &str)] = &[
    ("Alpha", "1"),
    ("AlwaysOnTop", "false"),
    ("Area", "{{0,0},{0,0},{0,0},{0,0}}"),
    ("AutoRenderingSurface", "false"),
    ("AutoRepeatDelay", "0.3"),
    ("AutoRepeatRate", "0.06"),
    ("ClippedByParent", "true"),
    ("CursorAutoRepeatEnabled", "false"),
    ("CursorInputPropagationEnabled", "false"),
    ("CursorPassThroughEnabled", "false"),
    ("DestroyedByParent", "true"),
    ("Disabled", "false"),
    ("DistributeCapturedInputs", "false"),
    ("Font", ""),
    ("HorizontalAlignment", "Left"),
    ("ID", "0"),
    ("InheritsAlpha", "true"),
    ("InheritsTooltipText", "true"),
    ("MaxSize", "{{0,0},{0,0}}"),
    ("MinSize", "{{0,0},{0,0}}"),
    ("NonClient", "false"),
    ("RestoreOldCapture", "false"),
    ("RiseOnClickEnabled", "true"),
    ("Text", ""),
    ("TextParsingEnabled", "true"),
    ("TooltipText", ""),
    ("UpdateMode", "Visible"),
    ("VerticalAlignment", "Top"),
    ("Visible", "true"),
    ("ZOrderingEnabled", "true"),
];

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Always => "Always",
            Self::Never => "Never",
            Self::Visible => "Visible",
        })
    }
}

impl FromStr for UpdateMode {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Always" => Ok(Self::Always),
            "Never" => Ok(Self::Never),
            "Visible" => Ok(Self::Visible),
            _ => Err(Error::InvalidRequest(format!("'{}' is not an update mode", s))),
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "true" | "True" => Ok(true),
        "false" | "False" => Ok(false),
        _ => Err(Error::InvalidRequest(format!("'{}' is not a boolean", value))),
    }
}

fn parse<T: FromStr>(value: &str) -> Result<T> { value.trim().parse().map_err(|_| Error::InvalidRequest(format!("cannot parse '{}'", value))) }

fn builtin_value(w: &Window, name: &str) -> Option<String> {
    let value = match name {
        "Alpha" => w.alpha().to_string(),
        "AlwaysOnTop" => w.is_always_on_top().to_string(),
        "Area" => w.area().to_string(),
        "AutoRenderingSurface" => w.is_auto_rendering_surface_enabled().to_string(),
        "AutoRepeatDelay" => w.auto_repeat_delay().to_string(),
        "AutoRepeatRate" => w.auto_repeat_rate().to_string(),
        "ClippedByParent" => w.is_clipped_by_parent().to_string(),
        "CursorAutoRepeatEnabled" => w.is_auto_repeat_enabled().to_string(),
        "CursorInputPropagationEnabled" => w.is_pointer_propagation_enabled().to_string(),
        "CursorPassThroughEnabled" => w.is_cursor_pass_through_enabled().to_string(),
        "DestroyedByParent" => w.is_destroyed_by_parent().to_string(),
        "Disabled" => w.is_disabled().to_string(),
        "DistributeCapturedInputs" => w.distributes_captured_inputs().to_string(),
        "Font" => w.font_name().unwrap_or_default().to_string(),
        "HorizontalAlignment" => w.horizontal_alignment().to_string(),
        "ID" => w.id().to_string(),
        "InheritsAlpha" => w.inherits_alpha().to_string(),
        "InheritsTooltipText" => w.inherits_tooltip_text().to_string(),
        "MaxSize" => w.max_size().to_string(),
        "MinSize" => w.min_size().to_string(),
        "NonClient" => w.is_non_client().to_string(),
        "RestoreOldCapture" => w.restores_old_capture().to_string(),
        "RiseOnClickEnabled" => w.is_rise_on_click_enabled().to_string(),
        "Text" => w.text().to_string(),
        "TextParsingEnabled" => w.text.is_parsing_enabled().to_string(),
        "TooltipText" => w.tooltip_text().to_string(),
        "UpdateMode" => w.update_mode().to_string(),
        "VerticalAlignment" => w.vertical_alignment().to_string(),
        "Visible" => w.is_visible().to_string(),
        "ZOrderingEnabled" => w.is_z_ordering_enabled().to_string(),
        _ => return None,
    };
    Some(value)
}

impl GuiContext {
    fn set_builtin(&mut self, window: WindowId, name: &str, value: &str) -> Option<Result<()>> {
        let w = window;
        let result = match name {
            "Alpha" => parse(value).and_then(|v| self.set_alpha(w, v)),
            "AlwaysOnTop" => parse_bool(value).and_then(|v| self.set_always_on_top(w, v)),
            "Area" => parse(value).and_then(|v| self.set_area(w, v)),
            "AutoRenderingSurface" => parse_bool(value).and_then(|v| self.set_auto_rendering_surface(w, v)),
            "AutoRepeatDelay" => parse(value).and_then(|v| self.set_auto_repeat_delay(w, v)),
            "AutoRepeatRate" => parse(value).and_then(|v| self.set_auto_repeat_rate(w, v)),
            "ClippedByParent" => parse_bool(value).and_then(|v| self.set_clipped_by_parent(w, v)),
            "CursorAutoRepeatEnabled" => parse_bool(value).and_then(|v| self.set_auto_repeat_enabled(w, v)),
            "CursorInputPropagationEnabled" => parse_bool(value).and_then(|v| self.set_pointer_propagation_enabled(w, v)),
            "CursorPassThroughEnabled" => parse_bool(value).and_then(|v| self.set_cursor_pass_through_enabled(w, v)),
            "DestroyedByParent" => parse_bool(value).and_then(|v| self.set_destroyed_by_parent(w, v)),
            "Disabled" => parse_bool(value).and_then(|v| self.set_enabled(w, !v)),
            "DistributeCapturedInputs" => parse_bool(value).and_then(|v| self.set_distributes_captured_inputs(w, v)),
            "Font" => self.set_font(w, Some(value).filter(|v| !v.is_empty())),
            "HorizontalAlignment" => value.parse().and_then(|v| self.set_horizontal_alignment(w, v)),
            "ID" => parse(value).and_then(|v| self.set_id(w, v)),
            "InheritsAlpha" => parse_bool(value).and_then(|v| self.set_inherits_alpha(w, v)),
            "InheritsTooltipText" => parse_bool(value).and_then(|v| self.set_inherits_tooltip_text(w, v)),
            "MaxSize" => parse(value).and_then(|v| self.set_max_size(w, v)),
            "MinSize" => parse(value).and_then(|v| self.set_min_size(w, v)),
            "NonClient" => parse_bool(value).and_then(|v| self.set_non_client(w, v)),
            "RestoreOldCapture" => parse_bool(value).and_then(|v| self.set_restore_old_capture(w, v)),
            "RiseOnClickEnabled" => parse_bool(value).and_then(|v| self.set_rise_on_click_enabled(w, v)),
            "Text" => self.set_text(w, value),
            "TextParsingEnabled" => parse_bool(value).and_then(|v| self.set_text_parsing_enabled(w, v)),
            "TooltipText" => self.set_tooltip_text(w, value),
            "UpdateMode" => value.parse().and_then(|v| self.set_update_mode(w, v)),
            "VerticalAlignment" => value.parse().and_then(|v| self.set_vertical_alignment(w, v)),
            "Visible" => parse_bool(value).and_then(|v| self.set_visible(w, v)),
            "ZOrderingEnabled" => parse_bool(value).and_then(|v| self.set_z_ordering_enabled(w, v)),
            _ => return None,
        };
        Some(result)
    }

    /// Current value of property `name` on `window`.
    pub fn get_property(&self, window: WindowId, name: &str) -> Result<String> {
        let w = self.window(window)?;
        if let Some(value) = builtin_value(w, name) {
            return Ok(value);
        }
        w.custom_properties
            .get(name)
            .map(|p| p.value.clone())
            .ok_or_else(|| Error::UnknownObject(format!("property '{}' is not present on '{}'", name, w.name)))
    }

    /// Parses `value` into property `name` of `window`.
    pub fn set_property(&mut self, window: WindowId, name: &str, value: &str) -> Result<()> {
        self.window(window)?;
        if let Some(result) = self.set_builtin(window, name, value) {
            return result;
        }
        let w = self.window_mut(window)?;
        let property = w
            .custom_properties
            .get_mut(name)
            .ok_or_else(|| Error::UnknownObject(format!("property '{}' is not present on '{}'", name, w.name)))?;
        property.value = value.to_string();
        self.invalidate(window, false);
        Ok(())
    }

    /// Returns `true` if `window` has a property called `name`.
    pub fn is_property_present(&self, window: WindowId, name: &str) -> bool {
        BUILTIN_PROPERTIES.iter().any(|(n, _)| *n == name) || self.manager.get(window).map(|w| w.custom_properties.contains_key(name)).unwrap_or(false)
    }

    /// Default value of property `name`.
    pub fn property_default(&self, window: WindowId, name: &str) -> Result<String> {
        let w = self.window(window)?;
        if let Some((_, default)) = BUILTIN_PROPERTIES.iter().find(|(n, _)| *n == name) {
            return Ok(default.to_string());
        }
        w.custom_properties
            .get(name)
            .map(|p| p.default.clone())
            .ok_or_else(|| Error::UnknownObject(format!("property '{}' is not present on '{}'", name, w.name)))
    }

    /// Returns `true` if property `name` still holds its default.
    pub fn is_property_default(&self, window: WindowId, name: &str) -> Result<bool> { Ok(self.get_property(window, name)? == self.property_default(window, name)?) }

    /// Every property of `window`, built-in ones first, each group in name order.
    pub fn properties(&self, window: WindowId) -> Result<Vec<PropertyInfo>> {
        let w = self.window(window)?;
        let builtin = BUILTIN_PROPERTIES.iter().map(|(name, default)| PropertyInfo { name: name.to_string(), default: default.to_string(), builtin: true });
        let custom = w.custom_properties.iter().map(|(name, p)| PropertyInfo { name: name.clone(), default: p.default.clone(), builtin: false });
        Ok(builtin.chain(custom).collect())
    }

    /// Adds a string property holding `default`.
    pub fn add_property(&mut self, window: WindowId, name: &str, default: &str) -> Result<()> {
        if self.is_property_present(window, name) {
            return Err(Error::AlreadyExists(format!("property '{}' on '{}'", name, self.name_of(window))));
        }
        let property = crate::window::CustomProperty { value: default.to_string(), default: default.to_string() };
        self.window_mut(window)?.custom_properties.insert(name.to_string(), property);
        Ok(())
    }

    /// Removes a property added with [`GuiContext::add_property`].
    pub fn remove_property(&mut self, window: WindowId, name: &str) -> bool {
        self.manager.get_mut(window).map(|w| w.custom_properties.remove(name).is_some()).unwrap_or(false)
    }

    /// Excludes property `name` from serialization of `window`, and of its subtree when `recursive`.
    pub fn ban_property_from_xml(&mut self, window: WindowId, name: &str, recursive: bool) -> Result<()> {
        let w = self.window_mut(window)?;
        w.banned_properties.insert(name.to_string());
        if recursive {
            for child in w.children.clone() {
                self.ban_property_from_xml(child, name, true)?;
            }
        }
        Ok(())
    }

    /// Lifts a ban placed with [`GuiContext::ban_property_from_xml`].
    pub fn unban_property_from_xml(&mut self, window: WindowId, name: &str, recursive: bool) -> Result<()> {
        let w = self.window_mut(window)?;
        w.banned_properties.remove(name);
        if recursive {
            for child in w.children.clone() {
                self.unban_property_from_xml(child, name, true)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn fresh_windows_report_their_defaults() {
        let (mut ctx, _) = mock_context();
        let w = ctx.create_window("DefaultWindow", "w").unwrap();
        for info in ctx.properties(w).unwrap() {
            assert!(ctx.is_property_default(w, &info.name).unwrap(), "{} = {}", info.name, ctx.get_property(w, &info.name).unwrap());
        }
    }

    #[test]
    fn set_property_drives_the_window_state() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let w = child_at(&mut ctx, root, "w", 0.0, 0.0, 10.0, 10.0);
        ctx.set_property(w, "Area", "{{0.5,0},{0,10},{1,0},{0,50}}").unwrap();
        assert_eq!(ctx.window(w).unwrap().pixel_size(), PixelSize::new(400.0, 40.0));
        ctx.set_property(w, "Disabled", "true").unwrap();
        assert!(ctx.is_effective_disabled(w));
        ctx.set_property(w, "UpdateMode", "Never").unwrap();
        assert_eq!(ctx.get_property(w, "UpdateMode").unwrap(), "Never");
        ctx.set_property(w, "Alpha", "0.5").unwrap();
        assert_eq!(ctx.get_property(w, "Alpha").unwrap(), "0.5");
        assert!(!ctx.is_property_default(w, "Alpha").unwrap());
    }

    #[test]
    fn bad_names_and_values_are_rejected() {
        let (mut ctx, _) = mock_context();
        let w = ctx.create_window("DefaultWindow", "w").unwrap();
        assert!(matches!(ctx.get_property(w, "Colour"), Err(Error::UnknownObject(_))));
        assert!(matches!(ctx.set_property(w, "Colour", "red"), Err(Error::UnknownObject(_))));
        assert!(matches!(ctx.set_property(w, "Visible", "perhaps"), Err(Error::InvalidRequest(_))));
        assert!(matches!(ctx.set_property(w, "Area", "{{0,0}}"), Err(Error::InvalidRequest(_))));
        assert!(matches!(ctx.set_property(w, "HorizontalAlignment", "Middle"), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn added_properties_hold_strings() {
        let (mut ctx, _) = mock_context();
        let w = ctx.create_window("DefaultWindow", "w").unwrap();
        ctx.add_property(w, "Colour", "red").unwrap();
        assert!(matches!(ctx.add_property(w, "Colour", "blue"), Err(Error::AlreadyExists(_))));
        assert!(matches!(ctx.add_property(w, "Alpha", "1"), Err(Error::AlreadyExists(_))));
        ctx.set_property(w, "Colour", "green").unwrap();
        assert_eq!(ctx.get_property(w, "Colour").unwrap(), "green");
        assert_eq!(ctx.property_default(w, "Colour").unwrap(), "red");
        let info = ctx.properties(w).unwrap().into_iter().find(|p| p.name == "Colour").unwrap();
        assert!(!info.builtin);
        assert!(ctx.remove_property(w, "Colour"));
        assert!(!ctx.is_property_present(w, "Colour"));
    }

    #[test]
    fn bans_can_cover_a_subtree() {
        let (mut ctx, _) = mock_context();
        let root = with_root(&mut ctx);
        let a = child_at(&mut ctx, root, "a", 0.0, 0.0, 10.0, 10.0);
        ctx.ban_property_from_xml(root, "Text", true).unwrap();
        assert!(ctx.window(a).unwrap().is_property_banned_from_xml("Text"));
        ctx.unban_property_from_xml(root, "Text", false).unwrap();
        assert!(!ctx.window(root).unwrap().is_property_banned_from_xml("Text"));
        assert!(ctx.window(a).unwrap().is_property_banned_from_xml("Text"));
    }
}
