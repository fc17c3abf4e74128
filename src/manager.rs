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
//! Window registry: type factories, skin type mappings, unique names and the dead pool.
use super::*;
use slotmap::SlotMap;
use std::collections::{BTreeMap, HashMap};

/// Fills in the type specific state of a freshly created window.
pub type WindowFactory = Box<dyn Fn(&mut Window)>;

/// Alias type resolving to a base window type, a look and a window renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FalagardMapping {
    /// Registered window type actually instantiated.
    pub window_type: String,
    /// Look assigned after creation.
    pub look_name: String,
    /// Window renderer attached before the look.
    pub renderer_type: String,
}

/// Arena and name registry of every window of one context.
pub struct WindowManager {
    windows: SlotMap<WindowId, Window>,
    names: HashMap<String, WindowId>,
    factories: BTreeMap<String, WindowFactory>,
    mappings: BTreeMap<String, FalagardMapping>,
    dead: Vec<WindowId>,
    name_prefix: String,
    next_uid: u64,
}

impl WindowManager {
    pub(crate) fn new(name_prefix: &str) -> Self {
        let mut factories: BTreeMap<String, WindowFactory> = BTreeMap::new();
        factories.insert("DefaultWindow".into(), Box::new(|_| ()));
        factories.insert("FrameWindow".into(), Box::new(|_| ()));
        factories.insert("PushButton".into(), Box::new(|w| w.set_behavior(Behavior::PushButton(ButtonState::default()))));
        factories.insert(
            "Tooltip".into(),
            Box::new(|w| {
                w.set_behavior(Behavior::Tooltip(TooltipState::default()));
                w.set_initial_flags(WindowFlags::ALWAYS_ON_TOP | WindowFlags::CURSOR_PASS_THROUGH, true);
                w.set_initial_flags(WindowFlags::CLIPPED_BY_PARENT | WindowFlags::DESTROYED_BY_PARENT | WindowFlags::VISIBLE, false);
                w.set_initial_update_mode(UpdateMode::Always);
            }),
        );
        Self {
            windows: SlotMap::with_key(),
            names: HashMap::new(),
            factories,
            mappings: BTreeMap::new(),
            dead: Vec::new(),
            name_prefix: name_prefix.to_string(),
            next_uid: 0,
        }
    }

    pub(crate) fn get(&self, window: WindowId) -> Option<&Window> { self.windows.get(window) }

    pub(crate) fn get_mut(&mut self, window: WindowId) -> Option<&mut Window> { self.windows.get_mut(window) }

    /// Returns `true` while the window's storage exists, dead pool included.
    pub(crate) fn contains(&self, window: WindowId) -> bool { self.windows.contains_key(window) }

    /// Returns `true` if the window is reachable by name, i.e. not destroyed.
    pub(crate) fn is_registered(&self, window: WindowId) -> bool {
        self.windows.get(window).map(|w| self.names.get(&w.name) == Some(&window)).unwrap_or(false)
    }

    pub(crate) fn push_dead(&mut self, window: WindowId) {
        if !self.dead.contains(&window) {
            self.dead.push(window);
        }
    }

    /// Number of live windows.
    pub fn window_count(&self) -> usize { self.names.len() }

    /// Returns `true` if `window_type` can be created, directly or through a mapping.
    pub fn is_type_available(&self, window_type: &str) -> bool { self.factories.contains_key(window_type) || self.mappings.contains_key(window_type) }

    /// Returns `true` if no destroyed window awaits reclamation.
    pub fn is_dead_pool_empty(&self) -> bool { self.dead.is_empty() }

    /// Mapping registered for an alias type.
    pub fn falagard_mapping(&self, alias: &str) -> Option<&FalagardMapping> { self.mappings.get(alias) }

    /// Window that exists and has not started its teardown.
    pub(crate) fn get_live(&self, window: WindowId) -> Option<&Window> { self.windows.get(window).filter(|w| !w.destruction_started) }

    pub(crate) fn forget_old_capture(&mut self, window: WindowId) {
        for w in self.windows.values_mut() {
            if w.old_capture == Some(window) {
                w.old_capture = None;
            }
        }
    }

    pub(crate) fn is_generated_name(&self, name: &str) -> bool { name.starts_with(&self.name_prefix) }

    fn generate_unique_name(&mut self) -> String {
        loop {
            let name = format!("{}{}", self.name_prefix, self.next_uid);
            self.next_uid += 1;
            if !self.names.contains_key(&name) {
                return name;
            }
        }
    }
}

impl Window {
    /// Switches options of a window that is still being built by its factory.
    pub fn set_initial_flags(&mut self, flags: WindowFlags, on: bool) { self.flags.set(flags, on) }

    /// Sets the update mode of a window that is still being built by its factory.
    pub fn set_initial_update_mode(&mut self, mode: UpdateMode) { self.update_mode = mode }

    /// Replaces the built-in behaviour.
    pub fn set_behavior(&mut self, behavior: Behavior) { self.behavior = behavior }
}

impl GuiContext {
    /// The window registry of this context.
    pub fn window_manager(&self) -> &WindowManager { &self.manager }

    /// Registers a factory for `window_type`.
    pub fn register_window_type<F>(&mut self, window_type: &str, factory: F) -> Result<()>
    where
        F: Fn(&mut Window) + 'static,
    {
        if self.manager.factories.contains_key(window_type) {
            return Err(Error::AlreadyExists(format!("window factory for type '{}'", window_type)));
        }
        self.manager.factories.insert(window_type.to_string(), Box::new(factory));
        Ok(())
    }

    /// Maps `alias` to a base type plus a look and window renderer, replacing any earlier mapping.
    pub fn add_falagard_mapping(&mut self, alias: &str, window_type: &str, look_name: &str, renderer_type: &str) -> Result<()> {
        if !self.manager.factories.contains_key(window_type) {
            return Err(Error::UnknownObject(format!("window factory for type '{}'", window_type)));
        }
        let mapping = FalagardMapping { window_type: window_type.into(), look_name: look_name.into(), renderer_type: renderer_type.into() };
        self.manager.mappings.insert(alias.to_string(), mapping);
        Ok(())
    }

    /// Creates a detached window. An empty `name` is replaced with a generated unique one.
    pub fn create_window(&mut self, window_type: &str, name: &str) -> Result<WindowId> {
        let mapping = self.manager.mappings.get(window_type).cloned();
        let base_type = mapping.as_ref().map(|m| m.window_type.as_str()).unwrap_or(window_type).to_string();
        if !self.manager.factories.contains_key(&base_type) {
            return Err(Error::UnknownObject(format!("no window factory for type '{}'", base_type)));
        }
        let name = if name.is_empty() { self.manager.generate_unique_name() } else { name.to_string() };
        if self.manager.names.contains_key(&name) {
            return Err(Error::AlreadyExists(format!("window '{}'", name)));
        }

        let geometry = self.renderer.scope_mut(|r| r.create_geometry_buffer());
        let mut window = Window::new(&base_type, &name, geometry);
        if let Some(factory) = self.manager.factories.get(&base_type) {
            factory(&mut window);
        }
        let id = self.manager.windows.insert(window);
        self.manager.names.insert(name.clone(), id);
        info!("window '{}' of type '{}' created", name, window_type);

        if let Some(mapping) = mapping {
            if let Some(w) = self.manager.get_mut(id) {
                w.falagard_type = window_type.to_string();
            }
            let assigned = self.set_window_renderer(id, &mapping.renderer_type).and_then(|_| self.set_look_n_feel(id, &mapping.look_name));
            if let Err(err) = assigned {
                self.destroy(id);
                return Err(err);
            }
        }
        Ok(id)
    }

    /// Creates a window named after `parent` and attaches it as an auto window.
    pub fn create_auto_child(&mut self, parent: WindowId, window_type: &str, suffix: &str) -> Result<WindowId> {
        let name = format!("{}{}", self.window(parent)?.name, suffix);
        let child = self.create_window(window_type, &name)?;
        if let Some(w) = self.manager.get_mut(child) {
            w.flags.insert(WindowFlags::AUTO_WINDOW);
        }
        self.add_child(parent, child)?;
        Ok(child)
    }

    /// Looks a live window up by name.
    pub fn get_window(&self, name: &str) -> Result<WindowId> {
        self.manager.names.get(name).copied().ok_or_else(|| Error::UnknownObject(format!("window '{}' does not exist", name)))
    }

    /// Returns `true` if a live window is called `name`.
    pub fn is_alive(&self, name: &str) -> bool { self.manager.names.contains_key(name) }

    /// Renames a live window.
    pub fn rename_window(&mut self, window: WindowId, new_name: &str) -> Result<()> {
        if !self.manager.is_registered(window) {
            return Err(Error::UnknownObject(format!("window {:?} is not registered", window)));
        }
        if new_name.is_empty() {
            return Err(Error::InvalidRequest("window names must not be empty".into()));
        }
        match self.manager.names.get(new_name) {
            Some(existing) if *existing == window => return Ok(()),
            Some(_) => return Err(Error::AlreadyExists(format!("window '{}'", new_name))),
            None => (),
        }
        let old = std::mem::replace(&mut self.window_mut(window)?.name, new_name.to_string());
        self.manager.names.remove(&old);
        self.manager.names.insert(new_name.to_string(), window);
        debug!("window '{}' renamed to '{}'", old, new_name);
        self.notify(window, EventKind::NameChanged);
        Ok(())
    }

    /// Deregisters `window`, tears it down and queues its storage for the end of the frame.
    pub fn destroy_window(&mut self, window: WindowId) -> Result<()> {
        if !self.manager.is_registered(window) {
            return Err(Error::UnknownObject(format!("window {:?} is not registered", window)));
        }
        let name = self.name_of(window);
        self.manager.names.remove(&name);
        self.teardown(window);
        info!("window '{}' added to the dead pool", name);
        Ok(())
    }

    /// Frees the storage of windows destroyed since the last call.
    pub fn cleanup_dead_pool(&mut self) {
        let dead = std::mem::take(&mut self.manager.dead);
        for window in dead.into_iter().rev() {
            let Some(mut w) = self.manager.windows.remove(window) else { continue };
            if let Some(geometry) = w.geometry.take() {
                self.renderer.scope_mut(|r| r.destroy_geometry_buffer(geometry));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn empty_names_are_generated_and_unique() {
        let (mut ctx, _) = mock_context();
        let a = ctx.create_window("DefaultWindow", "").unwrap();
        let b = ctx.create_window("DefaultWindow", "").unwrap();
        let (na, nb) = (ctx.window(a).unwrap().name().to_string(), ctx.window(b).unwrap().name().to_string());
        assert!(na.starts_with("__auto_window_"));
        assert_ne!(na, nb);
        assert_eq!(ctx.get_window(&nb).unwrap(), b);
    }

    #[test]
    fn duplicate_names_and_unknown_types_are_rejected() {
        let (mut ctx, _) = mock_context();
        ctx.create_window("DefaultWindow", "w").unwrap();
        assert!(matches!(ctx.create_window("FrameWindow", "w"), Err(Error::AlreadyExists(_))));
        assert!(matches!(ctx.create_window("Spinner", "s"), Err(Error::UnknownObject(_))));
        assert_eq!(ctx.window_manager().window_count(), 1);
    }

    #[test]
    fn factories_configure_behaviour() {
        let (mut ctx, _) = mock_context();
        let button = ctx.create_window("PushButton", "ok").unwrap();
        assert!(matches!(ctx.window(button).unwrap().behavior(), Behavior::PushButton(_)));
        let tip = ctx.create_window("Tooltip", "tip").unwrap();
        let w = ctx.window(tip).unwrap();
        assert!(w.is_always_on_top() && w.is_cursor_pass_through_enabled());
        assert!(!w.is_visible() && !w.is_destroyed_by_parent());

        ctx.register_window_type("Panel", |w| w.set_initial_update_mode(UpdateMode::Never)).unwrap();
        let panel = ctx.create_window("Panel", "panel").unwrap();
        assert_eq!(ctx.window(panel).unwrap().update_mode(), UpdateMode::Never);
        assert!(matches!(ctx.register_window_type("Panel", |_| ()), Err(Error::AlreadyExists(_))));
    }

    #[test]
    fn rename_keeps_names_unique() {
        let (mut ctx, _) = mock_context();
        let a = ctx.create_window("DefaultWindow", "a").unwrap();
        ctx.create_window("DefaultWindow", "b").unwrap();
        let renamed = count_events(&mut ctx, a, EventKind::NameChanged);
        assert!(matches!(ctx.rename_window(a, "b"), Err(Error::AlreadyExists(_))));
        ctx.rename_window(a, "c").unwrap();
        assert!(!ctx.is_alive("a"));
        assert_eq!(ctx.get_window("c").unwrap(), a);
        assert_eq!(*renamed.borrow(), 1);
    }

    #[test]
    fn dead_pool_is_flushed_by_draw() {
        let (mut ctx, log) = mock_context();
        let w = ctx.create_window("DefaultWindow", "w").unwrap();
        ctx.destroy_window(w).unwrap();
        assert!(!ctx.is_alive("w"));
        assert!(ctx.window(w).is_ok());
        assert!(!ctx.window_manager().is_dead_pool_empty());
        assert!(matches!(ctx.destroy_window(w), Err(Error::UnknownObject(_))));
        ctx.draw();
        assert!(ctx.window(w).is_err());
        assert_eq!(log.count("destroy_buffer"), 1);
        // the name is free again
        ctx.create_window("DefaultWindow", "w").unwrap();
    }
}
