//! Materialized windows keyed by application identifier.

use desktop_app_contract::ApplicationId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{WindowId, WindowRecord};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A window is already registered for the identifier.
    #[error("a window for `{0}` is already open")]
    DuplicateKey(ApplicationId),
}

/// The set of live windows, at most one per [`ApplicationId`].
///
/// Windows are kept in creation order, which is also the cascade/taskbar order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRegistry {
    windows: Vec<WindowRecord>,
}

impl WindowRegistry {
    pub fn get(&self, app_id: &ApplicationId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.app_id == app_id)
    }

    pub fn get_mut(&mut self, app_id: &ApplicationId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| &w.app_id == app_id)
    }

    pub fn by_id_mut(&mut self, window_id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == window_id)
    }

    /// Adds `window`, refusing a second window for the same identifier.
    pub fn register(&mut self, window: WindowRecord) -> Result<(), RegistryError> {
        if self.get(&window.app_id).is_some() {
            return Err(RegistryError::DuplicateKey(window.app_id));
        }
        self.windows.push(window);
        Ok(())
    }

    /// Removes the window for `app_id`; absent identifiers are a no-op.
    pub fn remove(&mut self, app_id: &ApplicationId) -> Option<WindowRecord> {
        let index = self.windows.iter().position(|w| &w.app_id == app_id)?;
        Some(self.windows.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WindowRecord> {
        self.windows.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{WindowPhase, WindowRect, WindowVisibility};

    fn record(id: u64, app: &str) -> WindowRecord {
        WindowRecord {
            id: WindowId(id),
            app_id: ApplicationId::new(app),
            title: app.to_string(),
            rect: WindowRect::default(),
            restore_rect: None,
            z_index: 0,
            is_focused: false,
            visibility: WindowVisibility::Visible,
            maximized: false,
            phase: WindowPhase::Open,
            pending_mount: None,
        }
    }

    #[test]
    fn register_rejects_duplicate_identifier() {
        let mut registry = WindowRegistry::default();
        registry.register(record(1, "notepad")).expect("first");

        let err = registry
            .register(record(2, "notepad"))
            .expect_err("duplicate");
        assert_eq!(err, RegistryError::DuplicateKey(ApplicationId::new("notepad")));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(&ApplicationId::new("notepad")).map(|w| w.id),
            Some(WindowId(1))
        );
    }

    #[test]
    fn remove_is_noop_for_absent_identifier() {
        let mut registry = WindowRegistry::default();
        registry.register(record(1, "paint")).expect("register");

        assert!(registry.remove(&ApplicationId::new("calc")).is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.remove(&ApplicationId::new("paint")).map(|w| w.id),
            Some(WindowId(1))
        );
        assert!(registry.is_empty());
    }
}
