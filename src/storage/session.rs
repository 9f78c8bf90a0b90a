//! The current-session slot.

use super::backend::{KeyValueStore, read_optional_blob, write_blob};
use super::types::Profile;
use crate::config::SESSION_KEY;
use crate::error::Result;

/// Zero or one signed-in profile, mirrored to the session blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    current: Option<Profile>,
}

impl Session {
    /// Restore the session persisted by a previous run.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        let current = read_optional_blob(store, SESSION_KEY)?;
        Ok(Self { current })
    }

    /// Write the session, or remove the blob when signed out.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        match &self.current {
            Some(profile) => write_blob(store, SESSION_KEY, profile),
            None => store.remove(SESSION_KEY),
        }
    }

    pub fn current(&self) -> Option<&Profile> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn set(&mut self, profile: Profile) {
        self.current = Some(profile);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
