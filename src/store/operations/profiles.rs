use crate::mastery::MasteryProfile;
use crate::store::keys;
use crate::store::{Store, StoreError};

/// Persistence substrate for mastery profiles: one opaque blob per key.
pub trait ProfileRepository: Send + Sync {
    fn load_profile(&self, key: &str) -> Result<Option<MasteryProfile>, StoreError>;

    fn save_profile(&self, key: &str, profile: &MasteryProfile) -> Result<(), StoreError>;

    /// Makes previous saves durable. Backends without buffering need not override it.
    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

impl Store {
    pub fn get_profile(&self, key: &str) -> Result<Option<MasteryProfile>, StoreError> {
        let key = keys::profile_key(key)?;
        match self.profiles.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_profile(&self, key: &str, profile: &MasteryProfile) -> Result<(), StoreError> {
        let key = keys::profile_key(key)?;
        self.profiles
            .insert(key.as_bytes(), Self::serialize(profile)?)?;
        Ok(())
    }

    pub fn delete_profile(&self, key: &str) -> Result<(), StoreError> {
        let key = keys::profile_key(key)?;
        self.profiles.remove(key.as_bytes())?;
        Ok(())
    }
}

impl ProfileRepository for Store {
    fn load_profile(&self, key: &str) -> Result<Option<MasteryProfile>, StoreError> {
        self.get_profile(key)
    }

    fn save_profile(&self, key: &str, profile: &MasteryProfile) -> Result<(), StoreError> {
        self.set_profile(key, profile)
    }

    fn flush(&self) -> Result<(), StoreError> {
        Store::flush(self)
    }
}
