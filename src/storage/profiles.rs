//! The profile store: accounts, worker directory and session.
//!
//! Every operation is a read-modify-write of whole blobs. Nothing is atomic
//! across blobs; a crash between writes can leave them out of step.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::backend::{KeyValueStore, read_blob, write_blob};
use super::defaults::{generate_seed_workers, random_rating, seed_email};
use super::session::Session;
use super::types::{
    Accounts, DirectoryIndex, Profile, StoredAccount, UserProfile, WorkerProfile,
    WorkerRegistration, WorkerUpdate,
};
use crate::config::{ACCOUNTS_KEY, DIRECTORY_KEY, REGISTRATION_RATING_TENTHS, SEED_WORKER_COUNT};
use crate::error::{ChoresError, Result};
use crate::utils::password::PasswordHash;

/// Data-access layer over a [`KeyValueStore`].
///
/// The worker directory blob only records worker ids in insertion order;
/// profiles are always resolved from the account collection.
pub struct ProfileStore<S: KeyValueStore> {
    backend: S,
    session: Session,
    rng: StdRng,
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Open the store, restoring any persisted session.
    pub fn open(backend: S) -> Result<Self> {
        Self::open_with_rng(backend, StdRng::from_os_rng())
    }

    /// Open the store with a fixed seed for ids, salts and ratings.
    pub fn open_seeded(backend: S, seed: u64) -> Result<Self> {
        Self::open_with_rng(backend, StdRng::seed_from_u64(seed))
    }

    fn open_with_rng(backend: S, rng: StdRng) -> Result<Self> {
        let session = Session::load(&backend)?;
        if let Some(profile) = session.current() {
            debug!(id = profile.id(), "restored session");
        }
        Ok(Self {
            backend,
            session,
            rng,
        })
    }

    /// Profile of the signed-in participant, if any.
    pub fn current(&self) -> Option<&Profile> {
        self.session.current()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Sign in with an exact email and password.
    ///
    /// An unknown email and a wrong password fail identically.
    pub fn authenticate(&mut self, email: &str, password: &str) -> Result<Profile> {
        let accounts = self.accounts()?;
        let profile = accounts
            .find_by_email(email)
            .filter(|a| a.password.as_ref().is_some_and(|h| h.verify(password)))
            .map(|a| a.profile.clone())
            .ok_or(ChoresError::InvalidCredentials)?;

        self.start_session(profile.clone())?;
        info!(id = profile.id(), role = %profile.role(), "signed in");
        Ok(profile)
    }

    /// Create a regular user account and sign it in.
    pub fn register_user(&mut self, name: &str, email: &str, password: &str) -> Result<UserProfile> {
        let mut accounts = self.accounts()?;
        if accounts.contains_email(email) {
            return Err(ChoresError::EmailTaken(email.to_string()));
        }

        let profile = UserProfile {
            id: self.generate_id(&accounts),
            name: name.to_string(),
            email: email.to_string(),
        };
        accounts.insert(StoredAccount {
            profile: Profile::User(profile.clone()),
            password: Some(PasswordHash::new(password, &mut self.rng)?),
        });
        write_blob(&mut self.backend, ACCOUNTS_KEY, &accounts)?;

        self.start_session(Profile::User(profile.clone()))?;
        info!(id = %profile.id, "registered user");
        Ok(profile)
    }

    /// Create a worker account, list it in the directory and sign it in.
    ///
    /// The rating is drawn once here and never recomputed.
    pub fn register_worker(
        &mut self,
        registration: WorkerRegistration,
        password: &str,
    ) -> Result<WorkerProfile> {
        let job_type = registration
            .job_type
            .ok_or_else(|| ChoresError::InvalidInput("Please select a job type".into()))?;

        let mut accounts = self.accounts()?;
        if accounts.contains_email(&registration.email) {
            return Err(ChoresError::EmailTaken(registration.email));
        }

        let profile = WorkerProfile {
            id: self.generate_id(&accounts),
            name: registration.name,
            email: registration.email,
            phone: registration.phone,
            job_type,
            experience_years: registration.experience_years,
            price: registration.price,
            rating: random_rating(&mut self.rng, REGISTRATION_RATING_TENTHS),
            diploma_name: registration.diploma_name.filter(|n| !n.is_empty()),
            cv_name: registration.cv_name.filter(|n| !n.is_empty()),
            certificate_names: registration.certificate_names,
        };

        accounts.insert(StoredAccount {
            profile: Profile::Worker(profile.clone()),
            password: Some(PasswordHash::new(password, &mut self.rng)?),
        });
        write_blob(&mut self.backend, ACCOUNTS_KEY, &accounts)?;

        let mut index = self.directory_index()?;
        index.insert(&profile.id);
        write_blob(&mut self.backend, DIRECTORY_KEY, &index)?;

        self.start_session(Profile::Worker(profile.clone()))?;
        info!(id = %profile.id, job = profile.job_type.as_str(), rating = profile.rating, "registered worker");
        Ok(profile)
    }

    /// Sign out. Safe to call when nobody is signed in.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(profile) = self.session.current() {
            info!(id = profile.id(), "signed out");
        }
        self.session.clear();
        self.session.save(&mut self.backend)
    }

    /// Merge `update` into the signed-in worker's profile.
    ///
    /// Without an active worker session nothing is written and
    /// [`ChoresError::NotAuthorized`] is returned.
    pub fn update_worker_profile(&mut self, update: &WorkerUpdate) -> Result<WorkerProfile> {
        let mut profile = self
            .session
            .current()
            .and_then(Profile::as_worker)
            .cloned()
            .ok_or(ChoresError::NotAuthorized)?;

        update.apply_to(&mut profile);

        self.start_session(Profile::Worker(profile.clone()))?;

        let mut accounts = self.accounts()?;
        accounts.upsert_profile(Profile::Worker(profile.clone()));
        write_blob(&mut self.backend, ACCOUNTS_KEY, &accounts)?;

        let mut index = self.directory_index()?;
        if index.insert(&profile.id) {
            write_blob(&mut self.backend, DIRECTORY_KEY, &index)?;
        }

        debug!(id = %profile.id, ?update, "worker profile updated");
        Ok(profile)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The full account collection.
    pub fn accounts(&self) -> Result<Accounts> {
        read_blob(&self.backend, ACCOUNTS_KEY)
    }

    /// Look up a single profile by id.
    pub fn account(&self, id: &str) -> Result<Option<Profile>> {
        Ok(self.accounts()?.get(id).map(|a| a.profile.clone()))
    }

    /// Worker directory in insertion order.
    pub fn directory(&self) -> Result<Vec<WorkerProfile>> {
        let accounts = self.accounts()?;
        Ok(self.directory_index()?.resolve(&accounts))
    }

    fn directory_index(&self) -> Result<DirectoryIndex> {
        read_blob(&self.backend, DIRECTORY_KEY)
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    /// Fill an empty directory with synthetic workers.
    ///
    /// Skipped if any worker already exists. Returns how many were added.
    pub fn ensure_directory_seeded(&mut self) -> Result<usize> {
        self.seed_directory(SEED_WORKER_COUNT)
    }

    /// Like [`Self::ensure_directory_seeded`] with an explicit count.
    pub fn seed_directory(&mut self, count: usize) -> Result<usize> {
        let mut accounts = self.accounts()?;
        let mut index = self.directory_index()?;
        if accounts.has_workers() || !index.is_empty() {
            debug!("directory already populated, skipping seed");
            return Ok(0);
        }

        // Seed addresses already claimed by a registered user move past the
        // generated range so emails stay unique.
        let mut next_free = count;
        for mut worker in generate_seed_workers(&mut self.rng, count) {
            while accounts.contains_email(&worker.email) {
                debug!(email = %worker.email, "seed email taken, renumbering");
                worker.email = seed_email(next_free);
                next_free += 1;
            }
            index.insert(&worker.id);
            accounts.insert(StoredAccount {
                profile: Profile::Worker(worker),
                password: None,
            });
        }
        write_blob(&mut self.backend, ACCOUNTS_KEY, &accounts)?;
        write_blob(&mut self.backend, DIRECTORY_KEY, &index)?;

        info!(count, "seeded worker directory");
        Ok(count)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn start_session(&mut self, profile: Profile) -> Result<()> {
        self.session.set(profile);
        self.session.save(&mut self.backend)
    }

    /// Random v4 UUID from the store RNG, retried on the unlikely collision.
    fn generate_id(&mut self, accounts: &Accounts) -> String {
        loop {
            let bytes: [u8; 16] = self.rng.random();
            let id = uuid::Builder::from_random_bytes(bytes)
                .into_uuid()
                .to_string();
            if !accounts.contains_id(&id) {
                return id;
            }
        }
    }
}
