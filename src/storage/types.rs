//! Profile and account records as they are persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ChoresError, Result};
use crate::utils::password::PasswordHash;

// =============================================================================
// Roles and Job Categories
// =============================================================================

/// Kind of participant. Fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Worker,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Worker => write!(f, "worker"),
        }
    }
}

/// Trade a worker offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobCategory {
    Plumber,
    Electrician,
    Decorator,
    Pharmacist,
}

impl JobCategory {
    /// All categories, in directory seeding order.
    pub const ALL: [JobCategory; 4] = [
        JobCategory::Plumber,
        JobCategory::Electrician,
        JobCategory::Decorator,
        JobCategory::Pharmacist,
    ];

    /// Lowercase identifier used in storage and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobCategory::Plumber => "plumber",
            JobCategory::Electrician => "electrician",
            JobCategory::Decorator => "decorator",
            JobCategory::Pharmacist => "pharmacist",
        }
    }

    /// Capitalized label for display.
    pub fn label(&self) -> &'static str {
        match self {
            JobCategory::Plumber => "Plumber",
            JobCategory::Electrician => "Electrician",
            JobCategory::Decorator => "Decorator",
            JobCategory::Pharmacist => "Pharmacist",
        }
    }
}

impl std::fmt::Display for JobCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for JobCategory {
    type Err = ChoresError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        JobCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| {
                ChoresError::InvalidInput(format!(
                    "Unknown job type '{}'. Use: plumber, electrician, decorator or pharmacist",
                    s
                ))
            })
    }
}

// =============================================================================
// Profiles
// =============================================================================

/// Base identity record of a regular user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Identity record extended with a worker's professional attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_type: JobCategory,
    pub experience_years: u32,
    /// Hourly price. Positivity is checked by the caller, not here.
    pub price: f64,
    /// One decimal place.
    pub rating: f64,
    #[serde(default)]
    pub diploma_name: Option<String>,
    #[serde(default)]
    pub cv_name: Option<String>,
    #[serde(default)]
    pub certificate_names: Vec<String>,
}

/// Any stored profile, tagged by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    User(UserProfile),
    Worker(WorkerProfile),
}

impl Profile {
    pub fn id(&self) -> &str {
        match self {
            Profile::User(u) => &u.id,
            Profile::Worker(w) => &w.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Profile::User(u) => &u.name,
            Profile::Worker(w) => &w.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Profile::User(u) => &u.email,
            Profile::Worker(w) => &w.email,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Profile::User(_) => Role::User,
            Profile::Worker(_) => Role::Worker,
        }
    }

    pub fn as_worker(&self) -> Option<&WorkerProfile> {
        match self {
            Profile::Worker(w) => Some(w),
            Profile::User(_) => None,
        }
    }
}

impl From<UserProfile> for Profile {
    fn from(profile: UserProfile) -> Self {
        Profile::User(profile)
    }
}

impl From<WorkerProfile> for Profile {
    fn from(profile: WorkerProfile) -> Self {
        Profile::Worker(profile)
    }
}

// =============================================================================
// Registration and Updates
// =============================================================================

/// Fields supplied when a worker signs up. Id and rating are assigned by the store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkerRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_type: Option<JobCategory>,
    pub experience_years: u32,
    pub price: f64,
    pub diploma_name: Option<String>,
    pub cv_name: Option<String>,
    pub certificate_names: Vec<String>,
}

/// Partial worker profile update. `None` leaves a field untouched.
///
/// Identity fields (id, name, email, role) are not part of the update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkerUpdate {
    pub phone: Option<String>,
    pub job_type: Option<JobCategory>,
    pub experience_years: Option<u32>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    /// Empty string clears the stored filename.
    pub diploma_name: Option<String>,
    /// Empty string clears the stored filename.
    pub cv_name: Option<String>,
    pub certificate_names: Option<Vec<String>>,
}

impl WorkerUpdate {
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn experience_years(mut self, years: u32) -> Self {
        self.experience_years = Some(years);
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn diploma(mut self, name: impl Into<String>) -> Self {
        self.diploma_name = Some(name.into());
        self
    }

    pub fn cv(mut self, name: impl Into<String>) -> Self {
        self.cv_name = Some(name.into());
        self
    }

    pub fn certificates(mut self, names: Vec<String>) -> Self {
        self.certificate_names = Some(names);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == WorkerUpdate::default()
    }

    /// Merge this update into `profile`.
    pub fn apply_to(&self, profile: &mut WorkerProfile) {
        if let Some(phone) = &self.phone {
            profile.phone = phone.clone();
        }
        if let Some(job_type) = self.job_type {
            profile.job_type = job_type;
        }
        if let Some(years) = self.experience_years {
            profile.experience_years = years;
        }
        if let Some(price) = self.price {
            profile.price = price;
        }
        if let Some(rating) = self.rating {
            profile.rating = rating;
        }
        if let Some(name) = &self.diploma_name {
            profile.diploma_name = non_empty(name);
        }
        if let Some(name) = &self.cv_name {
            profile.cv_name = non_empty(name);
        }
        if let Some(names) = &self.certificate_names {
            profile.certificate_names = names.clone();
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

// =============================================================================
// Account Collection
// =============================================================================

/// One entry of the account collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAccount {
    pub profile: Profile,
    /// Absent for synthetic directory entries, which cannot log in.
    #[serde(default)]
    pub password: Option<PasswordHash>,
}

/// Every known account, keyed by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Accounts {
    entries: BTreeMap<String, StoredAccount>,
}

impl Accounts {
    pub fn get(&self, id: &str) -> Option<&StoredAccount> {
        self.entries.get(id)
    }

    /// Exact, case-sensitive email lookup.
    pub fn find_by_email(&self, email: &str) -> Option<&StoredAccount> {
        self.entries.values().find(|a| a.profile.email() == email)
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn insert(&mut self, account: StoredAccount) {
        self.entries
            .insert(account.profile.id().to_string(), account);
    }

    /// Replace the profile stored under its id, keeping the credential.
    /// Inserts a credential-less entry if the id is unknown.
    pub fn upsert_profile(&mut self, profile: Profile) {
        match self.entries.get_mut(profile.id()) {
            Some(entry) => entry.profile = profile,
            None => self.insert(StoredAccount {
                profile,
                password: None,
            }),
        }
    }

    pub fn has_workers(&self) -> bool {
        self.entries
            .values()
            .any(|a| a.profile.role() == Role::Worker)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Worker Directory Index
// =============================================================================

/// Ordered worker ids. Profiles are resolved through [`Accounts`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryIndex {
    ids: Vec<String>,
}

impl DirectoryIndex {
    /// Append `id` unless already listed. Returns whether it was added.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolve each id to its worker profile, in directory order.
    ///
    /// Ids without a worker account are skipped.
    pub fn resolve(&self, accounts: &Accounts) -> Vec<WorkerProfile> {
        self.ids
            .iter()
            .filter_map(|id| {
                let worker = accounts.get(id).and_then(|a| a.profile.as_worker());
                if worker.is_none() {
                    tracing::warn!(id = %id, "directory entry has no worker account");
                }
                worker.cloned()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn worker(id: &str) -> WorkerProfile {
        WorkerProfile {
            id: id.into(),
            name: "Nora Quinn".into(),
            email: format!("{}@example.com", id),
            phone: "+213 500000000".into(),
            job_type: JobCategory::Plumber,
            experience_years: 4,
            price: 35.0,
            rating: 4.2,
            diploma_name: None,
            cv_name: Some("cv.pdf".into()),
            certificate_names: vec![],
        }
    }

    #[test]
    fn test_profile_serializes_with_role_tag() {
        let profile = Profile::Worker(worker("w1"));
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["role"], "worker");
        assert_eq!(json["jobType"], "plumber");
        assert_eq!(json["experienceYears"], 4);
        assert_eq!(json["cvName"], "cv.pdf");

        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_user_profile_json_shape() {
        let json = r#"{"role":"user","id":"u1","name":"Ada","email":"ada@example.com"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.role(), Role::User);
        assert_eq!(profile.email(), "ada@example.com");
        assert!(profile.as_worker().is_none());
    }

    #[test]
    fn test_worker_optional_fields_default() {
        let json = r#"{"role":"worker","id":"w","name":"N","email":"n@x","phone":"1",
            "jobType":"decorator","experienceYears":2,"price":20,"rating":3.5}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        let worker = profile.as_worker().unwrap();

        assert_eq!(worker.job_type, JobCategory::Decorator);
        assert!(worker.diploma_name.is_none());
        assert!(worker.certificate_names.is_empty());
    }

    #[test]
    fn test_job_category_from_str() {
        assert_eq!(
            "Plumber".parse::<JobCategory>().unwrap(),
            JobCategory::Plumber
        );
        assert_eq!(
            " PHARMACIST ".parse::<JobCategory>().unwrap(),
            JobCategory::Pharmacist
        );
        assert!("carpenter".parse::<JobCategory>().is_err());
    }

    #[test]
    fn test_update_touches_only_given_fields() {
        let mut w = worker("w1");
        let original = w.clone();

        WorkerUpdate::default().price(42.0).apply_to(&mut w);

        assert_eq!(w.price, 42.0);
        assert_eq!(
            w,
            WorkerProfile {
                price: 42.0,
                ..original
            }
        );
    }

    #[test]
    fn test_update_builders_cover_every_field() {
        let mut w = worker("w1");
        let update = WorkerUpdate::default()
            .phone("+213 511111111")
            .experience_years(9)
            .rating(4.8)
            .certificates(vec!["first-aid.pdf".into()]);
        assert!(!update.is_empty());
        assert!(WorkerUpdate::default().is_empty());

        update.apply_to(&mut w);

        assert_eq!(w.phone, "+213 511111111");
        assert_eq!(w.experience_years, 9);
        assert_eq!(w.rating, 4.8);
        assert_eq!(w.certificate_names, vec!["first-aid.pdf".to_string()]);
        assert_eq!(w.price, 35.0);
        assert_eq!(w.cv_name.as_deref(), Some("cv.pdf"));
    }

    #[test]
    fn test_update_empty_filename_clears() {
        let mut w = worker("w1");
        WorkerUpdate::default()
            .cv("")
            .diploma("diploma.png")
            .apply_to(&mut w);

        assert!(w.cv_name.is_none());
        assert_eq!(w.diploma_name.as_deref(), Some("diploma.png"));
    }

    #[test]
    fn test_accounts_email_match_is_exact() {
        let mut accounts = Accounts::default();
        accounts.insert(StoredAccount {
            profile: Profile::Worker(worker("w1")),
            password: None,
        });

        assert!(accounts.contains_email("w1@example.com"));
        assert!(!accounts.contains_email("W1@example.com"));
        assert!(accounts.has_workers());
    }

    #[test]
    fn test_upsert_keeps_credential() {
        let mut accounts = Accounts::default();
        let mut rng = StdRng::seed_from_u64(4);
        let hash = PasswordHash::new("pw", &mut rng).unwrap();
        accounts.insert(StoredAccount {
            profile: Profile::Worker(worker("w1")),
            password: Some(hash.clone()),
        });

        let mut changed = worker("w1");
        changed.price = 99.0;
        accounts.upsert_profile(Profile::Worker(changed.clone()));

        let entry = accounts.get("w1").unwrap();
        assert_eq!(entry.password, Some(hash));
        assert_eq!(entry.profile.as_worker(), Some(&changed));
    }

    #[test]
    fn test_directory_index_resolves_in_order_and_skips_dangling() {
        let mut accounts = Accounts::default();
        for id in ["a", "b"] {
            accounts.insert(StoredAccount {
                profile: Profile::Worker(worker(id)),
                password: None,
            });
        }

        let mut index = DirectoryIndex::default();
        assert!(index.insert("b"));
        assert!(index.insert("missing"));
        assert!(index.insert("a"));
        assert!(!index.insert("a"));

        let ids: Vec<_> = index
            .resolve(&accounts)
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
