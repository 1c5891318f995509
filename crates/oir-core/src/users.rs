//! Staff accounts
//!
//! Accounts are validated field by field and every violation is reported at
//! once. Emails are unique regardless of case. Credentials never leave the
//! directory: listings return [`UserView`]s.

use crate::clock::{Clock, SystemClock};
use crate::credentials::{self, DEFAULT_COST};
use crate::error::UserError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use oir_model::{AccountStatus, Role, User, UserId, UserView};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;

/// Checked against on unknown emails so a miss costs as much as a hit
const DECOY_PASSWORD: &str = "decoy-credential";

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Account creation request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: String,
}

impl NewUser {
    /// Every violated constraint, or the parsed role
    pub fn validate(&self) -> Result<Role, UserError> {
        let mut issues = Vec::new();

        if self.name.trim().chars().count() < 2 {
            issues.push("name must be at least 2 characters".to_string());
        }
        if !EMAIL.is_match(self.email.trim()) {
            issues.push("email must be a valid address".to_string());
        }
        if self.password.chars().count() < 8 {
            issues.push("password must be at least 8 characters".to_string());
        }
        let role = self.role.parse::<Role>().ok();
        if role.is_none() {
            issues.push("role must be one of admin, manager, staff".to_string());
        }
        if self.department.trim().chars().count() < 2 {
            issues.push("department must be at least 2 characters".to_string());
        }

        match role {
            Some(role) if issues.is_empty() => Ok(role),
            _ => Err(UserError::Validation(issues)),
        }
    }
}

/// In-memory account store
#[derive(Debug)]
pub struct UserDirectory {
    users: DashMap<UserId, User>,
    by_email: DashMap<String, UserId>,
    clock: Arc<dyn Clock>,
    cost: u32,
    decoy: OnceCell<String>,
}

impl UserDirectory {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: DashMap::new(),
            by_email: DashMap::new(),
            clock,
            cost: DEFAULT_COST,
            decoy: OnceCell::new(),
        }
    }

    /// bcrypt work factor for new credentials
    #[inline]
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self.decoy = OnceCell::new();
        self
    }

    /// Validate and store a new active account
    pub fn create(&self, request: NewUser) -> Result<UserView, UserError> {
        let role = request.validate()?;
        let email = request.email.trim().to_string();
        let password_hash = credentials::hash_password(&request.password, self.cost)?;
        let id = UserId::new();

        match self.by_email.entry(email.to_lowercase()) {
            Entry::Occupied(_) => return Err(UserError::EmailTaken(email)),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let user = User {
            id,
            name: request.name.trim().to_string(),
            email,
            role,
            department: request.department.trim().to_string(),
            status: AccountStatus::Active,
            created_at: self.clock.now(),
            password_hash,
        };
        let view = user.view();
        self.users.insert(id, user);

        tracing::info!(user = %id, role = %role, "user created");
        Ok(view)
    }

    /// Every account, oldest first
    #[must_use]
    pub fn list(&self) -> Vec<UserView> {
        let mut views: Vec<UserView> = self.users.iter().map(|u| u.view()).collect();
        views.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        views
    }

    #[must_use]
    pub fn get(&self, id: UserId) -> Option<UserView> {
        self.users.get(&id).map(|u| u.view())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Activate or deactivate an account
    pub fn set_status(&self, id: UserId, status: AccountStatus) -> Option<UserView> {
        self.users.get_mut(&id).map(|mut u| {
            u.status = status;
            u.view()
        })
    }

    /// Account for `email` when `password` matches
    pub fn authenticate(&self, email: &str, password: &str) -> Result<UserView, UserError> {
        let user = self
            .by_email
            .get(&email.trim().to_lowercase())
            .map(|entry| *entry.value())
            .and_then(|id| self.users.get(&id).map(|u| u.clone()));
        let Some(user) = user else {
            let decoy = self
                .decoy
                .get_or_try_init(|| credentials::hash_password(DECOY_PASSWORD, self.cost))?;
            let _ = credentials::verify_password(password, decoy);
            return Err(UserError::InvalidCredentials);
        };
        let id = user.id;

        if !credentials::verify_password(password, &user.password_hash)? {
            tracing::debug!(user = %id, "password rejected");
            return Err(UserError::InvalidCredentials);
        }
        if user.status == AccountStatus::Inactive {
            return Err(UserError::Inactive);
        }
        Ok(user.view())
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(email: &str) -> NewUser {
        NewUser {
            name: "Natasha Utubasi".to_string(),
            email: email.to_string(),
            password: "registrar-2025".to_string(),
            role: "manager".to_string(),
            department: "Registry".to_string(),
        }
    }

    fn directory() -> UserDirectory {
        UserDirectory::default().with_cost(4)
    }

    #[test]
    fn every_violation_is_reported() {
        let bad = NewUser {
            name: "N".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            role: "Admin".to_string(),
            department: "R".to_string(),
        };
        match bad.validate() {
            Err(UserError::Validation(issues)) => assert_eq!(issues.len(), 5),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn created_user_is_listed_without_credentials() {
        let dir = directory();
        let view = dir.create(request("natasha@oir.gov.pg")).unwrap();
        assert_eq!(view.role, Role::Manager);
        assert_eq!(view.status, AccountStatus::Active);

        let listed = serde_json::to_value(dir.list()).unwrap();
        assert!(listed[0].get("passwordHash").is_none());
        assert!(listed[0].get("password").is_none());
    }

    #[test]
    fn emails_are_unique_ignoring_case() {
        let dir = directory();
        dir.create(request("natasha@oir.gov.pg")).unwrap();
        let err = dir.create(request("NATASHA@oir.gov.pg")).unwrap_err();
        assert!(matches!(err, UserError::EmailTaken(_)));
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn authenticate_checks_password_and_status() {
        let dir = directory();
        let view = dir.create(request("natasha@oir.gov.pg")).unwrap();

        assert_eq!(
            dir.authenticate("Natasha@oir.gov.pg", "registrar-2025").unwrap().id,
            view.id
        );
        assert_eq!(
            dir.authenticate("natasha@oir.gov.pg", "wrong-password"),
            Err(UserError::InvalidCredentials)
        );
        assert_eq!(
            dir.authenticate("nobody@oir.gov.pg", "registrar-2025"),
            Err(UserError::InvalidCredentials)
        );

        dir.set_status(view.id, AccountStatus::Inactive);
        assert_eq!(
            dir.authenticate("natasha@oir.gov.pg", "registrar-2025"),
            Err(UserError::Inactive)
        );
    }

    #[test]
    fn unknown_email_still_checks_a_hash() {
        let dir = directory();
        dir.create(request("natasha@oir.gov.pg")).unwrap();
        assert!(dir.decoy.get().is_none());

        assert_eq!(
            dir.authenticate("nobody@oir.gov.pg", "registrar-2025"),
            Err(UserError::InvalidCredentials)
        );
        let decoy = dir.decoy.get().unwrap();
        assert!(decoy.starts_with("$2b$04$"));
        assert!(!credentials::verify_password("registrar-2025", decoy).unwrap());
    }
}
