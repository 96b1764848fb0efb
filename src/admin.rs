//! Admin Roster Resolver
//!
//! Classifies emails against the remote admin roster, behind an explicitly
//! owned, injectable 5-minute cache. The cache methods take the clock value
//! as a parameter so tests control time; wasm callers pass
//! `crate::time::now_ms()`.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::models::AdminRecord;
use crate::services::{self, ServiceError};

/// Admins that exist even when the roster cannot be read.
pub const DEFAULT_ADMIN_EMAILS: &[&str] = &["pr.fujisho@gmail.com"];

pub const ADMIN_CACHE_TTL_MS: f64 = 5.0 * 60.0 * 1000.0;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    #[error("有効なメールアドレスを入力してください")]
    InvalidEmailFormat,
    #[error("このメールアドレスは既に管理者として登録されています")]
    DuplicateAdmin,
    #[error("自分自身を管理者から削除することはできません")]
    SelfRemoval,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Debug)]
struct CacheSlot {
    emails: HashSet<String>,
    expires_at: f64,
}

/// Shared admin-email cache. Cloning shares the same slot; the single
/// instance is handed out through reactive context, which requires the
/// handle to be `Send + Sync`. The lock is uncontended in the
/// single-threaded browser runtime.
#[derive(Debug, Clone, Default)]
pub struct AdminCache {
    slot: Arc<Mutex<Option<CacheSlot>>>,
}

impl AdminCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, Option<CacheSlot>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached set, or `None` when empty or expired at `now_ms`.
    pub fn get(&self, now_ms: f64) -> Option<HashSet<String>> {
        match self.locked().as_ref() {
            Some(cached) if now_ms < cached.expires_at => Some(cached.emails.clone()),
            _ => None,
        }
    }

    pub fn set(&self, emails: HashSet<String>, now_ms: f64) {
        *self.locked() = Some(CacheSlot {
            emails,
            expires_at: now_ms + ADMIN_CACHE_TTL_MS,
        });
    }

    /// Clear the cache and its expiry immediately. Must follow every roster
    /// mutation so the next classification reflects the change.
    pub fn invalidate(&self) {
        *self.locked() = None;
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        match self.locked().as_ref() {
            Some(cached) => now_ms >= cached.expires_at,
            None => true,
        }
    }
}

pub fn default_admin_set() -> HashSet<String> {
    DEFAULT_ADMIN_EMAILS
        .iter()
        .map(|email| email.to_lowercase())
        .collect()
}

/// Default set plus the fetched roster, all lowercased.
fn merge_roster(roster: impl IntoIterator<Item = String>) -> HashSet<String> {
    let mut set = default_admin_set();
    set.extend(roster.into_iter().map(|email| email.to_lowercase()));
    set
}

/// `local@domain.tld` shape: non-empty local and domain without whitespace
/// or extra `@`, and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Deduplicated union of the default admins and the remote roster. A read
/// failure is absorbed: the default set is returned and the condition is
/// logged, not raised.
pub async fn resolve_admin_emails(cache: &AdminCache) -> HashSet<String> {
    let now = crate::time::now_ms();
    if let Some(cached) = cache.get(now) {
        return cached;
    }
    match services::list_admins().await {
        Ok(records) => {
            let set = merge_roster(records.into_iter().map(|record| record.email));
            cache.set(set.clone(), now);
            set
        }
        Err(err) => {
            web_sys::console::warn_1(
                &format!("[ADMIN] roster read failed, using defaults: {err}").into(),
            );
            default_admin_set()
        }
    }
}

/// Whether `email` is an administrator; empty emails are rejected without
/// touching the roster.
pub async fn is_admin(cache: &AdminCache, email: &str) -> bool {
    if email.is_empty() {
        return false;
    }
    resolve_admin_emails(cache)
        .await
        .contains(&email.to_lowercase())
}

/// Membership against the cached set only; falls back to the default set
/// when no cache is populated. Render paths without suspension points use
/// this and accept staleness until the async path fills the cache.
pub fn is_admin_sync(cache: &AdminCache, email: &str, now_ms: f64) -> bool {
    if email.is_empty() {
        return false;
    }
    let set = cache.get(now_ms).unwrap_or_else(default_admin_set);
    set.contains(&email.to_lowercase())
}

/// Trim, lowercase and shape-check a candidate roster email.
fn normalized_email(email: &str) -> Result<String, AdminError> {
    let email = email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(AdminError::InvalidEmailFormat);
    }
    Ok(email)
}

/// Case-insensitive duplicate check against the fetched roster.
fn check_duplicate(email: &str, existing: &[AdminRecord]) -> Result<(), AdminError> {
    if existing
        .iter()
        .any(|record| record.email.to_lowercase() == email)
    {
        return Err(AdminError::DuplicateAdmin);
    }
    Ok(())
}

/// An administrator may not remove their own record.
fn guard_removal(admin_email: &str, requested_by: &str) -> Result<(), AdminError> {
    if admin_email.eq_ignore_ascii_case(requested_by) {
        return Err(AdminError::SelfRemoval);
    }
    Ok(())
}

/// Add a roster record and invalidate the cache.
pub async fn add_admin_record(
    cache: &AdminCache,
    email: &str,
    requested_by: &str,
) -> Result<AdminRecord, AdminError> {
    let email = normalized_email(email)?;
    let existing = services::list_admins().await?;
    check_duplicate(&email, &existing)?;
    let record = services::add_admin(&email, requested_by).await?;
    cache.invalidate();
    Ok(record)
}

/// Delete a roster record and invalidate the cache.
pub async fn remove_admin_record(
    cache: &AdminCache,
    record_id: &str,
    admin_email: &str,
    requested_by: &str,
) -> Result<(), AdminError> {
    guard_removal(admin_email, requested_by)?;
    services::delete_admin(record_id).await?;
    cache.invalidate();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(emails: &[&str]) -> HashSet<String> {
        merge_roster(emails.iter().map(|e| e.to_string()))
    }

    #[test]
    fn cache_returns_the_set_within_the_window() {
        let cache = AdminCache::new();
        assert_eq!(cache.get(0.0), None);
        assert!(cache.is_expired(0.0));

        cache.set(roster(&["A@X.com"]), 1_000.0);
        let set = cache.get(1_000.0 + ADMIN_CACHE_TTL_MS - 1.0).expect("cached");
        assert!(set.contains("a@x.com"));
        assert!(!cache.is_expired(1_000.0));
    }

    #[test]
    fn cache_expires_after_the_ttl() {
        let cache = AdminCache::new();
        cache.set(roster(&[]), 1_000.0);
        assert_eq!(cache.get(1_000.0 + ADMIN_CACHE_TTL_MS), None);
        assert!(cache.is_expired(1_000.0 + ADMIN_CACHE_TTL_MS));
    }

    #[test]
    fn invalidate_clears_immediately() {
        let cache = AdminCache::new();
        cache.set(roster(&["a@x.com"]), 0.0);
        cache.invalidate();
        assert_eq!(cache.get(1.0), None);
        assert!(cache.is_expired(1.0));
    }

    #[test]
    fn merge_lowercases_and_keeps_defaults() {
        let set = roster(&["Admin@Example.COM"]);
        assert!(set.contains("admin@example.com"));
        for default in DEFAULT_ADMIN_EMAILS {
            assert!(set.contains(*default));
        }
        // Duplicates collapse.
        assert_eq!(roster(&["a@x.com", "A@X.COM"]).len(), DEFAULT_ADMIN_EMAILS.len() + 1);
    }

    #[test]
    fn sync_membership_matches_the_cached_set() {
        let cache = AdminCache::new();
        cache.set(roster(&["a@x.com"]), 0.0);
        assert!(is_admin_sync(&cache, "A@X.com", 1.0));
        assert!(!is_admin_sync(&cache, "b@x.com", 1.0));
        assert!(!is_admin_sync(&cache, "", 1.0));
    }

    #[test]
    fn sync_membership_falls_back_to_defaults_without_a_cache() {
        let cache = AdminCache::new();
        assert!(is_admin_sync(&cache, DEFAULT_ADMIN_EMAILS[0], 0.0));
        assert!(!is_admin_sync(&cache, "someone@else.com", 0.0));
    }

    #[test]
    fn cache_handle_is_send_and_sync() {
        fn assert_bounds<T: Send + Sync>() {}
        assert_bounds::<AdminCache>();
    }

    fn record(id: &str, email: &str) -> AdminRecord {
        AdminRecord {
            id: id.to_string(),
            email: email.to_string(),
            added_by: None,
            added_at: None,
        }
    }

    #[test]
    fn candidate_emails_are_normalized_before_the_shape_check() {
        assert_eq!(
            normalized_email("  Admin@Example.COM "),
            Ok("admin@example.com".to_string())
        );
        assert_eq!(
            normalized_email("not-an-email"),
            Err(AdminError::InvalidEmailFormat)
        );
    }

    #[test]
    fn duplicate_detection_ignores_case() {
        let existing = vec![record("r1", "Admin@Example.com")];
        assert_eq!(
            check_duplicate("admin@example.com", &existing),
            Err(AdminError::DuplicateAdmin)
        );
        assert_eq!(check_duplicate("other@example.com", &existing), Ok(()));
    }

    #[test]
    fn self_removal_is_rejected_regardless_of_case() {
        assert_eq!(
            guard_removal("A@x.com", "a@X.com"),
            Err(AdminError::SelfRemoval)
        );
        assert_eq!(guard_removal("a@x.com", "b@x.com"), Ok(()));
    }

    #[test]
    fn email_shape_check_matches_the_form_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name@sub.example.co.jp"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }
}
