use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;
use uuid::Uuid;

use crate::identity;
use crate::store::types::Submission;

/// Concurrent in-memory repository for pending submissions.
///
/// This is the single store of truth for unclosed report content: one table
/// by submission id, one per-dashboard insertion-order index, and one
/// per-dashboard set of dedup keys. All three live behind one mutex so that
/// every public operation observes a consistent snapshot; nothing blocking
/// ever runs under the lock.
///
/// Construct one instance at startup and hand it to every consumer; there is
/// no process-wide singleton.
pub struct SubmissionStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    by_id: HashMap<Uuid, Submission>,
    dashboard_index: HashMap<i32, Vec<Uuid>>,
    dedup_index: HashMap<i32, HashSet<String>>,
}

impl SubmissionStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Reports whether the candidate's identity was already seen on its
    /// dashboard. A single matching key (name OR RG) is enough; a candidate
    /// with no usable key is never a duplicate.
    ///
    /// Detection is deliberately aggressive. Officers override false
    /// positives manually; a missed duplicate is worse.
    pub fn is_duplicate(&self, candidate: &Submission) -> bool {
        let inner = self.lock();
        let Some(seen) = inner.dedup_index.get(&candidate.dashboard_id) else {
            return false;
        };
        dedup_keys(candidate).iter().any(|key| seen.contains(key))
    }

    /// Unconditionally inserts the submission, indexes it under its
    /// dashboard and registers its dedup keys. Duplicate policy is the
    /// caller's call via [`is_duplicate`](Self::is_duplicate).
    ///
    /// Re-adding an existing id overwrites the prior content without
    /// creating a second entry in the dashboard listing.
    pub fn add(&self, submission: Submission) -> Uuid {
        let mut inner = self.lock();
        let sid = submission.submission_id;
        let dashboard_id = submission.dashboard_id;
        let keys = dedup_keys(&submission);

        let replaced = inner.by_id.insert(sid, submission).is_some();
        let ids = inner.dashboard_index.entry(dashboard_id).or_default();
        if !ids.contains(&sid) {
            ids.push(sid);
        }
        let seen = inner.dedup_index.entry(dashboard_id).or_default();
        for key in keys {
            seen.insert(key);
        }
        debug!(
            "Stored submission {} for dashboard {} (replaced: {})",
            sid, dashboard_id, replaced
        );
        sid
    }

    /// Point lookup; `None` for unknown ids.
    pub fn get(&self, submission_id: Uuid) -> Option<Submission> {
        self.lock().by_id.get(&submission_id).cloned()
    }

    /// All currently stored submissions for a dashboard, in insertion order.
    pub fn list_for_dashboard(&self, dashboard_id: i32) -> Vec<Submission> {
        let inner = self.lock();
        let Some(ids) = inner.dashboard_index.get(&dashboard_id) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|sid| inner.by_id.get(sid).cloned())
            .collect()
    }

    /// Count consistent with what `list_for_dashboard` would return.
    pub fn count_for_dashboard(&self, dashboard_id: i32) -> usize {
        let inner = self.lock();
        match inner.dashboard_index.get(&dashboard_id) {
            Some(ids) => ids.iter().filter(|sid| inner.by_id.contains_key(*sid)).count(),
            None => 0,
        }
    }

    /// Removes one submission and its index entry. Idempotent; unknown ids
    /// are a no-op.
    ///
    /// Dedup keys are intentionally NOT retracted: a closed or discarded
    /// report keeps its identity "seen" for the rest of the dashboard's
    /// life, so the same person cannot re-file the handled case. Only
    /// [`purge_dashboard`](Self::purge_dashboard) resets the dedup set.
    pub fn delete(&self, submission_id: Uuid) {
        let mut inner = self.lock();
        let Some(submission) = inner.by_id.remove(&submission_id) else {
            return;
        };
        if let Some(ids) = inner.dashboard_index.get_mut(&submission.dashboard_id) {
            ids.retain(|sid| *sid != submission_id);
        }
        debug!(
            "Deleted submission {} from dashboard {}",
            submission_id, submission.dashboard_id
        );
    }

    /// Irreversibly removes every submission for the dashboard and clears
    /// its entire dedup set. Idempotent; purging an unknown or empty
    /// dashboard is a no-op.
    pub fn purge_dashboard(&self, dashboard_id: i32) {
        let mut inner = self.lock();
        let ids = inner.dashboard_index.remove(&dashboard_id).unwrap_or_default();
        for sid in &ids {
            inner.by_id.remove(sid);
        }
        inner.dedup_index.remove(&dashboard_id);
        if !ids.is_empty() {
            debug!(
                "Purged {} submission(s) for dashboard {}",
                ids.len(),
                dashboard_id
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Every mutation completes before the guard drops, so the maps are
        // consistent even if a holder panicked.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SubmissionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn dedup_keys(submission: &Submission) -> Vec<String> {
    identity::dedup_keys(&submission.guest_name, submission.rg.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::Answer;
    use chrono::Utc;

    fn submission(dashboard_id: i32, guest_name: &str, rg: Option<&str>) -> Submission {
        Submission {
            submission_id: Uuid::new_v4(),
            dashboard_id,
            guest_name: guest_name.to_string(),
            dob: None,
            rg: rg.map(str::to_string),
            cpf: None,
            address: None,
            answers: vec![("data_fato".into(), Answer::Text("2025-03-01".into()))],
            narrative: Some("relato".into()),
            crime_type: "roubo".into(),
            photos: Vec::new(),
            received_at: Utc::now(),
        }
    }

    #[test]
    fn test_duplicate_by_equivalent_name() {
        let store = SubmissionStore::new();
        store.add(submission(1, "João Silva", Some("12.345-6")));

        let same_person = submission(1, "joão   silva", None);
        assert!(store.is_duplicate(&same_person));
    }

    #[test]
    fn test_duplicate_by_rg_alone() {
        let store = SubmissionStore::new();
        store.add(submission(1, "João Silva", Some("12.345-6")));

        let other_name_same_rg = submission(1, "Outro Nome", Some("123456"));
        assert!(store.is_duplicate(&other_name_same_rg));
    }

    #[test]
    fn test_not_duplicate_across_dashboards() {
        let store = SubmissionStore::new();
        store.add(submission(1, "João Silva", Some("12.345-6")));

        let other_dashboard = submission(2, "João Silva", Some("12.345-6"));
        assert!(!store.is_duplicate(&other_dashboard));
    }

    #[test]
    fn test_distinct_identity_is_not_duplicate() {
        let store = SubmissionStore::new();
        store.add(submission(1, "João Silva", Some("12.345-6")));

        let maria = submission(1, "Maria Souza", None);
        assert!(!store.is_duplicate(&maria));
    }

    #[test]
    fn test_unusable_identity_never_flags() {
        let store = SubmissionStore::new();
        store.add(submission(1, "???", None));
        store.add(submission(1, "João Silva", Some("12.345-6")));

        let no_key = submission(1, "1234", None);
        assert!(!store.is_duplicate(&no_key));
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = SubmissionStore::new();
        let first = store.add(submission(7, "Primeira Pessoa", None));
        let second = store.add(submission(7, "Segunda Pessoa", None));
        let third = store.add(submission(7, "Terceira Pessoa", None));

        let listed: Vec<Uuid> = store
            .list_for_dashboard(7)
            .iter()
            .map(|s| s.submission_id)
            .collect();
        assert_eq!(listed, vec![first, second, third]);
        assert_eq!(store.count_for_dashboard(7), 3);
    }

    #[test]
    fn test_readd_same_id_overwrites_without_double_listing() {
        let store = SubmissionStore::new();
        let mut sub = submission(1, "João Silva", None);
        let sid = sub.submission_id;
        store.add(sub.clone());

        sub.narrative = Some("relato corrigido".into());
        store.add(sub);

        assert_eq!(store.count_for_dashboard(1), 1);
        assert_eq!(store.list_for_dashboard(1).len(), 1);
        assert_eq!(
            store.get(sid).unwrap().narrative.as_deref(),
            Some("relato corrigido")
        );
    }

    #[test]
    fn test_get_unknown_is_none() {
        let store = SubmissionStore::new();
        assert!(store.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_delete_removes_listing_but_keeps_dedup_keys() {
        let store = SubmissionStore::new();
        let sid = store.add(submission(1, "João Silva", Some("12.345-6")));

        store.delete(sid);
        assert!(store.get(sid).is_none());
        assert!(store.list_for_dashboard(1).is_empty());
        assert_eq!(store.count_for_dashboard(1), 0);

        // The handled identity stays "seen" until the dashboard is purged.
        let refiled = submission(1, "João Silva", None);
        assert!(store.is_duplicate(&refiled));
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let store = SubmissionStore::new();
        store.add(submission(1, "João Silva", None));
        store.delete(Uuid::new_v4());
        assert_eq!(store.count_for_dashboard(1), 1);
    }

    #[test]
    fn test_purge_empties_dashboard_and_resets_dedup() {
        let store = SubmissionStore::new();
        store.add(submission(1, "João Silva", Some("12.345-6")));
        store.add(submission(1, "Maria Souza", None));

        store.purge_dashboard(1);
        assert!(store.list_for_dashboard(1).is_empty());
        assert_eq!(store.count_for_dashboard(1), 0);

        // Unlike delete, purge forgets identities entirely.
        let fresh = submission(1, "João Silva", Some("12.345-6"));
        assert!(!store.is_duplicate(&fresh));
    }

    #[test]
    fn test_purge_is_idempotent_and_scoped() {
        let store = SubmissionStore::new();
        store.add(submission(1, "João Silva", None));
        store.add(submission(2, "Maria Souza", None));

        store.purge_dashboard(1);
        store.purge_dashboard(1);
        store.purge_dashboard(99);

        assert!(store.list_for_dashboard(1).is_empty());
        assert_eq!(store.count_for_dashboard(2), 1);
    }
}
