use crate::model::Commit;

/// Collapse commits with the same id into a single record.
///
/// The result is sorted by commit id, so it does not depend on the order in which branches were
/// traversed.
pub fn dedup_commits(mut commits: Vec<Commit>) -> Vec<Commit> {
    commits.sort_by(|a, b| a.id.cmp(&b.id));
    commits.dedup_by(|a, b| a.id == b.id);
    commits
}
