//! Assignment planning for a single project's user list.
//!
//! Everything here is pure. Stores call [`LinkChange::plan`] while holding
//! the project's lock and persist whatever list comes back.

use std::collections::HashSet;

use crate::error::AppError;

/// Removes repeated ids, keeping the first occurrence of each.
pub fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Ids from `requested` absent from `present`, in request order.
pub fn missing_ids(requested: &[i64], present: &[i64]) -> Vec<i64> {
    let present: HashSet<i64> = present.iter().copied().collect();
    requested
        .iter()
        .copied()
        .filter(|id| !present.contains(id))
        .collect()
}

/// `[3, 4]` -> `"3,4"`.
pub fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// New user list for an assign command.
///
/// The list is replaced wholesale: the result is exactly the requested ids,
/// provided every one of them resolved in the store.
pub fn plan_assignment(requested: &[i64], resolved: &[i64]) -> Result<Vec<i64>, AppError> {
    let requested = dedup_ids(requested);
    let missing = missing_ids(&requested, resolved);
    if !missing.is_empty() {
        return Err(AppError::AssignRejected(join_ids(&missing)));
    }
    Ok(requested)
}

/// New user list for an unassign command.
///
/// Every requested id must currently be assigned; the resolved users are then
/// removed from `current`, keeping the order of the remaining ones.
pub fn plan_unassignment(
    current: &[i64],
    requested: &[i64],
    resolved: &[i64],
) -> Result<Vec<i64>, AppError> {
    let requested = dedup_ids(requested);
    let missing = missing_ids(&requested, current);
    if !missing.is_empty() {
        return Err(AppError::UnassignRejected(join_ids(&missing)));
    }

    if current.is_empty() {
        return Ok(Vec::new());
    }

    let removed: HashSet<i64> = resolved.iter().copied().collect();
    Ok(current
        .iter()
        .copied()
        .filter(|id| !removed.contains(id))
        .collect())
}

/// A requested change to one project's user list.
#[derive(Debug, Clone, Copy)]
pub enum LinkChange<'a> {
    Assign(&'a [i64]),
    Unassign(&'a [i64]),
}

impl<'a> LinkChange<'a> {
    pub fn requested(&self) -> &'a [i64] {
        match self {
            LinkChange::Assign(ids) | LinkChange::Unassign(ids) => ids,
        }
    }

    /// Plans the new list from the project's `current` users and the
    /// requested ids that `resolved` in the store.
    pub fn plan(&self, current: &[i64], resolved: &[i64]) -> Result<Vec<i64>, AppError> {
        match self {
            LinkChange::Assign(requested) => plan_assignment(requested, resolved),
            LinkChange::Unassign(requested) => plan_unassignment(current, requested, resolved),
        }
    }
}
