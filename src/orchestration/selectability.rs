//! # Selectability Computation
//!
//! Pure recomputation of which wrappers may occupy which steps, given the
//! draft and the current snapshot. Re-run after every mutation and after
//! every snapshot refresh; idempotent between mutations.

use super::draft::OrchestrationDraft;
use super::types::{SelectabilityReport, StaleReason, StepSelectability};
use crate::models::CommandWrapper;
use crate::registry::WrapperSnapshot;
use std::collections::HashSet;

/// Context tags established by the draft's first step.
///
/// Empty when no first step is chosen, or when its wrapper is missing from
/// the snapshot (a missing wrapper constrains nothing; it is reported as a
/// stale selection instead).
pub fn context_set_for(draft: &OrchestrationDraft, snapshot: &WrapperSnapshot) -> HashSet<String> {
    draft
        .first_selection()
        .and_then(|wrapper_id| snapshot.get(wrapper_id))
        .map(|wrapper| wrapper.contexts.clone())
        .unwrap_or_default()
}

/// Selectability rule for non-first steps: enabled, and compatible with the
/// shared context set (an empty context set constrains nothing)
pub fn is_selectable(wrapper: &CommandWrapper, context_set: &HashSet<String>) -> bool {
    wrapper.enabled && (context_set.is_empty() || wrapper.shares_context_with(context_set))
}

/// Recompute the full selectability report for a draft against a snapshot
pub fn compute_selectability(
    draft: &OrchestrationDraft,
    snapshot: &WrapperSnapshot,
) -> SelectabilityReport {
    let context_set = context_set_for(draft, snapshot);

    let steps = draft
        .steps()
        .iter()
        .enumerate()
        .map(|(index, slot)| StepSelectability {
            index,
            first: slot.first,
            selection: slot.selection.clone(),
            stale: slot
                .selection
                .as_deref()
                .and_then(|wrapper_id| stale_reason(slot.first, wrapper_id, snapshot, &context_set)),
        })
        .collect();

    SelectabilityReport {
        snapshot_version: snapshot.version(),
        context_set,
        steps,
    }
}

/// Why a current selection is no longer allowed, if it is not.
///
/// Enablement is checked before context, so a selection failing both tests
/// reports `Disabled`. The first step can only ever be `Disabled`: it
/// defines the context set rather than being constrained by it.
fn stale_reason(
    first: bool,
    wrapper_id: &str,
    snapshot: &WrapperSnapshot,
    context_set: &HashSet<String>,
) -> Option<StaleReason> {
    let Some(wrapper) = snapshot.get(wrapper_id) else {
        // Vanished from the snapshot: referential validity folds into
        // enablement
        return Some(StaleReason::Disabled);
    };

    if !wrapper.enabled {
        return Some(StaleReason::Disabled);
    }

    if !first && !context_set.is_empty() && !wrapper.shares_context_with(context_set) {
        return Some(StaleReason::ContextMismatch);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scope;

    fn wrapper(id: &str, contexts: &[&str], enabled: bool) -> CommandWrapper {
        CommandWrapper::new(id, id, id, contexts.iter().copied(), enabled)
    }

    fn snapshot(wrappers: Vec<CommandWrapper>) -> WrapperSnapshot {
        WrapperSnapshot::new(Scope::Site, wrappers)
    }

    fn draft(selections: &[Option<&str>]) -> OrchestrationDraft {
        let mut draft = OrchestrationDraft::new(Scope::Site);
        for _ in selections {
            draft.add_step();
        }
        for (index, selection) in selections.iter().enumerate() {
            draft.select(index, selection.map(str::to_string)).unwrap();
        }
        draft
    }

    #[test]
    fn test_context_set_from_first_step() {
        let snapshot = snapshot(vec![wrapper("w1", &["session", "scan"], true)]);
        let draft = draft(&[Some("w1")]);
        let context_set = context_set_for(&draft, &snapshot);
        assert!(context_set.contains("session"));
        assert!(context_set.contains("scan"));
    }

    #[test]
    fn test_context_set_empty_without_first_selection() {
        let snapshot = snapshot(vec![wrapper("w1", &["session"], true)]);
        let draft = draft(&[None, Some("w1")]);
        assert!(context_set_for(&draft, &snapshot).is_empty());
    }

    #[test]
    fn test_selectable_requires_enablement_and_overlap() {
        let context_set: HashSet<String> = ["session".to_string()].into_iter().collect();

        assert!(is_selectable(&wrapper("a", &["session"], true), &context_set));
        assert!(!is_selectable(&wrapper("b", &["scan"], true), &context_set));
        assert!(!is_selectable(&wrapper("c", &["session"], false), &context_set));
        // Empty context set constrains nothing
        assert!(is_selectable(&wrapper("d", &["scan"], true), &HashSet::new()));
        assert!(!is_selectable(&wrapper("e", &["scan"], false), &HashSet::new()));
    }

    #[test]
    fn test_disabled_selection_flagged() {
        let snapshot = snapshot(vec![
            wrapper("w1", &["session"], true),
            wrapper("w2", &["session"], false),
        ]);
        let report = compute_selectability(&draft(&[Some("w1"), Some("w2")]), &snapshot);
        assert_eq!(report.steps[1].stale, Some(StaleReason::Disabled));
        assert!(report.has_stale());
    }

    #[test]
    fn test_context_mismatch_flagged() {
        let snapshot = snapshot(vec![
            wrapper("w1", &["scan"], true),
            wrapper("w2", &["session"], true),
        ]);
        let report = compute_selectability(&draft(&[Some("w1"), Some("w2")]), &snapshot);
        assert_eq!(report.steps[1].stale, Some(StaleReason::ContextMismatch));
    }

    #[test]
    fn test_disabled_wins_over_context_mismatch() {
        let snapshot = snapshot(vec![
            wrapper("w1", &["scan"], true),
            wrapper("w2", &["session"], false),
        ]);
        let report = compute_selectability(&draft(&[Some("w1"), Some("w2")]), &snapshot);
        assert_eq!(report.steps[1].stale, Some(StaleReason::Disabled));
    }

    #[test]
    fn test_missing_wrapper_flagged_as_disabled() {
        let snapshot = snapshot(vec![wrapper("w1", &["session"], true)]);
        let report = compute_selectability(&draft(&[Some("w1"), Some("gone")]), &snapshot);
        assert_eq!(report.steps[1].stale, Some(StaleReason::Disabled));
    }

    #[test]
    fn test_disabled_first_step_flagged_but_never_context_mismatched() {
        let snapshot = snapshot(vec![
            wrapper("w1", &["session"], false),
            wrapper("w2", &["session"], true),
        ]);
        let report = compute_selectability(&draft(&[Some("w1"), Some("w2")]), &snapshot);
        assert_eq!(report.steps[0].stale, Some(StaleReason::Disabled));
        assert_eq!(report.steps[1].stale, None);
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let snapshot = snapshot(vec![
            wrapper("w1", &["session"], true),
            wrapper("w2", &["scan"], false),
        ]);
        let draft = draft(&[Some("w1"), Some("w2")]);
        let first = compute_selectability(&draft, &snapshot);
        let second = compute_selectability(&draft, &snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_draft_produces_empty_report() {
        let snapshot = snapshot(vec![wrapper("w1", &["session"], true)]);
        let report = compute_selectability(&OrchestrationDraft::new(Scope::Site), &snapshot);
        assert!(report.steps.is_empty());
        assert!(report.context_set.is_empty());
        assert!(!report.has_stale());
    }
}
