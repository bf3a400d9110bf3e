use crate::executor::{apply_batch, ApplyOptions, ApplyReport};
use crate::lister::ListOptions;
use crate::output::{ApplyResult, PlanResult};
use crate::planner::pending_operations;
use crate::rule::RenameRule;
use anyhow::Result;
use std::path::Path;
use tracing::info;

use super::plan::plan_operation;

/// Apply operation - plans the batch, asks `confirm` whether to go ahead, then renames.
///
/// `confirm` sees the full plan. Returning `Ok(false)` aborts without touching
/// the disk; the result then has `applied == false` and no outcomes.
pub fn apply_operation<F>(
    folder: &Path,
    options: &ListOptions,
    rule: &RenameRule,
    apply_options: &ApplyOptions,
    confirm: F,
) -> Result<ApplyResult>
where
    F: FnOnce(&PlanResult) -> Result<bool>,
{
    let (plan, _) = plan_operation(folder, options, rule, None, false, false)?;
    let operations = pending_operations(&plan.previews);

    if !operations.is_empty() && !confirm(&plan)? {
        info!(folder = %plan.folder.display(), "Apply declined");
        return Ok(ApplyResult {
            folder: plan.folder,
            rule: plan.rule,
            applied: false,
            report: ApplyReport::from_outcomes(Vec::new()),
        });
    }

    let report = apply_batch(&operations, apply_options)?;
    Ok(ApplyResult {
        folder: plan.folder,
        rule: plan.rule,
        applied: true,
        report,
    })
}
