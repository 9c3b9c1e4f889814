//! Per-script decisions for one upgrade run.
//!
//! The plan is pure: it reads candidate scripts and journal records and
//! classifies every script. Executing scripts and recording them is left to
//! the caller.

use crate::error::{CoreError, CoreResult};
use crate::executed::ExecutedScript;
use crate::matching::MatchOutcome;
use crate::script::SqlScript;
use crate::script_name::ScriptName;
use std::collections::{HashMap, HashSet};

/// Decision for a single candidate script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDecision {
    pub name: ScriptName,
    pub outcome: MatchOutcome,
}

/// Classification of every candidate script, in candidate order.
#[derive(Debug, Clone, Default)]
pub struct UpgradePlan {
    decisions: Vec<ScriptDecision>,
}

impl UpgradePlan {
    /// Classify `scripts` against the journal contents in `executed`.
    ///
    /// `executed` is expected in journal order; when a name was recorded more
    /// than once the last record is the one compared. Fails on duplicate
    /// candidate names and on the first untrusted fingerprint.
    pub fn build(scripts: &[SqlScript], executed: &[ExecutedScript]) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(scripts.len());
        for script in scripts {
            if !seen.insert(script.name().as_str()) {
                return Err(CoreError::DuplicateScript {
                    name: script.name().to_string(),
                });
            }
        }

        let journal: HashMap<&str, &ExecutedScript> =
            executed.iter().map(|e| (e.name(), e)).collect();

        let mut decisions = Vec::with_capacity(scripts.len());
        for script in scripts {
            let record = journal.get(script.name().as_str()).copied();
            let outcome = script.match_to(record)?;
            log::debug!("Script {}: {}", script.name(), outcome);
            decisions.push(ScriptDecision {
                name: script.name().clone(),
                outcome,
            });
        }
        Ok(Self { decisions })
    }

    /// All decisions, in candidate order.
    pub fn decisions(&self) -> &[ScriptDecision] {
        &self.decisions
    }

    /// Scripts that must be executed, new or changed.
    pub fn to_run(&self) -> impl Iterator<Item = &ScriptDecision> {
        self.decisions.iter().filter(|d| d.outcome.must_run())
    }

    /// Scripts applied before whose content has since changed.
    pub fn changed(&self) -> impl Iterator<Item = &ScriptDecision> {
        self.decisions.iter().filter(|d| d.outcome.is_changed())
    }

    /// Scripts already applied with identical content.
    pub fn matched(&self) -> impl Iterator<Item = &ScriptDecision> {
        self.decisions
            .iter()
            .filter(|d| d.outcome == MatchOutcome::Matched)
    }

    /// True when nothing needs to run.
    pub fn is_up_to_date(&self) -> bool {
        self.to_run().next().is_none()
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
