use crate::config::Config;
use crate::fetch::PageSource;
use crate::logbook::LogBook;
use crate::models::{CheckOutcome, CycleReport, Decision, FirstSeenPolicy, Observation, TargetFailure};
use crate::parser::extract_timestamp;
use crate::state::StateStore;
use crate::{Context, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Decide whether an observed timestamp is a new update for one target.
///
/// With no prior entry the policy decides; otherwise only a strictly greater
/// timestamp counts. The recorded value advances to `max(prior, observed)`,
/// so a transient upstream rollback never rewinds the snapshot.
pub fn evaluate(
    policy: FirstSeenPolicy,
    prior: Option<DateTime<Utc>>,
    observed: DateTime<Utc>,
) -> Decision {
    match prior {
        None => Decision {
            is_new: policy == FirstSeenPolicy::Announce,
            record: observed,
        },
        Some(prior) => Decision {
            is_new: observed > prior,
            record: prior.max(observed),
        },
    }
}

/// Run one pass over all configured targets: fetch, extract, evaluate, log,
/// then persist the staged state as a single snapshot.
///
/// A fetch or extraction failure skips that target for this cycle and never
/// aborts the others; failed targets keep their previous state entry. The
/// state write failing is the one loud error here.
pub async fn run_cycle(
    config: &Config,
    source: &dyn PageSource,
    store: &mut StateStore,
    logbook: &LogBook,
) -> Result<CycleReport> {
    let mut report = CycleReport::default();

    for (index, target) in config.targets.iter().enumerate() {
        if index > 0 && config.request_delay_secs > 0 {
            tokio::time::sleep(Duration::from_secs(config.request_delay_secs)).await;
        }

        let html = match source.fetch(&target.url).await {
            Ok(html) => html,
            Err(err) => {
                report.failures.push(TargetFailure::new(&target.name, err.to_string()));
                continue;
            }
        };

        let observed = match extract_timestamp(&html, &config.filename) {
            Ok(observed) => observed,
            Err(err) => {
                report.failures.push(TargetFailure::new(&target.name, err.to_string()));
                continue;
            }
        };

        let decision = evaluate(config.first_seen, store.get(&target.name), observed);

        logbook.record_check(&target.name, observed, decision.is_new)?;
        if decision.is_new {
            logbook.record_update(&target.name, observed)?;
        }

        store.record(&target.name, decision.record);
        report.checks.push(CheckOutcome {
            observation: Observation {
                target: target.name.clone(),
                timestamp: observed,
            },
            is_new: decision.is_new,
        });
    }

    store.save().context("Failed to persist state snapshot")?;

    Ok(report)
}
