//! The two activities raced by the coordinator.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tracing::warn;

use quiz_core::model::{ProblemSet, TerminationReason};

use crate::console::{AnswerSource, Console};
use crate::prompter::Prompter;

/// Ask every problem in order, one at a time.
///
/// `correct` is bumped once per correct answer. Returns the answered set.
pub(super) async fn ask_all<A: AnswerSource>(
    mut problems: ProblemSet,
    mut prompter: Prompter<A>,
    correct: Arc<AtomicUsize>,
    console: Console,
) -> ProblemSet {
    for (index, problem) in problems.iter_mut().enumerate() {
        match prompter.ask(problem, index + 1).await {
            Ok(true) => {
                correct.fetch_add(1, Ordering::SeqCst);
            }
            Ok(false) => {}
            Err(err) => warn!(error = %err, "problem skipped"),
        }
    }
    announce(&console, TerminationReason::Completed);
    problems
}

/// Sleep for the whole time limit.
pub(super) async fn countdown(limit: Duration, console: Console) {
    tokio::time::sleep(limit).await;
    announce(&console, TerminationReason::TimedOut);
}

fn announce(console: &Console, reason: TerminationReason) {
    if let Err(err) = console.line(reason.banner()) {
        warn!(error = %err, %reason, "failed to announce end of session");
    }
}
