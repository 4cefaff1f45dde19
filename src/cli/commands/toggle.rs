//! Toggle command: flips one mark and reports the outcome.

use anyhow::Result;

use crate::cli::args::ToggleTarget;
use crate::cli::session::Session;
use crate::progress::Change;
use crate::types::ProblemId;

/// One-line description of a change, as printed after a toggle.
pub fn describe(change: &Change) -> String {
    match change {
        Change::TopicCompletion { topic, complete: true } => format!("Completed {topic}"),
        Change::TopicCompletion { topic, complete: false } => {
            format!("Marked {topic} as not complete")
        }
        Change::Bookmark { topic, bookmarked: true } => format!("Bookmarked {topic}"),
        Change::Bookmark { topic, bookmarked: false } => format!("Removed bookmark from {topic}"),
        Change::SubtopicCompletion {
            topic,
            index,
            complete,
        } => format!(
            "Subtopic {index} of {topic} is now {}",
            if *complete { "complete" } else { "not complete" }
        ),
        Change::SubtopicExpansion {
            topic,
            index,
            expanded,
        } => format!(
            "Subtopic {index} of {topic} {}",
            if *expanded { "expanded" } else { "collapsed" }
        ),
        Change::ProblemCompletion { problem, complete: true } => format!("Solved problem {problem}"),
        Change::ProblemCompletion { problem, complete: false } => {
            format!("Marked problem {problem} as unsolved")
        }
        Change::Eli5Mode(on) => format!("Simple explanations {}", if *on { "on" } else { "off" }),
        Change::ActiveTrack(Some(track)) => format!("Switched to track {track}"),
        Change::ActiveTrack(None) => "Cleared active track".to_string(),
        Change::Theme(theme) => format!("Theme set to {theme}"),
        Change::OnboardingSeen => "Onboarding dismissed".to_string(),
        Change::Sidebar { collapsed } => format!(
            "Sidebar {}",
            if *collapsed { "collapsed" } else { "expanded" }
        ),
        Change::MobileSidebar { open } => {
            format!("Mobile sidebar {}", if *open { "open" } else { "closed" })
        }
        Change::Reconciled(report) => format!("Removed {} stale entries", report.total()),
        Change::Reset => "All progress erased".to_string(),
    }
}

pub fn run_toggle(session: &mut Session, target: ToggleTarget) -> Result<()> {
    let store = &mut session.store;
    let subscription = store.subscribe(|change, _| println!("{}", describe(change)));

    match target {
        ToggleTarget::Topic { id } => store.toggle_topic_complete(id),
        ToggleTarget::Bookmark { id } => store.toggle_bookmark(id),
        ToggleTarget::Subtopic { id, index } => store.toggle_subtopic_complete(id, index),
        ToggleTarget::Problem { id } => store.toggle_dsa_problem_complete(ProblemId::parse(&id)),
    }

    store.unsubscribe(subscription);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Theme, TopicId};

    #[test]
    fn test_describe_changes() {
        assert_eq!(
            describe(&Change::TopicCompletion {
                topic: TopicId::from("calculus"),
                complete: true
            }),
            "Completed calculus"
        );
        assert_eq!(
            describe(&Change::ProblemCompletion {
                problem: ProblemId::Number(7),
                complete: false
            }),
            "Marked problem 7 as unsolved"
        );
        assert_eq!(describe(&Change::Theme(Theme::Light)), "Theme set to light");
    }
}
