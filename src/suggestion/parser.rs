//! Extraction of task suggestions from free-form model output.
//!
//! Entries look like `**TASK <n>:** <name> **DATE:** <date>` and are matched
//! leftmost-first without overlap. Each captured field is the shortest run
//! (newlines included) that is followed by whitespace, so an entry whose date
//! is not followed by whitespace is not extracted, and a date containing
//! spaces is cut at its first space.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref TASK_ENTRY_REGEX: Regex = Regex::new(
        r"(?s)\*\*TASK \d+:\*\*\s+(.+?)\s+\*\*DATE:\*\*\s+(.+?)\s+"
    ).unwrap();
}

/// One suggested task. `date` is kept as the model wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTask {
    pub name: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSuggestion {
    /// The whole reply with every `*` removed
    pub message: String,
    /// Entries in document order
    pub tasks: Vec<SuggestedTask>,
}

impl ParsedSuggestion {
    /// A reply is usable only when both the message and the task list are non-empty.
    pub fn is_usable(&self) -> bool {
        !self.message.is_empty() && !self.tasks.is_empty()
    }
}

fn strip_asterisks(s: &str) -> String {
    s.replace('*', "")
}

/// Split a model reply into a display message and its task entries.
///
/// The two outputs are computed independently: the message is the raw reply
/// without asterisks, not a rendering of the parsed tasks.
pub fn parse_suggestion(reply: &str) -> ParsedSuggestion {
    let tasks = TASK_ENTRY_REGEX
        .captures_iter(reply)
        .map(|caps| SuggestedTask {
            name: strip_asterisks(caps[1].trim()),
            date: strip_asterisks(caps[2].trim()),
        })
        .collect();

    ParsedSuggestion {
        message: strip_asterisks(reply),
        tasks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, date: &str) -> SuggestedTask {
        SuggestedTask {
            name: name.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_inline_entries() {
        let reply = "**TASK 1:** Write outline **DATE:** 01/02/2025 **TASK 2:** Draft chapter **DATE:** 15/02/2025 ";
        let parsed = parse_suggestion(reply);

        assert_eq!(
            parsed.tasks,
            vec![
                task("Write outline", "01/02/2025"),
                task("Draft chapter", "15/02/2025"),
            ]
        );
        assert!(parsed.is_usable());
    }

    #[test]
    fn test_multiline_reply() {
        let reply = "Here is your plan:\n\n\
                     **TASK 1:** Research venues\n**DATE:** 03/03/2025\n\n\
                     **TASK 2:** Book caterer\n**DATE:** 10/03/2025\n\n\
                     **TASK 3:** Send invitations\n**DATE:** 17/03/2025\n";
        let parsed = parse_suggestion(reply);

        assert_eq!(parsed.tasks.len(), 3);
        assert_eq!(parsed.tasks[0], task("Research venues", "03/03/2025"));
        assert_eq!(parsed.tasks[2], task("Send invitations", "17/03/2025"));
    }

    #[test]
    fn test_asterisks_stripped_from_fields() {
        let reply = "**TASK 1:** *Stretch* daily **DATE:** *05/05/2025* \n";
        let parsed = parse_suggestion(reply);
        assert_eq!(parsed.tasks, vec![task("Stretch daily", "05/05/2025")]);
    }

    #[test]
    fn test_message_is_raw_text_without_asterisks() {
        let reply = "Intro **bold** text\n**TASK 1:** Plan **DATE:** 01/01/2026 \nOutro";
        let parsed = parse_suggestion(reply);
        assert_eq!(
            parsed.message,
            "Intro bold text\nTASK 1: Plan DATE: 01/01/2026 \nOutro"
        );
    }

    #[test]
    fn test_no_markers_yields_no_tasks() {
        let reply = "I cannot help with planning this goal.";
        let parsed = parse_suggestion(reply);

        assert!(parsed.tasks.is_empty());
        assert_eq!(parsed.message, reply);
        assert!(!parsed.is_usable());
    }

    #[test]
    fn test_empty_reply_is_not_usable() {
        let parsed = parse_suggestion("");
        assert!(parsed.message.is_empty());
        assert!(!parsed.is_usable());
    }

    #[test]
    fn test_final_entry_without_trailing_whitespace_is_dropped() {
        let reply = "**TASK 1:** Write outline **DATE:** 01/02/2025 **TASK 2:** Draft chapter **DATE:** 15/02/2025";
        let parsed = parse_suggestion(reply);
        assert_eq!(parsed.tasks, vec![task("Write outline", "01/02/2025")]);
    }

    #[test]
    fn test_single_entry_without_trailing_whitespace_yields_nothing() {
        let parsed = parse_suggestion("**TASK 1:** Write outline **DATE:** 01/02/2025");
        assert!(parsed.tasks.is_empty());
        assert!(!parsed.is_usable());
    }

    #[test]
    fn test_date_with_spaces_is_cut_at_first_space() {
        let parsed = parse_suggestion("**TASK 1:** Kickoff **DATE:** 15 March 2025\n");
        assert_eq!(parsed.tasks, vec![task("Kickoff", "15")]);
    }

    #[test]
    fn test_date_glued_to_next_marker() {
        // No whitespace between the first date and the next marker: the first
        // date swallows the second entry's text up to the next whitespace.
        let reply = "**TASK 1:** A **DATE:** 01/01/2025**TASK 2:** B **DATE:** 02/01/2025 ";
        let parsed = parse_suggestion(reply);
        assert_eq!(parsed.tasks.len(), 1);
        assert_eq!(parsed.tasks[0].name, "A");
        assert_eq!(parsed.tasks[0].date, "01/01/2025TASK");
    }
}
