//! Prompt construction for task suggestions.

use chrono::NaiveDate;

/// Date format used for the start date embedded in the prompt (dd/mm/yyyy)
pub const START_DATE_FORMAT: &str = "%d/%m/%Y";

/// Inputs to a suggestion request. `start_date` is always the server's
/// current date; callers cannot choose it.
#[derive(Debug, Clone)]
pub struct SuggestionInput {
    pub goal: String,
    pub start_date: NaiveDate,
    pub target_date: String,
    pub requirement: String,
}

impl SuggestionInput {
    pub fn starting_today(goal: String, target_date: String, requirement: String) -> Self {
        Self {
            goal,
            start_date: chrono::Local::now().date_naive(),
            target_date,
            requirement,
        }
    }
}

/// Build the instruction sent to the completion service.
///
/// The model is asked for an open-ended numbered list alternating a bold
/// task line and a bold date line, which is what [`super::parse_suggestion`]
/// extracts.
pub fn build_prompt(input: &SuggestionInput) -> String {
    let start = input.start_date.format(START_DATE_FORMAT);

    format!(
        "Generate a list of tasks based on the provided goal, start date (dd/mm/yyyy), \
         target date (dd/mm/yyyy) and requirement description. \
         For each task, generate the task name and expected completion date. \
         Make sure to distribute tasks reasonably from the start date to achieve the goal before the target date. \
         Format your response as follows:\n\
         **TASK 1:** [Task name here]\n\
         **DATE:** [Expected completion date here]\n\
         **TASK 2:** [Task name here]\n\
         **DATE:** [Expected completion date here]\n\
         The number of tasks is not limited to 2, add more tasks based on your analysis of the given information. \
         Ensure the text is properly formatted. Each entry needs to start with a task name, then the completion date. \
         Follow this pattern for all tasks. \
         Here is the information for you to generate: \n\
         Goal: {} \n\
         Start date: {} \n\
         Target date: {} \n\
         Requirement: {}",
        input.goal, start, input.target_date, input.requirement
    )
}
