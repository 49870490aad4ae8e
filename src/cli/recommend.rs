//! Recommendation command.

use crate::catalog::CatalogStore;
use crate::cli::catalog::{print_course_line, CourseOutput};
use crate::cli::common::{load_catalog, print_json, CliError, CliResult, Context};
use crate::models::{ClassYear, College, CourseId, StudentProfile};
use crate::recommend::{
    RecommendError, RecommendStatus, RecommendationWorkflow, SelectionSet, SubmitOutcome,
};
use clap::Args;
use serde::Serialize;

/// Recommend courses based on courses already taken
#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    /// Ids of courses already taken (at least two)
    #[arg(value_name = "ID", required = true, num_args = 1..)]
    pub ids: Vec<CourseId>,

    /// Major code (overrides the configured profile)
    #[arg(long, value_name = "CODE")]
    pub major: Option<String>,

    /// College (overrides the configured profile)
    #[arg(long, value_name = "NAME")]
    pub college: Option<String>,

    /// Class year (overrides the configured profile)
    #[arg(long, value_name = "YEAR")]
    pub year: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct RecommendOutput<'a> {
    taken_course_ids: &'a [CourseId],
    profile: &'a StudentProfile,
    courses: Vec<CourseOutput<'a>>,
}

impl RecommendArgs {
    /// Execute the recommend command
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let profile = self.profile(&ctx.config.profile)?;
        let api = ctx.api()?;
        let catalog = load_catalog(api.clone())?;
        let selection = build_selection(&catalog, &self.ids)?;

        let mut workflow = RecommendationWorkflow::new();
        match workflow.submit(&selection, Some(&profile), api) {
            SubmitOutcome::Started => workflow.wait(),
            SubmitOutcome::Invalid | SubmitOutcome::Ignored => {}
        }

        if workflow.status() != RecommendStatus::Fulfilled {
            let error = workflow
                .error()
                .cloned()
                .unwrap_or_else(|| RecommendError::Transport {
                    detail: "request did not complete".to_string(),
                });
            return Err(recommend_error_to_cli(&error));
        }

        if self.json {
            return print_json(&RecommendOutput {
                taken_course_ids: selection.ids(),
                profile: &profile,
                courses: workflow.results().iter().map(CourseOutput::from).collect(),
            });
        }

        println!(
            "Recommended for a {} {} student at {}:",
            profile.year, profile.major, profile.college
        );
        for course in workflow.results() {
            print_course_line(course);
        }

        Ok(())
    }

    /// Configured profile with command-line overrides applied.
    fn profile(&self, base: &StudentProfile) -> CliResult<StudentProfile> {
        let mut profile = base.clone();
        if let Some(major) = &self.major {
            profile.major = StudentProfile::parse_major(major).map_err(CliError::validation)?;
        }
        if let Some(college) = &self.college {
            profile.college = college.parse::<College>().map_err(CliError::validation)?;
        }
        if let Some(year) = &self.year {
            profile.year = year.parse::<ClassYear>().map_err(CliError::validation)?;
        }
        Ok(profile)
    }
}

/// Selects each id, rejecting ids that are not in the catalog.
///
/// Repeated ids are selected once.
fn build_selection(catalog: &CatalogStore, ids: &[CourseId]) -> CliResult<SelectionSet> {
    let unknown: Vec<String> = ids
        .iter()
        .filter(|id| !catalog.contains(**id))
        .map(ToString::to_string)
        .collect();
    if !unknown.is_empty() {
        return Err(CliError::validation(format!(
            "Unknown course id(s): {}",
            unknown.join(", ")
        )));
    }

    let mut selection = SelectionSet::new();
    for id in ids {
        if !selection.contains(*id) {
            selection.toggle(*id);
        }
    }
    Ok(selection)
}

fn recommend_error_to_cli(error: &RecommendError) -> CliError {
    match error {
        RecommendError::Validation { .. } => CliError::validation(error.to_string()),
        RecommendError::EmptyResult { .. } | RecommendError::Server { .. } => {
            CliError::remote(error.to_string())
        }
        RecommendError::Transport { .. } | RecommendError::Parse { .. } => {
            CliError::io(error.to_string())
        }
    }
}
