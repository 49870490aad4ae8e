//! Catalog browsing commands: `catalog` and `departments`.

use crate::catalog::{extract_course_code, CatalogStore, CatalogView};
use crate::cli::common::{load_catalog, print_json, CliResult, Context};
use crate::models::{department_label, department_name, CourseRecord};
use clap::Args;
use serde::Serialize;

/// List courses, sorted by course code within each department
#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// Only show this department (e.g., CSE)
    #[arg(short, long, value_name = "CODE")]
    pub department: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// List departments present in the catalog
#[derive(Debug, Clone, Args)]
pub struct DepartmentsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One course row in JSON output.
#[derive(Serialize, Debug)]
pub(crate) struct CourseOutput<'a> {
    pub id: i64,
    pub code: String,
    pub title: &'a str,
    pub department: &'a str,
    pub credits: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<f64>,
    pub description: &'a str,
}

impl<'a> From<&'a CourseRecord> for CourseOutput<'a> {
    fn from(course: &'a CourseRecord) -> Self {
        Self {
            id: course.id,
            code: extract_course_code(&course.title, &course.department),
            title: &course.title,
            department: &course.department,
            credits: course.credits,
            enrollment: course.enrollment,
            description: &course.description,
        }
    }
}

#[derive(Serialize, Debug)]
struct DepartmentOutput<'a> {
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'static str>,
    courses: Vec<CourseOutput<'a>>,
}

#[derive(Serialize, Debug)]
struct DepartmentSummary<'a> {
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'static str>,
    course_count: usize,
}

impl CatalogArgs {
    /// Execute the catalog command
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let store = load_catalog(ctx.api()?)?;

        let departments: Vec<String> = match &self.department {
            Some(requested) => vec![resolve_department(&store, requested)],
            None => store.departments().to_vec(),
        };

        let groups: Vec<(&str, CatalogView<'_>)> = departments
            .iter()
            .map(|code| (code.as_str(), store.view(Some(code))))
            .collect();

        if self.json {
            let output: Vec<DepartmentOutput<'_>> = groups
                .iter()
                .map(|(code, view)| DepartmentOutput {
                    code,
                    name: department_name(code),
                    courses: view.courses().iter().map(|c| CourseOutput::from(*c)).collect(),
                })
                .collect();
            return print_json(&output);
        }

        if groups.is_empty() {
            println!("The catalog is empty.");
            return Ok(());
        }

        for (index, (code, view)) in groups.iter().enumerate() {
            if index > 0 {
                println!();
            }
            println!("{}", department_label(code));
            match view {
                CatalogView::Courses(courses) => {
                    for course in courses {
                        print_course_line(course);
                    }
                }
                CatalogView::Empty { .. } | CatalogView::NoDepartmentSelected => {
                    println!("  No courses found for this department.");
                }
            }
        }

        Ok(())
    }
}

impl DepartmentsArgs {
    /// Execute the departments command
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let store = load_catalog(ctx.api()?)?;

        if self.json {
            let output: Vec<DepartmentSummary<'_>> = store
                .departments()
                .iter()
                .map(|code| DepartmentSummary {
                    code,
                    name: department_name(code),
                    course_count: store.view(Some(code)).len(),
                })
                .collect();
            return print_json(&output);
        }

        for code in store.departments() {
            println!(
                "{:<40} {:>4} courses",
                department_label(code),
                store.view(Some(code)).len()
            );
        }

        Ok(())
    }
}

/// Maps user input onto an indexed department code, ignoring case.
///
/// Unknown input is returned unchanged and yields an empty view.
fn resolve_department(store: &CatalogStore, requested: &str) -> String {
    let requested = requested.trim();
    store
        .departments()
        .iter()
        .find(|code| code.eq_ignore_ascii_case(requested))
        .cloned()
        .unwrap_or_else(|| requested.to_string())
}

/// Prints one course in the human-readable listing.
pub(crate) fn print_course_line(course: &CourseRecord) {
    let mut line = format!("  [{:>4}] {}", course.id, course.title);
    line.push_str(&format!(" ({} credits)", course.credits_label()));
    if let Some(enrollment) = course.enrollment_label() {
        line.push_str(&format!(", {enrollment} enrolled"));
    }
    println!("{line}");
}
