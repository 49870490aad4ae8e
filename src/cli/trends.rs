//! Enrollment trends command.

use crate::cli::common::{print_json, CliResult, Context};
use crate::dashboard::{bar_width, TrendsStore};
use crate::models::department_label;
use clap::Args;
use serde::Serialize;

const BAR_WIDTH: usize = 30;

/// Show average enrollment per department
#[derive(Debug, Clone, Args)]
pub struct TrendsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct TrendOutput<'a> {
    department: &'a str,
    average_enrollment: i64,
}

impl TrendsArgs {
    /// Execute the trends command
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let mut store = TrendsStore::new();
        store.start_fetch(ctx.api()?);
        store.wait();

        if let Some(error) = store.status().error() {
            return Err(error.clone().into());
        }

        if self.json {
            let output: Vec<TrendOutput<'_>> = store
                .trends()
                .iter()
                .map(|trend| TrendOutput {
                    department: &trend.department,
                    average_enrollment: trend.rounded_average(),
                })
                .collect();
            return print_json(&output);
        }

        if store.trends().is_empty() {
            println!("No trend data available.");
            return Ok(());
        }

        let max = store.max_average();
        for trend in store.trends() {
            let average = trend.rounded_average();
            println!(
                "{:<40} {:>5} {}",
                department_label(&trend.department),
                average,
                "█".repeat(bar_width(average, max, BAR_WIDTH))
            );
        }

        Ok(())
    }
}
