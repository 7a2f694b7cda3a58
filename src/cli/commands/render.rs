//! `settle render`: server-render the demo comment thread.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use crate::application::{ConvergenceLoop, ConvergenceStatus};
use crate::cli::demo::{render_page, thread_reducer, CommentSource, ThreadState, ThreadStore};
use crate::cli::display::{list_table, render_list, short_id};
use crate::cli::output::{output, CommandOutput};
use crate::domain::error::ConvergenceWarning;
use crate::domain::models::{Config, RoundSummary};
use crate::services::WaitEnhancer;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Maximum number of render passes [default: configured round_limit]
    #[arg(short, long)]
    pub round_limit: Option<u32>,

    /// Number of reply levels in the thread
    #[arg(short, long, default_value = "1")]
    pub depth: u32,

    /// Simulated latency of each reply fetch, in milliseconds
    #[arg(short, long, default_value = "25")]
    pub latency_ms: u64,

    /// Make every fetch for reply level K fail
    #[arg(short, long, value_name = "K")]
    pub fail_at: Option<u32>,

    /// Page title
    #[arg(short, long, default_value = "Settle demo thread")]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct RenderOutput {
    pub run_id: Uuid,
    pub status: ConvergenceStatus,
    pub renders: u32,
    pub round_limit: u32,
    pub page: String,
    pub rounds: Vec<RoundSummary>,
    pub warnings: Vec<ConvergenceWarning>,
}

impl CommandOutput for RenderOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["round", "actions", "resolved", "rejected", "duration"]);
        for round in &self.rounds {
            table.add_row(vec![
                round.round.to_string(),
                round.action_types.len().to_string(),
                round.resolved.to_string(),
                round.rejected.to_string(),
                format!("{}ms", round.duration_ms),
            ]);
        }

        let run_id = self.run_id.to_string();
        let status = match self.status {
            ConvergenceStatus::Converged => "converged",
            ConvergenceStatus::Exhausted => "round limit reached",
            ConvergenceStatus::Unobserved => "unobserved",
        };

        let mut lines = vec![
            self.page.clone(),
            String::new(),
            render_list("round", &table, self.rounds.len()),
            String::new(),
            format!(
                "Run {}: {status} after {} of {} render(s)",
                short_id(&run_id),
                self.renders,
                self.round_limit
            ),
        ];
        lines.extend(self.warnings.iter().map(|w| format!("warning: {w}")));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: RenderArgs, config: &Config, json_mode: bool) -> Result<()> {
    let out = render(args, config).await?;
    output(&out, json_mode);
    Ok(())
}

/// Run one convergence of the demo thread and collect its report
pub async fn render(args: RenderArgs, config: &Config) -> Result<RenderOutput> {
    if let Some(level) = args.fail_at {
        if level == 0 || level > args.depth {
            bail!(
                "--fail-at must name a reply level between 1 and --depth ({})",
                args.depth
            );
        }
    }

    let mut convergence = config.convergence.clone();
    if let Some(round_limit) = args.round_limit {
        convergence.round_limit = round_limit;
    }
    let round_limit = convergence.round_limit;

    let source = CommentSource::new(
        args.depth,
        Duration::from_millis(args.latency_ms),
        args.fail_at,
    );
    let mut store: ThreadStore = WaitEnhancer::new()
        .with_store_name(convergence.store_name.clone())
        .create_store(thread_reducer, ThreadState::default());

    let mut render = ConvergenceLoop::new(
        |store: &mut ThreadStore, title: &str| render_page(store, &source, title),
        convergence,
    );
    let report = render.run_with_report(&mut store, args.title.as_str()).await;

    let rounds = store
        .wait_state()
        .statistics
        .iter()
        .map(RoundSummary::from)
        .collect();

    Ok(RenderOutput {
        run_id: report.run_id,
        status: report.status,
        renders: report.renders,
        round_limit,
        page: report.result,
        rounds,
        warnings: report.warnings,
    })
}
