//! Wicket entry commands
//!
//! A wicket is entered over several commands: the dismissal type, then the
//! run count for a run-out, then the fielder. The open entry is kept in
//! `.crease/wicket.json` between commands.

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use super::scoring::{print_report, with_scorer};
use crate::domain::{DismissalKind, Position, Scorer, WicketProgress, WicketStep};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum WicketCommands {
    Bowled,
    Lbw,
    Caught,
    Stumped,
    RunOut,
    HitWicket,

    /// Runs completed before a run-out, and who was run out
    Runs {
        runs: u32,

        /// Batsman run out, by position when the ball was bowled
        #[arg(long, default_value = "striker")]
        end: Position,
    },

    /// Name the fielder (caught, stumped, run out) and record the wicket
    Fielder {
        name: Option<String>,
    },

    /// Abandon the wicket entry
    Cancel,

    /// Show where the wicket entry stands
    Status,
}

pub fn run(cmd: WicketCommands, output: &Output) -> Result<()> {
    match cmd {
        WicketCommands::Bowled => begin(output, DismissalKind::Bowled),
        WicketCommands::Lbw => begin(output, DismissalKind::Lbw),
        WicketCommands::Caught => begin(output, DismissalKind::Caught),
        WicketCommands::Stumped => begin(output, DismissalKind::Stumped),
        WicketCommands::RunOut => begin(output, DismissalKind::RunOut),
        WicketCommands::HitWicket => begin(output, DismissalKind::HitWicket),
        WicketCommands::Runs { runs, end } => {
            let (progress, session) = with_scorer(output, "wicket", |scorer| {
                Ok(scorer.submit_run_out(runs, end)?)
            })?;
            print_progress(output, &session.scorer, &progress);
            Ok(())
        }
        WicketCommands::Fielder { name } => {
            let (progress, session) = with_scorer(output, "wicket", |scorer| {
                Ok(scorer.submit_fielder(name.as_deref())?)
            })?;
            print_progress(output, &session.scorer, &progress);
            Ok(())
        }
        WicketCommands::Cancel => {
            with_scorer(output, "wicket", |scorer| {
                scorer.cancel_wicket();
                Ok(())
            })?;
            output.success("Wicket entry cancelled");
            Ok(())
        }
        WicketCommands::Status => status(output),
    }
}

fn begin(output: &Output, kind: DismissalKind) -> Result<()> {
    output.verbose_ctx("wicket", &format!("Dismissal type: {}", kind));
    let (progress, session) = with_scorer(output, "wicket", |scorer| Ok(scorer.begin_wicket(kind)?))?;
    print_progress(output, &session.scorer, &progress);
    Ok(())
}

fn print_progress(output: &Output, scorer: &Scorer, progress: &WicketProgress) {
    match progress {
        WicketProgress::Applied { report } => print_report(output, scorer, report),
        WicketProgress::FreeHit { report } => {
            output.notice("Free hit: nobody is out");
            print_report(output, scorer, report);
        }
        _ if output.is_json() => output.data(progress),
        WicketProgress::AwaitingRunCount => {
            println!("Runs completed? crease wicket runs N --end striker|non-striker")
        }
        WicketProgress::AwaitingFielderDetails => match scorer.wicket_flow().step() {
            WicketStep::AwaitingFielderDetails { kind, .. } if kind.needs_fielder() => {
                println!("Fielder? crease wicket fielder NAME")
            }
            _ => println!("Confirm: crease wicket fielder"),
        },
        WicketProgress::TypeSelected => println!("Dismissal type selected"),
    }
}

fn status(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let session = project.load()?;
    let step = session.scorer.wicket_flow().step();

    if output.is_json() {
        output.data(step);
        return Ok(());
    }

    match step {
        WicketStep::Idle => println!("No wicket entry in progress"),
        WicketStep::TypeSelected { kind } => println!("{}: type selected", kind),
        WicketStep::AwaitingRunCount { kind } => println!("{}: waiting for run count", kind),
        WicketStep::AwaitingFielderDetails { kind, runs, end } => {
            println!("{}: waiting for fielder ({} runs, {} out)", kind, runs, end)
        }
        WicketStep::Complete { dismissal } => println!("{}: complete", dismissal.kind),
    }
    Ok(())
}
