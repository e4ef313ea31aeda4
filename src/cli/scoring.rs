//! Scoring commands
//!
//! Each command loads the match, applies exactly one engine operation and
//! writes back whatever changed.

use anyhow::Result;

use super::output::Output;
use super::views::outcome_line;
use crate::domain::{BallReport, Outcome, Position, Scorer};
use crate::storage::{Project, Session};

/// Loads the match, runs one operation, and saves it if the operation
/// succeeded
pub(super) fn with_scorer<T>(
    output: &Output,
    context: &str,
    apply: impl FnOnce(&mut Scorer) -> Result<T>,
) -> Result<(T, Session)> {
    let project = Project::open_current()?;
    output.verbose_ctx(context, &format!("Opened match at: {}", project.root().display()));

    let mut session = project.load()?;
    let value = apply(&mut session.scorer)?;
    project.save(&session)?;
    output.verbose_ctx(
        context,
        &format!("{} snapshots on the undo stack", session.scorer.undo_stack().len()),
    );

    Ok((value, session))
}

/// Prints what a delivery did and what the scorer must do next
pub(super) fn print_report(output: &Output, scorer: &Scorer, report: &BallReport) {
    if output.is_json() {
        output.data(&serde_json::json!({
            "report": report,
            "state": scorer.state(),
        }));
        return;
    }

    let summary = scorer.book().live_summary();
    let state = scorer.state();
    let line = if report.innings_ended {
        scorer
            .archived()
            .last()
            .map(|s| s.score_line())
            .unwrap_or_else(|| summary.score_line())
    } else {
        summary.score_line()
    };
    println!("{}  {}", report.event, line);

    if state.is_free_hit && !report.innings_ended {
        println!("Free hit next ball");
    }
    if let Some(position) = report.awaiting_batsman {
        println!("Wicket! New batsman needed at {}: crease batsman NAME", position);
    }
    if report.awaiting_bowler {
        println!("End of over. Next bowler: crease bowler NAME");
    }
    match report.outcome {
        Outcome::InningsBreak if report.innings_ended => {
            if let Some(target) = state.target {
                println!("Innings over. Target: {}", target);
            }
        }
        outcome if outcome.is_final() => {
            println!("{}", outcome_line(scorer.rules(), outcome));
        }
        _ => {}
    }
}

pub fn start(output: &Output, striker: &str, non_striker: &str, bowler: &str) -> Result<()> {
    let ((), session) = with_scorer(output, "start", |scorer| {
        Ok(scorer.start_innings(striker, non_striker, bowler)?)
    })?;
    let scorer = &session.scorer;

    if output.is_json() {
        output.data(&serde_json::json!({
            "innings": scorer.state().innings,
            "target": scorer.state().target,
            "striker": scorer.roster().striker(),
            "non_striker": scorer.roster().non_striker(),
            "bowler": scorer.roster().current_bowler(),
        }));
    } else {
        let summary = scorer.book().live_summary();
        output.success(&format!(
            "Innings {} under way: {} batting, {} and {} at the crease, {} to bowl",
            scorer.state().innings,
            summary.team_name,
            striker.trim(),
            non_striker.trim(),
            bowler.trim()
        ));
        if let Some(target) = scorer.state().target {
            println!("Target: {}", target);
        }
    }
    Ok(())
}

pub fn run(output: &Output, runs: u32) -> Result<()> {
    let (report, session) = with_scorer(output, "run", |scorer| Ok(scorer.apply_run(runs)?))?;
    print_report(output, &session.scorer, &report);
    Ok(())
}

fn extra(
    output: &Output,
    context: &str,
    disabled: &str,
    apply: impl FnOnce(&mut Scorer) -> Result<Option<BallReport>>,
) -> Result<()> {
    let (report, session) = with_scorer(output, context, apply)?;
    match report {
        Some(report) => print_report(output, &session.scorer, &report),
        None if output.is_json() => output.data(&serde_json::json!({
            "report": null,
            "ignored": disabled,
        })),
        None => output.notice(&format!("{} are switched off for this match; nothing recorded", disabled)),
    }
    Ok(())
}

pub fn wide(output: &Output) -> Result<()> {
    extra(output, "wide", "Wides", |scorer| Ok(scorer.apply_wide()?))
}

pub fn no_ball(output: &Output) -> Result<()> {
    extra(output, "no-ball", "No-balls", |scorer| Ok(scorer.apply_no_ball()?))
}

pub fn bye(output: &Output, runs: u32) -> Result<()> {
    extra(output, "bye", "Byes", |scorer| Ok(scorer.apply_bye(runs)?))
}

pub fn batsman(output: &Output, name: &str) -> Result<()> {
    let (id, _) = with_scorer(output, "batsman", |scorer| Ok(scorer.new_batsman(name)?))?;
    if output.is_json() {
        output.data(&serde_json::json!({ "id": id, "name": name.trim() }));
    } else {
        output.success(&format!("{} comes in ({})", name.trim(), id));
    }
    Ok(())
}

pub fn bowler(output: &Output, name: &str) -> Result<()> {
    let (id, _) = with_scorer(output, "bowler", |scorer| Ok(scorer.confirm_bowler(name)?))?;
    if output.is_json() {
        output.data(&serde_json::json!({ "id": id, "name": name.trim() }));
    } else {
        output.success(&format!("{} to bowl ({})", name.trim(), id));
    }
    Ok(())
}

pub fn retire(output: &Output, position: Position, new_name: &str) -> Result<()> {
    let ((retired, id), _) = with_scorer(output, "retire", |scorer| {
        let retired = scorer.roster().at(position).map(|b| b.name.clone());
        Ok((retired, scorer.retire(position, new_name)?))
    })?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "retired": retired,
            "id": id,
            "name": new_name.trim(),
            "position": position,
        }));
    } else {
        output.success(&format!(
            "{} retired hurt; {} comes in at {}",
            retired.unwrap_or_default(),
            new_name.trim(),
            position
        ));
    }
    Ok(())
}

pub fn return_batsman(output: &Output, name: &str, position: Position) -> Result<()> {
    let (id, _) = with_scorer(output, "return", |scorer| {
        Ok(scorer.return_batsman(name, position)?)
    })?;
    if output.is_json() {
        output.data(&serde_json::json!({ "id": id, "name": name.trim(), "position": position }));
    } else {
        output.success(&format!("{} returns at {}", name.trim(), position));
    }
    Ok(())
}

pub fn dismiss_bowler(output: &Output, replacement: &str) -> Result<()> {
    let (id, _) = with_scorer(output, "dismiss-bowler", |scorer| {
        Ok(scorer.dismiss_bowler(replacement)?)
    })?;
    if output.is_json() {
        output.data(&serde_json::json!({ "id": id, "name": replacement.trim() }));
    } else {
        output.success(&format!("{} finishes the over ({})", replacement.trim(), id));
    }
    Ok(())
}

pub fn rename(output: &Output, id: &str, name: &str) -> Result<()> {
    with_scorer(output, "rename", |scorer| Ok(scorer.rename(id, name)?))?;
    output.success(&format!("Renamed {} to {}", id.trim(), name.trim()));
    Ok(())
}

pub fn undo(output: &Output) -> Result<()> {
    let (label, session) = with_scorer(output, "undo", |scorer| Ok(scorer.undo()?))?;
    if output.is_json() {
        output.data(&serde_json::json!({
            "undone": label,
            "state": session.scorer.state(),
        }));
    } else {
        output.success(&format!("Undid: {}", label));
    }
    Ok(())
}

pub fn abandon(output: &Output) -> Result<()> {
    let (_, session) = with_scorer(output, "abandon", |scorer| Ok(scorer.abandon()?))?;
    output.success(&outcome_line(session.scorer.rules(), session.scorer.state().outcome));
    Ok(())
}
