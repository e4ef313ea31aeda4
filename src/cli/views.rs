//! Read-only views (status, scorecard, history, partnerships)

use anyhow::{bail, Result};

use super::output::Output;
use crate::domain::{
    Batsman, InningsSummary, MatchRules, Outcome, Overs, Partnership, PartnershipEnd, Scorer,
};
use crate::storage::Project;

/// One-line description of where the match stands
pub fn outcome_line(rules: &MatchRules, outcome: Outcome) -> String {
    match outcome {
        Outcome::InProgress => "In progress".to_string(),
        Outcome::InningsBreak => "Innings break".to_string(),
        Outcome::Tie => "Match tied".to_string(),
        Outcome::NoResult => "No result".to_string(),
        Outcome::Team1Win | Outcome::Team2Win => match outcome.winner() {
            Some(side) => format!("{} won", rules.team(side).name),
            None => "Match over".to_string(),
        },
    }
}

fn load() -> Result<Scorer> {
    Ok(Project::open_current()?.load()?.scorer)
}

/// Summary for `--innings N`, or the innings on the field, or the last one
fn pick_summary(scorer: &Scorer, innings: Option<u8>) -> Result<InningsSummary> {
    let state = scorer.state();
    let summary = match innings {
        Some(n) => scorer.summary(n),
        None if state.innings_active => scorer.summary(state.innings),
        None => scorer.archived().last().cloned(),
    };
    match (summary, innings) {
        (Some(summary), _) => Ok(summary),
        (None, Some(n)) => bail!("Innings {} has not been played", n),
        (None, None) => bail!("No innings has started yet. Run 'crease start' first."),
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn batsman_line(batsman: &Batsman, on_strike: bool) -> String {
    format!(
        "{} {:<20} {:>3} ({})",
        if on_strike { "*" } else { " " },
        batsman.name,
        batsman.runs,
        batsman.balls
    )
}

/// Show the live match state
pub fn status(output: &Output) -> Result<()> {
    let scorer = load()?;
    let state = scorer.state();
    let rules = scorer.rules();
    let roster = scorer.roster();
    let balls_left = rules.ball_limit().saturating_sub(state.legal_balls());

    if output.is_json() {
        output.data(&serde_json::json!({
            "state": state,
            "overs": state.overs().to_string(),
            "run_rate": state.run_rate(),
            "runs_required": state.runs_required(),
            "balls_remaining": balls_left,
            "striker": roster.striker(),
            "non_striker": roster.non_striker(),
            "bowler": roster.current_bowler(),
            "partnership": scorer.partnerships().current(),
            "awaiting_batsman": scorer.awaiting_batsman(),
            "awaiting_bowler": scorer.awaiting_bowler(),
            "wicket_entry": scorer.wicket_flow().step(),
            "can_undo": scorer.undo_stack().can_undo(),
        }));
        return Ok(());
    }

    if !state.innings_active {
        println!("{}", outcome_line(rules, state.outcome));
        for summary in scorer.archived() {
            println!("  {}", summary.score_line());
        }
        if state.outcome == Outcome::InningsBreak {
            if let Some(target) = state.target {
                println!("Target: {}", target);
            }
        } else if scorer.archived().is_empty() && !state.outcome.is_final() {
            println!(
                "{} v {}, {} overs. Start with: crease start STRIKER NON_STRIKER BOWLER",
                rules.team_a.name, rules.team_b.name, rules.overs
            );
        }
        return Ok(());
    }

    let summary = scorer.book().live_summary();
    println!("{}  RR {:.2}", summary.score_line(), state.run_rate());
    if let (Some(target), Some(required)) = (state.target, state.runs_required()) {
        println!("Target {}: need {} from {} balls", target, required, balls_left);
    }

    if let Some(striker) = roster.striker() {
        println!("{}", batsman_line(striker, true));
    }
    if let Some(non_striker) = roster.non_striker() {
        println!("{}", batsman_line(non_striker, false));
    }
    if let Some(bowler) = roster.current_bowler() {
        println!(
            "Bowling: {} {}-{}-{}",
            bowler.name,
            bowler.figures(),
            bowler.runs,
            bowler.wickets
        );
    }
    if let Some(p) = scorer.partnerships().current() {
        println!("Partnership: {} ({})", p.runs, p.balls);
    }

    if state.is_free_hit {
        println!("Free hit next ball");
    }
    if let Some(position) = scorer.awaiting_batsman() {
        println!("Waiting for a new batsman at {}", position);
    }
    if scorer.awaiting_bowler() {
        println!("Waiting for the next bowler");
    }
    if !scorer.wicket_flow().is_idle() {
        println!("Wicket entry open: {}", scorer.wicket_flow().step().label());
    }
    Ok(())
}

/// Show the scorecard of an innings
pub fn scorecard(output: &Output, innings: Option<u8>) -> Result<()> {
    let scorer = load()?;
    let summary = pick_summary(&scorer, innings)?;

    if output.is_json() {
        output.data(&summary);
        return Ok(());
    }

    println!("Innings {}: {}", summary.innings, summary.score_line());
    println!();
    println!("{:<20} {:<28} {:>4} {:>4} {:>3} {:>3} {:>7}", "BATTER", "", "R", "B", "4s", "6s", "SR");
    println!("{}", "-".repeat(75));
    for row in &summary.batting {
        println!(
            "{:<20} {:<28} {:>4} {:>4} {:>3} {:>3} {:>7.2}",
            row.name, row.dismissal, row.runs, row.balls, row.fours, row.sixes, row.strike_rate
        );
    }
    let extras = summary.extras;
    println!(
        "Extras: {} (w {}, nb {}, b {})",
        extras.total(),
        extras.wides,
        extras.no_balls,
        extras.byes
    );
    println!("Total: {}/{} ({} ov, RR {:.2})", summary.score, summary.wickets, summary.overs, summary.run_rate());
    println!();
    println!("{:<20} {:>5} {:>4} {:>3} {:>6} {:>3} {:>3}", "BOWLER", "O", "R", "W", "ECON", "WD", "NB");
    println!("{}", "-".repeat(50));
    for row in &summary.bowling {
        println!(
            "{:<20} {:>5} {:>4} {:>3} {:>6.2} {:>3} {:>3}",
            row.name,
            row.overs.to_string(),
            row.runs,
            row.wickets,
            row.economy,
            row.wides,
            row.no_balls
        );
    }
    Ok(())
}

/// Show the over-by-over ball history
pub fn history(output: &Output, innings: Option<u8>) -> Result<()> {
    let scorer = load()?;
    let summary = pick_summary(&scorer, innings)?;

    if output.is_json() {
        let overs: Vec<_> = summary
            .history
            .overs()
            .iter()
            .map(|line| {
                serde_json::json!({
                    "over": line.over + 1,
                    "runs": line.runs(),
                    "balls": line.balls,
                })
            })
            .collect();
        output.data(&serde_json::json!({
            "innings": summary.innings,
            "overs": overs,
        }));
        return Ok(());
    }

    if summary.history.is_empty() {
        println!("No balls bowled yet");
        return Ok(());
    }
    println!("Innings {}: {}", summary.innings, summary.score_line());
    for line in summary.history.overs() {
        let balls: Vec<String> = line.balls.iter().map(|b| b.notation()).collect();
        println!("Over {:>2}: {:<30} {:>3} runs", line.over + 1, balls.join(" "), line.runs());
    }
    Ok(())
}

/// Show the partnership ledger of the current or last innings
pub fn partnerships(output: &Output) -> Result<()> {
    let scorer = load()?;
    let summary = pick_summary(&scorer, None)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "innings": summary.innings,
            "partnerships": summary.partnerships,
            "unbroken": summary.unbroken,
            "best": summary.best_partnership(),
        }));
        return Ok(());
    }

    let name = |id: &crate::domain::PlayerId| {
        summary
            .batting
            .iter()
            .find(|row| &row.id == id)
            .map(|row| row.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    if summary.partnerships.is_empty() && summary.unbroken.is_none() {
        println!("No partnerships yet");
        return Ok(());
    }

    let pair = |p: &Partnership| {
        let second = p
            .batsman2
            .as_ref()
            .map(|id| format!(", {} {}", name(id), p.batsman2_runs))
            .unwrap_or_default();
        format!("{} {}{}", name(&p.batsman1), p.batsman1_runs, second)
    };

    println!("{:<10} {:>5} {:>5}  BATSMEN", "WICKET", "RUNS", "BALLS");
    println!("{}", "-".repeat(60));
    for record in &summary.partnerships {
        let p = &record.partnership;
        let label = match record.ended_by {
            PartnershipEnd::Wicket => format!("{} wkt", ordinal(record.wicket)),
            PartnershipEnd::Retirement => "retired".to_string(),
        };
        println!(
            "{:<10} {:>5} {:>5}  {}  (at {})",
            label,
            p.runs,
            Overs::from_balls(p.balls).to_string(),
            pair(p),
            record.score_at_break
        );
    }
    if let Some(p) = &summary.unbroken {
        println!(
            "{:<10} {:>5} {:>5}  {}",
            "unbroken",
            p.runs,
            Overs::from_balls(p.balls).to_string(),
            pair(p)
        );
    }
    if let Some(best) = summary.best_partnership() {
        println!();
        println!("Best: {} ({} balls) {}", best.runs, best.balls, pair(best));
    }
    Ok(())
}
