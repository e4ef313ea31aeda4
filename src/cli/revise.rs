//! Mid-match rule revisions

use anyhow::{bail, Result};
use clap::Subcommand;

use super::output::Output;
use super::scoring::with_scorer;
use super::views::outcome_line;
use crate::domain::TeamSide;

#[derive(Subcommand)]
pub enum ReviseCommands {
    /// Change the overs per innings
    Overs {
        overs: u32,
    },

    /// Change a side's squad size
    Squad {
        /// a or b
        side: TeamSide,
        players: u32,
    },

    /// Change the per-bowler over cap ("none" removes it)
    BowlerCap {
        cap: String,
    },
}

fn parse_cap(cap: &str) -> Result<Option<u32>> {
    match cap.trim().to_ascii_lowercase().as_str() {
        "none" | "off" => Ok(None),
        other => match other.parse() {
            Ok(n) => Ok(Some(n)),
            Err(_) => bail!("Invalid bowler cap: {} (expected a number or 'none')", cap),
        },
    }
}

pub fn run(cmd: ReviseCommands, output: &Output) -> Result<()> {
    let ((), session) = match cmd {
        ReviseCommands::Overs { overs } => {
            with_scorer(output, "revise", |scorer| Ok(scorer.revise_overs(overs)?))?
        }
        ReviseCommands::Squad { side, players } => {
            with_scorer(output, "revise", |scorer| Ok(scorer.revise_squad(side, players)?))?
        }
        ReviseCommands::BowlerCap { cap } => {
            let cap = parse_cap(&cap)?;
            with_scorer(output, "revise", |scorer| Ok(scorer.revise_bowler_cap(cap)?))?
        }
    };

    let scorer = &session.scorer;
    if output.is_json() {
        output.data(&serde_json::json!({
            "rules": scorer.rules(),
            "state": scorer.state(),
        }));
        return Ok(());
    }

    let rules = scorer.rules();
    let cap = rules
        .bowler_over_cap
        .map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string());
    output.success(&format!(
        "Rules: {} overs, {} {} players, {} {} players, bowler cap {}",
        rules.overs, rules.team_a.name, rules.team_a.players, rules.team_b.name, rules.team_b.players, cap
    ));
    let state = scorer.state();
    if !state.innings_active {
        if state.outcome.is_final() {
            println!("{}", outcome_line(rules, state.outcome));
        } else if let Some(target) = state.target {
            println!("Innings over. Target: {}", target);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bowler_cap() {
        assert_eq!(parse_cap("4").unwrap(), Some(4));
        assert_eq!(parse_cap("None").unwrap(), None);
        assert!(parse_cap("lots").is_err());
    }
}
