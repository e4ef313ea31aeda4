//! Main CLI application structure

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{revise, scoring, views, wicket};
use crate::domain::{MatchRules, Position, TeamConfig, TeamSide};
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "crease")]
#[command(author, version, about = "Ball-by-ball scoring for limited-overs cricket")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Match setup flags for `crease init`
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to set the match up in (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Overs per innings
    #[arg(long)]
    pub overs: Option<u32>,

    #[arg(long, default_value = "Team A")]
    pub team_a: String,

    #[arg(long, default_value = "Team B")]
    pub team_b: String,

    /// Squad size of team A
    #[arg(long, default_value = "11")]
    pub players_a: u32,

    /// Squad size of team B
    #[arg(long, default_value = "11")]
    pub players_b: u32,

    /// Side batting first (a or b)
    #[arg(long, default_value = "a")]
    pub bats_first: TeamSide,

    /// The last batsman may bat on alone
    #[arg(long)]
    pub last_man_stands: bool,

    /// Maximum overs per bowler
    #[arg(long)]
    pub bowler_cap: Option<u32>,

    #[arg(long)]
    pub no_wides: bool,

    #[arg(long)]
    pub no_no_balls: bool,

    #[arg(long)]
    pub no_byes: bool,

    /// Penalty runs for a wide
    #[arg(long, default_value = "1")]
    pub wide_runs: u32,

    /// Penalty runs for a no-ball
    #[arg(long, default_value = "1")]
    pub no_ball_runs: u32,

    /// Do not award a free hit after a no-ball
    #[arg(long)]
    pub no_free_hit: bool,
}

impl InitArgs {
    fn rules(&self, default_overs: Option<u32>) -> MatchRules {
        MatchRules {
            overs: self.overs.or(default_overs).unwrap_or(20),
            team_a: TeamConfig::new(self.team_a.trim(), self.players_a),
            team_b: TeamConfig::new(self.team_b.trim(), self.players_b),
            batting_first: self.bats_first,
            last_man_stands: self.last_man_stands,
            bowler_over_cap: self.bowler_cap,
            wides: !self.no_wides,
            wide_runs: self.wide_runs,
            no_balls: !self.no_no_balls,
            no_ball_runs: self.no_ball_runs,
            byes: !self.no_byes,
            free_hit: !self.no_free_hit,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up a new match
    Init(InitArgs),

    /// Open the next innings
    Start {
        striker: String,
        non_striker: String,
        bowler: String,
    },

    /// Runs off the bat (0 for a dot ball)
    Run {
        runs: u32,
    },

    /// A wide
    Wide,

    /// A no-ball
    NoBall,

    /// Byes
    Bye {
        runs: u32,
    },

    /// Record a wicket, one step at a time
    #[command(subcommand)]
    Wicket(wicket::WicketCommands),

    /// Send in the next batsman after a wicket
    Batsman {
        name: String,
    },

    /// Name the bowler for the next over
    Bowler {
        name: String,
    },

    /// Retire the batsman at a position; NEW_NAME comes in
    Retire {
        /// striker or non-striker
        position: Position,
        new_name: String,
    },

    /// Bring a retired batsman back in
    Return {
        name: String,
        /// striker or non-striker
        position: Position,
    },

    /// Remove the current bowler from the attack for the innings
    DismissBowler {
        /// Bowler who finishes the over
        replacement: String,
    },

    /// Rename a batsman (p-...) or bowler (w-...)
    Rename {
        id: String,
        name: String,
    },

    /// Revise match rules mid-match
    #[command(subcommand)]
    Revise(revise::ReviseCommands),

    /// Revert the last scoring event
    Undo,

    /// End the match with no result
    Abandon,

    /// Show the live match state
    Status,

    /// Show the scorecard of an innings
    Scorecard {
        /// Innings number (defaults to the current or last innings)
        #[arg(long)]
        innings: Option<u8>,
    },

    /// Show the over-by-over ball history
    History {
        /// Innings number (defaults to the current or last innings)
        #[arg(long)]
        innings: Option<u8>,
    },

    /// Show the partnership ledger
    Partnerships,
}

/// Installs the stderr log subscriber
///
/// `CREASE_LOG` takes precedence; otherwise warnings only, or debug with
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "crease=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CREASE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let global = Config::load_global()?;
    let format = cli.format.unwrap_or_else(|| global.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("crease starting");

    match cli.command {
        Commands::Init(args) => {
            output.verbose_ctx("init", &format!("Setting up match at: {}", args.path));
            let project = Project::init(&args.path, args.rules(global.default_overs))?;
            let rules = &project.config().project.rules;
            if output.is_json() {
                output.data(&serde_json::json!({
                    "root": project.root().display().to_string(),
                    "rules": rules,
                }));
            } else {
                output.success(&format!(
                    "New match at {}: {} v {}, {} overs",
                    project.root().display(),
                    rules.team_a.name,
                    rules.team_b.name,
                    rules.overs
                ));
            }
        }

        Commands::Start { striker, non_striker, bowler } => {
            scoring::start(&output, &striker, &non_striker, &bowler)?
        }
        Commands::Run { runs } => scoring::run(&output, runs)?,
        Commands::Wide => scoring::wide(&output)?,
        Commands::NoBall => scoring::no_ball(&output)?,
        Commands::Bye { runs } => scoring::bye(&output, runs)?,

        Commands::Wicket(cmd) => wicket::run(cmd, &output)?,

        Commands::Batsman { name } => scoring::batsman(&output, &name)?,
        Commands::Bowler { name } => scoring::bowler(&output, &name)?,
        Commands::Retire { position, new_name } => scoring::retire(&output, position, &new_name)?,
        Commands::Return { name, position } => scoring::return_batsman(&output, &name, position)?,
        Commands::DismissBowler { replacement } => scoring::dismiss_bowler(&output, &replacement)?,
        Commands::Rename { id, name } => scoring::rename(&output, &id, &name)?,

        Commands::Revise(cmd) => revise::run(cmd, &output)?,

        Commands::Undo => scoring::undo(&output)?,
        Commands::Abandon => scoring::abandon(&output)?,

        Commands::Status => views::status(&output)?,
        Commands::Scorecard { innings } => views::scorecard(&output, innings)?,
        Commands::History { innings } => views::history(&output, innings)?,
        Commands::Partnerships => views::partnerships(&output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
