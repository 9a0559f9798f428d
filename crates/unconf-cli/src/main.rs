//! `unconf` CLI — query the scheduling engine over a JSON snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Free start times at a venue (snapshot from file)
//! unconf slots -s snapshot.json --day sat --venue hall
//!
//! # Same, piping the snapshot through stdin, as JSON
//! cat snapshot.json | unconf --json slots --day sat --venue hall
//!
//! # Who among the proposed hosts would be double-booked
//! unconf clashes -s snapshot.json --day sat --start 09:30 --duration 60 --host alice
//!
//! # Which phase an event is in
//! unconf phase -s snapshot.json --event fest --now 2026-05-02T12:00:00Z
//!
//! # Next proposal for quick voting
//! unconf next-vote -s snapshot.json --guest bob
//!
//! # Validate a form draft before committing it
//! unconf check -s snapshot.json --draft draft.json
//! ```

mod config;
mod logging;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{Duration, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use unconf_engine::availability::duration_options;
use unconf_engine::clock::{format_hhmm, local_time_on, parse_instant, parse_timezone};
use unconf_engine::model::{DayId, EventId, GuestId, Session, SessionId, VenueId};
use unconf_engine::{
    compute_available_start_times, compute_clashes, current_phase, next_proposal_to_vote,
    prepare_session, HostCommitments, SessionDraft, Snapshot,
};

#[derive(Parser)]
#[command(name = "unconf", version, about = "Unconference scheduling engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to <config dir>/unconf/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Display timezone override (IANA name, e.g. "Europe/Berlin")
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List candidate start times for a day (and venue)
    Slots {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        snapshot: Option<String>,
        #[arg(long)]
        day: String,
        #[arg(long)]
        venue: Option<String>,
        /// Session being edited, excluded from occupancy
        #[arg(long)]
        session: Option<String>,
    },
    /// Report clashes for the hosts of a proposed session
    Clashes {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        snapshot: Option<String>,
        #[arg(long)]
        day: String,
        /// Start time, HH:mm in the display timezone
        #[arg(long)]
        start: String,
        /// Duration in minutes
        #[arg(long)]
        duration: i64,
        /// Proposed host (repeatable)
        #[arg(long = "host", required = true)]
        hosts: Vec<String>,
        /// Session being edited
        #[arg(long)]
        session: Option<String>,
    },
    /// Show the current phase of an event
    Phase {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        snapshot: Option<String>,
        #[arg(long)]
        event: String,
        /// Instant to evaluate (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<String>,
    },
    /// Show the proposal a guest should vote on next
    NextVote {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        snapshot: Option<String>,
        #[arg(long)]
        guest: String,
    },
    /// Validate a session draft against the snapshot
    Check {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        snapshot: Option<String>,
        /// Draft JSON file
        #[arg(long)]
        draft: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let file_config = config::load_config(cli.config.as_deref())?;
    let tz_name = cli
        .timezone
        .clone()
        .unwrap_or(file_config.engine.display_timezone);
    let tz = parse_timezone(&tz_name)?;
    debug!(timezone = %tz, "resolved display timezone");

    match cli.command {
        Commands::Slots {
            snapshot,
            day,
            venue,
            session,
        } => {
            let snap = load_snapshot(snapshot.as_deref())?;
            let day = snap.day(&DayId::new(day))?;
            let venue = venue.map(|id| snap.venue(&VenueId::new(id))).transpose()?;
            let current = current_session(&snap, session)?;

            let slots = compute_available_start_times(day, &snap.sessions, &current, venue, tz);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                for slot in &slots {
                    if slot.available {
                        let longest = duration_options(slot.max_duration_minutes)
                            .last()
                            .copied()
                            .unwrap_or(slot.max_duration_minutes);
                        println!(
                            "{}  available    up to {} min",
                            slot.label, longest
                        );
                    } else {
                        println!("{}  unavailable", slot.label);
                    }
                }
            }
        }
        Commands::Clashes {
            snapshot,
            day,
            start,
            duration,
            hosts,
            session,
        } => {
            let snap = load_snapshot(snapshot.as_deref())?;
            let day = snap.day(&DayId::new(day))?;
            let start_at = local_time_on(day.start, &start, tz)
                .ok_or_else(|| anyhow!("Invalid start time '{}', expected HH:mm", start))?;
            let hosts: Vec<GuestId> = hosts.into_iter().map(GuestId::new).collect();

            let mut candidate = current_session(&snap, session)?;
            candidate.start = Some(start_at);
            candidate.end = Some(start_at + Duration::minutes(duration));
            candidate.hosts = hosts.clone();

            let commitments = snap.host_commitments(&hosts)?;
            let clashes = compute_clashes(&candidate, &commitments);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&clashes)?);
            } else if clashes.is_empty() {
                println!("No clashes");
            } else {
                for clash in &clashes {
                    println!("{}", clash.describe(tz));
                }
            }
        }
        Commands::Phase {
            snapshot,
            event,
            now,
        } => {
            let snap = load_snapshot(snapshot.as_deref())?;
            let event = snap.event(&EventId::new(event))?;
            let now = match now {
                Some(raw) => parse_instant(&raw, tz)?,
                None => Utc::now(),
            };

            let phase = current_phase(event, now);

            if cli.json {
                println!("{}", serde_json::json!({ "event": event.id, "phase": phase }));
            } else {
                println!("{}", phase);
            }
        }
        Commands::NextVote { snapshot, guest } => {
            let snap = load_snapshot(snapshot.as_deref())?;
            let guest = GuestId::new(guest);
            let next = next_proposal_to_vote(&snap.proposals, &snap.votes, &guest);

            match (next, cli.json) {
                (Some(proposal), true) => println!("{}", serde_json::to_string_pretty(proposal)?),
                (Some(proposal), false) => println!("{}  {}", proposal.id, proposal.title),
                (None, true) => println!("null"),
                (None, false) => println!("Nothing left to vote on"),
            }
        }
        Commands::Check { snapshot, draft } => {
            let snap = load_snapshot(snapshot.as_deref())?;
            let raw = std::fs::read_to_string(&draft)
                .with_context(|| format!("Failed to read draft: {}", draft))?;
            let draft: SessionDraft =
                serde_json::from_str(&raw).context("Failed to parse draft JSON")?;

            let session = check_draft(&snap, &draft, tz)?;

            let commitments = known_host_commitments(&snap, &session.hosts);
            for clash in compute_clashes(&session, &commitments) {
                warn!(host = %clash.host, "host clash");
                eprintln!("warning: {}", clash.describe(tz));
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&session)?);
            } else {
                let (start, end) = session
                    .interval()
                    .context("Validated session has no interval")?;
                println!(
                    "OK: {} from {} to {}",
                    session.title,
                    format_hhmm(start, tz),
                    format_hhmm(end, tz)
                );
            }
        }
    }

    Ok(())
}

fn check_draft(snap: &Snapshot, draft: &SessionDraft, tz: Tz) -> Result<Session> {
    let day = snap.day(&draft.day)?;
    let venue = draft.venue.as_ref().map(|id| snap.venue(id)).transpose()?;
    let existing = match &draft.id {
        Some(id) => Some(snap.session(id)?),
        None => None,
    };
    prepare_session(draft, day, venue, &snap.sessions, existing, tz)
        .map_err(|e| anyhow!(e).context("Draft rejected"))
}

/// Commitments of the hosts the snapshot knows about. Clashes are advisory,
/// so an unknown host is logged and left out.
fn known_host_commitments(snap: &Snapshot, hosts: &[GuestId]) -> Vec<HostCommitments> {
    hosts
        .iter()
        .filter_map(|id| match snap.guest(id) {
            Ok(guest) => Some(HostCommitments::resolve(guest, &snap.sessions, &snap.rsvps)),
            Err(err) => {
                warn!(host = %id, "{}, skipping clash check", err);
                None
            }
        })
        .collect()
}

/// The session being edited, or the empty sentinel when creating.
fn current_session(snap: &Snapshot, id: Option<String>) -> Result<Session> {
    match id {
        Some(id) => Ok(snap.session(&SessionId::new(id))?.clone()),
        None => Ok(Session::empty()),
    }
}

fn load_snapshot(path: Option<&str>) -> Result<Snapshot> {
    let raw = read_input(path)?;
    Snapshot::from_json(&raw).context("Failed to parse snapshot JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
