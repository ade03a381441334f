//! `ojp` CLI — dry-run calendar placements and shift plans from the command
//! line.
//!
//! ## Usage
//!
//! ```sh
//! # Would this drop fit? (schedule from file, verdict on stdout)
//! ojp check -s schedule.json --event 1 --room ZELENY --day 2024-06-03 --start 09:30
//!
//! # What would have to move to make room?
//! ojp plan -s schedule.json --event 1 --room ZELENY --day 2024-06-03 --start 09:30
//!
//! # Lane layout of one room-day column
//! ojp lanes -s schedule.json --room ZELENY --day 2024-06-03
//!
//! # Schedule from stdin, custom window and pairing tolerance
//! cat schedule.json | ojp check --event 1 --room ZELENY --day 2024-06-03 \
//!   --start 09:30 --open 08:00 --close 18:00 --tz Europe/Prague --tolerance 10
//! ```

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};

use ojp_engine::{
    assign_lanes, check_placement, plan_shift, DayWindow, DragRequest, EventId, PairingIndex,
    PairingRule, Placement, PlacementCheck, Room, ScheduleSnapshot,
};

#[derive(Parser)]
#[command(
    name = "ojp",
    version,
    about = "Operating-room calendar placement checks and shift planning"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ScheduleArgs {
    /// Schedule file, a JSON array of events (reads from stdin if omitted)
    #[arg(short, long)]
    schedule: Option<String>,

    /// Day window opening time (HH:MM)
    #[arg(long, default_value = "07:00")]
    open: String,

    /// Day window closing time (HH:MM)
    #[arg(long, default_value = "21:00")]
    close: String,

    /// IANA timezone the day window is anchored in
    #[arg(long, default_value = "UTC")]
    tz: String,

    /// Pairing adjacency tolerance in minutes
    #[arg(long, default_value_t = 5)]
    tolerance: i64,
}

#[derive(Args)]
struct TargetArgs {
    /// Identifier of the dragged event
    #[arg(long)]
    event: u64,

    /// Target room (ZELENY, MODRY, ZLUTY or CERVENY)
    #[arg(long)]
    room: String,

    /// Target calendar day (YYYY-MM-DD)
    #[arg(long)]
    day: String,

    /// Target wall-clock start time (HH:MM)
    #[arg(long)]
    start: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a proposed placement fits, collides, or leaves the window
    Check {
        #[command(flatten)]
        schedule: ScheduleArgs,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Compute the shift cascade that would resolve a colliding placement
    Plan {
        #[command(flatten)]
        schedule: ScheduleArgs,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Print the lane layout of one room-day column
    Lanes {
        #[command(flatten)]
        schedule: ScheduleArgs,
        /// Room to lay out (ZELENY, MODRY, ZLUTY or CERVENY)
        #[arg(long)]
        room: String,
        /// Calendar day to lay out (YYYY-MM-DD)
        #[arg(long)]
        day: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { schedule, target } => {
            let (snapshot, window, pairing) = load(&schedule)?;
            let request = build_request(&target)?;
            let placement = Placement::resolve(&snapshot, &pairing, &window, &request)
                .context("Failed to resolve the drag request")?;
            let verdict = check_placement(&snapshot, &window, &placement);
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }
        Commands::Plan { schedule, target } => {
            let (snapshot, window, pairing) = load(&schedule)?;
            let request = build_request(&target)?;
            let placement = Placement::resolve(&snapshot, &pairing, &window, &request)
                .context("Failed to resolve the drag request")?;
            // An out-of-bounds drop is fatal to the whole gesture; there is
            // no plan to compute around it.
            if let PlacementCheck::OutOfBounds { reason } =
                check_placement(&snapshot, &window, &placement)
            {
                anyhow::bail!("placement leaves the permitted calendar area ({})", reason);
            }
            // Infeasibility surfaces as a non-zero exit with the reason on
            // stderr; a feasible (possibly empty) plan prints on stdout.
            let plan = plan_shift(&snapshot, &pairing, &window, &placement)?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Commands::Lanes { schedule, room, day } => {
            let (snapshot, window, _) = load(&schedule)?;
            let room = parse_room(&room)?;
            let day = parse_day(&day)?;
            let bucket = snapshot.room_day(room, day, &window);
            let layout = assign_lanes(&bucket);
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
    }

    Ok(())
}

/// Read and parse the schedule, window, and pairing configuration.
fn load(args: &ScheduleArgs) -> Result<(ScheduleSnapshot, DayWindow, PairingIndex)> {
    let json = read_input(args.schedule.as_deref())?;
    let snapshot: ScheduleSnapshot =
        serde_json::from_str(&json).context("Failed to parse schedule JSON")?;

    let tz: Tz = args
        .tz
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid timezone: {}", args.tz))?;
    let window = DayWindow::new(parse_time(&args.open)?, parse_time(&args.close)?, tz);

    let rule = PairingRule::with_tolerance_minutes(args.tolerance);
    let pairing = PairingIndex::infer(snapshot.events(), &rule);

    Ok((snapshot, window, pairing))
}

fn build_request(args: &TargetArgs) -> Result<DragRequest> {
    Ok(DragRequest {
        event_id: EventId(args.event),
        room: parse_room(&args.room)?,
        day: parse_day(&args.day)?,
        start: parse_time(&args.start)?,
    })
}

fn parse_room(s: &str) -> Result<Room> {
    s.parse().map_err(|e: String| anyhow::anyhow!(e))
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    s.parse()
        .with_context(|| format!("Invalid date '{}' (expected YYYY-MM-DD)", s))
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .with_context(|| format!("Invalid time '{}' (expected HH:MM)", s))
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
