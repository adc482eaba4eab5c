use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "timeplan", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the step spans of a plan.
    Steps(StepsArgs),
    /// Move a playback cursor through a plan and print every state.
    Walk(WalkArgs),
}

#[derive(Parser, Debug)]
struct StepsArgs {
    /// Input plan document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Print at most this many steps.
    #[arg(long)]
    count: Option<usize>,
}

#[derive(Parser, Debug)]
struct WalkArgs {
    /// Input plan document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of moves to make.
    #[arg(long)]
    moves: usize,

    /// Step against the direction of travel instead of with it.
    #[arg(long)]
    backward: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Steps(args) => cmd_steps(args),
        Command::Walk(args) => cmd_walk(args),
    }
}

fn read_plan_json(path: &Path) -> anyhow::Result<timeplan::PlanDocument> {
    let f = File::open(path).with_context(|| format!("open plan '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc: timeplan::PlanDocument =
        serde_json::from_reader(r).with_context(|| "parse plan JSON")?;
    Ok(doc)
}

fn cmd_steps(args: StepsArgs) -> anyhow::Result<()> {
    let doc = read_plan_json(&args.in_path)?;
    let plan = doc.plan.build()?;

    let sequence = plan.discrete().sequence();
    let count = args.count.unwrap_or(sequence.len());
    for (idx, span) in sequence.iter().take(count).enumerate() {
        println!("{idx}\t{span}");
    }
    eprintln!(
        "{} steps, end behavior {:?}, advance {}, limit {}",
        sequence.len(),
        plan.end_behavior(),
        plan.get_advance_duration(),
        plan.get_limit_window()
    );
    Ok(())
}

fn cmd_walk(args: WalkArgs) -> anyhow::Result<()> {
    let doc = read_plan_json(&args.in_path)?;
    let plan = doc.plan.build()?;
    let mut playback = timeplan::Playback::new(plan, doc.playback)?;

    print_state(&playback)?;
    for _ in 0..args.moves {
        let moved = if args.backward {
            playback.step_backward()?
        } else {
            playback.step_forward()?
        };
        if !moved {
            eprintln!("playback finished");
            break;
        }
        print_state(&playback)?;
    }
    Ok(())
}

fn print_state(playback: &timeplan::Playback) -> anyhow::Result<()> {
    let (Some(state), Some(span)) = (playback.state(), playback.time_span()?) else {
        eprintln!("plan has no steps");
        return Ok(());
    };
    println!("{}\t{:?}\t{span}", state.step_number(), state.direction());
    Ok(())
}
