use std::path::PathBuf;

use cubeturn::{
    CubeEvent, CubeOrder, CubeSimulation, Face, Move, Slot, StickerColor, axis_for, normal_face,
};
use eyre::{Context, Result, bail};
use serde::Serialize;
use strum::IntoEnumIterator;
use web_time::Duration;

/// Headless driver for the cubeturn simulation
///
/// Runs the simulation on a fixed tick and prints the result as JSON.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file (YAML) overriding the defaults.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,
    /// Milliseconds per simulated frame.
    #[arg(long, global = true, default_value_t = 16)]
    pub tick_ms: u64,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Animate a sequence of quarter turns and print the final arrangement.
    Turn {
        /// Faces to turn, such as `right` or `top'` for the negative
        /// direction.
        #[arg(required = true)]
        moves: Vec<String>,
    },
    /// Animate a random shuffle and print the moves and final arrangement.
    Shuffle {
        /// Number of moves.
        #[arg(short, long, default_value_t = 20)]
        moves: usize,
        /// Seed for a reproducible shuffle.
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Print the layers that can be dragged from a picked sticker.
    Pick {
        /// Slot index from 0 to 26.
        #[arg(long)]
        slot: usize,
        /// Outward surface normal as `X,Y,Z`.
        #[arg(long, allow_hyphen_values = true)]
        normal: String,
    },
    /// Print every face and layer with its axis, color, and slots.
    Faces,
}

#[derive(Serialize, Debug)]
struct TurnReport {
    moves: Vec<Move>,
    ticks: usize,
    solved: bool,
    order: CubeOrder,
}

#[derive(Serialize, Debug)]
struct PickReport {
    slot: Slot,
    normal_face: Face,
    candidates: Vec<Face>,
}

#[derive(Serialize, Debug)]
struct FaceInfo {
    face: Face,
    outer: bool,
    axis: [f32; 3],
    color: Option<StickerColor>,
    slots: Vec<Slot>,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let prefs = crate::prefs::load(args.prefs.as_deref())?;
    let frame = Duration::from_millis(args.tick_ms.max(1));

    match args.subcommand {
        Subcommand::Turn { moves } => {
            let moves = moves
                .iter()
                .map(|token| parse_move(token))
                .collect::<Result<Vec<_>>>()?;
            let mut sim = CubeSimulation::new(prefs, vec![]);
            let mut ticks = 0;
            for &mv in &moves {
                sim.request_turn(mv.face, mv.positive);
                ticks += sim.run_until_idle(frame);
            }
            write_json_output(&report(sim, ticks))
        }

        Subcommand::Shuffle { moves, seed } => {
            let mut sim = match seed {
                Some(seed) => CubeSimulation::with_seed(prefs, vec![], seed),
                None => CubeSimulation::new(prefs, vec![]),
            };
            sim.request_shuffle(moves);
            let ticks = sim.run_until_idle(frame);
            write_json_output(&report(sim, ticks))
        }

        Subcommand::Pick { slot, normal } => {
            let slot = Slot::new(slot)?;
            let normal = parse_vector(&normal)?;
            let sim = CubeSimulation::new(prefs, vec![]);
            write_json_output(&PickReport {
                slot,
                normal_face: normal_face(normal.into())?,
                candidates: sim.report_pick(slot, normal.into())?.to_vec(),
            })
        }

        Subcommand::Faces => {
            let faces: Vec<FaceInfo> = Face::iter()
                .map(|face| FaceInfo {
                    face,
                    outer: face.is_outer(),
                    axis: axis_for(face, true).into(),
                    color: face.color(),
                    slots: face.slots().to_vec(),
                })
                .collect();
            write_json_output(&faces)
        }
    }
}

fn report(mut sim: CubeSimulation<Vec<CubeEvent>>, ticks: usize) -> TurnReport {
    let moves = sim
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            CubeEvent::TurnFinished(mv) => Some(mv),
            _ => None,
        })
        .collect();
    let order = sim.state().order().clone();
    TurnReport {
        moves,
        ticks,
        solved: order.is_solved(),
        order,
    }
}

/// Parses a move token: a face name, optionally followed by `'` for the
/// negative direction.
fn parse_move(token: &str) -> Result<Move> {
    let (name, positive) = match token.strip_suffix('\'') {
        Some(name) => (name, false),
        None => (token, true),
    };
    let face = Face::from_name(name)
        .wrap_err_with(|| format!("bad move {token:?}"))?;
    Ok(Move::new(face, positive))
}

fn parse_vector(s: &str) -> Result<[f32; 3]> {
    let components = s
        .split(',')
        .map(|c| c.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .wrap_err_with(|| format!("bad vector {s:?}"))?;
    match components[..] {
        [x, y, z] => Ok([x, y, z]),
        _ => bail!("expected 3 components in {s:?}"),
    }
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
