use std::{fs::File, io::Write, path::PathBuf};

use pose::{BodyAngles, Joint, JointPosition, PoseObservation};
use reps::{ExercisePattern, RepDetector, Session, TOLERANCE_DEGREES};

#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
struct KeypointCsv {
    timestamp_ms: u64,
    joint: Joint,
    x: f64,
    y: f64,
    confidence: f64,
}

#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Repetition {
    count: u32,
    timestamp_ms: u64,
    left_arm: f64,
    right_arm: f64,
    left_leg: f64,
    right_leg: f64,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StockPattern {
    Squat,
    PushUp,
}

impl From<StockPattern> for ExercisePattern {
    fn from(value: StockPattern) -> Self {
        match value {
            StockPattern::Squat => ExercisePattern::squat(),
            StockPattern::PushUp => ExercisePattern::push_up(),
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Input csv pose log location
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("input.csv"), required = false)]
    pub input: PathBuf,
    /// Output csv file. _Note_: will truncate old file if exists
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("output.csv"), required = false)]
    pub output: PathBuf,
    /// Stock pattern to count with
    #[arg(short, long, value_enum, default_value_t = StockPattern::Squat, required = false)]
    pub exercise: StockPattern,
    /// Matching tolerance in degrees
    #[arg(short, long, default_value_t = TOLERANCE_DEGREES, required = false)]
    pub tolerance: f64,
    /// Don't save changes
    #[arg(short, long, default_value_t = false, required = false)]
    pub dry: bool,
    /// Print every detected repetition to stdout
    #[arg(short, long, default_value_t = false, required = false)]
    pub print: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Args {
        input,
        output,
        exercise,
        tolerance,
        dry,
        print,
    } = <Args as clap::Parser>::parse();

    let mut rdr = csv::Reader::from_reader(
        File::open(input).map_err(|e| format!("Failed to read input file. Reason: {e}"))?,
    );

    let mut wrt = csv::Writer::from_path(&output);

    let rows = rdr
        .deserialize::<KeypointCsv>()
        .filter_map(|this| this.ok())
        .collect::<Vec<_>>();

    println!("Total: {} keypoints", rows.len());

    // rows sharing a timestamp belong to one frame
    let mut frames = Vec::<(u64, PoseObservation)>::new();
    for KeypointCsv {
        timestamp_ms,
        joint,
        x,
        y,
        confidence,
    } in rows
    {
        match frames.last_mut() {
            Some((timestamp, observation)) if *timestamp == timestamp_ms => {
                observation.insert(joint, JointPosition::new(x, y, confidence));
            }
            _ => {
                let mut observation = PoseObservation::new();
                observation.insert(joint, JointPosition::new(x, y, confidence));
                frames.push((timestamp_ms, observation));
            }
        }
    }

    println!("Total: {} frames", frames.len());

    let mut io = match print {
        true => {
            let io = std::io::stdout();

            let mut io = io.lock();

            io.write_all("count,timestamp_ms\n".as_bytes())?;

            Some(io)
        }
        false => None,
    };

    let mut session = Session::with_detector(RepDetector::with_tolerance(
        exercise.into(),
        tolerance,
    ));

    for (timestamp_ms, observation) in frames {
        let Some(angles) = BodyAngles::from_observation(&observation) else {
            continue;
        };

        if !session.observe_angles(&angles) {
            continue;
        }

        let count = session.count();

        if let Some(io) = &mut io {
            io.write_fmt(format_args!("{count},{timestamp_ms}\n"))?;
        }

        if dry {
            continue;
        }

        if let Ok(wrt) = &mut wrt {
            wrt.serialize(Repetition {
                count,
                timestamp_ms,
                left_arm: angles.left_arm,
                right_arm: angles.right_arm,
                left_leg: angles.left_leg,
                right_leg: angles.right_leg,
            })?;
        }
    }

    println!("Counted: {} repetitions", session.count());

    if !dry {
        println!("Saving to {}", output.to_string_lossy());
        wrt?.flush()?;
    }

    println!("Done!");

    Ok(())
}
