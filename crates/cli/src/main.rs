use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};

use parking_monitor_core::occupancy::domain::occupancy_classifier::OccupancyClassifier;
use parking_monitor_core::occupancy::infrastructure::raster_annotator::RasterAnnotator;
use parking_monitor_core::pipeline::looping_frame_source::LoopingFrameSource;
use parking_monitor_core::pipeline::monitor_parking_use_case::MonitorParkingUseCase;
use parking_monitor_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use parking_monitor_core::positions::domain::position::Position;
use parking_monitor_core::positions::domain::position_store::PositionStore;
use parking_monitor_core::positions::infrastructure::binary_position_store::BinaryPositionStore;
use parking_monitor_core::preprocessing::domain::threshold_params::ThresholdParams;
use parking_monitor_core::preprocessing::infrastructure::cpu_preprocessor::CpuPreprocessor;
use parking_monitor_core::shared::constants::{
    DEFAULT_BLOCK_SIZE, DEFAULT_BLUR_SIZE, DEFAULT_CONSTANT, DEFAULT_POSITION_CANDIDATES,
};
use parking_monitor_core::video::domain::image_writer::ImageWriter;
use parking_monitor_core::video::infrastructure::image_file_writer::ImageFileWriter;
use parking_monitor_core::video::infrastructure::reader_factory::create_reader;

/// Parking space occupancy detection from a fixed overhead camera.
#[derive(Parser)]
#[command(name = "parking-monitor", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify every parking space in a video or still image.
    Detect(DetectArgs),

    /// Inspect or edit a position file.
    Positions {
        #[command(subcommand)]
        action: PositionsAction,
    },
}

#[derive(Args)]
struct DetectArgs {
    /// Input video or image file.
    input: PathBuf,

    /// Position file; repeat to give fallbacks (first non-empty wins).
    #[arg(long = "positions", value_name = "FILE")]
    positions: Vec<PathBuf>,

    /// Adaptive threshold neighborhood size (odd, >= 3).
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u32,

    /// Offset subtracted from the local mean.
    #[arg(long, default_value_t = DEFAULT_CONSTANT as i32, allow_negative_numbers = true)]
    constant: i32,

    /// Median blur kernel size (odd, >= 3).
    #[arg(long, default_value_t = DEFAULT_BLUR_SIZE)]
    blur: u32,

    /// Frames to process; defaults to one pass, loops if larger.
    #[arg(long)]
    frames: Option<usize>,

    /// Write the last annotated frame to this PNG.
    #[arg(long, value_name = "PNG")]
    snapshot: Option<PathBuf>,
}

#[derive(Subcommand)]
enum PositionsAction {
    /// List stored positions.
    Show { file: PathBuf },

    /// Append a space with the given top-left corner.
    Add {
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },

    /// Delete the space at INDEX (as listed by `show`).
    Remove { file: PathBuf, index: usize },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Detect(args) => {
            let params = validate(&args)?;
            run_detect(&args, &params)
        }
        Command::Positions { action } => run_positions(action, &BinaryPositionStore::new()),
    }
}

fn run_detect(args: &DetectArgs, params: &ThresholdParams) -> Result<(), Box<dyn std::error::Error>> {
    let store = BinaryPositionStore::new();
    let candidates = position_candidates(&args.positions);
    let loaded = store.load_first_non_empty(&candidates)?;
    match &loaded.source {
        Some(source) => log::info!(
            "Loaded {} positions from {}",
            loaded.positions.len(),
            source.display()
        ),
        None => log::warn!("No positions found; every frame will report Free: 0/0"),
    }

    let mut reader = create_reader(&args.input);
    let metadata = reader.open(&args.input)?;
    let frames = args.frames.unwrap_or(metadata.total_frames.max(1));
    log::info!(
        "Processing {} frames of {} ({}x{})",
        frames,
        args.input.display(),
        metadata.width,
        metadata.height
    );

    let mut use_case = MonitorParkingUseCase::new(
        Box::new(CpuPreprocessor::new()),
        OccupancyClassifier::new(),
        Box::new(RasterAnnotator::new()),
        &loaded.positions,
        &metadata,
        Box::new(StdoutPipelineLogger::default()),
    );
    let mut source = LoopingFrameSource::new(reader);

    let last = use_case.run(&mut source, params, frames)?;
    source.close();
    use_case.summary();

    if let (Some(path), Some((frame, analysis))) = (&args.snapshot, &last) {
        ImageFileWriter::new().write(path, frame)?;
        log::info!("Snapshot ({}) written to {}", analysis.report.label(), path.display());
    }
    if let Some((_, analysis)) = last {
        println!("{}", analysis.report.label());
    }
    Ok(())
}

fn run_positions(
    action: PositionsAction,
    store: &dyn PositionStore,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PositionsAction::Show { file } => {
            let positions = store.load(&file)?;
            for (i, p) in positions.iter().enumerate() {
                println!("{i:4}: {p}");
            }
            println!("{} positions", positions.len());
        }
        PositionsAction::Add { file, x, y } => {
            let count = add_position(store, &file, Position::new(x, y))?;
            log::info!("Added ({x}, {y}); {} now holds {count} positions", file.display());
        }
        PositionsAction::Remove { file, index } => {
            let removed = remove_position(store, &file, index)?;
            log::info!("Removed {removed} from {}", file.display());
        }
    }
    Ok(())
}

fn add_position(
    store: &dyn PositionStore,
    file: &Path,
    position: Position,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut positions = store.load(file)?;
    positions.push(position);
    store.save(file, &positions)?;
    Ok(positions.len())
}

fn remove_position(
    store: &dyn PositionStore,
    file: &Path,
    index: usize,
) -> Result<Position, Box<dyn std::error::Error>> {
    let mut positions = store.load(file)?;
    if index >= positions.len() {
        return Err(format!(
            "Index {index} out of range: {} holds {} positions",
            file.display(),
            positions.len()
        )
        .into());
    }
    let removed = positions.remove(index);
    store.save(file, &positions)?;
    Ok(removed)
}

fn validate(args: &DetectArgs) -> Result<ThresholdParams, Box<dyn std::error::Error>> {
    if !args.input.exists() {
        return Err(format!("Input file not found: {}", args.input.display()).into());
    }
    if args.frames == Some(0) {
        return Err("--frames must be at least 1".into());
    }
    Ok(ThresholdParams::new(args.block_size, args.constant, args.blur)?)
}

fn position_candidates(given: &[PathBuf]) -> Vec<PathBuf> {
    if given.is_empty() {
        DEFAULT_POSITION_CANDIDATES.iter().map(PathBuf::from).collect()
    } else {
        given.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect_args(argv: &[&str]) -> DetectArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Detect(args) => args,
            Command::Positions { .. } => panic!("expected detect"),
        }
    }

    #[test]
    fn test_detect_defaults() {
        let args = detect_args(&["parking-monitor", "detect", "videos/lot.mp4"]);
        assert_eq!(args.block_size, 25);
        assert_eq!(args.constant, 16);
        assert_eq!(args.blur, 5);
        assert!(args.frames.is_none());
        assert_eq!(
            position_candidates(&args.positions),
            vec![PathBuf::from("polygons"), PathBuf::from("CarParkPos")]
        );
    }

    #[test]
    fn test_repeated_positions_keep_order() {
        let args = detect_args(&[
            "parking-monitor",
            "detect",
            "lot.mp4",
            "--positions",
            "a",
            "--positions",
            "b",
        ]);
        assert_eq!(
            position_candidates(&args.positions),
            vec![PathBuf::from("a"), PathBuf::from("b")]
        );
    }

    #[test]
    fn test_validate_rejects_even_block_size() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("lot.png");
        std::fs::write(&input, b"").unwrap();
        let input = input.to_str().unwrap();

        let args = detect_args(&["parking-monitor", "detect", input, "--block-size", "24"]);
        let err = validate(&args).unwrap_err();
        assert!(err.to_string().contains("block size"));

        let args = detect_args(&["parking-monitor", "detect", input, "--constant", "-4"]);
        assert_eq!(validate(&args).unwrap().constant(), -4);
    }

    #[test]
    fn test_validate_rejects_missing_input_and_zero_frames() {
        let args = detect_args(&["parking-monitor", "detect", "/nonexistent/lot.mp4"]);
        assert!(validate(&args).is_err());

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("lot.mp4");
        std::fs::write(&input, b"").unwrap();
        let args = detect_args(&[
            "parking-monitor",
            "detect",
            input.to_str().unwrap(),
            "--frames",
            "0",
        ]);
        assert!(validate(&args).is_err());
    }

    #[test]
    fn test_add_then_remove_position() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("CarParkPos");
        let store = BinaryPositionStore::new();

        assert_eq!(add_position(&store, &file, Position::new(10, 20)).unwrap(), 1);
        assert_eq!(add_position(&store, &file, Position::new(-5, 7)).unwrap(), 2);
        assert_eq!(remove_position(&store, &file, 0).unwrap(), Position::new(10, 20));
        assert_eq!(store.load(&file).unwrap(), vec![Position::new(-5, 7)]);
    }

    #[test]
    fn test_remove_out_of_range_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("polygons");
        let store = BinaryPositionStore::new();
        add_position(&store, &file, Position::new(1, 2)).unwrap();

        assert!(remove_position(&store, &file, 3).is_err());
        assert_eq!(store.load(&file).unwrap().len(), 1);
    }

    #[test]
    fn test_add_accepts_negative_coordinates() {
        let cli =
            Cli::try_parse_from(["parking-monitor", "positions", "add", "f", "-3", "4"]).unwrap();
        match cli.command {
            Command::Positions {
                action: PositionsAction::Add { x, y, .. },
            } => assert_eq!((x, y), (-3, 4)),
            _ => panic!("expected positions add"),
        }
    }
}
