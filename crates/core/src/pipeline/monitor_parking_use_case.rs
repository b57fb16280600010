use std::time::Instant;

use crate::occupancy::domain::frame_annotator::FrameAnnotator;
use crate::occupancy::domain::occupancy_classifier::{OccupancyClassifier, OccupancyReport};
use crate::occupancy::domain::overlay::Overlay;
use crate::positions::domain::position::{partition_by_frame, Position};
use crate::preprocessing::domain::frame_preprocessor::{FramePreprocessor, PreprocessError};
use crate::preprocessing::domain::threshold_params::ThresholdParams;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

use super::looping_frame_source::LoopingFrameSource;
use super::pipeline_logger::PipelineLogger;

/// Classification and overlay for one processed frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameAnalysis {
    pub report: OccupancyReport,
    pub overlay: Overlay,
}

/// Per-frame parking occupancy pipeline.
///
/// Wires preprocessor, classifier and annotator together for a fixed set of
/// positions bound to one video. Positions whose rectangle does not fit the
/// video are dropped up front with a warning.
pub struct MonitorParkingUseCase {
    preprocessor: Box<dyn FramePreprocessor>,
    classifier: OccupancyClassifier,
    annotator: Box<dyn FrameAnnotator>,
    positions: Vec<Position>,
    logger: Box<dyn PipelineLogger>,
}

impl MonitorParkingUseCase {
    pub fn new(
        preprocessor: Box<dyn FramePreprocessor>,
        classifier: OccupancyClassifier,
        annotator: Box<dyn FrameAnnotator>,
        positions: &[Position],
        metadata: &VideoMetadata,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        let (kept, dropped) = partition_by_frame(positions, metadata.width, metadata.height);
        for position in &dropped {
            log::warn!(
                "Ignoring space at {position}: outside the {}x{} frame",
                metadata.width,
                metadata.height
            );
        }
        log::info!("Monitoring {} parking spaces", kept.len());

        Self {
            preprocessor,
            classifier,
            annotator,
            positions: kept,
            logger,
        }
    }

    /// Positions actually monitored, in file order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Classifies the spaces in `frame` and paints the space outlines into it.
    pub fn process_frame(
        &mut self,
        frame: &mut Frame,
        params: &ThresholdParams,
    ) -> Result<FrameAnalysis, PreprocessError> {
        let t0 = Instant::now();
        let mask = self.preprocessor.preprocess(frame, params)?;
        let t1 = Instant::now();
        let report = self.classifier.classify(&mask, &self.positions);
        let t2 = Instant::now();
        let overlay = Overlay::from_report(&report);
        self.annotator.annotate(frame, &overlay);
        let t3 = Instant::now();

        self.logger.timing("preprocess", ms(t1 - t0));
        self.logger.timing("classify", ms(t2 - t1));
        self.logger.timing("annotate", ms(t3 - t2));
        self.logger.metric("free_spaces", report.free() as f64);

        log::debug!("Frame {}: {}", frame.index(), report.label());
        Ok(FrameAnalysis { report, overlay })
    }

    /// Processes `frames` consecutive frames from `source`, looping the video
    /// as needed. Returns the last annotated frame, or `None` when
    /// `frames == 0`.
    pub fn run(
        &mut self,
        source: &mut LoopingFrameSource,
        params: &ThresholdParams,
        frames: usize,
    ) -> Result<Option<(Frame, FrameAnalysis)>, Box<dyn std::error::Error>> {
        let mut last = None;
        for n in 1..=frames {
            let mut frame = source.next_frame()?;
            let analysis = self.process_frame(&mut frame, params)?;
            log::info!("Frame {}: {}", frame.index(), analysis.report.label());
            self.logger.progress(n, frames);
            last = Some((frame, analysis));
        }
        if source.loops() > 0 {
            self.logger
                .info(&format!("Video looped {} time(s)", source.loops()));
        }
        Ok(last)
    }

    pub fn summary(&self) {
        self.logger.summary();
    }
}

fn ms(d: std::time::Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
