use std::path::{Path, PathBuf};
use std::time::Duration;

use iced::widget::image;

use parking_monitor_core::occupancy::domain::occupancy_classifier::OccupancyClassifier;
use parking_monitor_core::occupancy::domain::overlay::{FilledBox, TextLabel};
use parking_monitor_core::occupancy::infrastructure::raster_annotator::RasterAnnotator;
use parking_monitor_core::pipeline::looping_frame_source::LoopingFrameSource;
use parking_monitor_core::pipeline::monitor_parking_use_case::MonitorParkingUseCase;
use parking_monitor_core::pipeline::pipeline_logger::NullPipelineLogger;
use parking_monitor_core::positions::domain::position_store::PositionStore;
use parking_monitor_core::positions::infrastructure::binary_position_store::BinaryPositionStore;
use parking_monitor_core::preprocessing::domain::threshold_params::ThresholdParams;
use parking_monitor_core::preprocessing::infrastructure::cpu_preprocessor::CpuPreprocessor;
use parking_monitor_core::shared::reference_image::find_reference_image;
use parking_monitor_core::video::infrastructure::reader_factory::create_reader;

use crate::settings::Settings;

/// The most recent annotated frame, ready for display.
pub struct ShownFrame {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
    /// Count labels and the banner text, in frame pixel coordinates.
    pub labels: Vec<TextLabel>,
    /// Background behind the banner text; drawn with the labels.
    pub banner_box: FilledBox,
    pub summary: String,
}

/// One opened video being monitored in a loop.
pub struct Session {
    video_path: PathBuf,
    source: LoopingFrameSource,
    use_case: MonitorParkingUseCase,
    interval: Duration,
    reference: Option<image::Handle>,
    latest: Option<ShownFrame>,
}

impl Session {
    pub fn open(video_path: &Path, settings: &Settings) -> Result<Self, Box<dyn std::error::Error>> {
        let loaded = BinaryPositionStore::new().load_first_non_empty(&settings.position_candidates)?;
        match &loaded.source {
            Some(source) => log::info!(
                "Loaded {} positions from {}",
                loaded.positions.len(),
                source.display()
            ),
            None => log::warn!("No position file found; nothing to monitor"),
        }

        let mut reader = create_reader(video_path);
        let metadata = reader.open(video_path)?;

        let reference = find_reference_image(video_path, &settings.image_dir).map(|path| {
            log::info!("Reference image: {}", path.display());
            image::Handle::from_path(path)
        });
        if reference.is_none() {
            log::debug!(
                "No reference image for {} in {}",
                video_path.display(),
                settings.image_dir.display()
            );
        }

        let use_case = MonitorParkingUseCase::new(
            Box::new(CpuPreprocessor::new()),
            OccupancyClassifier::new(),
            Box::new(RasterAnnotator::new()),
            &loaded.positions,
            &metadata,
            Box::new(NullPipelineLogger),
        );

        Ok(Self {
            video_path: video_path.to_path_buf(),
            source: LoopingFrameSource::new(reader),
            use_case,
            interval: Duration::from_millis(metadata.frame_interval_ms(settings.frame_interval_ms)),
            reference,
            latest: None,
        })
    }

    /// Pulls the next frame, classifies it with `params` and replaces the
    /// displayed frame.
    pub fn advance(&mut self, params: &ThresholdParams) -> Result<(), Box<dyn std::error::Error>> {
        let mut frame = self.source.next_frame()?;
        let analysis = self.use_case.process_frame(&mut frame, params)?;

        self.latest = Some(ShownFrame {
            handle: image::Handle::from_rgba(frame.width(), frame.height(), frame.to_rgba()),
            width: frame.width(),
            height: frame.height(),
            labels: analysis.overlay.all_labels().cloned().collect(),
            banner_box: analysis.overlay.banner.background,
            summary: analysis.report.label(),
        });
        Ok(())
    }

    pub fn video_path(&self) -> &Path {
        &self.video_path
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn latest(&self) -> Option<&ShownFrame> {
        self.latest.as_ref()
    }

    pub fn reference_image(&self) -> Option<&image::Handle> {
        self.reference.as_ref()
    }
}
