pub mod frame_annotator;
pub mod occupancy_classifier;
pub mod overlay;
