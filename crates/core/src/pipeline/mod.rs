pub mod looping_frame_source;
pub mod monitor_parking_use_case;
pub mod pipeline_logger;
