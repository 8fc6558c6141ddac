//! Services used by the assign run

pub mod image_assigner;
pub mod logging;
pub mod text_utils;

pub use image_assigner::{
    AssignReport, Assignment, CandidateIndex, ImageAssigner, ImageAssignerConfig,
};
pub use logging::{LogFormat, LoggingConfig, init_tracing};
