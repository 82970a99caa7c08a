pub mod runner;

pub use runner::{analyze_frame, analyze_transition, FrameReport, TransitionReport};
