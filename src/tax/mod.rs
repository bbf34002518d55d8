//! Tax computation: GST splits and inter-state classification

pub mod gst;
pub mod state;

pub use gst::*;
pub use state::*;
