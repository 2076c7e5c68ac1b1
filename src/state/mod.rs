pub mod dilation;
pub mod frame_loop;
pub mod progress;
pub mod readout;
pub mod tally;

pub use dilation::{DilationFrame, TimeDilation};
pub use frame_loop::{FrameLoop, FrameReport};
pub use readout::{Readout, TextVeil};
pub use tally::{Fade, TapTally};
