//! Probe backends implementing [`tf_probe::Prober`].

mod ffprobe;

pub use ffprobe::{parse_ffprobe_json, FfprobeProber};
