pub mod pcm;

pub use pcm::{to_pcm_string, write_pcm};
