pub mod config;
pub mod encoder;
pub mod library;
pub mod pipeline;
pub mod probe;
pub mod soundbank;

pub use config::{Config, EncoderConfig, LibraryConfig, SoundbankConfig};
pub use encoder::Encoder;
pub use library::Library;
pub use pipeline::RunSummary;
pub use probe::WavInfo;
pub use soundbank::Soundbank;
