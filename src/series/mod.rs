pub mod registry;

pub use registry::{Registry, SeriesMetadata, OECD_SAMPLE, SAMPLE_FIRST_YEAR, SAMPLE_LAST_YEAR};
