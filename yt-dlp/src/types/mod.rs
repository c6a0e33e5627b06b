mod metadata;
mod options;

pub use metadata::Metadata;
pub use options::ExtractOptions;
