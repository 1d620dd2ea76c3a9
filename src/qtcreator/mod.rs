//! Qt Creator project-file generation

pub mod settings;
pub mod template;
pub mod version;

// Re-exports for library consumers
#[allow(unused_imports)]
pub use settings::QtCreatorSettings;
#[allow(unused_imports)]
pub use version::Version;
