//! Build descriptors and their construction.
//!
//! A descriptor is the declarative plan for compiling one kind of build
//! (scripts or styles) for one cartridge. Descriptors are consumed by an
//! external build engine; nothing here runs a compiler.
//!
//! # Submodules
//!
//! - [`builder`] - Turns resolver output into a descriptor
//! - [`shared`] - Options resolved once per run and shared by all descriptors

pub mod builder;
pub mod shared;
mod types;

pub use builder::DescriptorBuilder;
pub use shared::SharedOptions;
pub use types::*;
