//! cartridge-lib: Build planning for multi-cartridge front-end projects
//!
//! This crate turns a tree of cartridges into an ordered list of declarative
//! build descriptors for an external build engine:
//! - `BuildDescriptor`: everything needed to compile one kind (scripts or
//!   styles) of one cartridge
//! - `Pipeline`: resolves, builds and aggregates descriptors, then applies
//!   caller overrides
//! - `OverridePartial` / `MergeStrategyTable`: field-level refinement of the
//!   generated descriptors
//!
//! Nothing here compiles anything; the crate only produces the plan.

pub mod aggregate;
pub mod cleanup;
pub mod config;
pub mod consts;
pub mod descriptor;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod resolve;
pub mod util;

pub use error::{ConfigurationError, PlanWarning};
pub use pipeline::{Pipeline, Plan, plan_workspace};
