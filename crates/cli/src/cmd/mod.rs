mod modules;
mod plan;

pub use modules::cmd_modules;
pub use plan::{PlanOptions, cmd_plan};
