pub mod dispatch;

pub use dispatch::{build_workflow, dispatch};
