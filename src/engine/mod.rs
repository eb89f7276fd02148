mod classify;
mod executor;
mod propagation;
mod state;

pub use classify::{Classification, classify};
pub use executor::{
    ExecutionHalt, ExecutionReport, ExecutionStatus, PlanExecutor, SchedulingMode,
};
pub use propagation::propagate_flight_date;
pub use state::ExecutionState;
