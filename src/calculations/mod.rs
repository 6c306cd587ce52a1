pub mod backward_pass;
pub mod critical_path;
pub mod forward_pass;

pub use backward_pass::BackwardPass;
pub use critical_path::{CriticalPathResult, calculate_critical_path, schedule_dag};
pub use forward_pass::{ForwardPass, project_duration};
