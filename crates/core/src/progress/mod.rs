pub mod estimator;
pub mod infrastructure;
pub mod job_spec;
pub mod progress_sink;
pub mod speed_table;
