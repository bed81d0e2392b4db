pub mod engine;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod shared;
pub mod timeline;
