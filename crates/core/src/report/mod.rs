pub mod report_writer;
pub mod transcript_report;
