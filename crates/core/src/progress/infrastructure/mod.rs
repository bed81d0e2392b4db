pub mod interval_poller;
