pub mod contacts;
pub mod scans;
pub mod settings;
