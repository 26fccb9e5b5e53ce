// Library for tests to access modules

pub mod config;
pub mod error;
pub mod models;
pub mod network_check;
pub mod resource_check;
pub mod runner;
pub mod speedtest;
pub mod sysinfo_repo;
pub mod version;
