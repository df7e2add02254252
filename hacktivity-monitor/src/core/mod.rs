/*!
Core pipeline modules for the hacktivity monitor
*/

pub mod config;
pub mod differ;
pub mod fetcher;
pub mod monitor;
pub mod notifier;
pub mod report;
pub mod state;
