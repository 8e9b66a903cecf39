pub mod domain;
pub mod error;
pub mod metadata;
pub mod output;
pub mod registry;
pub mod report;
pub mod sample;
pub mod updater;
pub mod workflow;
