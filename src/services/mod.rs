pub mod browse;
pub mod catalog;
pub mod profile;
pub mod recommendations;
pub mod scoring;
