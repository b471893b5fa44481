pub mod config;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod player;
pub mod position;
pub mod scoring;
pub mod selection;
