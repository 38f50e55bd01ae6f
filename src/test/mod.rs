mod config;
mod synthesizer;
