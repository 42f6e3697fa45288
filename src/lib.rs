// ============================================================================
// lib.rs — Aviary
// Frame-by-frame viewer for pluggable evolution simulation engines: the
// engine is advanced one step per rendered frame, animals and food are drawn
// on a square canvas, generation statistics go to a side panel.
// ============================================================================

pub mod app;
pub mod config;
pub mod drift;
pub mod engine;
pub mod error;
pub mod frame;
pub mod mapper;
pub mod pipeline;
pub mod renderer;
pub mod scene;
pub mod stats;
pub mod viewport;
