// Tue Feb 03 2026 - Alex

pub mod display;

pub use display::ErrorDisplay;
