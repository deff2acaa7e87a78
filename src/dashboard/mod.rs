pub mod chart;
pub mod navigation;
