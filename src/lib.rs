// Library exports for the generator binary and tests
pub mod canvas;
pub mod config;
pub mod constants;
pub mod output;
pub mod raster;
pub mod squircle;
pub mod typeface;
