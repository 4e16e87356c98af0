pub mod eval;
pub mod presets;
pub mod run;
