//! Pure utility curves that turn raw layout measurements (volume ratios,
//! occupancy percentages, distances) into bounded desirability scores.

pub mod utility;
