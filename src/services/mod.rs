//! Emoji data and lookup.

pub mod dataset;
pub mod emoji;
pub mod icons;
pub mod normalize;
