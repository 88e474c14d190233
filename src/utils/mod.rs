pub mod cache;
pub mod clock;
pub mod data;
pub mod grouping;
pub mod leagues;
pub mod normalize;
