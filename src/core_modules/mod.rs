pub mod calendar;
pub mod chart_image;
pub mod color_rule;
pub mod column_scanner;
pub mod geometry;
pub mod pixel;
pub mod value_mapper;
