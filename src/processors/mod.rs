pub mod locator;
pub mod map_builder;
