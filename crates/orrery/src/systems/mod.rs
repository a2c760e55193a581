pub mod cross_section;
pub mod hit_test;
pub mod layout;
pub mod render;
pub mod rng;
pub mod sphere;
pub mod texture;
