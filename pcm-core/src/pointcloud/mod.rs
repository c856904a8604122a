pub mod map;
pub mod point;
pub mod reference;
