pub mod extract;
pub mod general;
