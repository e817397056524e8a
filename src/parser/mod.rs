pub mod explodes;

pub use explodes::{explode, explode_sub};
