pub mod definition;
pub mod result;
pub mod score;
pub mod state;
pub mod values;
