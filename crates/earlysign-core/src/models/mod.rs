pub mod answer;
pub mod question;
pub mod result;
pub mod risk;
pub mod tool;
