pub mod assessment;
pub mod treatment;
