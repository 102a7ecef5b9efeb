pub mod bai;
pub mod bdi2;
pub mod gad7;
pub mod phq9;
pub mod who5;
