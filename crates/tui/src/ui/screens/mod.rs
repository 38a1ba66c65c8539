pub mod adjust;
pub mod home;
pub mod manage;
pub mod picker;
pub mod table;
