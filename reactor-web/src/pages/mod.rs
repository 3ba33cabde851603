pub mod console;
pub mod home;
pub mod not_found;
pub mod reactor;
pub mod warp;
