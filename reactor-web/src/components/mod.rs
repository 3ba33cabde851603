pub mod button;
pub mod connection_form;
pub mod footer;
pub mod header;
pub mod hud;
pub mod node_grid;
pub mod notice_banner;
pub mod symbol_pad;
