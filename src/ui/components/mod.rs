pub mod hud;
pub mod world_bar;
