pub mod gallery_controller;
pub mod health_controller;
