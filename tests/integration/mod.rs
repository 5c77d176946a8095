pub mod dashboard_render;
pub mod loading;
