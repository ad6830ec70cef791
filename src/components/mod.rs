pub mod app;
pub mod paper;

pub use app::App;
