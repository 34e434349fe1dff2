pub mod canvas;
pub mod scene;
pub mod text;
