pub mod assets;
pub mod camera;
pub mod core;
pub mod landing;
pub mod loading;
pub mod scene;
