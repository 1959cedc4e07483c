use bevy::color::Color;

/// Colour applied to picked objects.
pub const HIGHLIGHT_COLOUR: Color = Color::srgb(1.0, 0.0, 0.0);

pub const CLEAR_COLOUR: Color = Color::BLACK;

/// Location the sky box faces are fetched from at runtime.
pub const SKYBOX_SOURCE_URL: &str =
    "https://threejsfundamentals.org/threejs/resources/images/cubemaps/computer-history-museum";

/// Sky box faces in cube-map layer order (+X, -X, +Y, -Y, +Z, -Z).
pub const SKYBOX_FACES: [&str; 6] = [
    "https://threejsfundamentals.org/threejs/resources/images/cubemaps/computer-history-museum/pos-x.jpg",
    "https://threejsfundamentals.org/threejs/resources/images/cubemaps/computer-history-museum/neg-x.jpg",
    "https://threejsfundamentals.org/threejs/resources/images/cubemaps/computer-history-museum/pos-y.jpg",
    "https://threejsfundamentals.org/threejs/resources/images/cubemaps/computer-history-museum/neg-y.jpg",
    "https://threejsfundamentals.org/threejs/resources/images/cubemaps/computer-history-museum/pos-z.jpg",
    "https://threejsfundamentals.org/threejs/resources/images/cubemaps/computer-history-museum/neg-z.jpg",
];

pub const SKYBOX_BRIGHTNESS: f32 = 1000.0;

/// Default tracing filter; `RUST_LOG` takes precedence on native builds.
pub const LOG_FILTER: &str = "wgpu=error,naga=warn,space_viewer=debug";
