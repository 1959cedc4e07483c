use bevy::asset::{LoadState as AssetLoadState, RenderAssetUsages};
use bevy::core_pipeline::Skybox;
use bevy::prelude::*;
use bevy::render::render_resource::{
    Extent3d, TextureDimension, TextureViewDescriptor, TextureViewDimension,
};
use constants::render_settings::{SKYBOX_BRIGHTNESS, SKYBOX_FACES};
use thiserror::Error;

use crate::engine::scene::controller::SceneController;

/// Cube map layers, in order.
const CUBE_FACE_COUNT: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkyboxError {
    #[error("expected {CUBE_FACE_COUNT} sky box faces, got {0}")]
    FaceCount(usize),
    #[error("sky box face {0} has no pixel data")]
    MissingData(usize),
    #[error("sky box face {0} does not match the size or format of the first face")]
    MismatchedFace(usize),
}

/// Face images requested for the sky box, released once assembled.
#[derive(Resource, Default)]
pub struct SkyboxFaces {
    handles: Vec<Handle<Image>>,
    settled: bool,
}

pub fn request_skybox(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handles = SKYBOX_FACES
        .iter()
        .map(|path| asset_server.load(*path))
        .collect();
    commands.insert_resource(SkyboxFaces {
        handles,
        settled: false,
    });
    debug!("Requested {CUBE_FACE_COUNT} sky box faces");
}

/// Stacks six equally sized 2D images into one cube texture.
pub fn stack_cube_faces(faces: &[&Image]) -> Result<Image, SkyboxError> {
    let [first, ..] = faces else {
        return Err(SkyboxError::FaceCount(0));
    };
    if faces.len() != CUBE_FACE_COUNT {
        return Err(SkyboxError::FaceCount(faces.len()));
    }

    let size = first.texture_descriptor.size;
    let format = first.texture_descriptor.format;
    let face_len = first.data.as_ref().map_or(0, Vec::len);

    let mut data = Vec::with_capacity(face_len * CUBE_FACE_COUNT);
    for (index, face) in faces.iter().enumerate() {
        let bytes = face.data.as_ref().ok_or(SkyboxError::MissingData(index))?;
        if face.texture_descriptor.size != size
            || face.texture_descriptor.format != format
            || bytes.len() != face_len
        {
            return Err(SkyboxError::MismatchedFace(index));
        }
        data.extend_from_slice(bytes);
    }

    let mut cube = Image::new(
        Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: CUBE_FACE_COUNT as u32,
        },
        TextureDimension::D2,
        data,
        format,
        RenderAssetUsages::RENDER_WORLD,
    );
    cube.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    Ok(cube)
}

// Attach the cube map to the scene camera once all faces have arrived
pub fn assemble_skybox(
    mut commands: Commands,
    faces: Option<ResMut<SkyboxFaces>>,
    mut images: ResMut<Assets<Image>>,
    asset_server: Res<AssetServer>,
    controller: Res<SceneController>,
) {
    let Some(mut faces) = faces else {
        return;
    };
    if faces.settled {
        return;
    }
    let Some(camera) = controller.camera() else {
        return;
    };

    let failure = SKYBOX_FACES
        .iter()
        .zip(&faces.handles)
        .find_map(|(path, handle)| match asset_server.get_load_state(handle) {
            Some(AssetLoadState::Failed(err)) => Some((*path, err)),
            _ => None,
        });
    if let Some((path, err)) = failure {
        error!("Sky box face '{path}' failed to load: {err}");
        faces.settled = true;
        return;
    }

    let cube = {
        let loaded: Option<Vec<&Image>> = faces.handles.iter().map(|h| images.get(h)).collect();
        let Some(loaded) = loaded else {
            return;
        };
        stack_cube_faces(&loaded)
    };
    faces.settled = true;

    match cube {
        Ok(cube) => {
            let image = images.add(cube);
            commands.entity(camera).insert(Skybox {
                image,
                brightness: SKYBOX_BRIGHTNESS,
                rotation: Quat::IDENTITY,
            });
            info!("✓ Sky box assembled");
        }
        Err(err) => error!("Sky box assembly failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::render_resource::TextureFormat;
    use constants::render_settings::SKYBOX_SOURCE_URL;

    fn face(size: u32, value: u8) -> Image {
        Image::new_fill(
            Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            &[value, value, value, 255],
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }

    #[test]
    fn faces_are_fetched_from_the_source_in_layer_order() {
        let names: Vec<_> = SKYBOX_FACES
            .iter()
            .map(|url| url.strip_prefix(SKYBOX_SOURCE_URL).unwrap())
            .collect();
        assert_eq!(
            names,
            [
                "/pos-x.jpg",
                "/neg-x.jpg",
                "/pos-y.jpg",
                "/neg-y.jpg",
                "/pos-z.jpg",
                "/neg-z.jpg",
            ]
        );
    }

    #[test]
    fn six_faces_stack_into_a_cube() {
        let faces: Vec<Image> = (0..6).map(|i| face(2, i as u8)).collect();
        let refs: Vec<&Image> = faces.iter().collect();

        let cube = stack_cube_faces(&refs).unwrap();
        assert_eq!(cube.texture_descriptor.size.depth_or_array_layers, 6);
        assert_eq!(cube.texture_descriptor.size.width, 2);

        let data = cube.data.unwrap();
        assert_eq!(data.len(), 6 * 2 * 2 * 4);
        // Layer order follows the input order.
        assert_eq!(data[5 * 16], 5);
        assert_eq!(
            cube.texture_view_descriptor.unwrap().dimension,
            Some(TextureViewDimension::Cube)
        );
    }

    #[test]
    fn mismatched_face_is_rejected() {
        let mut faces: Vec<Image> = (0..6).map(|_| face(2, 0)).collect();
        faces[3] = face(4, 0);
        let refs: Vec<&Image> = faces.iter().collect();
        assert_eq!(stack_cube_faces(&refs).unwrap_err(), SkyboxError::MismatchedFace(3));
    }

    #[test]
    fn wrong_face_count_and_missing_data_are_rejected() {
        let mut faces: Vec<Image> = (0..6).map(|_| face(1, 0)).collect();
        let five: Vec<&Image> = faces.iter().take(5).collect();
        assert_eq!(stack_cube_faces(&five).unwrap_err(), SkyboxError::FaceCount(5));
        assert_eq!(stack_cube_faces(&[]).unwrap_err(), SkyboxError::FaceCount(0));

        faces[1].data = None;
        let refs: Vec<&Image> = faces.iter().collect();
        assert_eq!(stack_cube_faces(&refs).unwrap_err(), SkyboxError::MissingData(1));
    }
}
