use crate::debris::{DebrisSize, DebrisTier};
use bevy::audio::AudioSource;
use bevy::prelude::*;

/// Every image and sound the game uses, loaded once at startup.
///
/// Built through [`FromWorld`] from the [`AssetServer`] in the real app.
/// Headless tests use [`GameAssets::detached`], which fills the same slots
/// (with the same animation frame counts) with default handles.
#[derive(Resource, Clone)]
pub struct GameAssets {
    pub background: Handle<Image>,
    pub spacecraft: Handle<Image>,
    pub viewfinder: Handle<Image>,
    /// Indexed `[tier][size - 1]`.
    pub debris: [[Handle<Image>; 3]; 3],
    pub blast_frames: Vec<Handle<Image>>,
    pub explosion_frames: Vec<Handle<Image>>,
    pub exhaust_frames: Vec<Handle<Image>>,
    pub turn_around_frames: Vec<Handle<Image>>,
    pub explosion_sound: Handle<AudioSource>,
    pub blast_sound: Handle<AudioSource>,
    pub thrust_sound: Handle<AudioSource>,
    pub advance_sound: Handle<AudioSource>,
}

impl GameAssets {
    /// Resolve every asset path through the given loaders.
    pub fn load(
        mut image: impl FnMut(String) -> Handle<Image>,
        mut sound: impl FnMut(String) -> Handle<AudioSource>,
    ) -> Self {
        let debris = [1, 2, 3].map(|tier| {
            ["small", "medium", "big"]
                .map(|size| image(format!("graphics/debris-{size}-tier-{tier}.png")))
        });
        Self {
            background: image("graphics/orbit.png".into()),
            spacecraft: image("graphics/spacecraft-1.png".into()),
            viewfinder: image("graphics/viewfinder-gray.png".into()),
            debris,
            blast_frames: frame_set(&mut image, "blast-bounce", 4),
            explosion_frames: frame_set(&mut image, "explosion", 10),
            exhaust_frames: frame_set(&mut image, "exhaust", 2),
            turn_around_frames: frame_set(&mut image, "qturn-anim", 6),
            explosion_sound: sound("sounds/explosion.ogg".into()),
            blast_sound: sound("sounds/zap.ogg".into()),
            thrust_sound: sound("sounds/spaceship-flight.ogg".into()),
            advance_sound: sound("sounds/level-advance.ogg".into()),
        }
    }

    /// Asset set with placeholder handles, for running without an `AssetServer`.
    pub fn detached() -> Self {
        Self::load(|_| Handle::default(), |_| Handle::default())
    }

    /// Image for a debris piece of the given tier and size.
    pub fn debris_image(&self, tier: DebrisTier, size: DebrisSize) -> Handle<Image> {
        self.debris[tier.index()][size.index()].clone()
    }
}

impl FromWorld for GameAssets {
    fn from_world(world: &mut World) -> Self {
        let server = world.resource::<AssetServer>();
        let assets = Self::load(|path| server.load(path), |path| server.load(path));
        info!("Game assets queued for loading");
        assets
    }
}

fn frame_set(
    image: &mut impl FnMut(String) -> Handle<Image>,
    stem: &str,
    count: usize,
) -> Vec<Handle<Image>> {
    (1..=count)
        .map(|i| image(format!("graphics/{stem}-{i}.png")))
        .collect()
}

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d is centred on the origin, matching the wrap limits.
    commands.spawn(Camera2d);
    info!("Camera spawned");
}

/// Spawn the orbit backdrop behind everything else.
pub fn spawn_background(mut commands: Commands, assets: Res<GameAssets>) {
    commands.spawn((
        Sprite::from_image(assets.background.clone()),
        Transform::from_xyz(0.0, 0.0, -10.0),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_is_asked_for_every_path_once() {
        let mut images = Vec::new();
        let mut sounds = Vec::new();
        let assets = GameAssets::load(
            |path| {
                images.push(path);
                Handle::default()
            },
            |path| {
                sounds.push(path);
                Handle::default()
            },
        );

        // 9 debris sprites, 3 single images, 22 animation frames.
        assert_eq!(images.len(), 34);
        assert_eq!(sounds.len(), 4);
        assert!(images.contains(&"graphics/debris-big-tier-3.png".to_string()));
        assert!(images.contains(&"graphics/explosion-10.png".to_string()));
        assert_eq!(assets.explosion_frames.len(), 10);
        assert_eq!(assets.turn_around_frames.len(), 6);
    }
}
