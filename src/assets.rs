//! Asset decoding
//!
//! Sprite PNGs decode once through the `image` crate. The RGBA pixels feed
//! three things: a macroquad texture for normal drawing, a white silhouette
//! texture for the invulnerability blink, and an alpha mask handed to the
//! simulation for pixel-accurate bullet hits.
//!
//! Layout under assets/graphics/:
//! - player/<facing[_pose]>/N.png  - animation strips, numerically ordered
//! - enemy/<left|right>/N.png
//! - bullet.png, fire/N.png, health.png
//! - tiles/<name>.png              - names referenced by the level file
//! - sky/bg_sky.png, sky/fg_sky.png

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use macroquad::texture::{FilterMode, Texture2D};

use crate::game::{
    AnimationSet, BulletFrames, Facing, FrameCatalog, FrameSet, Pose, SpriteMask, Status,
};
use crate::level::LevelData;

/// Error type for asset loading
#[derive(Debug)]
pub enum AssetError {
    IoError(std::io::Error),
    DecodeError(image::ImageError),
    Missing(String),
}

impl From<std::io::Error> for AssetError {
    fn from(e: std::io::Error) -> Self {
        AssetError::IoError(e)
    }
}

impl From<image::ImageError> for AssetError {
    fn from(e: image::ImageError) -> Self {
        AssetError::DecodeError(e)
    }
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::IoError(e) => write!(f, "IO error: {}", e),
            AssetError::DecodeError(e) => write!(f, "Decode error: {}", e),
            AssetError::Missing(what) => write!(f, "Missing asset: {}", what),
        }
    }
}

/// A drawable frame with its blink silhouette
pub struct FrameTex {
    pub normal: Texture2D,
    pub silhouette: Texture2D,
}

/// All decoded assets: sim-facing metadata plus render-facing textures
pub struct AssetBank {
    pub catalog: FrameCatalog,
    pub player: HashMap<Status, Vec<FrameTex>>,
    pub enemy: HashMap<Status, Vec<FrameTex>>,
    pub bullet: Texture2D,
    pub fire: Vec<Texture2D>,
    /// Tile and platform textures by level image name
    pub tile_images: HashMap<String, Texture2D>,
    pub health_icon: Texture2D,
    pub sky_bg: Texture2D,
    pub sky_fg: Texture2D,
}

/// Decode every asset the level references
pub fn load_assets(level: &LevelData) -> Result<AssetBank, AssetError> {
    let graphics = Path::new("assets/graphics");

    let (player_anims, player_tex) =
        load_actor(&graphics.join("player"), &FrameCatalog::player_statuses())?;
    let (enemy_anims, enemy_tex) =
        load_actor(&graphics.join("enemy"), &FrameCatalog::enemy_statuses())?;

    let bullet_img = open_rgba(&graphics.join("bullet.png"))?;
    let bullet_mask =
        SpriteMask::from_alpha(bullet_img.as_raw(), bullet_img.width(), bullet_img.height());
    let bullet_size = (bullet_img.width() as f32, bullet_img.height() as f32);

    let (fire_frames, fire_tex) = load_frames(&graphics.join("fire"))?;

    // Tile art, deduplicated by name across tiles and platforms
    let mut names = BTreeSet::new();
    for tile in &level.tiles {
        names.insert(tile.image.clone());
    }
    for platform in &level.platforms {
        names.insert(platform.image.clone());
    }
    let mut tile_images = HashMap::new();
    for name in names {
        let texture = load_texture(&graphics.join("tiles").join(format!("{}.png", name)))?;
        tile_images.insert(name, texture);
    }

    let platform_size = level
        .platforms
        .first()
        .and_then(|p| tile_images.get(&p.image))
        .map(|t| (t.width(), t.height()))
        .unwrap_or((128.0, 32.0));

    Ok(AssetBank {
        catalog: FrameCatalog {
            player: player_anims,
            enemy: enemy_anims,
            bullet: BulletFrames::new(bullet_size, bullet_mask),
            fire: fire_frames,
            platform_size,
        },
        player: player_tex,
        enemy: enemy_tex,
        bullet: texture_from(&bullet_img),
        fire: fire_tex.into_iter().map(|f| f.normal).collect(),
        tile_images,
        health_icon: load_texture(&graphics.join("health.png"))?,
        sky_bg: load_texture(&graphics.join("sky").join("bg_sky.png"))?,
        sky_fg: load_texture(&graphics.join("sky").join("fg_sky.png"))?,
    })
}

/// Directory name for one status, e.g. "right", "left_duck"
fn status_dir(status: Status) -> String {
    let facing = match status.facing {
        Facing::Left => "left",
        Facing::Right => "right",
    };
    match status.pose {
        Pose::Run => facing.to_string(),
        Pose::Idle => format!("{}_idle", facing),
        Pose::Jump => format!("{}_jump", facing),
        Pose::Duck => format!("{}_duck", facing),
    }
}

/// Load every animation strip for one actor
fn load_actor(
    base: &Path,
    statuses: &[Status],
) -> Result<(AnimationSet, HashMap<Status, Vec<FrameTex>>), AssetError> {
    let mut sets = Vec::new();
    let mut textures = HashMap::new();
    for status in statuses {
        let (frames, texs) = load_frames(&base.join(status_dir(*status)))?;
        sets.push((*status, frames));
        textures.insert(*status, texs);
    }
    let fallback = match sets.first() {
        Some((_, frames)) => frames.clone(),
        None => return Err(AssetError::Missing(base.display().to_string())),
    };
    let mut anims = AnimationSet::new(fallback);
    for (status, frames) in sets {
        anims.insert(status, frames);
    }
    Ok((anims, textures))
}

/// Load a numerically-ordered strip of frames from one directory
fn load_frames(dir: &Path) -> Result<(FrameSet, Vec<FrameTex>), AssetError> {
    let mut entries: Vec<(usize, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_png = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("png"))
            .unwrap_or(false);
        if !is_png {
            continue;
        }
        if let Some(index) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<usize>().ok())
        {
            entries.push((index, path));
        }
    }
    entries.sort_by_key(|(index, _)| *index);
    if entries.is_empty() {
        return Err(AssetError::Missing(format!(
            "no frames in {}",
            dir.display()
        )));
    }

    let mut size = (0.0, 0.0);
    let mut masks = Vec::new();
    let mut textures = Vec::new();
    for (_, path) in entries {
        let img = open_rgba(&path)?;
        size = (img.width() as f32, img.height() as f32);
        masks.push(SpriteMask::from_alpha(
            img.as_raw(),
            img.width(),
            img.height(),
        ));
        textures.push(FrameTex {
            normal: texture_from(&img),
            silhouette: silhouette_from(&img),
        });
    }
    Ok((FrameSet { size, masks }, textures))
}

fn open_rgba(path: &Path) -> Result<image::RgbaImage, AssetError> {
    Ok(image::open(path)?.to_rgba8())
}

fn load_texture(path: &Path) -> Result<Texture2D, AssetError> {
    Ok(texture_from(&open_rgba(path)?))
}

fn texture_from(img: &image::RgbaImage) -> Texture2D {
    let texture = Texture2D::from_rgba8(img.width() as u16, img.height() as u16, img.as_raw());
    texture.set_filter(FilterMode::Nearest);
    texture
}

/// White-on-transparent copy of a frame, shown on blink frames
fn silhouette_from(img: &image::RgbaImage) -> Texture2D {
    let mut pixels = Vec::with_capacity((img.width() * img.height() * 4) as usize);
    for px in img.pixels() {
        if px.0[3] > 127 {
            pixels.extend_from_slice(&[255, 255, 255, 255]);
        } else {
            pixels.extend_from_slice(&[0, 0, 0, 0]);
        }
    }
    let texture = Texture2D::from_rgba8(img.width() as u16, img.height() as u16, &pixels);
    texture.set_filter(FilterMode::Nearest);
    texture
}
