//! Sound effects and music
//!
//! The simulation raises discrete shoot/hit events; this layer maps them to
//! fire-and-forget playback. Missing audio files degrade to silence with a
//! console warning, so the game stays playable without the audio pack.

use macroquad::audio::{load_sound, play_sound, PlaySoundParams, Sound};

use crate::game::Events;

const EFFECT_VOLUME: f32 = 0.5;
const MUSIC_VOLUME: f32 = 0.4;

pub struct AudioBank {
    shoot: Option<Sound>,
    hit: Option<Sound>,
    music: Option<Sound>,
}

impl AudioBank {
    pub async fn load() -> Self {
        Self {
            shoot: load_or_warn("assets/audio/bullet.wav").await,
            hit: load_or_warn("assets/audio/hit.wav").await,
            music: load_or_warn("assets/audio/music.wav").await,
        }
    }

    pub fn start_music(&self) {
        if let Some(music) = &self.music {
            play_sound(
                music,
                PlaySoundParams {
                    looped: true,
                    volume: MUSIC_VOLUME,
                },
            );
        }
    }

    /// Play one effect per event raised by the last step
    pub fn react(&self, events: &Events) {
        for _ in events.shoot.iter() {
            play_effect(&self.shoot);
        }
        for _ in events.hit.iter() {
            play_effect(&self.hit);
        }
    }
}

fn play_effect(sound: &Option<Sound>) {
    if let Some(sound) = sound {
        play_sound(
            sound,
            PlaySoundParams {
                looped: false,
                volume: EFFECT_VOLUME,
            },
        );
    }
}

async fn load_or_warn(path: &str) -> Option<Sound> {
    match load_sound(path).await {
        Ok(sound) => Some(sound),
        Err(e) => {
            println!("Failed to load {}: {}", path, e);
            None
        }
    }
}
