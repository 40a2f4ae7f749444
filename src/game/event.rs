//! Frame events
//!
//! Controllers don't spawn bullets or play sounds directly; they queue
//! events the world and the audio layer consume. Queues fill during a step
//! and stay readable until the next step clears them, so the caller can
//! react (fire-and-forget) between frames.

use macroquad::math::Vec2;

/// A queue for events of a single type
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Clear all events without processing
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies the actor behind an event, for fire-animation attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRef {
    Player,
    Enemy(u32),
}

/// A shot was requested this frame
#[derive(Debug, Clone, Copy)]
pub struct ShootEvent {
    /// Bullet spawn position (center)
    pub pos: Vec2,
    /// Unit travel direction
    pub direction: Vec2,
    pub shooter: ActorRef,
    /// Whether the shooter was ducking (offsets the muzzle flash)
    pub ducked: bool,
}

/// A damageable actor took a hit this frame
#[derive(Debug, Clone, Copy)]
pub struct HitEvent {
    pub pos: Vec2,
}

/// Container for all per-frame event queues
#[derive(Debug, Default)]
pub struct Events {
    pub shoot: EventQueue<ShootEvent>,
    pub hit: EventQueue<HitEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self {
            shoot: EventQueue::new(),
            hit: EventQueue::new(),
        }
    }

    /// Clear all queues. Called at the top of each step.
    pub fn clear_all(&mut self) {
        self.shoot.clear();
        self.hit.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_fills_and_clears() {
        let mut events = Events::new();
        events.hit.send(HitEvent {
            pos: Vec2::new(1.0, 2.0),
        });
        events.hit.send(HitEvent {
            pos: Vec2::new(3.0, 4.0),
        });
        assert_eq!(events.hit.len(), 2);
        assert!(events.shoot.is_empty());

        events.clear_all();
        assert!(events.hit.is_empty());
    }
}
