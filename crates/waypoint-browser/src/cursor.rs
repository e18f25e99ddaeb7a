//! Virtual cursor driven by directional input.
//!
//! The engine is ticked by the host's frame timer. While a direction is
//! held, each tick accelerates the cursor and moves it along the sum of
//! the held directions. Hitting a viewport edge clamps the cursor and
//! produces an [`EdgeHit`] that the caller turns into a fling scroll on
//! the content surface.
//!
//! Every operation is a no-op while no overlay is attached.

use waypoint_types::config::CursorConfig;
use waypoint_types::geometry::{Point, Viewport};
use waypoint_types::input::{Direction, DirectionSet};

use crate::surface::CursorView;

/// The cursor tried to leave the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeHit {
    pub direction: Direction,
    /// Fling magnitude in px/s, always positive.
    pub velocity: i32,
}

impl EdgeHit {
    /// Signed fling velocity `(dx, dy)` for the content surface.
    pub fn scroll_delta(&self) -> (i32, i32) {
        let (ux, uy) = self.direction.unit();
        (ux * self.velocity, uy * self.velocity)
    }
}

/// Position, held directions and speed of the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    pub position: Point,
    pub active: DirectionSet,
    /// Pixels per tick, `0.0..=max_speed`.
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    /// No tick work pending.
    Stopped,
    /// At least one direction held; the cursor moves every tick.
    Moving,
    /// All directions released; speed decays until it reaches zero.
    Settling,
}

struct AttachedCursor {
    view: Box<dyn CursorView>,
    viewport: Viewport,
    state: CursorState,
    motion: Motion,
}

pub struct CursorEngine {
    config: CursorConfig,
    eligible: bool,
    attached: Option<AttachedCursor>,
}

impl CursorEngine {
    /// Create a detached, ineligible engine.
    pub fn new(config: CursorConfig) -> Self {
        Self {
            config,
            eligible: false,
            attached: None,
        }
    }

    /// Attach the overlay. Any previously attached overlay is detached
    /// first.
    pub fn attach(&mut self, mut view: Box<dyn CursorView>, viewport: Viewport) {
        self.detach();
        let position = if self.config.start_centered {
            viewport.center()
        } else {
            Point::default()
        };
        view.move_to(position);
        view.set_visible(self.eligible);
        log::debug!(
            "Cursor attached to {}x{} viewport at ({}, {})",
            viewport.width,
            viewport.height,
            position.x,
            position.y
        );
        self.attached = Some(AttachedCursor {
            view,
            viewport,
            state: CursorState {
                position,
                active: DirectionSet::empty(),
                speed: 0.0,
            },
            motion: Motion::Stopped,
        });
    }

    /// Tear down the overlay. Movement stops even if directions are still
    /// held.
    pub fn detach(&mut self) {
        if let Some(mut cursor) = self.attached.take() {
            cursor.view.set_visible(false);
            log::debug!("Cursor detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// The viewport changed size; keep the cursor inside it.
    pub fn resize(&mut self, viewport: Viewport) {
        let Some(cursor) = self.attached.as_mut() else {
            return;
        };
        cursor.viewport = viewport;
        let clamped = viewport.clamp(cursor.state.position);
        if clamped != cursor.state.position {
            cursor.state.position = clamped;
            cursor.view.move_to(clamped);
        }
    }

    pub fn start_direction(&mut self, direction: Direction) {
        let eligible = self.eligible;
        let Some(cursor) = self.attached.as_mut() else {
            return;
        };
        if !cursor.state.active.insert(direction) {
            return;
        }
        log::trace!(
            "Cursor direction {direction:?} held ({} active)",
            cursor.state.active.len()
        );
        if eligible && cursor.motion != Motion::Moving {
            cursor.motion = Motion::Moving;
        }
    }

    pub fn stop_direction(&mut self, direction: Direction) {
        let Some(cursor) = self.attached.as_mut() else {
            return;
        };
        if !cursor.state.active.remove(direction) {
            return;
        }
        if cursor.state.active.is_empty() && cursor.motion == Motion::Moving {
            cursor.motion = Motion::Settling;
        }
    }

    /// Release every held direction (e.g. when input focus is lost and
    /// the matching key-up events will never arrive).
    pub fn release_all(&mut self) {
        let Some(cursor) = self.attached.as_mut() else {
            return;
        };
        cursor.state.active.clear();
        if cursor.motion == Motion::Moving {
            cursor.motion = Motion::Settling;
        }
    }

    /// Show or hide the cursor.
    ///
    /// Becoming ineligible halts movement but keeps the held-direction
    /// set, so later releases still balance earlier presses. Becoming
    /// eligible again with directions held resumes movement.
    pub fn set_eligible(&mut self, eligible: bool) {
        if self.eligible == eligible {
            return;
        }
        self.eligible = eligible;
        log::debug!("Cursor eligible: {eligible}");
        let Some(cursor) = self.attached.as_mut() else {
            return;
        };
        cursor.view.set_visible(eligible);
        if eligible {
            if !cursor.state.active.is_empty() {
                cursor.motion = Motion::Moving;
            }
        } else {
            cursor.motion = Motion::Stopped;
            cursor.state.speed = 0.0;
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.eligible
    }

    pub fn current_position(&self) -> Option<Point> {
        self.attached.as_ref().map(|c| c.state.position)
    }

    pub fn state(&self) -> Option<CursorState> {
        self.attached.as_ref().map(|c| c.state)
    }

    pub fn speed(&self) -> f32 {
        self.attached.as_ref().map_or(0.0, |c| c.state.speed)
    }

    pub fn active_directions(&self) -> DirectionSet {
        self.attached
            .as_ref()
            .map_or_else(DirectionSet::empty, |c| c.state.active)
    }

    /// Whether the cursor is being driven by held directions.
    pub fn is_moving(&self) -> bool {
        self.motion() == Some(Motion::Moving)
    }

    /// Whether [`tick`](Self::tick) still has work to do. Hosts can stop
    /// their timer while this is false.
    pub fn is_ticking(&self) -> bool {
        matches!(self.motion(), Some(Motion::Moving | Motion::Settling))
    }

    fn motion(&self) -> Option<Motion> {
        self.attached.as_ref().map(|c| c.motion)
    }

    /// Advance one frame. Returns the edges hit during this step.
    pub fn tick(&mut self) -> Vec<EdgeHit> {
        let config = &self.config;
        let Some(cursor) = self.attached.as_mut() else {
            return Vec::new();
        };
        match cursor.motion {
            Motion::Stopped => Vec::new(),
            Motion::Settling => {
                let previous = cursor.state.speed;
                cursor.state.speed *= config.friction;
                // A speed that no longer shrinks would keep the timer alive forever.
                if cursor.state.speed < config.speed_epsilon || cursor.state.speed >= previous {
                    cursor.state.speed = 0.0;
                    cursor.motion = Motion::Stopped;
                }
                Vec::new()
            },
            Motion::Moving => {
                cursor.state.speed = (cursor.state.speed + config.acceleration).min(config.max_speed);
                step(cursor, config.scroll_multiplier)
            },
        }
    }
}

/// Move the cursor one step along the held directions, clamping at the
/// viewport edges.
fn step(cursor: &mut AttachedCursor, scroll_multiplier: i32) -> Vec<EdgeHit> {
    let (vx, vy) = cursor.state.active.vector();
    let speed = cursor.state.speed;
    let vp = cursor.viewport;
    let old = cursor.state.position;
    let target = Point::new(old.x + vx as f32 * speed, old.y + vy as f32 * speed);
    let velocity = (speed as i32).max(1).saturating_mul(scroll_multiplier);

    let mut hits = Vec::new();
    if target.x < 0.0 {
        hits.push(EdgeHit { direction: Direction::Left, velocity });
    } else if target.x > vp.max_x() {
        hits.push(EdgeHit { direction: Direction::Right, velocity });
    }
    if target.y < 0.0 {
        hits.push(EdgeHit { direction: Direction::Up, velocity });
    } else if target.y > vp.max_y() {
        hits.push(EdgeHit { direction: Direction::Down, velocity });
    }

    let clamped = vp.clamp(target);
    if clamped != old {
        cursor.state.position = clamped;
        cursor.view.move_to(clamped);
    }
    hits
}
