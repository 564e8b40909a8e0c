//! Multi-touch gesture interpretation
//!
//! Consumes a normalized touch-event stream from the host UI layer and
//! turns it into controller calls. A gesture session runs from the first
//! touch-down to full release; its single/multi classification is the
//! *maximum* pointer count seen during the session, so a two-finger
//! gesture that momentarily drops to one finger keeps behaving as
//! multi-touch instead of switching to single-finger rotation mid-stroke.

use crate::config::GestureConfig;
use crate::controller::{CameraAxis, SceneController};
use cloudscope_core::Vector3;
use log::{debug, trace};

/// What happened to the contact set in a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// A pointer went down.
    Down,
    /// One or more pointers moved.
    Move,
    /// A pointer lifted.
    Up,
    /// The host cancelled the touch sequence.
    Cancel,
}

/// One contact point in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A normalized touch event. `pointers` lists every contact still on the
/// screen *after* the action; an `Up` with no pointers is a full release.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub pointers: Vec<TouchPoint>,
    pub timestamp_ms: u64,
}

impl TouchEvent {
    pub fn new(action: TouchAction, pointers: Vec<TouchPoint>, timestamp_ms: u64) -> Self {
        Self {
            action,
            pointers,
            timestamp_ms,
        }
    }
}

/// Per-session tracking state, created at first touch-down and dropped
/// at full release.
#[derive(Debug, Clone)]
struct GestureSession {
    /// Maximum concurrent pointer count seen; locks the single/multi
    /// classification for the rest of the session.
    max_pointers: usize,
    last_centroid: TouchPoint,
    /// Angle between the first two contacts, degrees; `None` until two
    /// pointers have been seen together.
    last_angle_deg: Option<f32>,
    /// Distance between the first two contacts.
    last_span: Option<f32>,
}

impl GestureSession {
    fn is_multi(&self) -> bool {
        self.max_pointers > 1
    }
}

/// Interprets touch events and drives a [`SceneController`].
#[derive(Debug)]
pub struct GestureInterpreter {
    config: GestureConfig,
    /// Density-scaled single-drag factor.
    drag_factor: f32,
    session: Option<GestureSession>,
    /// Time and place of the last single-finger touch-down, for
    /// double-tap detection.
    last_tap: Option<(u64, TouchPoint)>,
}

impl GestureInterpreter {
    /// Create an interpreter. `density` is the display density factor
    /// (1.0 = baseline ~160 dpi); the single-drag factor is scaled by
    /// `density / 3.0` so drags feel the same across screens.
    pub fn new(config: GestureConfig, density: f32) -> Self {
        let drag_factor = config.drag_factor * (density / 3.0);
        Self {
            config,
            drag_factor,
            session: None,
            last_tap: None,
        }
    }

    /// Feed one touch event, translating it into controller calls.
    /// Never fails; malformed sequences degrade to no-ops.
    pub fn handle(&mut self, event: &TouchEvent, controller: &mut SceneController) {
        match event.action {
            TouchAction::Down => self.on_down(event, controller),
            TouchAction::Move => self.on_move(event, controller),
            TouchAction::Up => self.on_up(event),
            TouchAction::Cancel => {
                trace!("touch sequence cancelled");
                self.session = None;
            }
        }
    }

    /// Whether a touch session is currently being tracked.
    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    fn on_down(&mut self, event: &TouchEvent, controller: &mut SceneController) {
        let Some(centroid) = centroid(&event.pointers) else {
            return;
        };

        match &mut self.session {
            None => {
                // First contact starts a session; also the spot where a
                // double-tap is recognized.
                if event.pointers.len() == 1 && self.detect_double_tap(event.timestamp_ms, centroid)
                {
                    debug!("double-tap: resetting view");
                    controller.reset_view();
                }
                self.session = Some(GestureSession {
                    max_pointers: event.pointers.len(),
                    last_centroid: centroid,
                    last_angle_deg: pair_angle_deg(&event.pointers),
                    last_span: pair_span(&event.pointers),
                });
                trace!("session started with {} pointer(s)", event.pointers.len());
            }
            Some(session) => {
                session.max_pointers = session.max_pointers.max(event.pointers.len());
                // Re-anchor so the new finger doesn't register as a jump.
                session.last_centroid = centroid;
                session.last_angle_deg = pair_angle_deg(&event.pointers);
                session.last_span = pair_span(&event.pointers);
            }
        }
    }

    fn on_move(&mut self, event: &TouchEvent, controller: &mut SceneController) {
        let Some(session) = &mut self.session else {
            return;
        };
        let Some(current) = centroid(&event.pointers) else {
            return;
        };
        session.max_pointers = session.max_pointers.max(event.pointers.len());

        let dx = current.x - session.last_centroid.x;
        let dy = current.y - session.last_centroid.y;
        session.last_centroid = current;

        if !session.is_multi() {
            // Single-finger drag: rotate the camera about its own axes.
            // Screen Y grows downward, so an upward drag pitches up.
            controller.rotate_camera_y(dx * self.drag_factor);
            controller.rotate_camera_x(-dy * self.drag_factor);
            return;
        }

        if self.config.multi_drag_rotates_object {
            controller.rotate_object_about_camera_axis(
                CameraAxis::Y,
                dx * self.config.multi_drag_factor,
            );
            controller.rotate_object_about_camera_axis(
                CameraAxis::X,
                dy * self.config.multi_drag_factor,
            );
        } else {
            controller.translate_camera(&Vector3::new(
                dx * self.config.multi_drag_factor,
                -dy * self.config.multi_drag_factor,
                0.0,
            ));
        }

        // Twist and pinch need two live contacts on both sides of the
        // delta; a session that dropped to one finger keeps dragging but
        // stops rotating/zooming.
        let angle = pair_angle_deg(&event.pointers);
        if let (Some(previous), Some(current)) = (session.last_angle_deg, angle) {
            let delta = normalize_angle_deg(current - previous);
            controller.rotate_camera_z(delta);
        }
        session.last_angle_deg = angle;

        let span = pair_span(&event.pointers);
        if let (Some(previous), Some(current)) = (session.last_span, span) {
            if previous > f32::EPSILON {
                let scale = current / previous;
                let movement = -(self.config.zoom_factor * (1.0 - scale));
                controller.translate_camera(&Vector3::new(0.0, 0.0, movement));
            }
        }
        session.last_span = span;
    }

    fn on_up(&mut self, event: &TouchEvent) {
        if event.pointers.is_empty() {
            trace!("session ended");
            self.session = None;
            return;
        }
        if let Some(session) = &mut self.session {
            // Classification stays locked; only the tracking anchors are
            // re-based onto the remaining contacts.
            if let Some(centroid) = centroid(&event.pointers) {
                session.last_centroid = centroid;
            }
            session.last_angle_deg = pair_angle_deg(&event.pointers);
            session.last_span = pair_span(&event.pointers);
        }
    }

    fn detect_double_tap(&mut self, timestamp_ms: u64, at: TouchPoint) -> bool {
        let hit = self.last_tap.is_some_and(|(last_ms, last_at)| {
            timestamp_ms.saturating_sub(last_ms) <= self.config.double_tap_window_ms
                && distance(last_at, at) <= self.config.double_tap_slop_px
        });
        // A recognized double-tap consumes the stored tap so a third tap
        // starts over.
        self.last_tap = if hit { None } else { Some((timestamp_ms, at)) };
        hit
    }
}

fn centroid(pointers: &[TouchPoint]) -> Option<TouchPoint> {
    if pointers.is_empty() {
        return None;
    }
    let n = pointers.len() as f32;
    let (sx, sy) = pointers
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(TouchPoint::new(sx / n, sy / n))
}

fn pair_angle_deg(pointers: &[TouchPoint]) -> Option<f32> {
    if pointers.len() < 2 {
        return None;
    }
    let (a, b) = (pointers[0], pointers[1]);
    Some((b.y - a.y).atan2(b.x - a.x).to_degrees())
}

fn pair_span(pointers: &[TouchPoint]) -> Option<f32> {
    if pointers.len() < 2 {
        return None;
    }
    Some(distance(pointers[0], pointers[1]))
}

fn distance(a: TouchPoint, b: TouchPoint) -> f32 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

fn normalize_angle_deg(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a < -180.0 {
        a += 360.0;
    }
    a
}
