// Hand-authored keyframe timelines for section transitions.
//
// A timeline is an ordered list of time-boxed segments sharing one playhead.
// Segments may overlap via negative start offsets; each segment writes the
// axes it owns every tick, in declaration order, so a later overlapping
// segment wins on shared axes.

use glam::Vec3;

/// Easing curves used by the transition timelines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    /// Quadratic ease-in-out.
    QuadInOut,
    /// Quartic ease-in-out.
    QuartInOut,
}

impl Ease {
    /// Evaluate the curve at normalized time `t`, clamped to [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::QuartInOut => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
        }
    }
}

/// Which mutable position tuple a segment writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Track {
    Camera,
    Model,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SegmentState {
    Pending,
    Active,
    Done,
}

/// One time-boxed interpolation inside a timeline.
///
/// Axes left as `None` are untouched. Start values are captured on the first
/// tick at or after `start`, so an overlapping segment picks up whatever an
/// earlier segment has already written.
#[derive(Clone, Debug)]
struct Segment {
    track: Track,
    to: [Option<f32>; 3],
    duration: f32,
    ease: Ease,
    start: f32,
    from: [f32; 3],
    state: SegmentState,
}

/// An ordered set of segments with a shared playhead.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    segments: Vec<Segment>,
    playhead: f32,
    cursor_end: f32,
    announced: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment starting when the previous one ends, shifted by
    /// `offset` seconds. Negative offsets overlap the previous segment.
    pub fn to(
        mut self,
        track: Track,
        to: [Option<f32>; 3],
        duration: f32,
        ease: Ease,
        offset: f32,
    ) -> Self {
        let start = (self.cursor_end + offset).max(0.0);
        self.cursor_end = start + duration;
        self.segments.push(Segment {
            track,
            to,
            duration,
            ease,
            start,
            from: [0.0; 3],
            state: SegmentState::Pending,
        });
        self
    }

    /// Total run time: the latest segment end.
    pub fn duration(&self) -> f32 {
        self.segments
            .iter()
            .map(|s| s.start + s.duration)
            .fold(0.0, f32::max)
    }

    pub fn playhead(&self) -> f32 {
        self.playhead
    }

    /// True once every segment has completed.
    pub fn is_complete(&self) -> bool {
        self.segments.iter().all(|s| s.state == SegmentState::Done)
    }

    /// Advance the playhead by `dt`, writing interpolated axes into the two
    /// tuples.
    ///
    /// Returns true on the tick the last-declared segment completes; that is
    /// the timeline's completion signal. Earlier segments with later end
    /// times keep interpolating on subsequent calls until [`is_complete`]
    /// reports true.
    ///
    /// [`is_complete`]: Timeline::is_complete
    pub fn advance(&mut self, dt: f32, camera: &mut Vec3, model: &mut Vec3) -> bool {
        self.playhead += dt.max(0.0);
        for seg in &mut self.segments {
            if seg.state == SegmentState::Done || self.playhead < seg.start {
                continue;
            }
            let target: &mut Vec3 = match seg.track {
                Track::Camera => camera,
                Track::Model => model,
            };
            if seg.state == SegmentState::Pending {
                seg.from = target.to_array();
                seg.state = SegmentState::Active;
            }
            let t = if seg.duration <= 0.0 {
                1.0
            } else {
                ((self.playhead - seg.start) / seg.duration).min(1.0)
            };
            let k = seg.ease.apply(t);
            let mut out = target.to_array();
            for axis in 0..3 {
                if let Some(end) = seg.to[axis] {
                    out[axis] = seg.from[axis] + (end - seg.from[axis]) * k;
                }
            }
            *target = Vec3::from_array(out);
            if t >= 1.0 {
                seg.state = SegmentState::Done;
            }
        }
        let final_done = self
            .segments
            .last()
            .map_or(true, |s| s.state == SegmentState::Done);
        if final_done && !self.announced {
            self.announced = true;
            return true;
        }
        false
    }
}
