//! Keyframe curves and the timeline the launch writes into.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::TRANSLATE_ATTRIBUTES;
use crate::trajectory::TrajectorySample;

/// Animated scalar attribute of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    TranslateX,
    TranslateY,
    TranslateZ,
}

impl Channel {
    pub const TRANSLATE: [Channel; 3] = [Channel::TranslateX, Channel::TranslateY, Channel::TranslateZ];

    pub fn attribute_name(&self) -> &'static str {
        match self {
            Channel::TranslateX => TRANSLATE_ATTRIBUTES[0],
            Channel::TranslateY => TRANSLATE_ATTRIBUTES[1],
            Channel::TranslateZ => TRANSLATE_ATTRIBUTES[2],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TangentKind {
    Linear,
    Step,
    /// Smooth ease between neighbouring keys
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub frame: i64,
    pub value: f64,
    pub in_tangent: TangentKind,
    pub out_tangent: TangentKind,
}

impl Keyframe {
    pub fn linear(frame: i64, value: f64) -> Self {
        Self {
            frame,
            value,
            in_tangent: TangentKind::Linear,
            out_tangent: TangentKind::Linear,
        }
    }
}

/// Keys of a single channel, sorted by frame with at most one key per frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationCurve {
    keys: Vec<Keyframe>,
}

impl AnimationCurve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Inserts a key, replacing any key already on that frame.
    pub fn set_key(&mut self, key: Keyframe) {
        match self.keys.binary_search_by_key(&key.frame, |k| k.frame) {
            Ok(idx) => self.keys[idx] = key,
            Err(idx) => self.keys.insert(idx, key),
        }
    }

    /// Sets the tangents of every key in `[start, end]`.
    pub fn set_tangents(&mut self, start: i64, end: i64, in_tangent: TangentKind, out_tangent: TangentKind) {
        for key in self.keys.iter_mut().filter(|k| k.frame >= start && k.frame <= end) {
            key.in_tangent = in_tangent;
            key.out_tangent = out_tangent;
        }
    }

    /// Value of the curve at `frame`, held constant outside the keyed range.
    pub fn evaluate(&self, frame: f64) -> Option<f64> {
        let first = self.keys.first()?;
        let last = self.keys.last()?;

        if frame <= first.frame as f64 {
            return Some(first.value);
        }
        if frame >= last.frame as f64 {
            return Some(last.value);
        }

        // First key strictly after `frame`; guaranteed to exist and not be the first key
        let idx = self.keys.partition_point(|k| (k.frame as f64) <= frame);
        let k0 = &self.keys[idx - 1];
        let k1 = &self.keys[idx];

        let span = (k1.frame - k0.frame) as f64;
        let s = (frame - k0.frame as f64) / span;

        let value = match (k0.out_tangent, k1.in_tangent) {
            (TangentKind::Step, _) => k0.value,
            (TangentKind::Linear, TangentKind::Linear) => k0.value + s * (k1.value - k0.value),
            _ => {
                // smoothstep
                let w = s * s * (3.0 - 2.0 * s);
                k0.value + w * (k1.value - k0.value)
            }
        };
        Some(value)
    }
}

/// Inclusive frame range played back by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackRange {
    pub min_frame: i64,
    pub max_frame: i64,
}

/// Write access to the host's animation curves.
pub trait AnimationWriter {
    fn curve(&self, object: &str, channel: Channel) -> Option<&AnimationCurve>;
    /// Replaces the curve; `None` removes all keys of the channel.
    fn set_curve(&mut self, object: &str, channel: Channel, curve: Option<AnimationCurve>);
    fn playback_range(&self) -> Option<PlaybackRange>;
    fn set_playback_range(&mut self, range: Option<PlaybackRange>);
}

/// In-memory animation timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    curves: BTreeMap<String, BTreeMap<Channel, AnimationCurve>>,
    playback_range: Option<PlaybackRange>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluated translate channels of `object` at `frame`.
    pub fn translation_at(&self, object: &str, frame: f64) -> Option<[f64; 3]> {
        let mut out = [0.0; 3];
        for (slot, channel) in out.iter_mut().zip(Channel::TRANSLATE) {
            *slot = self.curve(object, channel)?.evaluate(frame)?;
        }
        Some(out)
    }
}

impl AnimationWriter for Timeline {
    fn curve(&self, object: &str, channel: Channel) -> Option<&AnimationCurve> {
        self.curves.get(object)?.get(&channel)
    }

    fn set_curve(&mut self, object: &str, channel: Channel, curve: Option<AnimationCurve>) {
        match curve {
            Some(curve) => {
                self.curves.entry(object.to_string()).or_default().insert(channel, curve);
            }
            None => {
                if let Some(channels) = self.curves.get_mut(object) {
                    channels.remove(&channel);
                    if channels.is_empty() {
                        self.curves.remove(object);
                    }
                }
            }
        }
    }

    fn playback_range(&self) -> Option<PlaybackRange> {
        self.playback_range
    }

    fn set_playback_range(&mut self, range: Option<PlaybackRange>) {
        self.playback_range = range;
    }
}

/// Keys `samples` onto the translate channels of `object`.
///
/// Existing keys on those channels are discarded, every key gets linear
/// tangents and playback is set to the keyed range. Returns the range, or
/// `None` when there is nothing to key.
pub fn write_trajectory<W: AnimationWriter + ?Sized>(
    writer: &mut W,
    object: &str,
    samples: &[TrajectorySample],
) -> Option<PlaybackRange> {
    let (first, last) = (samples.first()?, samples.last()?);

    for (axis, channel) in Channel::TRANSLATE.into_iter().enumerate() {
        let mut curve = AnimationCurve::new();
        for sample in samples {
            curve.set_key(Keyframe::linear(sample.frame, sample.position[axis]));
        }
        curve.set_tangents(first.frame, last.frame, TangentKind::Linear, TangentKind::Linear);
        writer.set_curve(object, channel, Some(curve));
    }

    let range = PlaybackRange {
        min_frame: first.frame,
        max_frame: last.frame,
    };
    writer.set_playback_range(Some(range));

    log::debug!(
        "Keyed {} frames on {}.{{{}}}",
        samples.len(),
        object,
        Channel::TRANSLATE.map(|c| c.attribute_name()).join(",")
    );

    Some(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn curve(keys: &[(i64, f64)]) -> AnimationCurve {
        let mut curve = AnimationCurve::new();
        for &(frame, value) in keys {
            curve.set_key(Keyframe::linear(frame, value));
        }
        curve
    }

    #[test]
    fn test_keys_stay_sorted_and_unique() {
        let mut c = curve(&[(10, 1.0), (1, 0.0), (5, 3.0)]);
        c.set_key(Keyframe::linear(5, 4.0));
        let frames: Vec<i64> = c.keys().iter().map(|k| k.frame).collect();
        assert_eq!(frames, vec![1, 5, 10]);
        assert_eq!(c.keys()[1].value, 4.0);
    }

    #[test]
    fn test_linear_evaluation_and_clamping() {
        let c = curve(&[(0, 0.0), (10, 5.0), (20, -5.0)]);
        assert_eq!(c.evaluate(-3.0), Some(0.0));
        assert_relative_eq!(c.evaluate(4.0).unwrap(), 2.0);
        assert_relative_eq!(c.evaluate(10.0).unwrap(), 5.0);
        assert_relative_eq!(c.evaluate(15.0).unwrap(), 0.0);
        assert_eq!(c.evaluate(99.0), Some(-5.0));
        assert_eq!(AnimationCurve::new().evaluate(1.0), None);
    }

    #[test]
    fn test_step_and_auto_tangents() {
        let mut c = curve(&[(0, 0.0), (10, 10.0)]);
        c.set_tangents(0, 10, TangentKind::Step, TangentKind::Step);
        assert_eq!(c.evaluate(9.0), Some(0.0));

        c.set_tangents(0, 10, TangentKind::Auto, TangentKind::Auto);
        assert_relative_eq!(c.evaluate(5.0).unwrap(), 5.0);
        assert!(c.evaluate(2.0).unwrap() < 2.0);
    }

    #[test]
    fn test_write_trajectory_replaces_existing_keys() {
        let mut timeline = Timeline::new();
        timeline.set_curve("camera1", Channel::TranslateX, Some(curve(&[(100, 42.0), (200, 43.0)])));

        let samples: Vec<TrajectorySample> = (0..3)
            .map(|i| TrajectorySample {
                frame: 5 + i,
                time_seconds: i as f64,
                position: Vector3::new(i as f64, 2.0 * i as f64, -(i as f64)),
            })
            .collect();

        let range = write_trajectory(&mut timeline, "camera1", &samples).unwrap();
        assert_eq!(range, PlaybackRange { min_frame: 5, max_frame: 7 });
        assert_eq!(timeline.playback_range(), Some(range));

        for channel in Channel::TRANSLATE {
            let c = timeline.curve("camera1", channel).unwrap();
            assert_eq!(c.len(), 3);
            assert!(c
                .keys()
                .iter()
                .all(|k| k.in_tangent == TangentKind::Linear && k.out_tangent == TangentKind::Linear));
        }
        assert_eq!(timeline.translation_at("camera1", 6.5), Some([1.5, 3.0, -1.5]));
        assert!(write_trajectory(&mut timeline, "camera1", &[]).is_none());
    }

    #[test]
    fn test_removing_last_curve_drops_object() {
        let mut timeline = Timeline::new();
        timeline.set_curve("cam", Channel::TranslateY, Some(curve(&[(0, 1.0)])));
        timeline.set_curve("cam", Channel::TranslateY, None);
        assert_eq!(timeline, Timeline::new());
    }
}
