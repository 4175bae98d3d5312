// Flight-phase splitting: one channel becomes [ascent, level, descent] on the same axis.

use super::gap_fill::Slot;
use crate::models::{Channel, Sample, Segment};

/// Anything carrying a flight-phase tag.
pub trait Tagged {
    fn segment(&self) -> Option<Segment>;
    fn set_segment(&mut self, segment: Option<Segment>);
}

impl Tagged for Sample {
    fn segment(&self) -> Option<Segment> {
        self.segment
    }

    fn set_segment(&mut self, segment: Option<Segment>) {
        self.segment = segment;
    }
}

impl<K> Tagged for (K, Sample) {
    fn segment(&self) -> Option<Segment> {
        self.1.segment
    }

    fn set_segment(&mut self, segment: Option<Segment>) {
        self.1.segment = segment;
    }
}

/// Untagged items inherit the previous item's tag. Items still untagged afterwards
/// (the leading run before the first tag) are dropped.
pub fn propagate_segments<T: Tagged>(items: Vec<T>) -> Vec<T> {
    let mut last = None;
    items
        .into_iter()
        .filter_map(|mut item| {
            match item.segment() {
                Some(seg) => last = Some(seg),
                None => item.set_segment(last),
            }
            item.segment().map(|_| item)
        })
        .collect()
}

/// Fans one channel into three. Each real slot puts its value in its phase's
/// sub-channel and null in the other two; synthetic slots are null in all three.
pub fn split<T, F>(slots: &[Slot<'_, T>], value: F) -> [Channel; 3]
where
    T: Tagged,
    F: Fn(&T) -> Option<f64>,
{
    let mut parts: [Channel; 3] = [
        Vec::with_capacity(slots.len()),
        Vec::with_capacity(slots.len()),
        Vec::with_capacity(slots.len()),
    ];
    for slot in slots {
        let placed = slot
            .sample
            .and_then(|s| s.segment().map(|seg| (seg.index(), value(s))));
        for (i, part) in parts.iter_mut().enumerate() {
            part.push(match placed {
                Some((idx, v)) if idx == i => v,
                _ => None,
            });
        }
    }
    parts
}
