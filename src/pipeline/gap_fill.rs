// Resampling to one row per second: missing seconds become synthetic rows with no sample.

use chrono::FixedOffset;

use super::clock::LabelStyle;
use crate::models::Channel;

/// Longest hole we are willing to fill. Wider holes come from corrupt clocks and
/// would otherwise allocate millions of rows; they are bridged without synthesis.
pub const MAX_FILLED_GAP_SECS: i64 = 86_400;

/// One Time Axis position: a real sample, or a synthetic null row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot<'a, T> {
    pub at: i64,
    pub sample: Option<&'a T>,
}

/// Walks `items` in order and emits one slot per elapsed second.
///
/// Items without a time are skipped. With `start`, items earlier than it are discarded
/// and the axis begins at `start` itself, so the first retained item is padded back to it.
/// A gap of zero or less (clock skew) synthesizes nothing.
pub fn fill_gaps<'a, T, F>(items: &'a [T], time_of: F, start: Option<i64>) -> Vec<Slot<'a, T>>
where
    F: Fn(&T) -> Option<i64>,
{
    let mut slots = Vec::with_capacity(items.len());
    // a virtual row just before `start` makes the first real row pad back to `start`
    let mut prev: Option<i64> = start.map(|s| s - 1);
    for item in items {
        let Some(at) = time_of(item) else {
            continue;
        };
        if let Some(lower) = start
            && at < lower
        {
            continue;
        }
        if let Some(p) = prev {
            let gap = at - p;
            if gap > 1 && gap <= MAX_FILLED_GAP_SECS {
                slots.extend((p + 1..at).map(|t| Slot { at: t, sample: None }));
            } else if gap > MAX_FILLED_GAP_SECS {
                tracing::warn!(from = p, to = at, "gap too wide to fill; bridging without nulls");
            }
        }
        slots.push(Slot {
            at,
            sample: Some(item),
        });
        prev = Some(at);
    }
    slots
}

/// Labels for each slot.
pub fn axis<T>(slots: &[Slot<'_, T>], style: LabelStyle, offset: FixedOffset) -> Vec<String> {
    slots.iter().map(|s| style.format(s.at, offset)).collect()
}

/// Sanitized value per slot; synthetic slots are null.
pub fn channel<T, F>(slots: &[Slot<'_, T>], value: F) -> Channel
where
    F: Fn(&T) -> Option<f64>,
{
    slots.iter().map(|s| s.sample.and_then(&value)).collect()
}
