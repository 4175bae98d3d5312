// Normalization pipeline: sanitize, dedupe, gap-fill, split by phase, decimate, merge.
// Pure functions over in-memory data; nothing here touches the network.

pub mod clock;
pub mod decimate;
pub mod dedupe;
pub mod gap_fill;
pub mod merge;
pub mod sanitize;
pub mod segment;

pub use clock::{LabelStyle, sample_time};
pub use decimate::decimate;
pub use dedupe::dedupe_by;
pub use gap_fill::{Slot, fill_gaps};
pub use merge::deep_merge;
pub use sanitize::{Bounds, ChannelKind, sanitize};
pub use segment::{Tagged, propagate_segments, split};
