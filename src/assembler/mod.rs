// Series assemblers: one per request type. Each pairs a pure `assemble_*` function
// (in-memory samples to chart-ready series) with an async wrapper that fetches.

pub mod chart_data;
pub mod device;
pub mod height;
pub mod history;
pub mod profile;

use chrono::FixedOffset;

use crate::aggregator::or_default;
use crate::models::{ChannelData, DataKind, FuseQuery, Sample};
use crate::pipeline::{Slot, dedupe_by, gap_fill, sample_time, split};
use crate::upstream_repo::UpstreamRepo;

pub use chart_data::{ChartDataKind, chart_data, requested_kinds};
pub use device::{assemble_device_health, device_health};
pub use height::{assemble_height, height};
pub use history::{history_lines, parse_stations, station_track};
pub use profile::{assemble_profile, profile};

/// A sample paired with its epoch second.
pub(crate) type Timed = (i64, Sample);

/// Resolves each sample's time, drops those without one, keeps the first sample
/// of every second, and orders the rest by time. Gap filling relies on the order.
pub(crate) fn timed(samples: Vec<Sample>, offset: FixedOffset) -> Vec<Timed> {
    let rows = samples
        .into_iter()
        .filter_map(|s| sample_time(&s, offset).map(|t| (t, s)))
        .collect();
    let mut rows = dedupe_by(rows, |(t, _): &Timed| *t);
    rows.sort_by_key(|(t, _)| *t);
    rows
}

pub(crate) fn time_of(row: &Timed) -> Option<i64> {
    Some(row.0)
}

/// Flat channel for raw data, `[ascent, level, descent]` for QC data.
pub(crate) fn channel_data<F>(slots: &[Slot<'_, Timed>], kind: DataKind, value: F) -> ChannelData
where
    F: Fn(&Timed) -> Option<f64>,
{
    match kind {
        DataKind::Raw => ChannelData::Flat(gap_fill::channel(slots, value)),
        DataKind::Qc => ChannelData::Segmented(split(slots, value)),
    }
}

/// Fuse-device samples of one flight. The fuse code and the flight window are looked
/// up concurrently; any failed lookup leaves the query incomplete and yields no samples.
pub async fn fuse_samples(repo: &UpstreamRepo, station: &str, tkyid: &str) -> (FuseQuery, Vec<Sample>) {
    let (fuse_id, flight) = tokio::join!(repo.fuse_id(tkyid), repo.flight_info(station, tkyid));
    let query = FuseQuery {
        sonde_code: or_default(fuse_id, "fuse_id"),
        window: or_default(flight, "flight_info").window,
    };
    let samples = or_default(repo.sounding_messages(&query).await, "sounding_messages");
    (query, samples)
}
