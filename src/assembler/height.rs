// Height chart: the sonde profile plus the fuse device's altitude, aligned on one axis

use chrono::FixedOffset;

use super::profile::assemble_with_times;
use super::{Timed, fuse_samples, time_of, timed};
use crate::aggregator::or_default;
use crate::models::{DataKind, HeightSeries, Sample, pad_channel};
use crate::pipeline::{Bounds, ChannelKind, LabelStyle, fill_gaps, gap_fill, sanitize};
use crate::upstream_repo::UpstreamRepo;

/// Builds the sonde profile, then fills the fuse stream from the sonde's first second
/// (or the flight start when the sonde has no data) so both share index 0.
/// The shorter side is padded with nulls to the longer axis.
pub fn assemble_height(
    sonde: Vec<Sample>,
    fuse: Vec<Sample>,
    kind: DataKind,
    flight_start: Option<i64>,
    offset: FixedOffset,
) -> HeightSeries {
    let (mut profile, mut ats) = assemble_with_times(sonde, kind, Bounds::HEIGHT, offset);
    let origin = ats.first().copied().or(flight_start);

    let fuse_rows = timed(fuse, offset);
    let fuse_slots = fill_gaps(&fuse_rows, time_of, origin);
    let mut fuse_altitude = gap_fill::channel(&fuse_slots, |(_, s): &Timed| {
        sanitize(ChannelKind::FUSE_ALTITUDE, s.above_sea_level.as_ref())
    });

    if fuse_slots.len() > ats.len() {
        ats = fuse_slots.iter().map(|s| s.at).collect();
    }
    let len = ats.len();
    if len == 0 {
        return HeightSeries::empty(kind);
    }
    profile.pad_to(len);
    pad_channel(&mut fuse_altitude, len);
    profile.time = ats
        .iter()
        .map(|&t| LabelStyle::Clock.format(t, offset))
        .collect();

    HeightSeries {
        profile,
        fuse_altitude,
    }
}

/// Sonde dataset and fuse stream are fetched concurrently.
pub async fn height(repo: &UpstreamRepo, station: &str, tkyid: &str, kind: DataKind) -> HeightSeries {
    let (sonde, (fuse_query, fuse)) = tokio::join!(
        repo.dataset(station, tkyid, kind),
        fuse_samples(repo, station, tkyid)
    );
    let sonde = or_default(sonde, "dataset");
    assemble_height(sonde, fuse, kind, fuse_query.window.start, repo.offset())
}
