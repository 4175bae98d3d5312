// Profile chart: temperature, humidity, pressure and altitude on one axis

use chrono::FixedOffset;

use super::{Timed, channel_data, time_of, timed};
use crate::aggregator::or_default;
use crate::models::{DataKind, ProfileSeries, Sample};
use crate::pipeline::{Bounds, ChannelKind, sanitize};
use crate::pipeline::{LabelStyle, fill_gaps, gap_fill, propagate_segments};
use crate::upstream_repo::UpstreamRepo;

pub fn assemble_profile(
    samples: Vec<Sample>,
    kind: DataKind,
    bounds: Bounds,
    offset: FixedOffset,
) -> ProfileSeries {
    assemble_with_times(samples, kind, bounds, offset).0
}

/// Same as [`assemble_profile`], also returning the epoch second of every axis entry.
pub(crate) fn assemble_with_times(
    samples: Vec<Sample>,
    kind: DataKind,
    bounds: Bounds,
    offset: FixedOffset,
) -> (ProfileSeries, Vec<i64>) {
    let mut rows = timed(samples, offset);
    if kind == DataKind::Qc {
        rows = propagate_segments(rows);
    }
    if rows.is_empty() {
        return (ProfileSeries::empty(kind), Vec::new());
    }
    let slots = fill_gaps(&rows, time_of, None);

    let series = ProfileSeries {
        time: gap_fill::axis(&slots, LabelStyle::Clock, offset),
        temperature: channel_data(&slots, kind, |(_, s): &Timed| {
            sanitize(ChannelKind::Temperature, s.temperature.as_ref())
        }),
        humidity: channel_data(&slots, kind, |(_, s): &Timed| {
            sanitize(bounds.humidity(), s.humidity.as_ref())
        }),
        pressure: channel_data(&slots, kind, |(_, s): &Timed| {
            sanitize(ChannelKind::Pressure, s.pressure.as_ref())
        }),
        altitude: channel_data(&slots, kind, |(_, s): &Timed| {
            sanitize(bounds.altitude(), s.above_sea_level.as_ref())
        }),
        track: slots
            .iter()
            .map(|slot| match slot.sample {
                Some((_, s)) => [
                    sanitize(ChannelKind::Longitude, s.longitude.as_ref()),
                    sanitize(ChannelKind::Latitude, s.latitude.as_ref()),
                ],
                None => [None, None],
            })
            .collect(),
    };
    (series, slots.iter().map(|s| s.at).collect())
}

pub async fn profile(repo: &UpstreamRepo, station: &str, tkyid: &str, kind: DataKind) -> ProfileSeries {
    let samples = or_default(repo.dataset(station, tkyid, kind).await, "dataset");
    assemble_profile(samples, kind, Bounds::PROFILE, repo.offset())
}
