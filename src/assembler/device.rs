// Device-health chart: battery, frequency, rssi and rising speed of the sonde itself

use chrono::FixedOffset;

use super::{Timed, time_of, timed};
use crate::aggregator::or_default;
use crate::models::{DataKind, DeviceHealthSeries, Sample, Threshold, threshold_for};
use crate::pipeline::{ChannelKind, LabelStyle, fill_gaps, gap_fill, sanitize};
use crate::upstream_repo::UpstreamRepo;

pub fn assemble_device_health(
    samples: Vec<Sample>,
    threshold: Threshold,
    offset: FixedOffset,
) -> DeviceHealthSeries {
    let rows = timed(samples, offset);
    if rows.is_empty() {
        return DeviceHealthSeries::empty(threshold);
    }
    let slots = fill_gaps(&rows, time_of, None);
    DeviceHealthSeries {
        time: gap_fill::axis(&slots, LabelStyle::Clock, offset),
        battery_voltage: gap_fill::channel(&slots, |(_, s): &Timed| {
            sanitize(ChannelKind::Generic { precision: 2 }, s.battery_vol.as_ref())
        }),
        frequency: gap_fill::channel(&slots, |(_, s): &Timed| {
            sanitize(ChannelKind::Generic { precision: 3 }, s.freqz.as_ref())
        }),
        rssi: gap_fill::channel(&slots, |(_, s): &Timed| {
            sanitize(ChannelKind::Generic { precision: 1 }, s.rssi.as_ref())
        }),
        rising_speed: gap_fill::channel(&slots, |(_, s): &Timed| {
            sanitize(ChannelKind::Generic { precision: 1 }, s.raising_speed.as_ref())
        }),
        threshold,
    }
}

/// Raw samples and the flight's manufacturer are fetched concurrently.
pub async fn device_health(repo: &UpstreamRepo, station: &str, tkyid: &str) -> DeviceHealthSeries {
    let (samples, flight) = tokio::join!(
        repo.dataset(station, tkyid, DataKind::Raw),
        repo.flight_info(station, tkyid)
    );
    let samples = or_default(samples, "dataset");
    let threshold = threshold_for(or_default(flight, "flight_info").manufacturer_code);
    assemble_device_health(samples, threshold, repo.offset())
}
