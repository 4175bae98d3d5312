// Multi-station history map: latest flight per station plus its thinned track

use serde_json::{Map, Value};

use crate::aggregator::aggregate;
use crate::models::{Coordinate, DataKind, Sample, StationSonde, StationTrack};
use crate::pipeline::{ChannelKind, decimate, deep_merge, sanitize};
use crate::upstream_repo::UpstreamRepo;

/// Splits `"id1,id2"` into trimmed, non-empty station ids.
pub fn parse_stations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keeps samples with a position and a height, then decimates the positions.
/// `last_time_height` is the height of the last kept sample.
pub fn station_track(samples: Vec<Sample>) -> StationTrack {
    let fixes: Vec<(Coordinate, f64)> = samples
        .iter()
        .filter_map(|s| {
            let lng = sanitize(ChannelKind::Longitude, s.longitude.as_ref())?;
            let lat = sanitize(ChannelKind::Latitude, s.latitude.as_ref())?;
            let height = sanitize(
                ChannelKind::Altitude { ceiling: None },
                s.above_sea_level.as_ref(),
            )?;
            Some(([Some(lng), Some(lat)], height))
        })
        .collect();
    let last_time_height = fixes.last().map(|(_, h)| *h);
    StationTrack {
        lnglat: decimate(fixes.into_iter().map(|(p, _)| p).collect()),
        last_time_height,
    }
}

/// Station id to `{...StationSonde, lnglat, lastTimeHeight}`.
///
/// Summaries are fetched for every station first; tracks are then fetched only for
/// stations whose summary names both a station number and a sonde. Every requested
/// station appears in the result, with default fields where something failed.
pub async fn history_lines(
    repo: &UpstreamRepo,
    stations: Vec<String>,
) -> serde_json::Result<Map<String, Value>> {
    let summaries = aggregate(
        stations.clone(),
        |station: &String| Some(station.clone()),
        |station| async move { repo.latest_station_sonde(&station).await },
    )
    .await;

    let flights: Vec<(String, StationSonde)> = summaries
        .iter()
        .map(|(station, sonde)| (station.clone(), sonde.clone()))
        .collect();
    let tracks = aggregate(
        flights,
        |(station, sonde): &(String, StationSonde)| {
            (!sonde.station_num.is_empty() && !sonde.tkyid.is_empty()).then(|| station.clone())
        },
        |(_, sonde)| async move {
            repo.dataset(&sonde.station_num, &sonde.tkyid, DataKind::Raw)
                .await
                .map(station_track)
        },
    )
    .await;

    let mut merged = Map::new();
    for (station, sonde) in summaries {
        merged.insert(station, serde_json::to_value(sonde)?);
    }
    let mut track_map = Map::new();
    for station in stations {
        let track: StationTrack = tracks.get(&station).cloned().unwrap_or_default();
        track_map.insert(station, serde_json::to_value(track)?);
    }
    deep_merge(&mut merged, track_map);
    Ok(merged)
}
