// Record lists for client-side charting, keyed by kind

use chrono::FixedOffset;
use futures_util::future::join_all;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

use super::fuse_samples;
use crate::aggregator::or_default;
use crate::models::{DataKind, ProfileRecord, Sample};
use crate::pipeline::clock::epoch_seconds;
use crate::pipeline::{LabelStyle, dedupe_by, sample_time};
use crate::upstream_repo::UpstreamRepo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartDataKind {
    SondeRaw,
    Sonde,
    Fuse,
}

impl ChartDataKind {
    pub const ALL: [ChartDataKind; 3] = [Self::SondeRaw, Self::Sonde, Self::Fuse];

    pub fn key(self) -> &'static str {
        match self {
            Self::SondeRaw => "sondeRaw",
            Self::Sonde => "sonde",
            Self::Fuse => "fuse",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == s)
    }
}

/// Kinds named in a comma list, in request order without repeats.
/// An absent or blank list means every kind; unknown names are skipped.
pub fn requested_kinds(res_type: Option<&str>) -> Vec<ChartDataKind> {
    let raw = res_type.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return ChartDataKind::ALL.to_vec();
    }
    let mut kinds: Vec<ChartDataKind> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match ChartDataKind::parse(name) {
            Some(kind) if !kinds.contains(&kind) => kinds.push(kind),
            Some(_) => {}
            None => warn!(res_type = name, "unknown chart data kind ignored"),
        }
    }
    kinds
}

/// Sonde samples reduced to the profile fields, first sample per `seconds` value.
pub fn profile_records(samples: Vec<Sample>) -> Vec<ProfileRecord> {
    let unique = dedupe_by(samples, |s: &Sample| s.seconds.as_ref().and_then(epoch_seconds));
    unique.into_iter().map(ProfileRecord::from).collect()
}

/// Fuse samples ordered by time, with `timeStamp` rewritten as a `YYYY-MM-DD HH:mm:ss`
/// label and one record per label. Samples without a usable time are dropped.
pub fn fuse_records(samples: Vec<Sample>, offset: FixedOffset) -> Vec<Sample> {
    let mut rows: Vec<(i64, Sample)> = samples
        .into_iter()
        .filter_map(|s| sample_time(&s, offset).map(|t| (t, s)))
        .collect();
    rows.sort_by_key(|(t, _)| *t);
    let labelled = rows
        .into_iter()
        .map(|(t, mut s)| {
            s.time_stamp = Some(Value::String(LabelStyle::DateTime.format(t, offset)));
            s
        })
        .collect();
    dedupe_by(labelled, |s: &Sample| s.time_stamp.clone().map(|v| v.to_string()))
}

fn to_records<T: Serialize>(records: Vec<T>) -> Value {
    serde_json::to_value(records).unwrap_or_else(|e| {
        warn!(error = %e, "chart data records not serializable");
        Value::Array(Vec::new())
    })
}

async fn records_for(repo: &UpstreamRepo, station: &str, tkyid: &str, kind: ChartDataKind) -> Value {
    match kind {
        ChartDataKind::SondeRaw => {
            let samples = or_default(repo.dataset(station, tkyid, DataKind::Raw).await, "dataset");
            to_records(profile_records(samples))
        }
        ChartDataKind::Sonde => {
            let samples = or_default(repo.dataset(station, tkyid, DataKind::Qc).await, "dataset");
            to_records(profile_records(samples))
        }
        ChartDataKind::Fuse => {
            let (_, samples) = fuse_samples(repo, station, tkyid).await;
            to_records(fuse_records(samples, repo.offset()))
        }
    }
}

/// Requested kinds are fetched concurrently; a failed kind yields an empty list.
pub async fn chart_data(
    repo: &UpstreamRepo,
    station: &str,
    tkyid: &str,
    kinds: Vec<ChartDataKind>,
) -> BTreeMap<&'static str, Value> {
    let jobs = kinds
        .into_iter()
        .map(|kind| async move { (kind.key(), records_for(repo, station, tkyid, kind).await) });
    join_all(jobs).await.into_iter().collect()
}
