// Series assemblers, pure and against the mock upstream

mod common;

use chrono::FixedOffset;
use serde_json::{Value, json};

use common::{FAILING_STATION, STATION, TKYID, repo, samples, spawn_upstream};
use sondeglue::assembler::chart_data::{fuse_records, profile_records};
use sondeglue::assembler::{
    ChartDataKind, assemble_device_health, assemble_height, assemble_profile, chart_data,
    device_health, height, profile, requested_kinds,
};
use sondeglue::models::{ChannelData, DataKind, Threshold};
use sondeglue::pipeline::Bounds;

fn utc8() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

#[test]
fn test_profile_raw_scenario() {
    let series = assemble_profile(
        samples(vec![
            json!({ "seconds": 100, "temperature": 20 }),
            json!({ "seconds": 103, "temperature": 22 }),
        ]),
        DataKind::Raw,
        Bounds::PROFILE,
        utc8(),
    );
    assert_eq!(series.time.len(), 4);
    assert_eq!(
        series.temperature,
        ChannelData::Flat(vec![Some(20.0), None, None, Some(22.0)])
    );
    assert_eq!(series.track, vec![[None, None]; 4]);
    assert_eq!(series.altitude.len(), 4);
}

#[test]
fn test_profile_dedupes_before_filling() {
    let series = assemble_profile(
        samples(vec![
            json!({ "seconds": 5, "pressure": 900 }),
            json!({ "seconds": 5, "pressure": 800 }),
            json!({ "seconds": 6, "pressure": 850 }),
        ]),
        DataKind::Raw,
        Bounds::PROFILE,
        utc8(),
    );
    assert_eq!(series.pressure, ChannelData::Flat(vec![Some(900.0), Some(850.0)]));
}

#[test]
fn test_profile_orders_unsorted_rows() {
    let series = assemble_profile(
        samples(vec![
            json!({ "seconds": 100, "temperature": 20 }),
            json!({ "seconds": 103, "temperature": 23 }),
            json!({ "seconds": 101, "temperature": 21 }),
        ]),
        DataKind::Raw,
        Bounds::PROFILE,
        utc8(),
    );
    assert_eq!(series.time, vec!["08:01:40", "08:01:41", "08:01:42", "08:01:43"]);
    assert_eq!(
        series.temperature,
        ChannelData::Flat(vec![Some(20.0), Some(21.0), None, Some(23.0)])
    );
}

#[test]
fn test_profile_qc_splits_by_phase() {
    let series = assemble_profile(
        serde_json::from_value(common::qc_fixture()).unwrap(),
        DataKind::Qc,
        Bounds::PROFILE,
        utc8(),
    );
    assert_eq!(
        series.time,
        vec!["08:01:40", "08:01:41", "08:01:42", "08:01:43", "08:01:44"]
    );
    assert_eq!(
        series.temperature,
        ChannelData::Segmented([
            vec![Some(20.0), None, None, Some(22.0), None],
            vec![None; 5],
            vec![None, None, None, None, Some(-5.0)],
        ])
    );
    // 110% is above the profile ceiling
    assert_eq!(
        series.humidity,
        ChannelData::Segmented([
            vec![Some(50.0), None, None, None, None],
            vec![None; 5],
            vec![None; 5],
        ])
    );
    assert_eq!(series.track[0], [Some(116.1), Some(39.9)]);
    assert_eq!(series.track[3], [None, None]);
}

#[test]
fn test_empty_input_keeps_shape() {
    let qc = assemble_profile(Vec::new(), DataKind::Qc, Bounds::PROFILE, utc8());
    assert!(qc.time.is_empty());
    assert!(matches!(qc.pressure, ChannelData::Segmented(_)));
    let raw = assemble_profile(Vec::new(), DataKind::Raw, Bounds::PROFILE, utc8());
    assert!(matches!(raw.pressure, ChannelData::Flat(_)));
    let device = assemble_device_health(Vec::new(), Threshold::default(), utc8());
    assert!(device.time.is_empty() && device.battery_voltage.is_empty());
}

#[test]
fn test_height_aligns_fuse_to_sonde_start() {
    let sonde = samples(vec![
        json!({ "seconds": 100, "aboveSeaLevel": 10 }),
        json!({ "seconds": 102, "aboveSeaLevel": 30 }),
    ]);
    let fuse = samples(vec![
        json!({ "timeStamp": "1970-01-01 08:01:45", "aboveSeaLevel": 60 }),
        json!({ "timeStamp": "1970-01-01 08:01:39", "aboveSeaLevel": 5 }),
        json!({ "timeStamp": "1970-01-01 08:01:41", "aboveSeaLevel": 20 }),
    ]);
    let series = assemble_height(sonde, fuse, DataKind::Raw, Some(90), utc8());
    assert_eq!(series.profile.time.len(), 6);
    assert_eq!(series.profile.time[0], "08:01:40");
    assert_eq!(series.profile.time[5], "08:01:45");
    assert_eq!(
        series.profile.altitude,
        ChannelData::Flat(vec![Some(10.0), None, Some(30.0), None, None, None])
    );
    assert_eq!(
        series.fuse_altitude,
        vec![None, Some(20.0), None, None, None, Some(60.0)]
    );
}

#[test]
fn test_height_without_sonde_uses_flight_start() {
    let fuse = samples(vec![json!({ "timeStamp": "1970-01-01 08:01:42", "aboveSeaLevel": 42000 })]);
    let series = assemble_height(Vec::new(), fuse, DataKind::Qc, Some(100), utc8());
    assert_eq!(series.profile.time.len(), 3);
    assert_eq!(series.fuse_altitude, vec![None, None, None]);
    assert_eq!(series.profile.altitude.len(), 3);
    assert_eq!(series.profile.track.len(), 3);
}

#[test]
fn test_height_with_nothing_is_empty() {
    let series = assemble_height(Vec::new(), Vec::new(), DataKind::Qc, None, utc8());
    assert!(series.profile.time.is_empty());
    assert!(series.fuse_altitude.is_empty());
}

#[test]
fn test_device_health_precisions() {
    let threshold = Threshold {
        max: 4.2,
        normal: 3.7,
        min: 3.3,
    };
    let series = assemble_device_health(
        serde_json::from_value(common::raw_fixture()).unwrap(),
        threshold,
        utc8(),
    );
    assert_eq!(series.time.len(), 3);
    assert_eq!(series.battery_voltage, vec![Some(4.12), None, Some(4.1)]);
    assert_eq!(series.frequency, vec![Some(403.5), None, Some(0.0)]);
    assert_eq!(series.rssi, vec![Some(-80.3), None, None]);
    assert_eq!(series.rising_speed, vec![Some(0.0), None, Some(5.6)]);
    assert_eq!(series.threshold, threshold);
}

#[test]
fn test_device_health_orders_unsorted_rows() {
    let series = assemble_device_health(
        samples(vec![
            json!({ "seconds": 103, "rssi": -83 }),
            json!({ "seconds": 100, "rssi": -80 }),
            json!({ "seconds": 101, "rssi": -81 }),
        ]),
        Threshold::default(),
        utc8(),
    );
    assert_eq!(series.time, vec!["08:01:40", "08:01:41", "08:01:42", "08:01:43"]);
    assert_eq!(series.rssi, vec![Some(-80.0), Some(-81.0), None, Some(-83.0)]);
}

#[test]
fn test_requested_kinds_parsing() {
    assert_eq!(requested_kinds(None), ChartDataKind::ALL.to_vec());
    assert_eq!(requested_kinds(Some("  ")), ChartDataKind::ALL.to_vec());
    assert_eq!(
        requested_kinds(Some("fuse, bogus,sonde,fuse")),
        vec![ChartDataKind::Fuse, ChartDataKind::Sonde]
    );
    assert!(requested_kinds(Some("bogus")).is_empty());
}

#[test]
fn test_profile_records_dedupe_on_seconds() {
    let records = profile_records(serde_json::from_value(common::qc_fixture()).unwrap());
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].temperature, Some(json!("20.04")));
}

#[test]
fn test_fuse_records_sorted_labelled_and_unique() {
    let records = fuse_records(
        samples(vec![
            json!({ "timeStamp": "1970-01-01 08:01:44", "aboveSeaLevel": 2 }),
            json!({ "timeStamp": "1970-01-01T00:01:41Z", "aboveSeaLevel": 1 }),
            json!({ "timeStamp": "1970-01-01 08:01:41", "aboveSeaLevel": 9 }),
            json!({ "aboveSeaLevel": 3 }),
        ]),
        utc8(),
    );
    let stamps: Vec<Value> = records.iter().filter_map(|r| r.time_stamp.clone()).collect();
    assert_eq!(stamps, vec![json!("1970-01-01 08:01:41"), json!("1970-01-01 08:01:44")]);
    assert_eq!(records[0].above_sea_level, Some(json!(1)));
}

#[tokio::test]
async fn test_profile_fetch_and_failure_default() {
    let base = spawn_upstream().await;
    let repo = repo(&base);
    let ok = profile(&repo, STATION, TKYID, DataKind::Raw).await;
    assert_eq!(ok.time.len(), 3);
    let failed = profile(&repo, FAILING_STATION, TKYID, DataKind::Qc).await;
    assert!(failed.time.is_empty());
    assert!(matches!(failed.temperature, ChannelData::Segmented(_)));
}

#[tokio::test]
async fn test_height_fetches_fuse_stream() {
    let base = spawn_upstream().await;
    let repo = repo(&base);
    let series = height(&repo, STATION, TKYID, DataKind::Qc).await;
    assert_eq!(series.profile.time.len(), 5);
    assert_eq!(series.fuse_altitude, vec![None, Some(120.3), None, None, None]);
    // height consumers accept humidity up to 120
    assert_eq!(
        series.profile.humidity,
        ChannelData::Segmented([
            vec![Some(50.0), None, None, None, None],
            vec![None; 5],
            vec![None, None, None, None, Some(110.0)],
        ])
    );
}

#[tokio::test]
async fn test_device_health_uses_manufacturer_threshold() {
    let base = spawn_upstream().await;
    let repo = repo(&base);
    let series = device_health(&repo, STATION, TKYID).await;
    assert_eq!(series.battery_voltage, vec![Some(4.12), None, Some(4.1)]);
    assert_eq!(series.threshold.max, 4.2);
    let unknown = device_health(&repo, "99999", "X").await;
    assert_eq!(unknown.threshold, Threshold::default());
    assert!(unknown.time.is_empty());
}

#[tokio::test]
async fn test_chart_data_by_kind() {
    let base = spawn_upstream().await;
    let repo = repo(&base);
    let data = chart_data(&repo, STATION, TKYID, ChartDataKind::ALL.to_vec()).await;
    assert_eq!(data.len(), 3);
    assert_eq!(data["sondeRaw"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["sonde"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        data["fuse"],
        json!([
            { "timeStamp": "1970-01-01 08:01:41", "aboveSeaLevel": "120.25" },
            { "timeStamp": "1970-01-01 08:01:44", "aboveSeaLevel": 50000 }
        ])
    );
}
