// Domain models: upstream records, flight metadata, assembled series, request bodies

mod request;
mod sample;
mod series;
mod sonde;

pub use request::{ChartDataRequest, ChartRequest, Consumer, DataKind, ExportQuery, HistoryRequest};
pub use sample::{ProfileRecord, Sample, Segment};
pub use series::{
    Channel, ChannelData, Coordinate, DeviceHealthSeries, HeightSeries, ProfileSeries,
    StationTrack, pad_channel,
};
pub use sonde::{
    FlightInfo, FlightWindow, FuseQuery, StationSonde, Threshold, manufacturer_name,
    threshold_for,
};
