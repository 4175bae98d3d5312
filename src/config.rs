use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Root of the telemetry, query and sounding APIs, without trailing slash.
    pub base_url: String,
    /// Full URL of the sounding export endpoint (proxied by /exportsondedata).
    pub export_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

fn default_chart_width() -> u32 {
    950
}

fn default_chart_height() -> u32 {
    300
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Offset applied when turning epoch seconds into axis labels and when reading
    /// zone-less date strings from the query API (stations report local time).
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

fn default_utc_offset_hours() -> i32 {
    8
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Display offset as a chrono zone.
    pub fn display_offset(&self) -> chrono::FixedOffset {
        use chrono::Offset;
        // validate() keeps the offset within +-14h, so this only falls back for unvalidated configs
        chrono::FixedOffset::east_opt(self.display.utc_offset_hours * 3600)
            .unwrap_or_else(|| chrono::Utc.fix())
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.upstream.base_url.starts_with("http://")
                || self.upstream.base_url.starts_with("https://"),
            "upstream.base_url must be an http(s) URL, got {:?}",
            self.upstream.base_url
        );
        anyhow::ensure!(
            self.upstream.export_url.starts_with("http://")
                || self.upstream.export_url.starts_with("https://"),
            "upstream.export_url must be an http(s) URL, got {:?}",
            self.upstream.export_url
        );
        anyhow::ensure!(
            self.upstream.request_timeout_secs > 0,
            "upstream.request_timeout_secs must be > 0, got {}",
            self.upstream.request_timeout_secs
        );
        anyhow::ensure!(
            self.chart.width > 0,
            "chart.width must be > 0, got {}",
            self.chart.width
        );
        anyhow::ensure!(
            self.chart.height > 0,
            "chart.height must be > 0, got {}",
            self.chart.height
        );
        anyhow::ensure!(
            (-14..=14).contains(&self.display.utc_offset_hours),
            "display.utc_offset_hours must be between -14 and 14, got {}",
            self.display.utc_offset_hours
        );
        Ok(())
    }
}
