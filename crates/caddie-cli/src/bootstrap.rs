use anyhow::Context;
use caddie_config::CaddieConfig;

/// Load `.env`, layer the config sources and reject unusable values.
pub fn load_config() -> anyhow::Result<CaddieConfig> {
    let config = CaddieConfig::load_with_dotenv().context("failed to load caddie configuration")?;
    config.validate().context("invalid caddie configuration")?;
    tracing::debug!(
        tile_size = config.map.tile_size,
        contour_points = config.chart.contour_points,
        flip_offline_sign = config.ingest.flip_offline_sign,
        "configuration loaded"
    );
    Ok(config)
}
