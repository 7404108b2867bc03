//! Configuration validation.
//!
//! Rejects values the schedule engine cannot represent meaningfully. Clock
//! text in entries is not checked here, and entry brightness read from disk is
//! clamped by [`clamp_entry_brightness`] before validation runs.

use anyhow::Result;

use super::Config;
use crate::constants::*;

/// Pull every entry brightness into `0..=100`, warning about each change.
///
/// A NaN brightness becomes 0.
pub fn clamp_entry_brightness(config: &mut Config) {
    for (index, entry) in config.schedule.iter_mut().enumerate() {
        if (MINIMUM_BRIGHTNESS..=MAXIMUM_BRIGHTNESS).contains(&entry.brightness) {
            continue;
        }

        let clamped = if entry.brightness.is_nan() {
            MINIMUM_BRIGHTNESS
        } else {
            entry.brightness.clamp(MINIMUM_BRIGHTNESS, MAXIMUM_BRIGHTNESS)
        };
        log_warning!(
            "Schedule entry {} brightness ({}) is outside {}-{}, using {}",
            index,
            entry.brightness,
            MINIMUM_BRIGHTNESS,
            MAXIMUM_BRIGHTNESS,
            clamped
        );
        entry.brightness = clamped;
    }
}

/// Validate ranges of every configured value.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if config.latitude.is_some() != config.longitude.is_some() {
        anyhow::bail!("latitude and longitude must be configured together");
    }

    if let Some(step) = config.render_step
        && !(MINIMUM_RENDER_STEP..=MAXIMUM_RENDER_STEP).contains(&step)
    {
        anyhow::bail!(
            "render_step ({}) must be between {} and {} minutes",
            step,
            MINIMUM_RENDER_STEP,
            MAXIMUM_RENDER_STEP
        );
    }

    if let Some(secs) = config.clock_refresh_secs
        && !(MINIMUM_CLOCK_REFRESH_SECS..=MAXIMUM_CLOCK_REFRESH_SECS).contains(&secs)
    {
        anyhow::bail!(
            "clock_refresh_secs ({}) must be between {} and {} seconds",
            secs,
            MINIMUM_CLOCK_REFRESH_SECS,
            MAXIMUM_CLOCK_REFRESH_SECS
        );
    }

    for (index, entry) in config.schedule.iter().enumerate() {
        if !(MINIMUM_BRIGHTNESS..=MAXIMUM_BRIGHTNESS).contains(&entry.brightness) {
            anyhow::bail!(
                "schedule entry {} brightness ({}) must be between {} and {}",
                index,
                entry.brightness,
                MINIMUM_BRIGHTNESS,
                MAXIMUM_BRIGHTNESS
            );
        }

        if entry.use_oracle && entry.oracle_key.is_none() && entry.time.is_none() {
            log_warning!(
                "Schedule entry {} is sun-linked without an oracleKey or time; it will sit at {}",
                index,
                FALLBACK_ENTRY_TIME
            );
        }
    }

    Ok(())
}
