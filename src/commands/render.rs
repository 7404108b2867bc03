//! Render command: the curve sampled across the day.

use anyhow::Result;
use serde::Serialize;

use super::ScheduleSession;
use crate::config::validate_config;
use crate::constants::MINUTES_PER_DAY;
use crate::curve::CircularCurve;
use crate::time_codec::format_time;

const BAR_WIDTH: f64 = 40.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub time: String,
    pub minute: f64,
    pub brightness: f64,
}

/// Sample `curve` every `step` minutes, closing the day at 24:00.
pub fn sample_curve(curve: &CircularCurve, step: u32) -> Vec<Sample> {
    curve
        .samples(step)
        .into_iter()
        .map(|(minute, brightness)| Sample {
            time: if minute >= MINUTES_PER_DAY as f64 {
                "24:00".to_string()
            } else {
                format_time(minute)
            },
            minute,
            brightness,
        })
        .collect()
}

/// Handle the render command.
pub fn handle_render_command(step: Option<u32>, debug_enabled: bool, json: bool) -> Result<()> {
    let session = ScheduleSession::open(debug_enabled)?;

    let mut config = session.config.clone();
    if let Some(step) = step {
        config.render_step = Some(step);
        validate_config(&config)?;
    }

    let samples = sample_curve(&session.controller.curve(), config.render_step());

    if json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
        return Ok(());
    }

    log_block_start!("Brightness every {} minutes:", config.render_step());
    for sample in &samples {
        let filled = (sample.brightness / 100.0 * BAR_WIDTH)
            .round()
            .clamp(0.0, BAR_WIDTH) as usize;
        log_indented!(
            "{}  {:>5.1}%  {}",
            sample.time,
            sample.brightness,
            "▇".repeat(filled)
        );
    }
    log_end!();
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("render - Sample the brightness curve");
    log_block_start!("Usage: brightcurve render [--step N] [--json]");
    log_block_start!("Options:");
    log_indented!("--step, -s N  Minutes between samples (1-720, default from config)");
    log_indented!("--json, -j    Print samples as JSON");
    log_end!();
}
