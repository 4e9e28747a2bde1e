use log::info;
use segment_tracer::config::segments;
use segment_tracer::diagnostics::TraceReport;
use segment_tracer::image::io::{load_grayscale_image, save_overlay, write_json_file};
use segment_tracer::segments::{make_segments_with, LogProgress};
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = segments::load_config(Path::new(&config_path))?;

    let load_start = Instant::now();
    let gray = load_grayscale_image(&config.input)?;
    let load_ms = load_start.elapsed().as_secs_f64() * 1000.0;
    info!(
        "trace_segments loaded {} ({}x{}) in {load_ms:.2} ms",
        config.input.display(),
        gray.width(),
        gray.height()
    );
    let image = gray.as_view();

    let mut progress = LogProgress::every(64);
    let result = make_segments_with(
        &image,
        &config.classifier,
        &config.segments,
        &mut progress,
        &mut (),
    )
    .map_err(|e| e.to_string())?;

    let mut report = TraceReport::from_result(&result, &config.segments);
    report.timings.push("load", load_ms);

    if let Some(path) = &config.output.points_json {
        let fill_start = Instant::now();
        let points = result.fill_points(&config.segments);
        report
            .timings
            .push("fill_points", fill_start.elapsed().as_secs_f64() * 1000.0);
        write_json_file(path, &points)?;
        println!("Saved {} points to {}", points.len(), path.display());
    }

    if let Some(path) = &config.output.overlay_image {
        save_overlay(&image, &result.segments, path)?;
        println!("Saved overlay to {}", path.display());
    }

    write_json_file(&config.output.segments_json, &report)?;
    println!(
        "Saved {} segments to {} (continuations={}, folded={}, too short={})",
        report.segments.len(),
        config.output.segments_json.display(),
        report.stats.lines_created,
        report.stats.points_folded,
        report.stats.lines_too_short
    );

    Ok(())
}

fn usage() -> String {
    "Usage: trace_segments <config.json>".to_string()
}
