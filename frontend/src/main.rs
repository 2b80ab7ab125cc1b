use anyhow::{Context, Result};
use chrono::Datelike;
use log::info;
use std::env;
use std::fmt::Write;
use std::fs;
use std::path::Path;

use memory_calendar::calendar::{BoardDirectory, CalendarAnchor, CalendarController, DayCell};
use memory_calendar::config::CalendarConfig;
use memory_calendar::services::api::StaticEventSource;
use memory_calendar::services::date_utils;
use shared::EventKind;

const DEFAULT_CONFIG_PATH: &str = "calendar.yaml";

/// Usage: memory-calendar [YYYY-MM] [events.json] [calendar.yaml]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    info!("Starting memory calendar");

    let args: Vec<String> = env::args().skip(1).collect();

    let anchor = match args.first() {
        Some(key) => key.parse::<CalendarAnchor>()?,
        None => CalendarAnchor::current(),
    };

    let source = match args.get(1) {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading events from {}", path))?;
            StaticEventSource::from_json(&json).with_context(|| format!("parsing events in {}", path))?
        }
        None => StaticEventSource::default(),
    };

    let config = match args.get(2) {
        Some(path) => CalendarConfig::load(Path::new(path))?,
        None => CalendarConfig::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
    };

    let mut controller = CalendarController::new(config, anchor, date_utils::today());
    controller.load_events(&source).await;

    print!("{}", render_grid(&controller)?);
    print!("{}", render_agenda(&controller, &BoardDirectory::default())?);
    Ok(())
}

fn render_grid(controller: &CalendarController) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{:^28}", controller.title())?;
    writeln!(out, " Su  Mo  Tu  We  Th  Fr  Sa")?;

    for row in controller.visible_rows() {
        for cell in row.cells() {
            match cell {
                DayCell::Blank => out.push_str("    "),
                DayCell::Day(date) => {
                    let marker = if controller.store().events_on(*date).next().is_some() {
                        '*'
                    } else {
                        ' '
                    };
                    write!(out, " {:>2}{}", date.day(), marker)?;
                }
            }
        }
        out.push('\n');
    }
    Ok(out)
}

fn render_agenda(controller: &CalendarController, boards: &BoardDirectory) -> Result<String> {
    let mut out = String::new();
    for date in controller.grid().days() {
        let summary = controller.day_summary(boards, date);
        if summary.is_empty() {
            continue;
        }

        writeln!(out, "\n{}", date_utils::format_date_for_display(date))?;
        for card in &summary.cards {
            let label = match card.kind {
                EventKind::Board => "board",
                EventKind::Match => "match",
            };
            write!(out, "  [{} {}] {}", label, card.start.format("%H:%M"), card.title)?;
            if let Some(status) = card.attendance_status {
                write!(out, " ({})", status)?;
            }
            if card.is_continuation {
                out.push_str(" (continued)");
            }
            out.push('\n');
        }
    }
    Ok(out)
}
