use std::fmt::Write as _;

use clap::{Parser, ValueEnum};
use tracing::instrument;
use wedcard::{
    Config, PageState, WeddingPage,
    domain::{Palette, WeddingRecord, select_theme},
    page::CountdownStatus,
};

use super::{
    Target, open_page,
    terminal::{Colorize, is_narrow},
};

/// Command arguments for `wedcard show`.
#[derive(Debug, Default, Parser)]
#[command(about = "Resolve a wedding page and print it")]
pub struct Show {
    #[command(flatten)]
    target: Target,

    /// Output format (default: pretty).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// Output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip(self, config))]
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let page = open_page(config, &self.target).await?;

        match self.output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&page.view())?);
            }
            OutputFormat::Pretty => {
                let themes = config.themes();
                let palette = page.record().and_then(|r| select_theme(&themes, r));
                print!("{}", render(&page, palette, is_narrow()));
            }
        }

        if let PageState::Error(message) = page.state() {
            anyhow::bail!("{message}");
        }
        Ok(())
    }
}

/// Renders the page for a terminal.
fn render(page: &WeddingPage, palette: Option<&Palette>, narrow: bool) -> String {
    let mut out = String::new();

    match page.state() {
        PageState::Loading => {
            let _ = writeln!(out, "{}", "Loading...".dim());
            return out;
        }
        PageState::Error(message) => {
            let _ = writeln!(out, "{}", message.warning());
        }
        PageState::Ready => {}
    }

    let Some(record) = page.record() else {
        return out;
    };

    write_header(&mut out, record, palette);
    if let Some(countdown) = page.countdown() {
        write_countdown(&mut out, &countdown.current());
    }
    write_story(&mut out, record, palette);
    write_schedule(&mut out, record, palette, narrow);

    if let Some(provenance) = page.model().provenance() {
        let footer = format!("Source: {provenance} · Theme: {}", record.theme);
        let _ = writeln!(out, "\n{}", footer.dim());
    }
    out
}

fn write_header(out: &mut String, record: &WeddingRecord, palette: Option<&Palette>) {
    let _ = writeln!(out, "{}", record.couple().accent(palette));
    let _ = writeln!(out, "{}", record.formatted_date());
    let _ = writeln!(out, "{} · {}", record.venue_name, record.venue_location);
}

fn write_countdown(out: &mut String, status: &CountdownStatus) {
    if status.started {
        let _ = writeln!(out, "\n{}", "The celebration has begun!".success());
        return;
    }
    let b = status.breakdown;
    // Under a day out, the countdown is hidden.
    if b.is_displayable() {
        let _ = writeln!(
            out,
            "\n{} days  {:02} hours  {:02} minutes  {:02} seconds",
            b.days, b.hours, b.minutes, b.seconds
        );
    }
}

fn write_story(out: &mut String, record: &WeddingRecord, palette: Option<&Palette>) {
    if !record.their_story.is_empty() {
        let _ = writeln!(out, "\n{}", "Our Story".accent(palette));
        let _ = writeln!(out, "{}", record.their_story);
    }

    for moment in &record.story_timeline {
        let _ = writeln!(out, "  {}  {}", moment.year.accent(palette), moment.title);
        if !moment.description.is_empty() {
            let _ = writeln!(out, "        {}", moment.description.dim());
        }
    }
}

fn write_schedule(
    out: &mut String,
    record: &WeddingRecord,
    palette: Option<&Palette>,
    narrow: bool,
) {
    if record.schedule_events.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", "Schedule".accent(palette));

    for entry in &record.schedule_events {
        let marker = if entry.highlight { "*" } else { " " };
        let duration = if entry.duration.is_empty() {
            String::new()
        } else {
            format!(" ({})", entry.duration)
        };

        if narrow {
            let _ = writeln!(out, "{marker} {}", entry.time);
            let _ = writeln!(out, "  {}{duration}", entry.title);
        } else {
            let _ = writeln!(out, "{marker} {:>8}  {}{duration}", entry.time, entry.title);
        }
        if !entry.location.is_empty() {
            let _ = writeln!(out, "  {}", entry.location.dim());
        }
    }
}
