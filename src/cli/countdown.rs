use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;
use tracing::instrument;
use wedcard::{Config, page::CountdownStatus};

use super::{Target, open_page, terminal::Colorize};

/// Command arguments for `wedcard countdown`.
#[derive(Debug, Parser)]
#[command(about = "Resolve a wedding page and follow its countdown")]
pub struct Countdown {
    #[command(flatten)]
    target: Target,

    /// Stop after printing this many updates.
    #[arg(long, value_name = "N")]
    ticks: Option<u64>,
}

impl Countdown {
    #[instrument(level = "debug", skip(self, config))]
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let page = open_page(config, &self.target).await?;
        let record = page.record().context("no record to count down to")?;

        let Some(status) = page.subscribe_countdown() else {
            anyhow::bail!("'{}' is not a valid wedding date", record.wedding_date);
        };

        println!(
            "Counting down to {} on {}",
            record.couple(),
            record.formatted_date()
        );
        follow(status, self.ticks).await;
        Ok(())
    }
}

/// Prints updates until the event starts, the limit is reached, the clock
/// stops or the user interrupts. Returns the number of lines printed.
async fn follow(mut status: watch::Receiver<CountdownStatus>, limit: Option<u64>) -> u64 {
    let mut printed = 0;
    loop {
        let current = *status.borrow_and_update();
        println!("{}", format_status(&current));
        printed += 1;

        if current.started || limit.is_some_and(|n| printed >= n) {
            return printed;
        }

        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() {
                    return printed;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("Interrupted");
                return printed;
            }
        }
    }
}

fn format_status(status: &CountdownStatus) -> String {
    if status.started {
        return "The celebration has begun!".success();
    }
    let b = status.breakdown;
    format!(
        "{}d {:02}h {:02}m {:02}s",
        b.days, b.hours, b.minutes, b.seconds
    )
}

#[cfg(test)]
mod tests {
    use wedcard::CountdownBreakdown;

    use super::*;

    fn running(seconds: u64) -> CountdownStatus {
        CountdownStatus {
            breakdown: CountdownBreakdown {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds,
            },
            started: false,
        }
    }

    #[test]
    fn formats_remaining_time() {
        assert_eq!(format_status(&running(5)), "2d 03h 04m 05s");
    }

    #[tokio::test]
    async fn stops_at_the_tick_limit() {
        let (_tx, rx) = watch::channel(running(5));
        assert_eq!(follow(rx, Some(1)).await, 1);
    }

    #[tokio::test]
    async fn stops_once_started() {
        let (tx, rx) = watch::channel(running(1));
        tx.send(CountdownStatus {
            started: true,
            ..running(1)
        })
        .unwrap();
        assert_eq!(follow(rx, None).await, 1);
    }

    #[tokio::test]
    async fn stops_when_the_clock_is_dropped() {
        let (tx, rx) = watch::channel(running(9));
        let follower = tokio::spawn(follow(rx, None));
        tx.send(running(8)).unwrap();
        drop(tx);
        assert!(follower.await.unwrap() >= 1);
    }
}
