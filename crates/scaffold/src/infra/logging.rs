//! Process-wide log output in the `[<timestamp>]: <message>` shape.

use std::fmt;

use anyhow::{Result, anyhow};
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event formatter writing the timestamp in brackets followed by the event fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampedFormat;

impl<S, N> FormatEvent<S, N> for TimestampedFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "[{}]: ", timestamp())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Local wall-clock time, falling back to UTC when the offset is unknown.
fn timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second],[subsecond digits:3]"
    ))
    .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

/// Install the stdout subscriber. Call once at process start.
pub fn init(quiet: bool) -> Result<()> {
    let level = if quiet { Level::WARN } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_max_level(level)
        .with_ansi(false)
        .event_format(TimestampedFormat)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}
