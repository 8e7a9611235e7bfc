use crate::calendar::{build_month_grid, DateBounds, Locale, Selection, ViewMonth};
use crate::data::{BlockedDateData, DemoSettings, Persistable};
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use std::io::Write;

pub fn run(month: &str, plain: bool) -> Result<()> {
    let settings = DemoSettings::load()?;
    let blocked = BlockedDateData::load()?;
    let view = parse_view_month(month)?;
    let bounds = DateBounds {
        min_date: settings.min_date,
        max_date: settings.max_date,
        disabled_dates: blocked.parsed_dates()?,
    };
    let today = Local::now().date_naive();
    let show_weeks = settings.show_week_numbers && !plain;

    let stdout = std::io::stdout();
    write_grid(
        &mut stdout.lock(),
        view,
        today,
        &bounds,
        settings.resolved_locale(),
        show_weeks,
        plain,
    )
}

pub(crate) fn parse_view_month(raw: &str) -> Result<ViewMonth> {
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 2 {
        bail!("expected YYYY-MM, got '{}'", raw);
    }
    let year: i32 = parts[0]
        .parse()
        .with_context(|| format!("bad year in '{}'", raw))?;
    let month: u32 = parts[1]
        .parse()
        .with_context(|| format!("bad month in '{}'", raw))?;
    if !(1..=12).contains(&month) {
        bail!("month must be 01-12, got '{}'", raw);
    }
    Ok(ViewMonth { year, month })
}

/// Prints one month as a text grid. Each cell is the day number plus a
/// marker column: `*` for today, `x` for blocked days.
pub(crate) fn write_grid<W: Write>(
    w: &mut W,
    view: ViewMonth,
    today: NaiveDate,
    bounds: &DateBounds,
    locale: Locale,
    show_weeks: bool,
    plain: bool,
) -> Result<()> {
    let lead = if show_weeks { "   " } else { "" };
    let title = format!("{} {}", locale.month_name(view.month), view.year);
    writeln!(w, "{}{:^21}", lead, title)?;
    writeln!(w, "{}{}", lead, locale.day_labels().join(" "))?;

    let cells = build_month_grid(view, &Selection::Single(None), today, bounds);
    for row in 0..6 {
        let week = &cells[row * 7..row * 7 + 7];
        if !week.iter().any(|c| c.in_current_month) {
            break;
        }
        let mut line = String::new();
        if show_weeks {
            line.push_str(&format!("{:>2} ", week[0].week));
        }
        for cell in week {
            if !cell.in_current_month {
                line.push_str("   ");
                continue;
            }
            let marker = if plain {
                ' '
            } else if cell.is_today {
                '*'
            } else if cell.is_disabled {
                'x'
            } else {
                ' '
            };
            line.push_str(&format!("{:2}{}", cell.day, marker));
        }
        writeln!(w, "{}", line.trim_end())?;
    }

    if !plain {
        writeln!(w)?;
        writeln!(w, "* today  x blocked")?;
    }
    Ok(())
}
