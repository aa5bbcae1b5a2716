use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use std::sync::LazyLock;

#[derive(Clone, Copy)]
enum DayRule {
    Offset(i64),
    Weekday(Weekday),
}

/// Named-day rules, first match wins. "après-demain" must precede
/// "demain", which matches inside it.
static DAY_RULES: LazyLock<Vec<(Regex, DayRule)>> = LazyLock::new(|| {
    [
        (r"(?i)\baprès-demain\b", DayRule::Offset(2)),
        (r"(?i)\bdemain\b", DayRule::Offset(1)),
        (r"(?i)\blundi\b", DayRule::Weekday(Weekday::Mon)),
        (r"(?i)\bmardi\b", DayRule::Weekday(Weekday::Tue)),
        (r"(?i)\bmercredi\b", DayRule::Weekday(Weekday::Wed)),
        (r"(?i)\bjeudi\b", DayRule::Weekday(Weekday::Thu)),
        (r"(?i)\bvendredi\b", DayRule::Weekday(Weekday::Fri)),
        (r"(?i)\bsamedi\b", DayRule::Weekday(Weekday::Sat)),
        (r"(?i)\bdimanche\b", DayRule::Weekday(Weekday::Sun)),
    ]
    .iter()
    .map(|(pattern, rule)| (Regex::new(pattern).unwrap(), *rule))
    .collect()
});

static RELATIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdans\s+(\d+)\s+(jours?|semaines?|mois)\b").unwrap());

static ABSOLUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{4}))?\b").unwrap());

/// Resolve the first French date expression in `text` to a calendar
/// date, relative to `today`. Rules are tried in order: named days,
/// then "dans N jours/semaines/mois", then DD/MM[/YYYY] literals.
/// Returns None when nothing matches, the literal date is invalid, or
/// the resolved date would leave the calendar range.
pub fn resolve_due_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    for (re, rule) in DAY_RULES.iter() {
        if re.is_match(text) {
            return Some(match rule {
                DayRule::Offset(days) => today + Duration::days(*days),
                DayRule::Weekday(target) => next_weekday(today, *target),
            });
        }
    }

    if let Some(caps) = RELATIVE_RE.captures(text) {
        let amount: i64 = caps[1].parse().ok()?;
        let unit = caps[2].to_lowercase();
        // Amounts beyond the calendar range degrade to no-match.
        return if unit.starts_with("jour") {
            checked_days(today, amount)
        } else if unit.starts_with("semaine") {
            checked_days(today, amount.checked_mul(7)?)
        } else {
            add_months(today, u32::try_from(amount).ok()?)
        };
    }

    if let Some(caps) = ABSOLUTE_RE.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = match caps.get(3) {
            Some(m) => m.as_str().parse().ok()?,
            None => today.year(),
        };
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// Next occurrence of `target` strictly after `today`: a weekday named
/// on its own day rolls forward a full week, never resolving to today.
fn next_weekday(today: NaiveDate, target: Weekday) -> NaiveDate {
    let diff = (target.num_days_from_monday() as i64
        - today.weekday().num_days_from_monday() as i64)
        .rem_euclid(7);
    let diff = if diff == 0 { 7 } else { diff };
    today + Duration::days(diff)
}

fn checked_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|d| date.checked_add_signed(d))
}

fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total_months = date.month0().checked_add(months)?;
    let new_year = date.year() + (total_months / 12) as i32;
    let new_month = (total_months % 12) + 1;
    // Clamp day to valid range for the new month
    let max_day = days_in_month(new_year, new_month)?;
    let new_day = date.day().min(max_day);
    NaiveDate::from_ymd_opt(new_year, new_month, new_day)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(
        if month == 12 { year + 1 } else { year },
        if month == 12 { 1 } else { month + 1 },
        1,
    )?
    .pred_opt()
    .map(|d| d.day())
}
