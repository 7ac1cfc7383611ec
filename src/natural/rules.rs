//! Rule-based prompt interpretation.
//!
//! Recognized phrases are cut out of the prompt as they are parsed;
//! whatever text survives becomes the task title.

use std::sync::LazyLock;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime};
use regex::Regex;

use super::{Command, Interpreter};
use crate::scheduler::goals::GoalSpec;
use crate::store::{Priority, TaskDraft};

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

static BLOCKS_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\bin\s+blocks?\s+of\s+(\d+)\s*(?:minutes?|mins?)?\b"));
static BREAKS_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\bwith\s+(\d+)\s*(?:minutes?|mins?)\s+(?:breaks?|rests?)\b"));
static OVER_DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\b(?:over|across)\s+(?:the\s+)?(?:next\s+)?(\d+)\s+days?\b"));
static THIS_WEEK_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"\b(?:this|next)\s+week\b"));
static AFTER_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\bafter\s+(\d{1,2})(?::(\d{2}))?\s*(am|pm)?\b"));
static BEFORE_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\b(?:before|by)\s+(\d{1,2})(?::(\d{2}))?\s*(am|pm)?\b"));
static AT_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\b(?:at|from)\s+(\d{1,2})(?::(\d{2}))?\s*(am|pm)?\b"));
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\b(?:for\s+)?(\d+)\s*(hours?|hrs?|minutes?|mins?)\b"));
static HALF_HOUR_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"\b(?:for\s+)?half\s+an\s+hour\b"));
static AN_HOUR_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"\b(?:for\s+)?an\s+hour\b"));
static HIGH_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\b(?:high\s+priority|urgent(?:ly)?|important|asap)\b"));
static LOW_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\b(?:low\s+priority|whenever|sometime|no\s+rush)\b"));
static TOMORROW_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"\btomorrow\b"));
static TODAY_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"\btoday\b"));
static FILLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    regex(
        r"^(?:please|can\s+you|remind\s+me\s+to|i\s+need\s+to|i\s+want\s+to|i\s+have\s+to|schedule|add|plan|book|spread|do|go)\s+",
    )
});
static LEAD_CONNECTOR_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"^(?:of|to|a|an|the|some)\s+"));

pub struct RuleBasedInterpreter;

#[async_trait]
impl Interpreter for RuleBasedInterpreter {
    async fn interpret(&self, prompt: &str, today: NaiveDate) -> Result<Vec<Command>> {
        Ok(parse_prompt(prompt, today).into_iter().collect())
    }
}

/// Parse one prompt into at most one command. A blank prompt parses to
/// nothing.
pub fn parse_prompt(prompt: &str, today: NaiveDate) -> Option<Command> {
    let mut text = prompt.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let block_size = take(&BLOCKS_RE, &mut text).and_then(|groups| num(&groups, 0));
    let rest_between = take(&BREAKS_RE, &mut text).and_then(|groups| num(&groups, 0));
    let days = if let Some(groups) = take(&OVER_DAYS_RE, &mut text) {
        num(&groups, 0)
    } else if take(&THIS_WEEK_RE, &mut text).is_some() {
        Some(7)
    } else {
        None
    };

    let earliest_time = take(&AFTER_RE, &mut text).and_then(|groups| clock_time(&groups));
    let latest_time = take(&BEFORE_RE, &mut text).and_then(|groups| clock_time(&groups));
    let start_time = take(&AT_RE, &mut text).and_then(|groups| clock_time(&groups));

    let mut duration = None;
    if let Some(groups) = take(&DURATION_RE, &mut text) {
        if let (Some(amount), Some(unit)) = (num(&groups, 0), groups.get(1).cloned().flatten()) {
            duration = Some(if unit.starts_with('h') { amount * 60 } else { amount });
        }
    } else if take(&HALF_HOUR_RE, &mut text).is_some() {
        duration = Some(30);
    } else if take(&AN_HOUR_RE, &mut text).is_some() {
        duration = Some(60);
    }

    let priority = if take(&HIGH_RE, &mut text).is_some() {
        Priority::High
    } else if take(&LOW_RE, &mut text).is_some() {
        Priority::Low
    } else {
        Priority::Medium
    };

    let date = if take(&TOMORROW_RE, &mut text).is_some() {
        Some(today + Duration::days(1))
    } else if take(&TODAY_RE, &mut text).is_some() {
        Some(today)
    } else {
        None
    };

    let title = tidy_title(&text);

    // Goal phrasing wins: the duration is the total to spread.
    if days.is_some() || block_size.is_some() {
        let start = date.unwrap_or(today);
        let end = start + Duration::days(days.unwrap_or(1) - 1);
        return Some(Command::AddGoal(GoalSpec {
            title,
            total_minutes: duration.unwrap_or(60),
            max_block_size: block_size.unwrap_or(60),
            rest_between: rest_between.unwrap_or(0),
            priority,
            start_date: Some(start),
            end_date: Some(end),
        }));
    }

    Some(Command::AddTask(TaskDraft {
        title,
        duration: duration.unwrap_or(60),
        priority,
        fixed: start_time.is_some(),
        start_time,
        date,
        earliest_time,
        latest_time,
    }))
}

/// Match `re` against the text, cut the match out, and return the
/// capture groups as owned strings.
fn take(re: &Regex, text: &mut String) -> Option<Vec<Option<String>>> {
    let (range, groups) = {
        let caps = re.captures(text)?;
        let whole = caps.get(0).expect("group 0 always present");
        let groups = (1..caps.len())
            .map(|index| caps.get(index).map(|group| group.as_str().to_string()))
            .collect();
        (whole.range(), groups)
    };
    text.replace_range(range, " ");
    Some(groups)
}

fn num(groups: &[Option<String>], index: usize) -> Option<i64> {
    groups.get(index)?.as_ref()?.parse().ok()
}

fn clock_time(groups: &[Option<String>]) -> Option<NaiveTime> {
    let hour: u32 = groups.first()?.as_ref()?.parse().ok()?;
    let minute: u32 = match groups.get(1).and_then(|group| group.as_ref()) {
        Some(raw) => raw.parse().ok()?,
        None => 0,
    };
    let hour = match groups.get(2).and_then(|group| group.as_deref()) {
        Some("pm") if hour < 12 => hour + 12,
        Some("am") if hour == 12 => 0,
        _ => hour,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn strip_fillers(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = FILLER_RE.replace(&current, "");
        let next = LEAD_CONNECTOR_RE.replace(next.trim(), "").trim().to_string();
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn tidy_title(raw: &str) -> String {
    let stripped = strip_fillers(raw);
    let tokens: Vec<&str> = stripped
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.is_empty() {
        return "Untitled task".to_string();
    }
    let joined = tokens.join(" ");
    let mut chars = joined.chars();
    let first = chars.next().expect("non-empty title");
    let mut title: String = first.to_uppercase().collect();
    title.push_str(chars.as_str());
    title
}
