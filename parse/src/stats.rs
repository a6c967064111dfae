use indexmap::IndexMap;
use isa::Opcode;
use strum::IntoEnumIterator;

use crate::label::Labels;

/// Width of a decorated statistics line.
pub const FANCY_WIDTH: usize = 70;

// ----------------------------------------------------------------------------
// Collected counters

#[derive(Debug, Default, Clone)]
pub struct Stats {
    /// Every line read, blank ones included.
    pub lines: usize,
    pub instruction_lines: usize,
    pub comment_lines: usize,
    pub frequency: IndexMap<Opcode, usize>,
    pub labels: Labels,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&mut self, op: Opcode) {
        *self.frequency.entry(op).or_insert(0) += 1;
    }

    /// Opcodes sharing the highest count, in instruction-set order.
    pub fn most_frequent(&self) -> Option<(Vec<Opcode>, usize)> {
        let max = *self.frequency.values().max()?;
        let ops = Opcode::iter()
            .filter(|op| self.frequency.get(op) == Some(&max))
            .collect();
        Some((ops, max))
    }
}

// ----------------------------------------------------------------------------
// Requested statistics

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatKey {
    Loc,
    Comments,
    Labels,
    Jumps,
    FwJumps,
    BackJumps,
    BadJumps,
    Frequent,
    Print(String),
    Eol,
}

/// Flag names a statistic can be requested with, `print` taking a value.
const FLAGS: [&str; 10] = [
    "loc",
    "comments",
    "labels",
    "jumps",
    "fwjumps",
    "backjumps",
    "badjumps",
    "frequent",
    "print",
    "eol",
];

impl StatKey {
    /// Build a key from its command-line flag name (`loc`, `print`, ...).
    pub fn from_flag(name: &str, value: Option<&str>) -> Option<StatKey> {
        let key = match name {
            "loc" => StatKey::Loc,
            "comments" => StatKey::Comments,
            "labels" => StatKey::Labels,
            "jumps" => StatKey::Jumps,
            "fwjumps" => StatKey::FwJumps,
            "backjumps" => StatKey::BackJumps,
            "badjumps" => StatKey::BadJumps,
            "frequent" => StatKey::Frequent,
            "print" => StatKey::Print(value?.to_string()),
            "eol" => StatKey::Eol,
            _ => return None,
        };
        Some(key)
    }

    pub fn is_flag(name: &str) -> bool {
        FLAGS.contains(&name)
    }

    fn title(&self) -> &'static str {
        match self {
            StatKey::Loc => "Lines with instructions",
            StatKey::Comments => "Lines with comments",
            StatKey::Labels => "Labels",
            StatKey::Jumps => "Total jumps",
            StatKey::FwJumps => "Forward jumps",
            StatKey::BackJumps => "Backward jumps",
            StatKey::BadJumps => "Bad jumps",
            StatKey::Frequent => "Most frequent instructions",
            StatKey::Print(_) | StatKey::Eol => "",
        }
    }

    /// One report line for this key.
    pub fn render(&self, stats: &Stats, fancy: bool) -> String {
        let labels = &stats.labels;
        let value = match self {
            StatKey::Loc => stats.instruction_lines.to_string(),
            StatKey::Comments => stats.comment_lines.to_string(),
            StatKey::Labels => labels.count().to_string(),
            StatKey::Jumps => labels.total().to_string(),
            StatKey::FwJumps => labels.forward().to_string(),
            StatKey::BackJumps => labels.backward().to_string(),
            StatKey::BadJumps => labels.bad().to_string(),
            StatKey::Frequent => match stats.most_frequent() {
                Some((ops, max)) => {
                    let names = ops.iter().map(|op| op.name()).collect::<Vec<_>>().join(",");
                    if fancy {
                        format!("{} {}", names, max)
                    } else {
                        names
                    }
                }
                None => String::new(),
            },
            StatKey::Print(text) => text.clone(),
            StatKey::Eol => String::new(),
        };

        if !fancy {
            return value;
        }
        let title = self.title();
        let pad = FANCY_WIDTH.saturating_sub(title.len() + value.len());
        format!("{}{}{}", title, " ".repeat(pad), value)
    }
}

// ----------------------------------------------------------------------------
// Report

/// Statistics file content for the requested keys.
///
/// `elapsed_ms` only shows up in the fancy header.
pub fn report(keys: &[StatKey], stats: &Stats, fancy: bool, elapsed_ms: f64) -> String {
    let body = keys
        .iter()
        .map(|key| key.render(stats, fancy))
        .collect::<Vec<_>>()
        .join("\n");

    if !fancy {
        return body;
    }

    let rule = "-".repeat(FANCY_WIDTH);
    format!(
        "{} {} for {}  T={:.2} ms ({} lines processed)\n{}\n{}\n{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        isa::LANGUAGE,
        elapsed_ms,
        stats.lines,
        rule,
        body,
        rule
    )
}
