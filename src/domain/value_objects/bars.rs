//! Token bar binding tables

use serde::{Deserialize, Serialize};

/// Number of value bars on a token
pub const BAR_COUNT: usize = 3;

/// Which attribute feeds one token bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarSource {
    pub attribute: String,
    /// The attribute is a gauge (`current`/`max`); only gauges are snapshot in mook mode
    #[serde(default)]
    pub with_max: bool,
}

impl BarSource {
    pub fn value(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            with_max: false,
        }
    }

    pub fn gauge(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            with_max: true,
        }
    }
}

/// Sources for bar 1, 2 and 3. An absent entry leaves that bar untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarTable {
    pub bars: [Option<BarSource>; BAR_COUNT],
}

impl BarTable {
    pub fn new(bar1: Option<BarSource>, bar2: Option<BarSource>, bar3: Option<BarSource>) -> Self {
        Self {
            bars: [bar1, bar2, bar3],
        }
    }

    /// Bars with a source, numbered from 1
    pub fn entries(&self) -> impl Iterator<Item = (u8, &BarSource)> {
        self.bars
            .iter()
            .zip(1u8..)
            .filter_map(|(source, number)| source.as_ref().map(|s| (number, s)))
    }
}

/// How a bar ended up bound to its attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BarBinding {
    /// Live reference to the attribute object
    Linked { attribute_id: String },
    /// One-time copy of the attribute values
    Snapshot { current: String, max: String },
}

/// Outcome for one bar of a link request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarOutcome {
    pub bar: u8,
    pub attribute: String,
    /// `None` when the attribute was missing and the bar was skipped
    pub binding: Option<BarBinding>,
}

/// Result of a link request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSummary {
    pub mook: bool,
    pub bars: Vec<BarOutcome>,
}

impl LinkSummary {
    pub fn bound(&self) -> impl Iterator<Item = &BarOutcome> {
        self.bars.iter().filter(|b| b.binding.is_some())
    }

    #[cfg(test)]
    pub fn outcome(&self, bar: u8) -> Option<&BarOutcome> {
        self.bars.iter().find(|b| b.bar == bar)
    }
}
