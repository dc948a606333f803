// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

pub const MIN_SKILL: i64 = 0;
pub const MAX_SKILL: i64 = 20;
pub const MIN_THINK_TIME_MS: u64 = 30;
pub const MAX_THINK_TIME_MS: u64 = 3000;

/// Selector difficulty tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Easy,
    Hard,
    VeryHard,
}

impl Level {
    /// Parses a level name leniently: case and surrounding whitespace are
    /// ignored, `-` reads as `_`, and anything unrecognized is `Hard`.
    pub fn from_name(name: &str) -> Level {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "easy" => Level::Easy,
            "very_hard" => Level::VeryHard,
            _ => Level::Hard,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Hard => "hard",
            Level::VeryHard => "very_hard",
        }
    }
}

impl Default for Level {
    fn default() -> Level {
        Level::Hard
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a delegate is allowed to spend on a suggestion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Budget {
    pub skill: u8,
    pub think_time_ms: u64,
}

impl Budget {
    /// The default budget for a level.
    pub fn for_level(level: Level) -> Budget {
        match level {
            Level::Easy => Budget {
                skill: 4,
                think_time_ms: 80,
            },
            Level::Hard => Budget {
                skill: 12,
                think_time_ms: 300,
            },
            Level::VeryHard => Budget {
                skill: 20,
                think_time_ms: 900,
            },
        }
    }

    /// A caller-supplied budget, clamped into the supported range.
    pub fn clamped(skill: i64, think_time_ms: u64) -> Budget {
        Budget {
            skill: skill.max(MIN_SKILL).min(MAX_SKILL) as u8,
            think_time_ms: think_time_ms.max(MIN_THINK_TIME_MS).min(MAX_THINK_TIME_MS),
        }
    }
}

/// Everything a selection call is configured with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelectorConfig {
    pub level: Level,
    pub budget: Budget,
    pub use_delegate: bool,
}

impl SelectorConfig {
    /// The level's default budget, delegate disabled.
    pub fn new(level: Level) -> SelectorConfig {
        SelectorConfig {
            level,
            budget: Budget::for_level(level),
            use_delegate: false,
        }
    }

    /// Overrides either budget knob; missing knobs keep the level default.
    pub fn with_budget(mut self, skill: Option<i64>, think_time_ms: Option<u64>) -> SelectorConfig {
        let defaults = Budget::for_level(self.level);
        self.budget = Budget::clamped(
            skill.unwrap_or(i64::from(defaults.skill)),
            think_time_ms.unwrap_or(defaults.think_time_ms),
        );
        self
    }

    pub fn with_delegate(mut self, use_delegate: bool) -> SelectorConfig {
        self.use_delegate = use_delegate;
        self
    }
}

impl Default for SelectorConfig {
    fn default() -> SelectorConfig {
        SelectorConfig::new(Level::default())
    }
}
