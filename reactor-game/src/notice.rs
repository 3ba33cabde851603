//! User-visible messages emitted by the state machines.
//!
//! The core never renders text. It hands out an i18n key plus named
//! arguments and lets the front-end translate.
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Failure,
}

impl Tone {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Neutral => "notice-neutral",
            Self::Success => "notice-success",
            Self::Failure => "notice-failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub key: &'static str,
    pub tone: Tone,
    pub args: Vec<(&'static str, String)>,
}

impl Notice {
    #[must_use]
    pub const fn new(key: &'static str, tone: Tone) -> Self {
        Self {
            key,
            tone,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub const fn neutral(key: &'static str) -> Self {
        Self::new(key, Tone::Neutral)
    }

    #[must_use]
    pub const fn success(key: &'static str) -> Self {
        Self::new(key, Tone::Success)
    }

    #[must_use]
    pub const fn failure(key: &'static str) -> Self {
        Self::new(key, Tone::Failure)
    }

    #[must_use]
    pub fn with_arg(mut self, name: &'static str, value: impl ToString) -> Self {
        self.args.push((name, value.to_string()));
        self
    }

    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find_map(|(key, value)| (*key == name).then_some(value.as_str()))
    }
}
