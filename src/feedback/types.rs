use serde::Serialize;

use crate::scoring::{Verdict, VerdictClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    Verdict,
    MatchedConcepts,
    MissingConcepts,
    Phrasing,
    NoAnswer,
}

/// One line of feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub kind: ObservationKind,
    pub message: String,
}

impl Observation {
    pub fn new(kind: ObservationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Non-fatal condition attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Semantic scoring was skipped; the verdict rests on lexical evidence only.
    DegradedMode { reason: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::DegradedMode { reason } => {
                write!(f, "semantic scoring unavailable ({reason}); verdict is lexical only")
            }
        }
    }
}

/// Verdict plus human-readable explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    verdict: Verdict,
    observations: Vec<Observation>,
    warnings: Vec<Warning>,
}

impl Feedback {
    pub fn new(verdict: Verdict, observations: Vec<Observation>) -> Self {
        Self {
            verdict,
            observations,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: Warning) -> Self {
        self.warnings.push(warning);
        self
    }

    #[inline]
    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    #[inline]
    pub fn class(&self) -> VerdictClass {
        self.verdict.class()
    }

    #[inline]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    #[inline]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_degraded(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, Warning::DegradedMode { .. }))
    }

    /// Concepts the answer covered; empty when the question declares none.
    pub fn matched_concepts(&self) -> &[String] {
        self.verdict
            .coverage()
            .map(|c| c.matched.as_slice())
            .unwrap_or_default()
    }

    pub fn missing_concepts(&self) -> &[String] {
        self.verdict
            .coverage()
            .map(|c| c.missing.as_slice())
            .unwrap_or_default()
    }

    /// Returns the first observation of `kind`.
    pub fn observation(&self, kind: ObservationKind) -> Option<&str> {
        self.observations
            .iter()
            .find(|o| o.kind == kind)
            .map(|o| o.message.as_str())
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lines = self.observations.iter().map(|o| o.message.as_str());
        if let Some(first) = lines.next() {
            f.write_str(first)?;
        }
        for line in lines {
            write!(f, "\n{line}")?;
        }
        for warning in &self.warnings {
            write!(f, "\nWarning: {warning}")?;
        }
        Ok(())
    }
}
