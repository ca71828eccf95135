//! Closed enumerations attached to a security report

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Origin system that produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReportSource {
    /// GitHub security advisory feed
    GithubAdvisory,
    /// TLS certificate expiry check
    SslCheck,
    /// npm dependency audit
    NpmAudit,
}

impl ReportSource {
    /// All accepted wire values, in documentation order.
    pub const VALID_VALUES: &'static str = "github-advisory, ssl-check, npm-audit";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GithubAdvisory => "github-advisory",
            Self::SslCheck => "ssl-check",
            Self::NpmAudit => "npm-audit",
        }
    }
}

impl FromStr for ReportSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github-advisory" => Ok(Self::GithubAdvisory),
            "ssl-check" => Ok(Self::SslCheck),
            "npm-audit" => Ok(Self::NpmAudit),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ReportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency rating assigned at creation and never changed afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Moderate,
    Low,
    Info,
}

impl Severity {
    /// All accepted wire values, in documentation order.
    pub const VALID_VALUES: &'static str = "critical, high, moderate, low, info";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
            Self::Info => "info",
        }
    }
}

impl FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "moderate" => Ok(Self::Moderate),
            "low" => Ok(Self::Low),
            "info" => Ok(Self::Info),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Triage state of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Freshly ingested, not yet looked at
    New,
    /// A human has triaged the finding
    Reviewed,
    /// The finding has been dealt with
    Resolved,
}

impl ReportStatus {
    /// All accepted wire values, in documentation order.
    pub const VALID_VALUES: &'static str = "new, reviewed, resolved";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reviewed => "reviewed",
            Self::Resolved => "resolved",
        }
    }

    /// Returns the set of valid target states from the current state.
    ///
    /// ```text
    /// New ──► Reviewed ──► Resolved
    /// ```
    pub fn valid_transitions(&self) -> &[ReportStatus] {
        match self {
            Self::New => &[Self::Reviewed],
            Self::Reviewed => &[Self::Resolved],
            Self::Resolved => &[],
        }
    }

    /// Check whether transitioning to `target` is allowed from the current state.
    pub fn can_transition_to(&self, target: &ReportStatus) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Whether this status represents a terminal (final) state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved)
    }
}

impl FromStr for ReportStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "reviewed" => Ok(Self::Reviewed),
            "resolved" => Ok(Self::Resolved),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
