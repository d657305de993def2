// SPDX-License-Identifier: MIT
// core/report.rs

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug)]
pub struct Finding {
    pub sev: Severity,
    pub code: &'static str,
    pub msg: String,
}

impl Finding {
    pub fn info(code: &'static str, msg: impl Into<String>) -> Self {
        Self {
            sev: Severity::Info,
            code,
            msg: msg.into(),
        }
    }
    pub fn warn(code: &'static str, msg: impl Into<String>) -> Self {
        Self {
            sev: Severity::Warn,
            code,
            msg: msg.into(),
        }
    }
    pub fn err(code: &'static str, msg: impl Into<String>) -> Self {
        Self {
            sev: Severity::Error,
            code,
            msg: msg.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.sev, self.code, self.msg)
    }
}

/// Findings collected by a consistency check.
#[derive(Clone, Debug, Default)]
pub struct VerifyReport {
    pub findings: Vec<Finding>,
}

impl VerifyReport {
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn has_error(&self) -> bool {
        self.findings.iter().any(|f| f.sev == Severity::Error)
    }

    pub fn count(&self, sev: Severity) -> usize {
        self.findings.iter().filter(|f| f.sev == sev).count()
    }

    pub fn first_error(&self) -> Option<&Finding> {
        self.findings.iter().find(|f| f.sev == Severity::Error)
    }

    /// Highest severity present, `None` for an empty report.
    pub fn worst(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.sev).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_severity_ordering() {
        let mut r = VerifyReport::default();
        assert_eq!(r.worst(), None);
        r.push(Finding::info("GRP_OK", "group 0"));
        r.push(Finding::warn("GRP_FREE", "group 1"));
        assert!(!r.has_error());
        assert_eq!(r.worst(), Some(Severity::Warn));

        r.push(Finding::err("GRP_DRIFT", "group 2"));
        assert!(r.has_error());
        assert_eq!(r.first_error().map(|f| f.code), Some("GRP_DRIFT"));
        assert_eq!(r.count(Severity::Info), 1);
    }
}
