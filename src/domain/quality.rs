use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scan quality as classified on the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanQuality {
    Usable,
    Good,
    Fair,
    Questionable,
    Poor,
    Unusable,
    Undetermined,
}

impl ScanQuality {
    pub const ALL: [ScanQuality; 7] = [
        ScanQuality::Usable,
        ScanQuality::Good,
        ScanQuality::Fair,
        ScanQuality::Questionable,
        ScanQuality::Poor,
        ScanQuality::Unusable,
        ScanQuality::Undetermined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanQuality::Usable => "usable",
            ScanQuality::Good => "good",
            ScanQuality::Fair => "fair",
            ScanQuality::Questionable => "questionable",
            ScanQuality::Poor => "poor",
            ScanQuality::Unusable => "unusable",
            ScanQuality::Undetermined => "undetermined",
        }
    }
}

impl fmt::Display for ScanQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScanQuality::ALL
            .into_iter()
            .find(|quality| quality.as_str() == s)
            .ok_or_else(|| format!("'{}' is not a scan quality", s))
    }
}
