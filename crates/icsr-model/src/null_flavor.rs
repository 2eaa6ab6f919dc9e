use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reason code standing in for a deliberately absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NullFlavor {
    /// No information.
    Ni,
    /// Masked.
    Msk,
    /// Asked but unknown.
    Asku,
    /// Not asked.
    Nask,
    /// Unknown.
    Unk,
    /// Not applicable.
    Na,
    /// Negative infinity.
    Ninf,
    /// Positive infinity.
    Pinf,
}

impl NullFlavor {
    pub const ALL: [NullFlavor; 8] = [
        NullFlavor::Ni,
        NullFlavor::Msk,
        NullFlavor::Asku,
        NullFlavor::Nask,
        NullFlavor::Unk,
        NullFlavor::Na,
        NullFlavor::Ninf,
        NullFlavor::Pinf,
    ];

    pub fn code(self) -> &'static str {
        match self {
            NullFlavor::Ni => "NI",
            NullFlavor::Msk => "MSK",
            NullFlavor::Asku => "ASKU",
            NullFlavor::Nask => "NASK",
            NullFlavor::Unk => "UNK",
            NullFlavor::Na => "NA",
            NullFlavor::Ninf => "NINF",
            NullFlavor::Pinf => "PINF",
        }
    }
}

impl fmt::Display for NullFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for NullFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NullFlavor::ALL
            .into_iter()
            .find(|flavor| flavor.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown null flavor: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_str() {
        for flavor in NullFlavor::ALL {
            assert_eq!(flavor.code().parse::<NullFlavor>(), Ok(flavor));
        }
        assert_eq!("asku".parse::<NullFlavor>(), Ok(NullFlavor::Asku));
        assert!("NOPE".parse::<NullFlavor>().is_err());
    }

    #[test]
    fn serializes_as_upper_case_code() {
        let json = serde_json::to_string(&NullFlavor::Nask).unwrap();
        assert_eq!(json, "\"NASK\"");
    }
}
