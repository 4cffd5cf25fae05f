use crate::error::DatasetError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The five Gapminder regions.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Continent {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Continent {
    pub const ALL: [Continent; 5] = [
        Continent::Africa,
        Continent::Americas,
        Continent::Asia,
        Continent::Europe,
        Continent::Oceania,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Americas => "Americas",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::Oceania => "Oceania",
        }
    }

    /// Chart color for this continent, shared by the scatter and sunburst.
    pub fn color(&self) -> &'static str {
        match self {
            Continent::Africa => "#EF553B",
            Continent::Americas => "#00CC96",
            Continent::Asia => "#636EFA",
            Continent::Europe => "#AB63FA",
            Continent::Oceania => "#FFA15A",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Continent {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Continent::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| DatasetError::UnknownContinent(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_continent() {
        assert_eq!("Asia".parse::<Continent>(), Ok(Continent::Asia));
        assert_eq!(" europe ".parse::<Continent>(), Ok(Continent::Europe));
        assert_eq!(
            "Antarctica".parse::<Continent>(),
            Err(DatasetError::UnknownContinent("Antarctica".to_string()))
        );
    }

    #[test]
    fn test_display_round_trip() {
        for continent in Continent::ALL {
            assert_eq!(continent.to_string().parse::<Continent>(), Ok(continent));
        }
    }
}
