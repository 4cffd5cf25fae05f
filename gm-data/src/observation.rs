use crate::{continent::Continent, error::DatasetError};
use anyhow::Context;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

/// Header of the packaged Gapminder CSV.
pub const CSV_HEADER: [&str; 8] = [
    "country",
    "continent",
    "year",
    "lifeExp",
    "pop",
    "gdpPercap",
    "iso_alpha",
    "iso_num",
];

/// Minimum number of columns in a data row. Extra trailing columns (such as
/// the exported quartile label) are ignored.
pub const CSV_ROW_LENGTH: usize = CSV_HEADER.len();

/// One country/year observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub country: String,
    pub continent: Continent,
    pub year: i32,
    /// Life expectancy at birth, in years.
    pub life_exp: f64,
    pub pop: u64,
    /// GDP per capita, inflation-adjusted US dollars.
    pub gdp_percap: f64,
    /// ISO 3166-1 alpha-3 code, e.g. "AFG".
    pub iso_alpha: String,
    /// ISO 3166-1 numeric code, e.g. 4 for Afghanistan.
    pub iso_num: u16,
}

impl Observation {
    /// Parse a Gapminder CSV (with header) into observations.
    ///
    /// Any malformed row fails the whole parse; the error names the row.
    pub fn parse_csv(csv_data: &str) -> anyhow::Result<Vec<Observation>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut observations = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.with_context(|| format!("Failed to read CSV row {}", idx + 1))?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            let observation = Observation::from_record(&record, idx + 1)?;
            observations.push(observation);
        }
        log::info!("[GM] observation: parsed {} observations", observations.len());
        Ok(observations)
    }

    fn from_record(record: &StringRecord, row: usize) -> Result<Observation, DatasetError> {
        if record.len() < CSV_ROW_LENGTH {
            return Err(DatasetError::InvalidRow {
                row,
                reason: format!("expected {} columns, found {}", CSV_ROW_LENGTH, record.len()),
            });
        }
        let field = |i: usize| record.get(i).unwrap_or("").trim();
        let invalid = |name: &str, value: &str| DatasetError::InvalidRow {
            row,
            reason: format!("invalid {}: {:?}", name, value),
        };

        let country = field(0);
        if country.is_empty() {
            return Err(invalid("country", country));
        }
        let continent: Continent = field(1).parse().map_err(|e: DatasetError| {
            DatasetError::InvalidRow {
                row,
                reason: e.to_string(),
            }
        })?;
        // Finite and non-negative; "NaN", "inf" and "-1" all parse as f64.
        let measure = |i: usize, name: &str| -> Result<f64, DatasetError> {
            match field(i).parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
                _ => Err(invalid(name, field(i))),
            }
        };

        let year = field(2).parse::<i32>().map_err(|_| invalid("year", field(2)))?;
        let life_exp = measure(3, "lifeExp")?;
        let pop = field(4).parse::<u64>().map_err(|_| invalid("pop", field(4)))?;
        let gdp_percap = measure(5, "gdpPercap")?;
        let iso_num = field(7)
            .parse::<u16>()
            .map_err(|_| invalid("iso_num", field(7)))?;

        Ok(Observation {
            country: country.to_string(),
            continent,
            year,
            life_exp,
            pop,
            gdp_percap,
            iso_alpha: field(6).to_string(),
            iso_num,
        })
    }

    /// The CSV fields of this observation, in [`CSV_HEADER`] order.
    pub fn to_record(&self) -> [String; 8] {
        [
            self.country.clone(),
            self.continent.to_string(),
            self.year.to_string(),
            self.life_exp.to_string(),
            self.pop.to_string(),
            self.gdp_percap.to_string(),
            self.iso_alpha.clone(),
            self.iso_num.to_string(),
        ]
    }

    /// ISO numeric code as the zero-padded three-digit id used by world-atlas maps.
    pub fn iso_num_padded(&self) -> String {
        format!("{:03}", self.iso_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num
Afghanistan,Asia,1952,28.801,8425333,779.4453145,AFG,4
Afghanistan,Asia,1957,30.332,9240934,820.8530296,AFG,4
Albania,Europe,1952,55.23,1282697,1601.056136,ALB,8
"#;

    #[test]
    fn test_parse_csv() {
        let observations = Observation::parse_csv(SAMPLE).unwrap();
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].country, "Afghanistan");
        assert_eq!(observations[0].continent, Continent::Asia);
        assert_eq!(observations[0].year, 1952);
        assert_eq!(observations[0].pop, 8425333);
        assert_eq!(observations[2].iso_alpha, "ALB");
        assert_eq!(observations[2].iso_num, 8);
    }

    #[test]
    fn test_parse_csv_reports_bad_row() {
        let bad = "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n\
                   Afghanistan,Asia,1952,28.801,8425333,779.4,AFG,4\n\
                   Albania,Europe,nineteen,55.23,1282697,1601.0,ALB,8\n";
        let err = Observation::parse_csv(bad).unwrap_err();
        let dataset_err = err.downcast_ref::<DatasetError>().unwrap();
        match dataset_err {
            DatasetError::InvalidRow { row, reason } => {
                assert_eq!(*row, 2);
                assert!(reason.contains("year"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_csv_rejects_unknown_continent() {
        let bad = "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n\
                   Atlantis,Atlantic,1952,28.8,100,779.4,ATL,999\n";
        let err = Observation::parse_csv(bad).unwrap_err();
        assert!(err.to_string().contains("Atlantic"));
    }

    #[test]
    fn test_parse_csv_rejects_short_row() {
        let bad = "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n\
                   Afghanistan,Asia,1952\n";
        assert!(Observation::parse_csv(bad).is_err());
    }

    #[test]
    fn test_record_round_trip() {
        let observations = Observation::parse_csv(SAMPLE).unwrap();
        let record = observations[0].to_record();
        assert_eq!(record[0], "Afghanistan");
        assert_eq!(record[3], "28.801");
        assert_eq!(record[5], "779.4453145");
        assert_eq!(observations[0].iso_num_padded(), "004");
    }

    #[test]
    fn test_non_finite_and_negative_measures_rejected() {
        let header = "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n";
        for row in [
            "Afghanistan,Asia,1952,28.801,8425333,NaN,AFG,4",
            "Afghanistan,Asia,1952,28.801,8425333,inf,AFG,4",
            "Afghanistan,Asia,1952,-infinity,8425333,779.44,AFG,4",
            "Afghanistan,Asia,1952,28.801,8425333,-779.44,AFG,4",
            "Afghanistan,Asia,1952,28.801,-8425333,779.44,AFG,4",
        ] {
            let csv = format!("{}{}\n", header, row);
            let err = Observation::parse_csv(&csv).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<DatasetError>(),
                    Some(DatasetError::InvalidRow { row: 1, .. })
                ),
                "{}: {:#}",
                row,
                err
            );
        }
    }
}
