//! # CAP weight tables
//!
//! The weighting stage consumes a plain-text table in the CAP `weights.dat` layout: one row
//! per station, the station identifier followed by the epicentral distance and five
//! per-component weights (body-wave Z/R, then surface-wave Z/R/T). Extra trailing columns
//! (static time shifts, ...) are tolerated and ignored.
//!
//! A component weight of zero means "exclude this trace from the inversion".

use std::fs;
use std::path::Path;

use nom::{
    bytes::complete::take_while1,
    character::complete::multispace1,
    number::complete::double,
    sequence::preceded,
    IResult, Parser,
};

use crate::constants::{GridmtHashMap, StationId};
use crate::gridmt_errors::GridmtError;

/// Per-station CAP weights, one column per window/component combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapWeights {
    /// Epicentral distance column (km), carried through but not interpreted here
    pub distance: f64,
    /// Body-wave vertical weight
    pub body_z: f64,
    /// Body-wave radial weight
    pub body_r: f64,
    /// Surface-wave vertical weight
    pub surface_z: f64,
    /// Surface-wave radial weight
    pub surface_r: f64,
    /// Surface-wave transverse weight
    pub surface_t: f64,
}

/// Station identifier → CAP weights.
pub type WeightTable = GridmtHashMap<StationId, CapWeights>;

fn parse_station_id(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace()).parse(input)
}

fn parse_weight_line(input: &str) -> IResult<&str, (&str, CapWeights)> {
    let (input, id) = parse_station_id(input)?;
    let (input, distance) = preceded(multispace1, double).parse(input)?;
    let (input, body_z) = preceded(multispace1, double).parse(input)?;
    let (input, body_r) = preceded(multispace1, double).parse(input)?;
    let (input, surface_z) = preceded(multispace1, double).parse(input)?;
    let (input, surface_r) = preceded(multispace1, double).parse(input)?;
    let (input, surface_t) = preceded(multispace1, double).parse(input)?;

    Ok((
        input,
        (
            id,
            CapWeights {
                distance,
                body_z,
                body_r,
                surface_z,
                surface_r,
                surface_t,
            },
        ),
    ))
}

/// Parse a CAP weight file into a [`WeightTable`].
///
/// Lines beginning with `#` and blank lines are ignored. Rows with fewer than six numeric
/// columns fail with [`GridmtError::WeightFileParsing`].
pub fn parse_weight_file(path: &Path) -> Result<WeightTable, GridmtError> {
    let contents = fs::read_to_string(path)?;
    let mut table = WeightTable::default();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (_, (id, weights)) = parse_weight_line(line)
            .map_err(|_| GridmtError::WeightFileParsing(line.to_string()))?;
        table.insert(id.to_string(), weights);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight_line() {
        let line = "AK.SAW.  78.4  1 1  1 1 0   0.0  0.0";
        let (_, (id, w)) = parse_weight_line(line).unwrap();
        assert_eq!(id, "AK.SAW.");
        assert_eq!(w.distance, 78.4);
        assert_eq!(w.body_z, 1.0);
        assert_eq!(w.surface_t, 0.0);
    }

    #[test]
    fn test_parse_weight_file() {
        let path = std::env::temp_dir().join("gridmt_test_weights.dat");
        std::fs::write(
            &path,
            "# station dist bwZ bwR swZ swR swT\n\
             AK.SAW.    78  1 1 1 1 0\n\
             II.KDAK.00 440 0 0 1 1 1  2.5 -1.0\n\n",
        )
        .unwrap();

        let table = parse_weight_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 2);
        assert_eq!(table["AK.SAW."].surface_t, 0.0);
        assert_eq!(table["II.KDAK.00"].body_z, 0.0);
        assert_eq!(table["II.KDAK.00"].surface_r, 1.0);
    }

    #[test]
    fn test_parse_weight_file_short_row() {
        let path = std::env::temp_dir().join("gridmt_test_weights_short.dat");
        std::fs::write(&path, "AK.SAW. 78 1 1\n").unwrap();
        let result = parse_weight_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(GridmtError::WeightFileParsing(_))));
    }
}
