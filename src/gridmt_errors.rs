use thiserror::Error;

use crate::constants::Seconds;

#[derive(Error, Debug)]
pub enum GridmtError {
    #[error("Invalid filter configuration: {0}")]
    InvalidFilterConfig(String),

    #[error("Invalid window configuration: {0}")]
    InvalidWindowConfig(String),

    #[error("Invalid weight configuration: {0}")]
    InvalidWeightConfig(String),

    #[error("Invalid pick configuration: {0}")]
    InvalidPickConfig(String),

    #[error("Pick strategy recognized but not implemented: {0}")]
    UnimplementedPickStrategy(String),

    #[error("Basis convention recognized but not implemented: {0}")]
    UnimplementedConvention(String),

    #[error("Weight file not found at: {0}")]
    WeightFileNotFound(String),

    #[error("Pick file not found at: {0}")]
    PickFileNotFound(String),

    #[error("FK database not found at: {0}")]
    FkDatabaseNotFound(String),

    #[error("Unable to parse weight file line: {0}")]
    WeightFileParsing(String),

    #[error("Unable to parse pick file line: {0}")]
    PickFileParsing(String),

    #[error("Missing station metadata for bundle: {0}")]
    MissingStationMetadata(String),

    #[error("Missing origin metadata for bundle: {0}")]
    MissingOriginMetadata(String),

    #[error("Missing station identifier")]
    MissingStationId,

    #[error("Missing tags on bundle: {0}")]
    MissingTags(String),

    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    #[error("No cached phase picks for station: {0}")]
    PickNotFound(String),

    #[error("No arrival matching any of the requested phases: {0}")]
    ArrivalNotFound(String),

    #[error("SAC header field not found: {0}")]
    SacHeaderNotFound(String),

    #[error("Cut window [{start}, {end}] s falls outside the recorded trace span")]
    CutOutsideTrace { start: Seconds, end: Seconds },

    #[error("Source grid is empty")]
    EmptySourceGrid,

    #[error("Misfit column has wrong length: expected {expected}, got {actual}")]
    MisfitShapeMismatch { expected: usize, actual: usize },

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for GridmtError {
    fn eq(&self, other: &Self) -> bool {
        use GridmtError::*;
        match (self, other) {
            (InvalidFilterConfig(a), InvalidFilterConfig(b)) => a == b,
            (InvalidWindowConfig(a), InvalidWindowConfig(b)) => a == b,
            (InvalidWeightConfig(a), InvalidWeightConfig(b)) => a == b,
            (InvalidPickConfig(a), InvalidPickConfig(b)) => a == b,
            (UnimplementedPickStrategy(a), UnimplementedPickStrategy(b)) => a == b,
            (UnimplementedConvention(a), UnimplementedConvention(b)) => a == b,
            (WeightFileNotFound(a), WeightFileNotFound(b)) => a == b,
            (PickFileNotFound(a), PickFileNotFound(b)) => a == b,
            (FkDatabaseNotFound(a), FkDatabaseNotFound(b)) => a == b,
            (WeightFileParsing(a), WeightFileParsing(b)) => a == b,
            (PickFileParsing(a), PickFileParsing(b)) => a == b,
            (MissingStationMetadata(a), MissingStationMetadata(b)) => a == b,
            (MissingOriginMetadata(a), MissingOriginMetadata(b)) => a == b,
            (MissingTags(a), MissingTags(b)) => a == b,
            (UnknownTag(a), UnknownTag(b)) => a == b,
            (PickNotFound(a), PickNotFound(b)) => a == b,
            (ArrivalNotFound(a), ArrivalNotFound(b)) => a == b,
            (SacHeaderNotFound(a), SacHeaderNotFound(b)) => a == b,
            (
                CutOutsideTrace { start: a1, end: a2 },
                CutOutsideTrace { start: b1, end: b2 },
            ) => a1 == b1 && a2 == b2,
            (
                MisfitShapeMismatch {
                    expected: a1,
                    actual: a2,
                },
                MisfitShapeMismatch {
                    expected: b1,
                    actual: b2,
                },
            ) => a1 == b1 && a2 == b2,

            // Unit variants
            (MissingStationId, MissingStationId) => true,
            (EmptySourceGrid, EmptySourceGrid) => true,

            // Not comparable beyond the variant itself
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
