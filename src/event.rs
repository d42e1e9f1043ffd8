//! # Event metadata and point-source parameterizations
//!
//! Holds the hypocenter descriptor ([`Origin`]) together with the two point-source
//! parameterizations consumed by the grid-search engine: [`MomentTensor`] (six independent
//! elements) and [`Force`] (three elements).
//!
//! Moment tensors and forces are internally represented in the `up-south-east` (USE) basis
//! convention. Constructors accepting another convention fail explicitly rather than converting
//! silently.

use hifitime::Epoch;
use nalgebra::{Matrix3, SVector};

use crate::constants::{Degree, Meter, M_TO_KM};
use crate::gridmt_errors::GridmtError;

/// Basis conventions for source parameter vectors.
///
/// Only `UpSouthEast` is implemented; the others are recognized so callers get a clear
/// diagnostic instead of silently wrong geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisConvention {
    /// `up-south-east`, the internal representation
    UpSouthEast,
    /// `north-east-down`
    NorthEastDown,
}

/// Hypocenter descriptor: spatial coordinates and origin time.
///
/// Origins pair with Green's-function bundles via field-wise equality, so two origins built
/// from the same catalog values select the same Green's functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    /// Event origin time
    pub time: Epoch,
    /// Latitude in degrees
    pub latitude: Degree,
    /// Longitude in degrees
    pub longitude: Degree,
    /// Depth below the surface in meters
    pub depth_m: Meter,
}

impl Origin {
    pub fn new(time: Epoch, latitude: Degree, longitude: Degree, depth_m: Meter) -> Self {
        Origin {
            time,
            latitude,
            longitude,
            depth_m,
        }
    }

    /// Depth in kilometers, the unit expected by travel-time models.
    pub fn depth_km(&self) -> f64 {
        self.depth_m * M_TO_KM
    }
}

/// Moment tensor source, six independent elements in USE convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentTensor {
    array: SVector<f64, 6>,
}

impl MomentTensor {
    /// Build a moment tensor from its six independent elements
    /// `(M11, M22, M33, M12, M13, M23)` in USE convention.
    pub fn new(elements: [f64; 6]) -> Self {
        MomentTensor {
            array: SVector::from(elements),
        }
    }

    /// Build a moment tensor given in an explicit basis convention.
    ///
    /// Return
    /// ------
    /// * `Ok(MomentTensor)` for `UpSouthEast` input
    /// * `Err(GridmtError::UnimplementedConvention)` for any other convention
    pub fn with_convention(
        elements: [f64; 6],
        convention: BasisConvention,
    ) -> Result<Self, GridmtError> {
        match convention {
            BasisConvention::UpSouthEast => Ok(Self::new(elements)),
            BasisConvention::NorthEastDown => Err(GridmtError::UnimplementedConvention(
                "north-east-down moment tensors".to_string(),
            )),
        }
    }

    /// Independent elements as a fixed-length vector.
    pub fn as_vector(&self) -> SVector<f64, 6> {
        self.array
    }

    /// Full symmetric 3×3 matrix.
    pub fn as_matrix(&self) -> Matrix3<f64> {
        let m = &self.array;
        Matrix3::new(
            m[0], m[3], m[4], //
            m[3], m[1], m[5], //
            m[4], m[5], m[2],
        )
    }

    /// Seismic moment `M0 = sqrt(M:M / 2)`.
    pub fn moment(&self) -> f64 {
        let m = self.as_matrix();
        (m.component_mul(&m).sum() / 2.0).sqrt()
    }

    /// Moment magnitude `Mw = 2/3 (log10 M0 - 9.1)` (M0 in N·m).
    pub fn magnitude(&self) -> f64 {
        2.0 / 3.0 * (self.moment().log10() - 9.1)
    }
}

/// Force source, three elements in USE convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Force {
    array: SVector<f64, 3>,
}

impl Force {
    /// Build a force from its `(F_up, F_south, F_east)` components.
    pub fn new(components: [f64; 3]) -> Self {
        Force {
            array: SVector::from(components),
        }
    }

    /// Build a force given in an explicit basis convention.
    pub fn with_convention(
        components: [f64; 3],
        convention: BasisConvention,
    ) -> Result<Self, GridmtError> {
        match convention {
            BasisConvention::UpSouthEast => Ok(Self::new(components)),
            BasisConvention::NorthEastDown => Err(GridmtError::UnimplementedConvention(
                "north-east-down forces".to_string(),
            )),
        }
    }

    /// Components as a fixed-length vector.
    pub fn as_vector(&self) -> SVector<f64, 3> {
        self.array
    }

    /// Euclidean magnitude of the force.
    pub fn magnitude(&self) -> f64 {
        self.array.norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hifitime::Epoch;

    #[test]
    fn test_moment_of_explosion() {
        // isotropic tensor: M:M = 3 M0'^2, moment = M0' * sqrt(3/2)
        let mt = MomentTensor::new([1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        assert_relative_eq!(mt.moment(), (3.0f64 / 2.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_moment_counts_off_diagonal_twice() {
        let mt = MomentTensor::new([0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        // M12 appears twice in the symmetric matrix
        assert_relative_eq!(mt.moment(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_magnitude_reference_value() {
        // M0 = 10^16.6 N·m corresponds to Mw = 5.0
        let m0: f64 = 10f64.powf(16.6);
        // a single diagonal element x gives moment x / sqrt(2)
        let mt = MomentTensor::new([m0 * 2.0f64.sqrt(), 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_relative_eq!(mt.magnitude(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unimplemented_convention() {
        let res =
            MomentTensor::with_convention([1.0; 6], BasisConvention::NorthEastDown);
        assert!(matches!(
            res,
            Err(GridmtError::UnimplementedConvention(_))
        ));
    }

    #[test]
    fn test_origin_equality() {
        let t = Epoch::from_gregorian_utc(2009, 4, 7, 20, 12, 55, 0);
        let a = Origin::new(t, 61.45, -149.74, 33_000.0);
        let b = Origin::new(t, 61.45, -149.74, 33_000.0);
        let c = Origin::new(t, 61.45, -149.74, 34_000.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_relative_eq!(a.depth_km(), 33.0);
    }
}
