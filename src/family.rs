//! Ancillary data families, their cadence and archive naming.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Represents one of the two ancillary products that get interpolated.
pub enum DataFamily {
    /// Daily total ozone column (TOMS/OMI).
    Ozone,
    /// Six-hourly NCEP reanalysis (wind and surface pressure).
    Meteorological,
}

impl DataFamily {
    /// Interval at which the archive publishes one dataset of this family.
    pub fn cadence(self) -> TimeDelta {
        match self {
            DataFamily::Ozone => TimeDelta::hours(24),
            DataFamily::Meteorological => TimeDelta::hours(6),
        }
    }

    /// Variables interpolated for this family, in output order.
    pub fn variables(self) -> &'static [&'static str] {
        match self {
            DataFamily::Ozone => &["ozone"],
            DataFamily::Meteorological => &["z_wind", "m_wind", "press"],
        }
    }

    /// Archive naming schemes, tried in order.
    pub fn naming_schemes(self) -> &'static [NamingScheme] {
        match self {
            DataFamily::Ozone => &[NamingScheme::TomsOmi, NamingScheme::AuraOmi],
            DataFamily::Meteorological => &[NamingScheme::NcepMet, NamingScheme::NcepHdf],
        }
    }

    /// Prefix of the interpolated output file.
    pub fn output_prefix(self) -> &'static str {
        match self {
            DataFamily::Ozone => "OZ_TOMS_",
            DataFamily::Meteorological => "MET_NCEP_",
        }
    }

    /// Label used when reporting the output path.
    pub fn report_label(self) -> &'static str {
        match self {
            DataFamily::Ozone => "FILE_OZONE",
            DataFamily::Meteorological => "FILE_METEO",
        }
    }
}

impl fmt::Display for DataFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFamily::Ozone => write!(f, "ozone"),
            DataFamily::Meteorological => write!(f, "meteo"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A file naming convention used by the SeaDAS ancillary archive.
///
/// Every scheme lives under `<base>/<YYYY>/<DDD>/`; they differ in the file
/// prefix and suffix only.
pub enum NamingScheme {
    /// Current NCEP naming, `S<YYYY><DDD><HH>_NCEP.MET`.
    NcepMet,
    /// Legacy NCEP naming, `N<YYYY><DDD><HH>_MET_NCEPN_6h.hdf`.
    NcepHdf,
    /// Merged TOMS/OMI ozone, `N<YYYY><DDD>00_O3_TOMSOMI_24h.hdf`.
    TomsOmi,
    /// Aura OMI ozone, `N<YYYY><DDD>00_O3_AURAOMI_24h.hdf`.
    AuraOmi,
}

impl NamingScheme {
    /// Builds the archive path of the dataset published at `instant`.
    pub fn path(self, base: &str, instant: &NaiveDateTime) -> String {
        let base = base.trim_end_matches('/');
        let year = instant.year();
        let doy = instant.ordinal();
        let hour = instant.hour();

        let file_name = match self {
            NamingScheme::NcepMet => format!("S{year}{doy:03}{hour:02}_NCEP.MET"),
            NamingScheme::NcepHdf => format!("N{year}{doy:03}{hour:02}_MET_NCEPN_6h.hdf"),
            NamingScheme::TomsOmi => format!("N{year}{doy:03}00_O3_TOMSOMI_24h.hdf"),
            NamingScheme::AuraOmi => format!("N{year}{doy:03}00_O3_AURAOMI_24h.hdf"),
        };

        format!("{base}/{year}/{doy:03}/{file_name}")
    }
}

// -- Tests -------------------------------------------------------------------
