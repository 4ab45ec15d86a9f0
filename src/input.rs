//! Extracts the query instant from a product file name.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::{AuxError, Result};

/// Offset of the `YYYYMMDD_HHMMSS` stamp in a MERIS level-1 product name.
pub const DEFAULT_STAMP_OFFSET: usize = 14;

const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const STAMP_LENGTH: usize = 15;

/// Parses the timestamp at `offset` in the basename of `input`.
pub fn timestamp_from_name(input: &str, offset: usize) -> Result<NaiveDateTime> {
    let file_name = Path::new(input)
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AuxError::InvalidInput(format!("`{input}` has no file name")))?;

    let stamp = offset
        .checked_add(STAMP_LENGTH)
        .and_then(|stop| file_name.get(offset..stop))
        .ok_or_else(|| {
            AuxError::InvalidInput(format!(
                "`{file_name}` is too short for a timestamp at offset {offset}"
            ))
        })?;

    NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT)
        .map_err(|e| AuxError::InvalidInput(format!("`{stamp}` in `{file_name}`: {e}")))
}

#[cfg(test)]
mod tests {

    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn should_parse_meris_product_name() {
        let t = timestamp_from_name(
            "/data/in/MER_RR__1PRACR20130315_094000_000026082116_00022_57425_0000.N1",
            DEFAULT_STAMP_OFFSET,
        )
        .unwrap();

        assert_eq!(
            t,
            NaiveDate::from_ymd_opt(2013, 3, 15)
                .unwrap()
                .and_hms_opt(9, 40, 0)
                .unwrap()
        );
    }

    #[test]
    fn should_honour_custom_offset() {
        let t = timestamp_from_name("X20050615_180000.nc", 1).unwrap();
        assert_eq!(t.to_string(), "2005-06-15 18:00:00");
    }

    #[test]
    fn should_reject_short_name() {
        let err = timestamp_from_name("MER_RR__1P.N1", DEFAULT_STAMP_OFFSET).unwrap_err();
        assert!(matches!(err, AuxError::InvalidInput(_)));
    }

    #[test]
    fn should_reject_offset_past_usize_range() {
        let err = timestamp_from_name("X20050615_180000.nc", usize::MAX).unwrap_err();
        assert!(matches!(err, AuxError::InvalidInput(_)));
    }

    #[test]
    fn should_reject_malformed_stamp() {
        let err = timestamp_from_name("MER_RR__1PRACR2013031X_094000_rest", DEFAULT_STAMP_OFFSET)
            .unwrap_err();
        assert!(matches!(err, AuxError::InvalidInput(_)));
    }
}
