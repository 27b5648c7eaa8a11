//! Comma-separated camera-string decoding.
//!
//! Shared camera links encode up to six positional parameters as a
//! comma-separated list: eye x,y,z followed by target x,y,z. Trailing
//! fields may be omitted and are zero-filled.

use crate::error::VantageError;

/// Number of positional camera parameters a fully-specified string carries.
pub const CAMERA_FIELDS: usize = 6;

/// Decode a comma-separated camera string into at least [`CAMERA_FIELDS`]
/// floats.
///
/// Missing trailing fields are zero-padded to exactly six values; inputs
/// with more than six fields keep every field — the decoder pads, never
/// truncates.
///
/// # Errors
///
/// Returns [`VantageError::CameraParse`] if any field is not a valid float.
pub fn decode_camera_string(encoded: &str) -> Result<Vec<f32>, VantageError> {
    let mut fields = encoded
        .split(',')
        .map(|field| {
            field.trim().parse::<f32>().map_err(|_| {
                VantageError::CameraParse(format!(
                    "not a number: {:?}",
                    field.trim()
                ))
            })
        })
        .collect::<Result<Vec<f32>, VantageError>>()?;

    if fields.len() < CAMERA_FIELDS {
        fields.resize(CAMERA_FIELDS, 0.0);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_missing_trailing_fields() {
        let fields = decode_camera_string("1,2,3").unwrap();
        assert_eq!(fields, vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn full_string_decodes_unchanged() {
        let fields = decode_camera_string("1,2,3,4,5,6").unwrap();
        assert_eq!(fields, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn extra_fields_are_kept_not_truncated() {
        let fields = decode_camera_string("1,2,3,4,5,6,7,8").unwrap();
        assert_eq!(fields, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn accepts_negative_and_fractional_values() {
        let fields = decode_camera_string("-1.5,0.25,1e2").unwrap();
        assert_eq!(fields[..3], [-1.5, 0.25, 100.0]);
    }

    #[test]
    fn tolerates_whitespace_around_fields() {
        let fields = decode_camera_string(" 1 , 2 ,3 ").unwrap();
        assert_eq!(fields[..3], [1.0, 2.0, 3.0]);
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!(decode_camera_string("1,two,3").is_err());
        assert!(decode_camera_string("").is_err());
        assert!(decode_camera_string("1,,3").is_err());
    }
}
