/// Composite face-corner token decoding (`p`, `p/t`, `p//n`, `p/t/n`)
use nom::character::complete::i64 as integer;

use crate::options::CornerDecoding;

/// One corner of a face: 1-based indices into the position, texture and
/// normal tables. Texture and normal use `0` for "absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceCorner {
    pub position: i64,
    pub texture: i64,
    pub normal: i64,
}

impl FaceCorner {
    pub fn new(position: i64, texture: i64, normal: i64) -> Self {
        Self {
            position,
            texture,
            normal,
        }
    }

    pub fn has_texture(&self) -> bool {
        self.texture != 0
    }

    pub fn has_normal(&self) -> bool {
        self.normal != 0
    }
}

/// Decode a corner token, discarding the well-formedness flag.
pub fn decode_corner(token: &str, decoding: CornerDecoding) -> FaceCorner {
    decode_corner_checked(token, decoding).0
}

/// Decode a corner token. The flag is `false` when a present component was
/// not a clean integer; such components decode like C `atoi` (leading
/// integer prefix, otherwise `0`).
pub fn decode_corner_checked(token: &str, decoding: CornerDecoding) -> (FaceCorner, bool) {
    let Some((before, after)) = token.split_once('/') else {
        let (position, clean) = leading_integer(token);
        return (FaceCorner::new(position, 0, 0), clean);
    };

    let (position, position_clean) = leading_integer(before);

    let (texture, normal, rest_clean) = match after.split_once('/') {
        None => {
            let (texture, clean) = leading_integer(after);
            (texture, 0, clean)
        }
        Some(("", normal)) => {
            let (normal, clean) = leading_integer(normal);
            (0, normal, clean)
        }
        Some((texture, normal)) => {
            let (normal, normal_clean) = leading_integer(normal);
            match decoding {
                CornerDecoding::Standard => {
                    let (texture, texture_clean) = leading_integer(texture);
                    (texture, normal, texture_clean && normal_clean)
                }
                CornerDecoding::Reference => (0, normal, normal_clean),
            }
        }
    };

    (
        FaceCorner::new(position, texture, normal),
        position_clean && rest_clean,
    )
}

/// Empty input is an absent component and counts as clean.
fn leading_integer(text: &str) -> (i64, bool) {
    if text.is_empty() {
        return (0, true);
    }
    match integer::<&str, nom::error::Error<&str>>(text) {
        Ok((rest, value)) => (value, rest.is_empty()),
        Err(_) => (0, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(token: &str) -> FaceCorner {
        decode_corner(token, CornerDecoding::Standard)
    }

    #[test]
    fn test_decode_forms() {
        assert_eq!(standard("5"), FaceCorner::new(5, 0, 0));
        assert_eq!(standard("5/3"), FaceCorner::new(5, 3, 0));
        assert_eq!(standard("5//7"), FaceCorner::new(5, 0, 7));
        assert_eq!(standard("5/3/7"), FaceCorner::new(5, 3, 7));
    }

    #[test]
    fn test_reference_drops_texture_between_slashes() {
        let corner = decode_corner("5/3/7", CornerDecoding::Reference);
        assert_eq!(corner, FaceCorner::new(5, 0, 7));

        // The other forms are unaffected by the decoding mode
        assert_eq!(decode_corner("5/3", CornerDecoding::Reference), FaceCorner::new(5, 3, 0));
        assert_eq!(decode_corner("5//7", CornerDecoding::Reference), FaceCorner::new(5, 0, 7));
    }

    #[test]
    fn test_trailing_slashes_are_absent() {
        assert_eq!(standard("5/"), FaceCorner::new(5, 0, 0));
        assert_eq!(standard("5//"), FaceCorner::new(5, 0, 0));
        assert_eq!(standard("5/3/"), FaceCorner::new(5, 3, 0));
        assert!(decode_corner_checked("5/3/", CornerDecoding::Standard).1);
    }

    #[test]
    fn test_atoi_style_fallback() {
        let (corner, clean) = decode_corner_checked("7abc", CornerDecoding::Standard);
        assert_eq!(corner, FaceCorner::new(7, 0, 0));
        assert!(!clean);

        let (corner, clean) = decode_corner_checked("-", CornerDecoding::Standard);
        assert_eq!(corner, FaceCorner::new(0, 0, 0));
        assert!(!clean);

        let (corner, clean) = decode_corner_checked("2/x/4", CornerDecoding::Standard);
        assert_eq!(corner, FaceCorner::new(2, 0, 4));
        assert!(!clean);
    }

    #[test]
    fn test_negative_indices_survive_decoding() {
        assert_eq!(standard("-1/-2/-3"), FaceCorner::new(-1, -2, -3));
        assert!(decode_corner_checked("-1/-2/-3", CornerDecoding::Standard).1);
    }
}
