pub const DEFAULT_WIDTH: u32 = 600;
pub const DEFAULT_HEIGHT: u32 = 450;

/// Parse a `"WIDTHxHEIGHT"` size string into `(width, height)`. Absent or
/// unusable input falls back to 600x450; this never fails.
pub fn parse_size(size: Option<&str>) -> (u32, u32) {
    let raw = match size {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return (DEFAULT_WIDTH, DEFAULT_HEIGHT),
    };

    match try_parse(raw) {
        Some(dimensions) => dimensions,
        None => {
            log::warn!(
                "invalid size parameter '{}', falling back to {}x{}",
                raw,
                DEFAULT_WIDTH,
                DEFAULT_HEIGHT
            );
            (DEFAULT_WIDTH, DEFAULT_HEIGHT)
        }
    }
}

fn try_parse(raw: &str) -> Option<(u32, u32)> {
    let (width_part, height_part) = raw.split_once('x')?;
    let width = width_part.trim().parse::<u32>().ok()?;
    let height = height_part.trim().parse::<u32>().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_size() {
        assert_eq!(parse_size(Some("800x600")), (800, 600));
        assert_eq!(parse_size(Some("1024x1024")), (1024, 1024));
        assert_eq!(parse_size(Some(" 800 x 600 ")), (800, 600));
    }

    #[test]
    fn test_malformed_size_falls_back() {
        assert_eq!(parse_size(Some("bogus")), (600, 450));
        assert_eq!(parse_size(Some("800")), (600, 450));
        assert_eq!(parse_size(Some("800x")), (600, 450));
        assert_eq!(parse_size(Some("x600")), (600, 450));
        assert_eq!(parse_size(Some("800x600x2")), (600, 450));
        assert_eq!(parse_size(Some("-800x600")), (600, 450));
        assert_eq!(parse_size(Some("0x450")), (600, 450));
    }

    #[test]
    fn test_absent_size_falls_back() {
        assert_eq!(parse_size(None), (600, 450));
        assert_eq!(parse_size(Some("")), (600, 450));
    }
}
