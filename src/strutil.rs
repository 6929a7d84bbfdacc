//! String parsing helpers with caller-supplied defaults
//!
//! No error taxonomy: anything unrecognized yields the default the caller
//! passed in. The string-producing direction is covered by the `Display`
//! impls on `Color`, `Vec2`, `Rect` and `IntRect`, which emit the same
//! comma-separated forms these parsers accept.

use crate::render::{Color, IntRect, Rect, Vec2};

/// Parse 0/1/true/false/on/off, case-insensitive
pub fn parse_bool(value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => true,
        "0" | "false" | "off" => false,
        _ => default,
    }
}

pub fn parse_f32(value: &str, default: f32) -> f32 {
    value.trim().parse().unwrap_or(default)
}

pub fn parse_i32(value: &str, default: i32) -> i32 {
    value.trim().parse().unwrap_or(default)
}

pub fn parse_u32(value: &str, default: u32) -> u32 {
    value.trim().parse().unwrap_or(default)
}

/// Parse "r,g,b" or "r,g,b,a" byte components
pub fn parse_color(value: &str, default: Color) -> Color {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return default;
    }
    let mut comps = [0u8, 0, 0, 255];
    for (slot, part) in comps.iter_mut().zip(&parts) {
        match part.parse() {
            Ok(v) => *slot = v,
            Err(_) => return default,
        }
    }
    Color::new(comps[0], comps[1], comps[2], comps[3])
}

/// Parse "x,y"
pub fn parse_vec2(value: &str, default: Vec2) -> Vec2 {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return default;
    }
    match (parts[0].parse(), parts[1].parse()) {
        (Ok(x), Ok(y)) => Vec2::new(x, y),
        _ => default,
    }
}

/// Parse "x,y,w,h" floats
pub fn parse_rect(value: &str, default: Rect) -> Rect {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return default;
    }
    let mut comps = [0.0f32; 4];
    for (slot, part) in comps.iter_mut().zip(&parts) {
        match part.parse() {
            Ok(v) => *slot = v,
            Err(_) => return default,
        }
    }
    Rect::new(comps[0], comps[1], comps[2], comps[3])
}

/// Parse "x,y,w,h" integers
pub fn parse_int_rect(value: &str, default: IntRect) -> IntRect {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return default;
    }
    let mut comps = [0i32; 4];
    for (slot, part) in comps.iter_mut().zip(&parts) {
        match part.parse() {
            Ok(v) => *slot = v,
            Err(_) => return default,
        }
    }
    IntRect::new(comps[0], comps[1], comps[2], comps[3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepted_forms() {
        assert!(parse_bool("1", false));
        assert!(parse_bool("TRUE", false));
        assert!(parse_bool(" on ", false));
        assert!(!parse_bool("0", true));
        assert!(!parse_bool("False", true));
        assert!(!parse_bool("off", true));
    }

    #[test]
    fn test_parse_bool_falls_back() {
        assert!(parse_bool("yes?", true));
        assert!(!parse_bool("", false));
    }

    #[test]
    fn test_parse_numbers_fall_back() {
        assert_eq!(parse_f32("2.5", 0.0), 2.5);
        assert_eq!(parse_f32("two", 7.0), 7.0);
        assert_eq!(parse_i32("-3", 0), -3);
        assert_eq!(parse_u32("-3", 9), 9);
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("255, 0, 0", Color::BLACK), Color::RED);
        assert_eq!(
            parse_color("1,2,3,4", Color::BLACK),
            Color::new(1, 2, 3, 4)
        );
        // Wrong arity or out-of-range bytes fall back
        assert_eq!(parse_color("1,2", Color::BLUE), Color::BLUE);
        assert_eq!(parse_color("256,0,0", Color::BLUE), Color::BLUE);
    }

    #[test]
    fn test_parse_vec2_and_rect() {
        assert_eq!(parse_vec2("1.5, -2", Vec2::ZERO), Vec2::new(1.5, -2.0));
        assert_eq!(parse_vec2("1.5", Vec2::ONE), Vec2::ONE);
        assert_eq!(
            parse_rect("0,1,2,3", Rect::default()),
            Rect::new(0.0, 1.0, 2.0, 3.0)
        );
        assert_eq!(
            parse_int_rect("4,5,6,oops", IntRect::new(9, 9, 9, 9)),
            IntRect::new(9, 9, 9, 9)
        );
    }

    #[test]
    fn test_display_round_trips() {
        let c = Color::new(10, 20, 30, 40);
        assert_eq!(parse_color(&c.to_string(), Color::BLACK), c);
        let v = Vec2::new(1.5, -2.0);
        assert_eq!(parse_vec2(&v.to_string(), Vec2::ZERO), v);
        let r = Rect::new(0.5, 1.0, 2.0, 3.0);
        assert_eq!(parse_rect(&r.to_string(), Rect::default()), r);
    }
}
