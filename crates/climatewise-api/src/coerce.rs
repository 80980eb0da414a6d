//! Lenient JSON coercion helpers.
//!
//! The backend's data pipelines occasionally emit numbers as strings,
//! nulls, or garbage for individual fields. Decoders use these helpers
//! so a single bad field degrades to a sentinel default instead of
//! failing the whole response ("best-effort render": map layers never
//! go fully blank on partial corruption).

use serde_json::Value;

/// Number, numeric string, or anything else -> `f64`, defaulting to 0.
pub fn lenient_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Number, numeric string, or anything else -> `i64`, defaulting to 0.
pub fn lenient_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .unwrap_or_else(|| n.as_f64().unwrap_or(0.0) as i64),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .unwrap_or_else(|_| trimmed.parse::<f64>().unwrap_or(0.0) as i64)
        }
        _ => 0,
    }
}

/// String or number -> owned string, defaulting to empty.
pub fn lenient_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Lenient boolean: accepts `true`, `1`, `"1"`, `"true"`.
pub fn lenient_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => matches!(s.trim(), "1" | "true"),
        _ => false,
    }
}

/// Rounds and clamps a raw value into the 1..=10 score range used to
/// color country polygons. Missing/garbage input lands on 1, so an
/// unknown country renders at the bottom of the palette.
pub fn clamp_score(raw: f64) -> u8 {
    let rounded = raw.round();
    if rounded < 1.0 {
        1
    } else if rounded > 10.0 {
        10
    } else {
        rounded as u8
    }
}

/// Lenient 1..=10 score parse; defaults to 1.
pub fn lenient_score(value: &Value) -> u8 {
    clamp_score(lenient_f64(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn f64_accepts_numbers_and_numeric_strings() {
        assert_eq!(lenient_f64(&json!(1.5)), 1.5);
        assert_eq!(lenient_f64(&json!("2.25")), 2.25);
        assert_eq!(lenient_f64(&json!(" 3 ")), 3.0);
        assert_eq!(lenient_f64(&json!("n/a")), 0.0);
        assert_eq!(lenient_f64(&json!(null)), 0.0);
        assert_eq!(lenient_f64(&json!([1])), 0.0);
    }

    #[test]
    fn i64_truncates_floats() {
        assert_eq!(lenient_i64(&json!(7)), 7);
        assert_eq!(lenient_i64(&json!(7.9)), 7);
        assert_eq!(lenient_i64(&json!("12")), 12);
        assert_eq!(lenient_i64(&json!("12.6")), 12);
        assert_eq!(lenient_i64(&json!({})), 0);
    }

    #[test]
    fn score_clamps_into_one_to_ten() {
        assert_eq!(lenient_score(&json!(0)), 1);
        assert_eq!(lenient_score(&json!(11)), 10);
        assert_eq!(lenient_score(&json!(5.5)), 6);
        assert_eq!(lenient_score(&json!("7")), 7);
        // garbage falls to the sentinel bottom of the palette
        assert_eq!(lenient_score(&json!(null)), 1);
        assert_eq!(lenient_score(&json!("??")), 1);
    }

    #[test]
    fn bool_accepts_wire_conventions() {
        assert!(lenient_bool(&json!(true)));
        assert!(lenient_bool(&json!(1)));
        assert!(lenient_bool(&json!("1")));
        assert!(lenient_bool(&json!("true")));
        assert!(!lenient_bool(&json!("yes")));
        assert!(!lenient_bool(&json!(0)));
    }
}
