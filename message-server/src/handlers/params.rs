//! Query-string parameter resolution for the search endpoint.

use crate::entities::SearchQuery;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 20;
pub const DEFAULT_OFFSET: i64 = 0;

/// Value for `key` when it appears exactly once, otherwise `default`.
///
/// A repeated key is ambiguous and treated the same as a missing one.
pub fn param_or_default<'a>(pairs: &'a [(String, String)], key: &str, default: &'a str) -> &'a str {
    let mut values = pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str());
    match (values.next(), values.next()) {
        (Some(v), None) => v,
        _ => default,
    }
}

/// Page size in `[1, MAX_LIMIT]`; anything else, including garbage, is `DEFAULT_LIMIT`.
pub fn clamp_limit(raw: &str) -> i64 {
    match raw.parse::<i64>() {
        Ok(limit) if (1..=MAX_LIMIT).contains(&limit) => limit,
        _ => DEFAULT_LIMIT,
    }
}

/// Non-negative offset; negatives and garbage become `DEFAULT_OFFSET`.
pub fn clamp_offset(raw: &str) -> i64 {
    match raw.parse::<i64>() {
        Ok(offset) if offset >= 0 => offset,
        _ => DEFAULT_OFFSET,
    }
}

/// Build the store query from decoded `?key=value` pairs.
pub fn search_query(pairs: &[(String, String)]) -> SearchQuery {
    SearchQuery::new(
        clamp_offset(param_or_default(pairs, "offset", "0")),
        clamp_limit(param_or_default(pairs, "limit", "20")),
        param_or_default(pairs, "message", ""),
        param_or_default(pairs, "ip", ""),
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn single_value_is_used() {
        let p = pairs(&[("message", "hi")]);
        assert_eq!(param_or_default(&p, "message", ""), "hi");
    }

    #[test]
    fn missing_or_repeated_value_falls_back() {
        let p = pairs(&[("ip", "10."), ("ip", "192.")]);
        assert_eq!(param_or_default(&p, "ip", "dflt"), "dflt");
        assert_eq!(param_or_default(&p, "message", "dflt"), "dflt");
    }

    #[test]
    fn limit_outside_range_resets_to_default() {
        for raw in ["0", "-3", "21", "1000", "abc", "", "2.5"] {
            assert_eq!(clamp_limit(raw), 20, "limit {raw:?}");
        }
        assert_eq!(clamp_limit("1"), 1);
        assert_eq!(clamp_limit("20"), 20);
        assert_eq!(clamp_limit("7"), 7);
    }

    #[test]
    fn offset_below_zero_resets_to_zero() {
        for raw in ["-1", "-100", "abc", ""] {
            assert_eq!(clamp_offset(raw), 0, "offset {raw:?}");
        }
        assert_eq!(clamp_offset("0"), 0);
        assert_eq!(clamp_offset("40"), 40);
    }

    #[test]
    fn search_query_uses_defaults_when_empty() {
        assert_eq!(search_query(&[]), SearchQuery::new(0, 20, "", ""));
    }

    #[test]
    fn search_query_reads_every_parameter() {
        let p = pairs(&[
            ("offset", "4"),
            ("limit", "10"),
            ("message", "abc"),
            ("ip", "192.168"),
        ]);
        assert_eq!(search_query(&p), SearchQuery::new(4, 10, "abc", "192.168"));
    }

    #[test]
    fn repeated_limit_is_treated_as_absent() {
        let p = pairs(&[("limit", "5"), ("limit", "6")]);
        assert_eq!(search_query(&p).limit, 20);
    }
}
