//! Static code-to-name tables for airlines and airports.
//!
//! The tables are ordered; the airport order is the order of the filter
//! dropdown. Codes without an entry display as the raw code.

/// Airline code to display name.
pub static AIRLINES: &[(&str, &str)] = &[
    ("AE", "華信航空"),
    ("B7", "立榮航空"),
    ("CI", "中華航空"),
    ("BR", "長榮航空"),
    ("IT", "台灣虎航"),
    ("DA", "德安航空"),
];

/// Airport code to display name.
pub static AIRPORTS: &[(&str, &str)] = &[
    ("TSA", "台北松山機場"),
    ("TPE", "桃園國際機場"),
    ("KHH", "高雄小港機場"),
    ("HUN", "花蓮機場"),
    ("MZG", "馬公機場"),
    ("CMJ", "七美機場"),
    ("KNH", "金門尚義機場"),
    ("TTT", "台東豐年機場"),
    ("GNI", "綠島機場"),
    ("CYI", "嘉義水上機場"),
];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, name)| *name)
}

/// Display name for an airline code, if known.
#[must_use]
pub fn airline_name(code: &str) -> Option<&'static str> {
    lookup(AIRLINES, code)
}

/// Display name for an airport code, if known.
#[must_use]
pub fn airport_name(code: &str) -> Option<&'static str> {
    lookup(AIRPORTS, code)
}

/// Whether `code` is one of the airports offered by the filter dropdown.
#[must_use]
pub fn is_known_airport(code: &str) -> bool {
    airport_name(code).is_some()
}

/// `CODE（名稱）`, falling back to `CODE（CODE）` for unknown airlines.
#[must_use]
pub fn airline_label(code: &str) -> String {
    label(code, airline_name(code))
}

/// `CODE（名稱）`, falling back to `CODE（CODE）` for unknown airports.
#[must_use]
pub fn airport_label(code: &str) -> String {
    label(code, airport_name(code))
}

fn label(code: &str, name: Option<&str>) -> String {
    format!("{code}（{}）", name.unwrap_or(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(AIRLINES.len(), 6);
        assert_eq!(AIRPORTS.len(), 10);
    }

    #[test]
    fn test_known_names() {
        assert_eq!(airline_name("CI"), Some("中華航空"));
        assert_eq!(airline_name("B7"), Some("立榮航空"));
        assert_eq!(airport_name("TPE"), Some("桃園國際機場"));
        assert_eq!(airport_name("CYI"), Some("嘉義水上機場"));
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(airline_name("ZZ"), None);
        assert_eq!(airport_name("NRT"), None);
        assert!(!is_known_airport("NRT"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(airline_label("CI"), "CI（中華航空）");
        assert_eq!(airport_label("KHH"), "KHH（高雄小港機場）");
    }

    #[test]
    fn test_unknown_labels_fall_back_to_code() {
        assert_eq!(airline_label("ZZ"), "ZZ（ZZ）");
        assert_eq!(airport_label("HND"), "HND（HND）");
        assert_eq!(airline_label(""), "（）");
    }

    #[test]
    fn test_dropdown_order() {
        let codes: Vec<&str> = AIRPORTS.iter().map(|(code, _)| *code).collect();
        assert_eq!(codes.first(), Some(&"TSA"));
        assert_eq!(codes.last(), Some(&"CYI"));
    }

    #[test]
    fn test_codes_are_unique() {
        for table in [AIRLINES, AIRPORTS] {
            let mut codes: Vec<&str> = table.iter().map(|(code, _)| *code).collect();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), table.len());
        }
    }
}
