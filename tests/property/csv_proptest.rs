//! CSV field escaping properties

use proptest::prelude::*;

use scoutlink::backend::export::csv::{escape_field, CsvWriter};

/// Undo RFC 4180 quoting for a single field
fn unescape(field: &str) -> String {
    match field.strip_prefix('"').and_then(|f| f.strip_suffix('"')) {
        Some(inner) => inner.replace("\"\"", "\""),
        None => field.to_string(),
    }
}

proptest! {
    #[test]
    fn escaped_fields_unescape_to_the_original(field in ".*") {
        prop_assert_eq!(unescape(&escape_field(&field)), field);
    }

    #[test]
    fn fields_without_specials_are_untouched(field in "[a-zA-Z0-9 _.@-]*") {
        prop_assert_eq!(escape_field(&field), field);
    }

    #[test]
    fn special_fields_are_quoted(prefix in "[a-z]*", special in "[,\"\r\n]", suffix in "[a-z]*") {
        let field = format!("{}{}{}", prefix, special, suffix);
        let escaped = escape_field(&field);
        prop_assert!(escaped.starts_with('"') && escaped.ends_with('"'));
    }

    #[test]
    fn every_row_ends_with_crlf(rows in proptest::collection::vec(("[a-z]{0,8}", "[a-z]{0,8}"), 0..10)) {
        let mut writer = CsvWriter::new(&["a", "b"]);
        for (a, b) in &rows {
            writer.row([a, b]);
        }
        let csv = writer.finish();
        prop_assert_eq!(csv.matches("\r\n").count(), rows.len() + 1);
        prop_assert!(csv.ends_with("\r\n"));
    }
}
