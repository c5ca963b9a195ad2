//! Terminal summary of a collection.

use crate::models::Collection;
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

/// One row per response: status, type, region, name or id, and the error if any.
pub fn summary_rows(collection: &Collection) -> Vec<String> {
    let ok = collection.successes.iter().map(|r| {
        format!(
            "{status},{rt},{region},{name}",
            status = format_field("ok", 7),
            rt = format_field(&r.resource_type, 18),
            region = format_field(&r.region_code, 16),
            name = format_field(&r.name, 24),
        )
    });
    let failed = collection.errors.iter().map(|e| {
        format!(
            "{status},{rt},{region},{id},{kind}",
            status = format_field("error", 7),
            rt = format_field(&e.resource_type, 18),
            region = format_field("", 16),
            id = format_field(&e.resource_id, 24),
            kind = format_field(&e.error_kind, 14),
        )
    });
    ok.chain(failed).collect()
}

/// Print the summary table and totals to stderr, keeping stdout for JSON.
pub fn print_summary(collection: &Collection) {
    for row in summary_rows(collection) {
        eprintln!("{row}");
    }
    let totals = format!(
        "# total={} ok={} errors={} regions=[{}]",
        collection.total(),
        collection.successes.len(),
        collection.errors.len(),
        collection.region_codes.iter().join(", ")
    );
    if collection.errors.is_empty() {
        eprintln!("{}", totals.green());
    } else {
        eprintln!("{}", totals.on_red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectError;
    use crate::models::ErrorResponse;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_summary_rows_errors_last() {
        let mut collection = Collection::new();
        collection.push_error(ErrorResponse::new("MySQLServer", "/db", &CollectError::EmptyBindings));
        let rows = summary_rows(&collection);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("\"error\""));
        assert!(rows[0].contains("\"EmptyBindings\""));
    }
}
