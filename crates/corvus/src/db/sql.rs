//! Sql — statement builders shared by the Postgres and SQLite helpers.
//!
//! Identifiers are quoted; values are always bound, never interpolated.

/// Placeholder style of the target driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placeholder {
    /// Postgres-style `$1`, `$2`, …
    Dollar,
    /// SQLite-style `?`.
    Question,
}

impl Placeholder {
    fn nth(&self, n: usize) -> String {
        match self {
            Placeholder::Dollar => format!("${n}"),
            Placeholder::Question => "?".to_string(),
        }
    }
}

/// Double-quote an identifier, escaping embedded quotes.
pub(crate) fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// `SELECT EXISTS(SELECT 1 FROM "t" WHERE "c" = $1)`
pub(crate) fn exists_sql(table: &str, column: &str, style: Placeholder) -> String {
    format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = {})",
        quote_ident(table),
        quote_ident(column),
        style.nth(1)
    )
}

/// `INSERT INTO "t" ("pk", "c1", …) VALUES ($1, $2, …) RETURNING "pk"`
///
/// Bind order: primary key first, then `columns` in the given order.
pub(crate) fn insert_sql(table: &str, pk: &str, columns: &[&str], style: Placeholder) -> String {
    let mut names = vec![quote_ident(pk)];
    names.extend(columns.iter().map(|c| quote_ident(c)));

    let values: Vec<String> = (1..=names.len()).map(|n| style.nth(n)).collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quote_ident(table),
        names.join(", "),
        values.join(", "),
        quote_ident(pk)
    )
}

/// `UPDATE "t" SET "c1" = $1, … WHERE "pk" = $n RETURNING "pk"`
///
/// Bind order: `columns` in the given order, then the primary key.
pub(crate) fn update_sql(table: &str, pk: &str, columns: &[&str], style: Placeholder) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = {}", quote_ident(c), style.nth(i + 1)))
        .collect();

    format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quote_ident(table),
        assignments.join(", "),
        quote_ident(pk),
        style.nth(columns.len() + 1),
        quote_ident(pk)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_plain() {
        assert_eq!(quote_ident("jobs"), "\"jobs\"");
    }

    #[test]
    fn test_quote_ident_escapes_embedded_quotes() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_exists_sql_dollar() {
        assert_eq!(
            exists_sql("jobs", "name", Placeholder::Dollar),
            "SELECT EXISTS(SELECT 1 FROM \"jobs\" WHERE \"name\" = $1)"
        );
    }

    #[test]
    fn test_exists_sql_question() {
        assert_eq!(
            exists_sql("jobs", "name", Placeholder::Question),
            "SELECT EXISTS(SELECT 1 FROM \"jobs\" WHERE \"name\" = ?)"
        );
    }

    #[test]
    fn test_insert_sql() {
        assert_eq!(
            insert_sql("jobs", "id", &["status", "retries"], Placeholder::Dollar),
            "INSERT INTO \"jobs\" (\"id\", \"status\", \"retries\") \
             VALUES ($1, $2, $3) RETURNING \"id\""
        );
    }

    #[test]
    fn test_insert_sql_no_extra_columns() {
        assert_eq!(
            insert_sql("jobs", "id", &[], Placeholder::Question),
            "INSERT INTO \"jobs\" (\"id\") VALUES (?) RETURNING \"id\""
        );
    }

    #[test]
    fn test_update_sql() {
        assert_eq!(
            update_sql("jobs", "id", &["status", "retries"], Placeholder::Dollar),
            "UPDATE \"jobs\" SET \"status\" = $1, \"retries\" = $2 \
             WHERE \"id\" = $3 RETURNING \"id\""
        );
    }

    #[test]
    fn test_update_sql_question_placeholders() {
        assert_eq!(
            update_sql("jobs", "id", &["status"], Placeholder::Question),
            "UPDATE \"jobs\" SET \"status\" = ? WHERE \"id\" = ? RETURNING \"id\""
        );
    }
}
