use sql_toolbox::prelude::*;
use sql_toolbox::results::materialize;
use sql_toolbox::test_utils::{ScriptedConnection, VecCursor, create_test_row};

#[test]
fn empty_cursor_yields_empty_sequence() {
    let mut cursor = VecCursor::new(["a", "b"]);
    assert_eq!(RowStream::new(&mut cursor).count(), 0);

    let mut cursor = VecCursor::new(["a", "b"]);
    let result = materialize(&mut cursor).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.column_names().len(), 2);
}

#[test]
fn read_failure_follows_rows_already_yielded() {
    let mut cursor = VecCursor::new(["n"])
        .with_type(0, ColumnType::Integer)
        .with_row(vec![CellValue::Int(1)])
        .with_row(vec![CellValue::Int(2)])
        .with_row(vec![CellValue::Int(3)])
        .fail_at(2);

    let items: Vec<_> = RowStream::new(&mut cursor).collect();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].as_ref().unwrap().get("n"), Some("1"));
    assert_eq!(items[1].as_ref().unwrap().get("n"), Some("2"));
    assert!(items[2].as_ref().unwrap_err().is_query_execution());
    assert_eq!(cursor.rows_read(), 2);
}

#[test]
fn stream_is_fused_after_an_error() {
    let mut cursor = VecCursor::new(["n"]).with_row(vec![CellValue::Int(1)]).fail_at(0);
    let mut stream = RowStream::new(&mut cursor);
    assert!(stream.next().unwrap().is_err());
    assert!(stream.next().is_none());
    assert!(stream.next().is_none());
}

#[test]
fn fold_over_a_query_without_collecting() {
    let cursor = VecCursor::new(["weight"])
        .with_type(0, ColumnType::Double)
        .with_row(vec![CellValue::Real(1.5)])
        .with_row(vec![CellValue::Null])
        .with_row(vec![CellValue::Int(2)]);
    let mut conn = ScriptedConnection::new(Dialect::MySql).then_return(cursor);

    let total = sql_toolbox::interaction::fold_rows(
        &mut conn,
        "SELECT weight FROM parts",
        &[],
        0.0_f64,
        |acc, row| acc + row.get("weight").and_then(|w| w.parse::<f64>().ok()).unwrap_or(0.0),
    )
    .unwrap();
    assert!((total - 3.5).abs() < f64::EPSILON);
}

#[test]
fn rows_look_up_columns_case_insensitively() {
    let row = create_test_row(
        vec!["ID_items".into(), "Label".into()],
        vec![Some("1".into()), None],
    );
    assert_eq!(row.get("id_items"), Some("1"));
    assert_eq!(row.get("Label"), None);
    assert_eq!(row.get_column_index("label"), Some(1));
    assert_eq!(row.get("missing"), None);
}

#[cfg(feature = "sqlite")]
fn text(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|s| Some((*s).to_string())).collect()
}

#[cfg(feature = "sqlite")]
#[test]
fn sqlite_declared_types_drive_formatting() -> Result<(), Box<dyn std::error::Error>> {
    use sql_toolbox::interaction::select_rows;

    let mut conn = SqliteConnection::open_in_memory()?;
    conn.execute_batch(
        "CREATE TABLE ev (flag BOOLEAN, day DATE, at TIMESTAMP, ratio FLOAT, n BIGINT, note TEXT);
         INSERT INTO ev VALUES (1, '2024-02-29', '2024-02-29 13:45:00', 0.1, 9007199254740993, NULL);
         INSERT INTO ev VALUES (0, '2024-03-01 08:00:00', '2024-03-01T08:00:00.250', 2, 0, 'x');",
    )?;

    let result = select_rows(&mut conn, "SELECT * FROM ev ORDER BY rowid", &[])?;
    let rows: Vec<Vec<Option<String>>> = result.into_value_rows();

    let mut first = text(&[
        "true",
        "2024-02-29",
        "2024-02-29 13:45:00.0",
        "0.1",
        "9007199254740993",
    ]);
    first.push(None);
    assert_eq!(rows[0], first);
    assert_eq!(
        rows[1],
        text(&["false", "2024-03-01", "2024-03-01 08:00:00.25", "2.0", "0", "x"])
    );
    Ok(())
}
