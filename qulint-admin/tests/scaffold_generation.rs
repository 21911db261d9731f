//! End-to-end scaffold generation tests

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use qulint_admin::model::{ModelRegistry, TableModel};
use qulint_admin::scaffold::{ScaffoldGenerator, LINE_ENDING};
use qulint_admin::schema::{DataConnection, NativeColumn, SchemaBackend, SqliteConnection};
use qulint_admin::testing::{create_sqlite_pool, SchemaApi, StaticConnection};
use regex::Regex;
use std::sync::Arc;

const RESERVED: [&str; 4] = ["id", "created_at", "updated_at", "deleted_at"];

fn clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 30)
        .unwrap()
        .and_hms_opt(23, 59, 1)
        .unwrap()
}

fn generator_over(connection: StaticConnection, table: &str) -> ScaffoldGenerator {
    let connection: Arc<dyn DataConnection> = Arc::new(connection);
    let model = TableModel::for_name("Record", connection).with_table(table);
    ScaffoldGenerator::new(Arc::new(model)).unwrap().at(clock())
}

fn lines(artifact: &str) -> Vec<&str> {
    artifact.split_terminator(LINE_ENDING).collect()
}

#[tokio::test]
async fn test_sqlite_schema_end_to_end() {
    let pool = create_sqlite_pool().await.unwrap();
    sqlx::query(
        "CREATE TABLE articles (
            id INTEGER PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            body TEXT,
            cover VARCHAR(255),
            views INTEGER NOT NULL DEFAULT 0,
            price DECIMAL(8, 2),
            published BOOLEAN NOT NULL DEFAULT 0,
            published_on DATE,
            location POINT,
            created_at DATETIME,
            updated_at DATETIME,
            deleted_at DATETIME
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    let connection: Arc<dyn DataConnection> = Arc::new(SqliteConnection::new(pool));
    let mut registry = ModelRegistry::new();
    registry.register(
        "Article",
        Arc::new(TableModel::for_name("Article", connection)),
    );

    let generator = ScaffoldGenerator::from_name("Article", &registry)
        .unwrap()
        .at(clock());
    assert_eq!(generator.backend(), SchemaBackend::Legacy);

    let result = generator.generate().await.unwrap();
    assert_eq!(
        lines(&result.form),
        [
            r#"form.text("title", "Title");"#,
            r#"form.textarea("body", "Body");"#,
            r#"form.image("cover", "Cover");"#,
            r#"form.number("views", "Views").default(0);"#,
            r#"form.decimal("price", "Price");"#,
            r#"form.switch("published", "Published").default(0);"#,
            r#"form.date("published_on", "Published on").default("2025-06-30");"#,
            r#"form.text("location", "Location");"#,
        ]
    );

    let show = lines(&result.show);
    assert_eq!(show.len(), 12);
    assert_eq!(show[0], r#"show.field("id", "Id");"#);
    assert_eq!(show[11], r#"show.field("deleted_at", "Deleted at");"#);
    assert!(result.form.ends_with(LINE_ENDING));
}

#[tokio::test]
async fn test_qualified_table_reaches_each_enhanced_tier() {
    for api in [SchemaApi::Legacy, SchemaApi::Modern] {
        let connection = Arc::new(StaticConnection::new(api).with_qualified_table(
            "mydb",
            "users",
            vec![NativeColumn::new("id", "int"), NativeColumn::new("email", "varchar")],
        ));
        let model = TableModel::for_name("User", connection.clone()).with_table("mydb.users");
        let generator = ScaffoldGenerator::new(Arc::new(model)).unwrap();

        let form = generator.generate_form().await.unwrap();
        assert_eq!(form, "form.email(\"email\", \"Email\");\r\n");
        assert_eq!(
            connection.listed(),
            vec![("users".to_string(), Some("mydb".to_string()))]
        );
    }
}

#[tokio::test]
async fn test_datetime_defaults() {
    let connection = StaticConnection::new(SchemaApi::Modern).with_table(
        "events",
        vec![
            NativeColumn::new("starts_at", "timestamp"),
            NativeColumn::new("ends_at", "timestamp").with_default("2030-01-01 00:00:00"),
        ],
    );
    let generator = generator_over(connection, "events");
    let form = generator.generate_form().await.unwrap();
    let form = lines(&form);

    let stamp = Regex::new(r#"\.default\("\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}"\);$"#).unwrap();
    assert!(stamp.is_match(form[0]));
    assert!(form[0].contains("2025-06-30 23:59:01"));
    assert!(form[1].ends_with(r#".default("2030-01-01 00:00:00");"#));
}

#[tokio::test]
async fn test_default_clock_produces_timestamp_format() {
    let connection: Arc<dyn DataConnection> = Arc::new(
        StaticConnection::new(SchemaApi::Legacy)
            .with_table("events", vec![NativeColumn::new("starts_at", "datetime")]),
    );
    let model = TableModel::for_name("Event", connection);
    let generator = ScaffoldGenerator::new(Arc::new(model)).unwrap();

    let form = generator.generate_form().await.unwrap();
    let stamp =
        Regex::new(r#"^form\.datetime\("starts_at", "Starts at"\)\.default\("\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}"\);\r\n$"#)
            .unwrap();
    assert!(stamp.is_match(&form));
    assert_eq!(form, generator.generate_form().await.unwrap());
}

#[tokio::test]
async fn test_native_fallback_discards_types_and_defaults() {
    let columns = vec![
        NativeColumn::new("id", "bigint"),
        NativeColumn::new("views", "integer").with_default("0"),
        NativeColumn::new("published", "boolean").with_default("1"),
        NativeColumn::new("published_at", "datetime"),
        NativeColumn::new("body", "text"),
    ];
    let connection = StaticConnection::new(SchemaApi::NativeOnly)
        .with_prefix("cms_")
        .with_table("cms_pages", columns);
    let generator = generator_over(connection, "pages");
    assert_eq!(generator.backend(), SchemaBackend::Native);

    let form = generator.generate_form().await.unwrap();
    for line in lines(&form) {
        assert!(line.starts_with("form.text("), "{line}");
        assert!(!line.contains(".default("), "{line}");
    }
    assert_eq!(lines(&form).len(), 4);
}

fn native_type() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "varchar(255)",
        "text",
        "boolean",
        "integer",
        "bigint",
        "decimal(10,2)",
        "datetime",
        "date",
        "time",
        "json",
        "blob",
        "geometry",
        "uuid",
    ])
}

fn column_name() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z]{1,8}(_[a-z]{1,8}){0,2}",
        1 => prop::sample::select(RESERVED.to_vec()).prop_map(str::to_string),
    ]
}

fn schema() -> impl Strategy<Value = Vec<(String, &'static str)>> {
    prop::collection::btree_map(column_name(), native_type(), 0..12)
        .prop_map(|columns| columns.into_iter().collect())
        .prop_shuffle()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn form_excludes_exactly_the_reserved_columns(columns in schema()) {
        let native: Vec<_> = columns
            .iter()
            .map(|(name, ty)| NativeColumn::new(name.clone(), *ty))
            .collect();
        let generator = generator_over(
            StaticConnection::new(SchemaApi::Legacy).with_table("records", native),
            "records",
        );

        let result = runtime().block_on(generator.generate()).unwrap();
        let reserved = columns
            .iter()
            .filter(|(name, _)| RESERVED.contains(&name.as_str()))
            .count();

        prop_assert_eq!(lines(&result.form).len(), columns.len() - reserved);
        prop_assert_eq!(lines(&result.show).len(), columns.len());
        prop_assert_eq!(lines(&result.grid).len(), columns.len());

        for ((name, ty), line) in columns
            .iter()
            .filter(|(name, _)| !RESERVED.contains(&name.as_str()))
            .zip(lines(&result.form))
        {
            let expected_column = format!("(\"{name}\", ");
            prop_assert!(line.contains(&expected_column));
            if *ty == "boolean" {
                prop_assert!(line.starts_with("form.switch("));
            }
        }

        for ((name, _), line) in columns.iter().zip(lines(&result.grid)) {
            let expected_prefix = format!("grid.column(\"{name}\", ");
            prop_assert!(line.starts_with(&expected_prefix));
        }
    }

    #[test]
    fn generation_is_idempotent(columns in schema()) {
        let native: Vec<_> = columns
            .iter()
            .map(|(name, ty)| NativeColumn::new(name.clone(), *ty).with_default("0"))
            .collect();
        let generator = generator_over(
            StaticConnection::new(SchemaApi::Modern).with_table("records", native),
            "records",
        );

        let runtime = runtime();
        let first = runtime.block_on(generator.generate()).unwrap();
        let second = runtime.block_on(generator.generate()).unwrap();
        prop_assert_eq!(first, second);
    }
}
