use sqlx::PgPool;

/// Every `id` column is a bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table carries `created_at` and `updated_at` as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// Mutable tables keep `updated_at` current through the shared trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_triggers_installed(pool: PgPool) {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT event_object_table::TEXT
         FROM information_schema.triggers
         WHERE trigger_name = 'set_updated_at' AND event_manipulation = 'UPDATE'
         ORDER BY event_object_table",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let tables: Vec<&str> = rows.iter().map(|(t,)| t.as_str()).collect();
    for table in ["bands", "entries", "members", "otps", "users"] {
        assert!(tables.contains(&table), "missing set_updated_at trigger on {table}");
    }
}
