//! Integration tests for OracleCatalogInspector against an in-memory catalog.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use catalog_inspector::catalog::queries::{
    self, GET_COLUMNS, GET_COLUMN_DATA_TYPE, GET_PRIMARY_KEYS, GET_SCHEMAS, GET_TABLES,
};
use catalog_inspector::catalog::{
    CatalogError, CatalogInspector, CatalogResult, ColumnData, OracleCatalogInspector,
    QueryExecutor, Row, SqlValue,
};
use catalog_inspector::worker::protocol::FetchRowsResponse;

// ============================================================================
// Fake catalog
// ============================================================================

struct FakeColumn {
    name: &'static str,
    data_type: &'static str,
    values: Vec<SqlValue>,
}

struct FakeTable {
    name: &'static str,
    constraints: Vec<(&'static str, &'static str)>,
    columns: Vec<FakeColumn>,
}

/// Answers the catalog queries from fixed data and records every call.
#[derive(Default)]
struct FakeOracle {
    schemas: Vec<&'static str>,
    tables: Vec<FakeTable>,
    /// Statement that fails with a connection error when executed.
    fail_on: Option<String>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeOracle {
    fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn table(&self, name: &str) -> Option<&FakeTable> {
        self.tables.iter().find(|t| t.name == name)
    }
}

fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}

fn num(s: &str) -> SqlValue {
    SqlValue::Decimal(s.parse().unwrap())
}

fn dec(s: &str) -> BigDecimal {
    s.parse().unwrap()
}

fn single_column(values: impl IntoIterator<Item = SqlValue>) -> Vec<Row> {
    values.into_iter().map(|v| vec![v]).collect()
}

/// First-column values as a worker would deliver them over the wire.
fn worker_values(rows: &str) -> Vec<SqlValue> {
    let json = format!(
        r#"{{"columns": [{{"name": "V", "type": "NUMBER"}}], "rows": {}}}"#,
        rows
    );
    let response: FetchRowsResponse = serde_json::from_str(&json).unwrap();
    response
        .into_rows()
        .unwrap()
        .into_iter()
        .map(|mut row| row.remove(0))
        .collect()
}

#[async_trait]
impl QueryExecutor for FakeOracle {
    async fn fetch_rows(&self, sql: &str, params: &[&str]) -> CatalogResult<Vec<Row>> {
        self.calls.lock().unwrap().push((
            sql.to_string(),
            params.iter().map(|p| p.to_string()).collect(),
        ));

        if self.fail_on.as_deref() == Some(sql) {
            return Err(CatalogError::execution(
                "ORA-03113: end-of-file on communication channel",
            ));
        }

        let rows = match sql {
            GET_SCHEMAS => single_column(self.schemas.iter().map(|s| text(s))),
            GET_TABLES => single_column(self.tables.iter().map(|t| text(t.name))),
            GET_COLUMNS => match self.table(params[0]) {
                Some(t) => single_column(t.columns.iter().map(|c| text(c.name))),
                None => vec![],
            },
            GET_PRIMARY_KEYS => match self.table(params[0]) {
                Some(t) => t
                    .constraints
                    .iter()
                    .map(|(name, kind)| vec![text(name), text(kind)])
                    .collect(),
                None => vec![],
            },
            GET_COLUMN_DATA_TYPE => self
                .table(params[0])
                .into_iter()
                .flat_map(|t| t.columns.iter())
                .filter(|c| c.name == params[1])
                .map(|c| vec![text(c.data_type)])
                .collect(),
            other => {
                let mut found = None;
                for table in &self.tables {
                    for column in &table.columns {
                        if queries::select_column_values(table.name, column.name)? == other {
                            found = Some(single_column(column.values.clone()));
                        }
                    }
                }
                found.ok_or_else(|| {
                    CatalogError::execution("ORA-00942: table or view does not exist")
                })?
            }
        };

        Ok(rows)
    }
}

fn orders_catalog() -> FakeOracle {
    FakeOracle {
        schemas: vec!["SYS", "SCOTT", "HR"],
        tables: vec![
            FakeTable {
                name: "ORDERS",
                constraints: vec![
                    ("ORDERS_PK", "P"),
                    ("ORDERS_CUSTOMER_FK", "R"),
                    ("SYS_C0012345", "C"),
                ],
                columns: vec![
                    FakeColumn {
                        name: "ID",
                        data_type: "NUMBER",
                        values: vec![num("3"), num("1"), num("2"), num("4")],
                    },
                    FakeColumn {
                        name: "STATUS",
                        data_type: "VARCHAR2",
                        values: vec![text("NEW"), text("SHIPPED"), SqlValue::Null, text("NEW")],
                    },
                    FakeColumn {
                        name: "AMOUNT",
                        data_type: "NUMBER",
                        values: vec![text("19.99"), SqlValue::Null, text("5"), text("100.01")],
                    },
                ],
            },
            FakeTable {
                name: "AUDIT_LOG",
                constraints: vec![],
                columns: vec![FakeColumn {
                    name: "SEQ",
                    data_type: "NUMBER",
                    values: vec![],
                }],
            },
            FakeTable {
                name: "EMPTY_SHELL",
                constraints: vec![],
                columns: vec![],
            },
        ],
        ..Default::default()
    }
}

/// A table whose NUMBER columns need every one of Oracle's 38 digits.
fn ledger_catalog() -> FakeOracle {
    FakeOracle {
        schemas: vec!["FINANCE"],
        tables: vec![FakeTable {
            name: "LEDGER",
            constraints: vec![("LEDGER_PK", "P")],
            columns: vec![
                FakeColumn {
                    name: "BALANCE",
                    data_type: "NUMBER",
                    values: worker_values(
                        "[[12345678901234567890123456789012345678], \
                         [-98765432109876543210987654321098765432], \
                         [123456789012345678901], [null]]",
                    ),
                },
                FakeColumn {
                    name: "RATE",
                    data_type: "NUMBER",
                    values: worker_values("[[1234567890.123456789], [1234567890.123456788]]"),
                },
                FakeColumn {
                    name: "EPSILON",
                    data_type: "NUMBER",
                    values: worker_values("[[2e-28], [1e-28]]"),
                },
                FakeColumn {
                    name: "SERIAL",
                    data_type: "NUMBER",
                    values: worker_values(
                        "[[10000000000000000000000000002], [10000000000000000000000000001]]",
                    ),
                },
                FakeColumn {
                    name: "MEMO",
                    data_type: "VARCHAR2",
                    values: vec![text("opening balance")],
                },
            ],
        }],
        ..Default::default()
    }
}

// ============================================================================
// Listing operations
// ============================================================================

#[tokio::test]
async fn test_get_schemas_preserves_catalog_order() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let schemas = inspector.get_schemas().await.unwrap();
    assert_eq!(schemas, vec!["SYS", "SCOTT", "HR"]);
    assert_eq!(inspector.executor().call_count(), 1);
}

#[tokio::test]
async fn test_get_tables_preserves_catalog_order() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let tables = inspector.get_tables().await.unwrap();
    assert_eq!(tables, vec!["ORDERS", "AUDIT_LOG", "EMPTY_SHELL"]);
}

#[tokio::test]
async fn test_get_columns_binds_table_name() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let columns = inspector.get_columns("ORDERS").await.unwrap();
    assert_eq!(columns, vec!["ID", "STATUS", "AMOUNT"]);

    let calls = inspector.executor().calls();
    assert_eq!(calls, vec![(GET_COLUMNS.to_string(), vec!["ORDERS".to_string()])]);
}

#[tokio::test]
async fn test_get_columns_rejects_empty_table_name() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let err = inspector.get_columns("").await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidIdentifier(_)));
    assert_eq!(inspector.executor().call_count(), 0);
}

// ============================================================================
// Table information
// ============================================================================

#[tokio::test]
async fn test_table_information_issues_two_plus_two_n_queries() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let info = inspector.get_table_information("ORDERS").await.unwrap();

    assert_eq!(info.column_count(), 3);
    assert_eq!(inspector.executor().call_count(), 2 + 2 * 3);
}

#[tokio::test]
async fn test_table_information_query_order() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    inspector.get_table_information("ORDERS").await.unwrap();

    let sqls: Vec<String> = inspector
        .executor()
        .calls()
        .into_iter()
        .map(|(sql, _)| sql)
        .collect();

    assert_eq!(
        sqls,
        vec![
            GET_PRIMARY_KEYS.to_string(),
            GET_COLUMNS.to_string(),
            GET_COLUMN_DATA_TYPE.to_string(),
            r#"SELECT "ID" FROM "ORDERS""#.to_string(),
            GET_COLUMN_DATA_TYPE.to_string(),
            r#"SELECT "STATUS" FROM "ORDERS""#.to_string(),
            GET_COLUMN_DATA_TYPE.to_string(),
            r#"SELECT "AMOUNT" FROM "ORDERS""#.to_string(),
        ]
    );
}

#[tokio::test]
async fn test_type_lookup_binds_table_then_column() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    inspector.get_table_information("ORDERS").await.unwrap();

    let calls = inspector.executor().calls();
    assert_eq!(calls[2].1, vec!["ORDERS".to_string(), "ID".to_string()]);
    assert!(calls[3].1.is_empty());
}

#[tokio::test]
async fn test_column_count_matches_columns() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    for table in ["ORDERS", "AUDIT_LOG", "EMPTY_SHELL"] {
        let info = inspector.get_table_information(table).await.unwrap();
        assert_eq!(info.column_count(), info.columns().len(), "table {}", table);
    }
}

#[tokio::test]
async fn test_numeric_column_statistics() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let info = inspector.get_table_information("ORDERS").await.unwrap();

    let id = info.column("ID").unwrap();
    assert!(id.is_numeric());
    assert_eq!(id.data_type(), "NUMBER");
    assert_eq!(id.min(), Some(dec("1")));
    assert_eq!(id.max(), Some(dec("4")));
    assert_eq!(id.median(), Some(dec("2.5")));

    // Raw values keep fetch order.
    match id.data() {
        ColumnData::Numeric { values, .. } => assert_eq!(
            values,
            &vec![Some(dec("3")), Some(dec("1")), Some(dec("2")), Some(dec("4"))]
        ),
        ColumnData::Text { .. } => panic!("ID should be numeric"),
    }
}

#[tokio::test]
async fn test_numeric_values_sent_as_text_with_nulls() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let info = inspector.get_table_information("ORDERS").await.unwrap();

    let amount = info.column("AMOUNT").unwrap();
    assert_eq!(amount.data().len(), 4);
    assert_eq!(amount.min(), Some(dec("5")));
    assert_eq!(amount.max(), Some(dec("100.01")));
    assert_eq!(amount.median(), Some(dec("19.99")));
}

#[tokio::test]
async fn test_full_precision_numbers_profile_exactly() {
    let inspector = OracleCatalogInspector::new(ledger_catalog());
    let info = inspector.get_table_information("LEDGER").await.unwrap();

    assert_eq!(info.column_count(), 5);
    assert_eq!(inspector.executor().call_count(), 2 + 2 * 5);

    let balance = info.column("BALANCE").unwrap();
    assert_eq!(balance.data().len(), 4);
    assert_eq!(
        balance.min(),
        Some(dec("-98765432109876543210987654321098765432"))
    );
    assert_eq!(
        balance.max(),
        Some(dec("12345678901234567890123456789012345678"))
    );
    assert_eq!(balance.median(), Some(dec("123456789012345678901")));
}

#[tokio::test]
async fn test_fractions_beyond_double_precision_profile_exactly() {
    let inspector = OracleCatalogInspector::new(ledger_catalog());
    let info = inspector.get_table_information("LEDGER").await.unwrap();

    let rate = info.column("RATE").unwrap();
    assert_eq!(rate.min(), Some(dec("1234567890.123456788")));
    assert_eq!(rate.max(), Some(dec("1234567890.123456789")));
    assert_eq!(rate.median(), Some(dec("1234567890.1234567885")));
}

#[tokio::test]
async fn test_even_medians_needing_extra_digits_are_exact() {
    let inspector = OracleCatalogInspector::new(ledger_catalog());
    let info = inspector.get_table_information("LEDGER").await.unwrap();

    let epsilon = info.column("EPSILON").unwrap();
    let median = epsilon.median().unwrap();
    assert!(epsilon.min().unwrap() < median && median < epsilon.max().unwrap());
    assert_eq!(median, dec("1.5e-28"));

    let serial = info.column("SERIAL").unwrap();
    assert_eq!(
        serial.median(),
        Some(dec("10000000000000000000000000001.5"))
    );
    assert!(info.column("MEMO").unwrap().stats().is_none());
}

#[tokio::test]
async fn test_text_column_has_no_statistics() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let info = inspector.get_table_information("ORDERS").await.unwrap();

    let status = info.column("STATUS").unwrap();
    assert!(!status.is_numeric());
    assert!(status.stats().is_none());
    match status.data() {
        ColumnData::Text { values } => assert_eq!(
            values,
            &vec![
                Some("NEW".to_string()),
                Some("SHIPPED".to_string()),
                None,
                Some("NEW".to_string())
            ]
        ),
        ColumnData::Numeric { .. } => panic!("STATUS should be text"),
    }
}

#[tokio::test]
async fn test_empty_numeric_column_has_no_statistics() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let info = inspector.get_table_information("AUDIT_LOG").await.unwrap();

    let seq = info.column("SEQ").unwrap();
    assert!(seq.is_numeric());
    assert!(seq.data().is_empty());
    assert!(seq.stats().is_none());
}

#[tokio::test]
async fn test_constraints_are_not_filtered() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let info = inspector.get_table_information("ORDERS").await.unwrap();

    let kinds: Vec<&str> = info
        .primary_keys()
        .iter()
        .map(|pk| pk.constraint_type.as_str())
        .collect();
    assert_eq!(kinds, vec!["P", "R", "C"]);
    assert_eq!(info.primary_key_constraints().count(), 1);
}

#[tokio::test]
async fn test_table_without_columns() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let info = inspector.get_table_information("EMPTY_SHELL").await.unwrap();

    assert_eq!(info.column_count(), 0);
    assert!(info.columns().is_empty());
    assert_eq!(inspector.executor().call_count(), 2);
}

#[tokio::test]
async fn test_unknown_table_issues_no_value_queries() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let info = inspector
        .get_table_information("ORDERS\"; DROP TABLE ORDERS; --")
        .await
        .unwrap();

    assert_eq!(info.column_count(), 0);
    assert_eq!(inspector.executor().call_count(), 2);
}

#[tokio::test]
async fn test_empty_table_name_is_rejected_before_querying() {
    let inspector = OracleCatalogInspector::new(orders_catalog());
    let err = inspector.get_table_information("").await.unwrap_err();

    assert!(matches!(err, CatalogError::InvalidIdentifier(_)));
    assert_eq!(inspector.executor().call_count(), 0);
}

// ============================================================================
// Failure propagation
// ============================================================================

#[tokio::test]
async fn test_value_fetch_failure_aborts() {
    let mut catalog = orders_catalog();
    catalog.fail_on = Some(r#"SELECT "STATUS" FROM "ORDERS""#.to_string());
    let inspector = OracleCatalogInspector::new(catalog);

    let err = inspector.get_table_information("ORDERS").await.unwrap_err();
    assert!(err.is_execution_failure());
    assert!(err.worker_error().is_none());
    assert!(err.to_string().contains("ORA-03113"));

    // PK + columns + (type, values) for ID + (type, failing values) for STATUS.
    assert_eq!(inspector.executor().call_count(), 6);
}

#[tokio::test]
async fn test_constraint_query_failure_aborts() {
    let mut catalog = orders_catalog();
    catalog.fail_on = Some(GET_PRIMARY_KEYS.to_string());
    let inspector = OracleCatalogInspector::new(catalog);

    assert!(inspector.get_table_information("ORDERS").await.is_err());
    assert_eq!(inspector.executor().call_count(), 1);
}

#[tokio::test]
async fn test_type_lookup_cardinality_mismatch_aborts() {
    // The column list reports a column the type lookup cannot find.
    struct DriftingCatalog(FakeOracle);

    #[async_trait]
    impl QueryExecutor for DriftingCatalog {
        async fn fetch_rows(&self, sql: &str, params: &[&str]) -> CatalogResult<Vec<Row>> {
            if sql == GET_COLUMNS {
                self.0.calls.lock().unwrap().push((sql.to_string(), vec![]));
                return Ok(vec![vec![text("ID")], vec![text("DROPPED_COL")]]);
            }
            self.0.fetch_rows(sql, params).await
        }
    }

    let inspector = OracleCatalogInspector::new(DriftingCatalog(orders_catalog()));
    let err = inspector.get_table_information("ORDERS").await.unwrap_err();

    assert!(matches!(
        err,
        CatalogError::IncorrectResultSize {
            expected: 1,
            actual: 0,
            ..
        }
    ));
    assert!(!err.is_execution_failure());
}

// ============================================================================
// Sharing
// ============================================================================

#[tokio::test]
async fn test_shared_executor_across_inspectors() {
    let catalog = Arc::new(orders_catalog());
    let first = OracleCatalogInspector::new(catalog.clone());
    let second = OracleCatalogInspector::new(catalog.clone());

    let (a, b) = tokio::join!(
        first.get_table_information("ORDERS"),
        second.get_table_information("AUDIT_LOG")
    );

    assert_eq!(a.unwrap().column_count(), 3);
    assert_eq!(b.unwrap().column_count(), 1);
    assert_eq!(catalog.call_count(), (2 + 2 * 3) + (2 + 2 * 1));
}

#[tokio::test]
async fn test_inspector_behind_trait_object() {
    let inspector: Box<dyn CatalogInspector> =
        Box::new(OracleCatalogInspector::new(orders_catalog()));
    let info = inspector.get_table_information("ORDERS").await.unwrap();
    assert_eq!(info.columns()[0].name(), "ID");
    assert_eq!(info.columns()[2].name(), "AMOUNT");
}
