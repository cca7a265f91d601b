use rustmemorm::{
    CreateQueryBuilder, DeleteQueryBuilder, Dialect, DropQueryBuilder, Entity, EntityMetadata,
    FieldType, FindAllQueryBuilder, FindByIdQueryBuilder, H2Dialect, InsertQueryBuilder,
    MySqlDialect, PostgresDialect, UpdateQueryBuilder, Value,
};

#[derive(Entity, Debug, Clone, PartialEq)]
#[table(name = "users")]
struct Person {
    #[id(generated)]
    id: Option<i64>,
    #[column(name = "nick_name", nullable = false)]
    name: String,
    #[column(name = "old")]
    age: Option<i32>,
    #[column(nullable = false, length = 100)]
    email: String,
    #[transient]
    index: Option<i32>,
}

fn person() -> Person {
    Person {
        id: Some(1),
        name: "test".to_string(),
        age: Some(20),
        email: "test@test.com".to_string(),
        index: Some(3),
    }
}

#[derive(Entity, Debug)]
struct Account {
    #[id]
    number: i64,
    owner: String,
    balance: f64,
    active: bool,
    #[column(insertable = false)]
    created_by: Option<String>,
}

#[test]
fn test_delete_query() {
    let metadata = EntityMetadata::of::<Person>().unwrap();
    let sql = DeleteQueryBuilder::new(&metadata, &H2Dialect).delete_by_id(&Value::Integer(1));

    assert_eq!(sql, "delete FROM users where id = 1");
}

#[test]
fn test_delete_query_from_instance() {
    let metadata = EntityMetadata::of::<Person>().unwrap();
    let sql = DeleteQueryBuilder::new(&metadata, &H2Dialect).delete(&person()).unwrap();

    assert_eq!(sql, "delete FROM users where id = 1");
}

#[test]
fn test_derived_metadata() {
    let metadata = EntityMetadata::of::<Person>().unwrap();

    assert_eq!(metadata.type_name(), "Person");
    assert_eq!(metadata.table_name(), "users");
    assert_eq!(metadata.column_names(), vec!["id", "nick_name", "old", "email"]);
    assert_eq!(metadata.column_field_names(), vec!["id", "name", "age", "email"]);
    assert_eq!(metadata.insertable_column_names(), vec!["nick_name", "old", "email"]);

    let id = metadata.id_column();
    assert!(id.is_id() && id.is_generated() && !id.is_nullable());
    assert_eq!(id.field_type(), FieldType::BigInt);

    let email = metadata.column_by_field_name("email").unwrap();
    assert_eq!(email.length(), Some(100));
    assert!(!email.is_nullable());
    assert!(metadata.column_by_field_name("index").is_none());
}

#[test]
fn test_default_table_name_and_types() {
    let metadata = EntityMetadata::of::<Account>().unwrap();

    assert_eq!(metadata.table_name(), "Account");
    assert_eq!(metadata.id_column_name(), "number");
    assert_eq!(
        metadata
            .columns()
            .iter()
            .map(|c| c.field_type())
            .collect::<Vec<_>>(),
        vec![
            FieldType::BigInt,
            FieldType::Text,
            FieldType::Double,
            FieldType::Boolean,
            FieldType::Text,
        ]
    );
    assert_eq!(
        metadata.insertable_column_names(),
        vec!["number", "owner", "balance", "active"]
    );
}

#[test]
fn test_create_table_per_dialect() {
    let metadata = EntityMetadata::of::<Person>().unwrap();

    let cases: [(&dyn Dialect, &str); 3] = [
        (
            &H2Dialect as &dyn Dialect,
            "CREATE TABLE users (id BIGINT AUTO_INCREMENT PRIMARY KEY, nick_name VARCHAR(255) NOT NULL, old INT, email VARCHAR(100) NOT NULL)",
        ),
        (
            &PostgresDialect as &dyn Dialect,
            "CREATE TABLE users (id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY, nick_name TEXT NOT NULL, old INTEGER, email VARCHAR(100) NOT NULL)",
        ),
        (
            &MySqlDialect as &dyn Dialect,
            "CREATE TABLE users (id BIGINT AUTO_INCREMENT PRIMARY KEY, nick_name VARCHAR(255) NOT NULL, old INT, email VARCHAR(100) NOT NULL)",
        ),
    ];

    for (dialect, expected) in cases {
        assert_eq!(CreateQueryBuilder::new(&metadata, dialect).create_table(), expected, "{}", dialect.name());
    }
}

#[test]
fn test_drop_table() {
    let metadata = EntityMetadata::of::<Person>().unwrap();
    let builder = DropQueryBuilder::new(&metadata, &H2Dialect);

    assert_eq!(builder.drop_table(), "DROP TABLE users");
    assert_eq!(builder.drop_table_if_exists(), "DROP TABLE IF EXISTS users");
}

#[test]
fn test_insert_skips_generated_id() {
    let metadata = EntityMetadata::of::<Person>().unwrap();
    let sql = InsertQueryBuilder::new(&metadata, &H2Dialect).insert(&person()).unwrap();

    assert_eq!(
        sql,
        "INSERT INTO users (nick_name, old, email) VALUES ('test', 20, 'test@test.com')"
    );
}

#[test]
fn test_insert_literals() {
    let metadata = EntityMetadata::of::<Account>().unwrap();
    let account = Account {
        number: 7,
        owner: "O'Hara".to_string(),
        balance: 2.0,
        active: true,
        created_by: Some("ignored".to_string()),
    };

    assert_eq!(
        InsertQueryBuilder::new(&metadata, &H2Dialect).insert(&account).unwrap(),
        "INSERT INTO Account (number, owner, balance, active) VALUES (7, 'O''Hara', 2.0, TRUE)"
    );
    assert_eq!(
        InsertQueryBuilder::new(&metadata, &MySqlDialect).insert(&account).unwrap(),
        "INSERT INTO Account (number, owner, balance, active) VALUES (7, 'O''Hara', 2.0, 1)"
    );
}

#[test]
fn test_update_query() {
    let metadata = EntityMetadata::of::<Person>().unwrap();
    let mut changed = person();
    changed.age = None;

    assert_eq!(
        UpdateQueryBuilder::new(&metadata, &H2Dialect).update(&changed).unwrap(),
        "UPDATE users SET nick_name = 'test', old = NULL, email = 'test@test.com' WHERE id = 1"
    );
}

#[test]
fn test_update_without_id_fails() {
    let metadata = EntityMetadata::of::<Person>().unwrap();
    let mut unsaved = person();
    unsaved.id = None;

    let err = UpdateQueryBuilder::new(&metadata, &H2Dialect).update(&unsaved).unwrap_err();
    assert!(err.is_mapping());
}

#[test]
fn test_select_queries() {
    let metadata = EntityMetadata::of::<Person>().unwrap();

    assert_eq!(
        FindByIdQueryBuilder::new(&metadata, &H2Dialect).find_by_id(&Value::Integer(1)),
        "SELECT id, nick_name, old, email FROM users WHERE id = 1"
    );
    assert_eq!(
        FindAllQueryBuilder::new(&metadata, &H2Dialect).find_all(),
        "SELECT id, nick_name, old, email FROM users"
    );
}
