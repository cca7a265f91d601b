//! Entity manager demo: map a struct, create its table, and run the four
//! CRUD calls against the in-memory engine.
//!
//! Run with:
//!   cargo run --example person_crud

use std::sync::Arc;

use anyhow::{Context, Result};
use rustmemorm::{CreateQueryBuilder, Entity, EntityManager, InMemoryDB, OrmConfig};

#[derive(Debug, Clone, PartialEq, Entity)]
#[table(name = "users")]
pub struct Person {
    #[id(generated)]
    id: Option<i64>,
    #[column(name = "nick_name", nullable = false)]
    name: String,
    #[column(name = "old")]
    age: i32,
    #[column(nullable = false)]
    email: String,
    #[transient]
    index: i32,
}

fn main() -> Result<()> {
    println!("=== RustMemORM Entity Manager Demo ===\n");

    let config = OrmConfig::from_url("rustmemorm:h2:demo?show_sql=true")?;
    let db = Arc::new(InMemoryDB::new());
    let manager = config.entity_manager(db.clone());

    println!("1) Create the table from entity metadata");
    let metadata = Person::metadata()?;
    let ddl = CreateQueryBuilder::new(&metadata, manager.dialect()).create_table();
    println!("   {ddl}");
    manager.template().execute(&ddl)?;

    println!("2) Persist two people; ids come from the database");
    for (name, age, email) in [("yang", 23, "yang@test.com"), ("kim", 31, "kim@test.com")] {
        manager.persist(&Person {
            id: None,
            name: name.to_string(),
            age,
            email: email.to_string(),
            index: 0,
        })?;
    }

    let mut kim: Person = manager.find(2i64).context("kim should have id 2")?;
    println!("   found: {kim:?}");

    println!("3) Update");
    kim.email = "kim@example.com".to_string();
    manager.update(&kim)?;
    let reloaded: Person = manager.find(2i64)?;
    println!("   email is now {}", reloaded.email);

    println!("4) Remove (twice; the second call is a no-op)");
    manager.remove(&reloaded)?;
    manager.remove(&reloaded)?;

    let remaining: Vec<Person> = manager.find_all()?;
    println!("   {} row(s) left: {:?}", remaining.len(), remaining);

    match manager.find::<Person>(2i64) {
        Err(err) if err.is_not_found() => println!("   {err}"),
        other => anyhow::bail!("expected a missing row, got {other:?}"),
    }

    println!("\nTables: {:?}", db.list_tables()?);
    Ok(())
}
