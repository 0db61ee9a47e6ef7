pub use sea_orm_migration::prelude::*;

mod m20240815_000000_create_products;
mod m20240821_000000_create_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240815_000000_create_products::Migration),
            Box::new(m20240821_000000_create_categories::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_by_name() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "m20240815_000000_create_products",
                "m20240821_000000_create_categories",
            ]
        );
    }
}
