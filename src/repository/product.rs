use diesel::prelude::*;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::{DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(DomainProduct::from))
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            items = items.filter(products::active.eq(true));
        }

        if let Some(category) = query.category.as_ref() {
            items = items.filter(products::category.eq(category));
        }

        items = items.order((products::created_at.asc(), products::id.asc()));

        let db_products = items.load::<DbProduct>(&mut conn)?;

        Ok(db_products.into_iter().map(DomainProduct::from).collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: &str,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        // BEGIN IMMEDIATE takes the write lock up front so concurrent writers
        // wait on busy_timeout instead of failing the read-to-write upgrade.
        conn.immediate_transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let existing = products::table
                .filter(products::id.eq(product_id))
                .first::<DbProduct>(conn)
                .optional()?;
            if existing.is_none() {
                return Err(RepositoryError::NotFound);
            }

            let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;

            Ok(updated.into())
        })
    }

    fn deactivate_product(&self, product_id: &str) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<(), RepositoryError, _>(|conn| {
            let now = chrono::Utc::now().naive_utc();

            let changed = diesel::update(products::table.filter(products::id.eq(product_id)))
                .set((products::active.eq(false), products::updated_at.eq(now)))
                .execute(conn)?;

            if changed == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}
