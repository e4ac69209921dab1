use mockall::mock;

use super::{ProductReader, ProductWriter, RepositoryResult};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: &str, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn deactivate_product(&self, product_id: &str) -> RepositoryResult<()>;
    }
}
