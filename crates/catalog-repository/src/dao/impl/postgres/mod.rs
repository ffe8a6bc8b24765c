//! PostgreSQL DAO implementations (SQLx).

mod category_dao_impl;
mod product_dao_impl;

pub use category_dao_impl::PgCategoryDao;
pub use product_dao_impl::PgProductDao;
