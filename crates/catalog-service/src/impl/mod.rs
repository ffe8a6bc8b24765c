//! Service implementations.

mod category_service_impl;
mod product_service_impl;

pub use category_service_impl::CategoryServiceImpl;
pub use product_service_impl::ProductServiceImpl;
