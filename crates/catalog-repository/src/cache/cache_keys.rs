//! Cache key names.

/// Key of the cached product listing (all products joined with category name).
pub const PRODUCT_LIST: &str = "list:products";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_list_key() {
        assert_eq!(PRODUCT_LIST, "list:products");
    }
}
