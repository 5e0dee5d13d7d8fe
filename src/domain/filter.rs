use super::category::CategoryFilter;
use super::product::Product;

pub const NO_RESULTS_TITLE: &str = "Товары не найдены";
pub const NO_RESULTS_HINT: &str =
    "Попробуйте изменить поисковый запрос или выбрать другую категорию";

/// Category selection plus search text; the two inputs of the product grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: CategoryFilter,
    pub search: String,
}

impl ProductFilter {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    /// Products visible under this filter, in catalog order.
    pub fn apply<'a>(&self, catalog: &'a [Product]) -> Vec<&'a Product> {
        let needle = self.search.to_lowercase();
        catalog
            .iter()
            .filter(|p| {
                self.category.matches(&p.category) && p.name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
