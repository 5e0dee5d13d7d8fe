/// Id reserved for the "every category" entry.
pub const ALL_CATEGORY_ID: &str = "all";

/// Heading used for the unfiltered grid when no category list names it.
pub const ALL_PRODUCTS_TITLE: &str = "Все товары";

/// Glyph shown next to a category in the navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryIcon {
    Grid,
    Smartphone,
    Home,
    Sparkles,
    Shirt,
    Dumbbell,
    Apple,
}

impl CategoryIcon {
    /// Name of the glyph in the icon set the front end renders from.
    pub fn glyph(self) -> &'static str {
        match self {
            CategoryIcon::Grid => "Grid3X3",
            CategoryIcon::Smartphone => "Smartphone",
            CategoryIcon::Home => "Home",
            CategoryIcon::Sparkles => "Sparkles",
            CategoryIcon::Shirt => "Shirt",
            CategoryIcon::Dumbbell => "Dumbbell",
            CategoryIcon::Apple => "Apple",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: CategoryIcon,
}

impl Category {
    pub fn new(id: &str, name: &str, icon: CategoryIcon) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon,
        }
    }
}

/// The marketplace's fixed navigation list, "all" first.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(ALL_CATEGORY_ID, ALL_PRODUCTS_TITLE, CategoryIcon::Grid),
        Category::new("electronics", "Электроника", CategoryIcon::Smartphone),
        Category::new("home", "Дом и быт", CategoryIcon::Home),
        Category::new("beauty", "Красота", CategoryIcon::Sparkles),
        Category::new("clothes", "Одежда", CategoryIcon::Shirt),
        Category::new("sport", "Спорт", CategoryIcon::Dumbbell),
        Category::new("food", "Продукты", CategoryIcon::Apple),
    ]
}

/// Category predicate of the product grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn from_id(id: &str) -> Self {
        if id == ALL_CATEGORY_ID {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(id.to_string())
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORY_ID,
            CategoryFilter::Only(id) => id,
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => id == category,
        }
    }

    /// Heading for the product grid under this filter; empty for ids missing
    /// from `categories`.
    pub fn title(&self, categories: &[Category]) -> String {
        match categories.iter().find(|c| c.id == self.id()) {
            Some(category) => category.name.clone(),
            None if *self == CategoryFilter::All => ALL_PRODUCTS_TITLE.to_string(),
            None => String::new(),
        }
    }
}
