use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::{Cart, CartLine, EMPTY_CART_MESSAGE};
use crate::domain::category::{Category, ALL_CATEGORY_ID};
use crate::domain::filter::{NO_RESULTS_HINT, NO_RESULTS_TITLE};
use crate::domain::money::format_price;
use crate::domain::product::{Product, ProductId};
use crate::domain::session::StorefrontPage;
use crate::errors::AppError;
use crate::Storefront;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    /// Glyph name in the front end's icon set, e.g. "Smartphone".
    pub icon: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    /// Price as shown on the card, e.g. "1 200 ₽"
    pub price_display: String,
    pub original_price: Option<String>,
    pub original_price_display: Option<String>,
    pub discount_percent: Option<i64>,
    pub image: String,
    pub category: String,
    pub rating: f64,
    pub reviews: u32,
    /// Filled stars out of five.
    pub filled_stars: u8,
    pub in_stock: bool,
    /// Add button caption; the button is disabled when `in_stock` is false.
    pub availability_label: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NoResultsResponse {
    pub title: String,
    pub hint: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductGridResponse {
    pub count: usize,
    pub products: Vec<ProductResponse>,
    /// Present only when nothing matched.
    pub no_results: Option<NoResultsResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartLineResponse {
    pub product_id: i64,
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
    pub line_total_display: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total_price: String,
    pub total_price_display: String,
    pub total_items: u64,
    /// "Корзина пуста" when the cart has no lines.
    pub empty_message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    pub started_at: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PageResponse {
    pub session_id: Uuid,
    pub selected_category: String,
    pub search_query: String,
    /// Grid heading: the selected category's display name.
    pub heading: String,
    pub grid: ProductGridResponse,
    pub cart_visible: bool,
    pub cart: CartResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartVisibilityResponse {
    pub visible: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectCategoryRequest {
    pub category: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartVisibilityRequest {
    pub visible: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetQuantityRequest {
    /// Zero or less removes the line.
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub q: String,
}

fn default_category() -> String {
    ALL_CATEGORY_ID.to_string()
}

// ── Mapping ──────────────────────────────────────────────────────────────────

impl From<&Category> for CategoryResponse {
    fn from(c: &Category) -> Self {
        CategoryResponse {
            id: c.id.clone(),
            name: c.name.clone(),
            icon: c.icon.glyph().to_string(),
        }
    }
}

impl From<&Product> for ProductResponse {
    fn from(p: &Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name.clone(),
            price: p.price.to_string(),
            price_display: format_price(&p.price),
            original_price: p.original_price.as_ref().map(ToString::to_string),
            original_price_display: p.original_price.as_ref().map(format_price),
            discount_percent: p.discount_percent(),
            image: p.image.clone(),
            category: p.category.clone(),
            rating: p.rating,
            reviews: p.reviews,
            filled_stars: p.filled_stars(),
            in_stock: p.in_stock,
            availability_label: p.availability_label().to_string(),
        }
    }
}

impl From<&[Product]> for ProductGridResponse {
    fn from(products: &[Product]) -> Self {
        ProductGridResponse {
            count: products.len(),
            products: products.iter().map(ProductResponse::from).collect(),
            no_results: products.is_empty().then(|| NoResultsResponse {
                title: NO_RESULTS_TITLE.to_string(),
                hint: NO_RESULTS_HINT.to_string(),
            }),
        }
    }
}

impl From<&CartLine> for CartLineResponse {
    fn from(l: &CartLine) -> Self {
        let line_total = l.line_total();
        CartLineResponse {
            product_id: l.product.id,
            name: l.product.name.clone(),
            image: l.product.image.clone(),
            unit_price: l.product.price.to_string(),
            quantity: l.quantity,
            line_total_display: format_price(&line_total),
            line_total: line_total.to_string(),
        }
    }
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        let total = cart.total_price();
        CartResponse {
            lines: cart.lines().iter().map(CartLineResponse::from).collect(),
            total_price_display: format_price(&total),
            total_price: total.to_string(),
            total_items: cart.total_items(),
            empty_message: cart.is_empty().then(|| EMPTY_CART_MESSAGE.to_string()),
        }
    }
}

impl From<&StorefrontPage> for PageResponse {
    fn from(page: &StorefrontPage) -> Self {
        PageResponse {
            session_id: page.session_id,
            selected_category: page.filter.category.id().to_string(),
            search_query: page.filter.search.clone(),
            heading: page.heading.clone(),
            grid: ProductGridResponse::from(page.products.as_slice()),
            cart_visible: page.cart_visible,
            cart: CartResponse::from(&page.cart),
        }
    }
}

// ── Catalog handlers ─────────────────────────────────────────────────────────

/// GET /categories
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (
            status = 200,
            description = "Navigation categories, \"all\" first",
            body = [CategoryResponse]
        ),
    ),
    tag = "storefront"
)]
pub async fn list_categories(storefront: web::Data<Storefront>) -> HttpResponse {
    let categories: Vec<CategoryResponse> = storefront
        .categories()
        .iter()
        .map(CategoryResponse::from)
        .collect();
    HttpResponse::Ok().json(categories)
}

/// GET /products
///
/// Filters the catalog by category and case-insensitive name search without
/// touching any session.
#[utoipa::path(
    get,
    path = "/products",
    params(
        ("category" = Option<String>, Query, description = "Category id (default \"all\")"),
        ("q" = Option<String>, Query, description = "Name search text"),
    ),
    responses(
        (
            status = 200,
            description = "Matching products in catalog order",
            body = ProductGridResponse
        ),
        (status = 400, description = "Unknown category"),
    ),
    tag = "storefront"
)]
pub async fn browse_products(
    storefront: web::Data<Storefront>,
    query: web::Query<BrowseParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let products = storefront.browse(&params.category, &params.q)?;
    Ok(HttpResponse::Ok().json(ProductGridResponse::from(products.as_slice())))
}

// ── Session handlers ─────────────────────────────────────────────────────────

/// POST /sessions
#[utoipa::path(
    post,
    path = "/sessions",
    responses(
        (status = 201, description = "Session started", body = SessionResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "storefront"
)]
pub async fn start_session(storefront: web::Data<Storefront>) -> Result<HttpResponse, AppError> {
    let session = storefront.start_session()?;
    Ok(HttpResponse::Created().json(SessionResponse {
        id: session.id,
        started_at: session.started_at.to_rfc3339(),
    }))
}

/// GET /sessions/{id}
///
/// Everything the storefront page renders for this session.
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session UUID")),
    responses(
        (status = 200, description = "Page state", body = PageResponse),
        (status = 404, description = "Session not found"),
    ),
    tag = "storefront"
)]
pub async fn get_page(
    storefront: web::Data<Storefront>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let page = storefront.page(path.into_inner())?;
    Ok(HttpResponse::Ok().json(PageResponse::from(&page)))
}

/// DELETE /sessions/{id}
#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session UUID")),
    responses(
        (status = 204, description = "Session ended"),
        (status = 404, description = "Session not found"),
    ),
    tag = "storefront"
)]
pub async fn end_session(
    storefront: web::Data<Storefront>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    storefront.end_session(path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /sessions/{id}/category
#[utoipa::path(
    put,
    path = "/sessions/{id}/category",
    params(("id" = Uuid, Path, description = "Session UUID")),
    request_body = SelectCategoryRequest,
    responses(
        (status = 200, description = "Page state after selection", body = PageResponse),
        (status = 400, description = "Unknown category"),
        (status = 404, description = "Session not found"),
    ),
    tag = "storefront"
)]
pub async fn select_category(
    storefront: web::Data<Storefront>,
    path: web::Path<Uuid>,
    body: web::Json<SelectCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let page = storefront.select_category(path.into_inner(), &body.category)?;
    Ok(HttpResponse::Ok().json(PageResponse::from(&page)))
}

/// PUT /sessions/{id}/search
#[utoipa::path(
    put,
    path = "/sessions/{id}/search",
    params(("id" = Uuid, Path, description = "Session UUID")),
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Page state after search", body = PageResponse),
        (status = 404, description = "Session not found"),
    ),
    tag = "storefront"
)]
pub async fn search(
    storefront: web::Data<Storefront>,
    path: web::Path<Uuid>,
    body: web::Json<SearchRequest>,
) -> Result<HttpResponse, AppError> {
    let page = storefront.search(path.into_inner(), &body.query)?;
    Ok(HttpResponse::Ok().json(PageResponse::from(&page)))
}

// ── Cart handlers ────────────────────────────────────────────────────────────

/// POST /sessions/{id}/cart/toggle
#[utoipa::path(
    post,
    path = "/sessions/{id}/cart/toggle",
    params(("id" = Uuid, Path, description = "Session UUID")),
    responses(
        (status = 200, description = "New cart panel visibility", body = CartVisibilityResponse),
        (status = 404, description = "Session not found"),
    ),
    tag = "storefront"
)]
pub async fn toggle_cart(
    storefront: web::Data<Storefront>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let visible = storefront.toggle_cart(path.into_inner())?;
    Ok(HttpResponse::Ok().json(CartVisibilityResponse { visible }))
}

/// PUT /sessions/{id}/cart/visibility
#[utoipa::path(
    put,
    path = "/sessions/{id}/cart/visibility",
    params(("id" = Uuid, Path, description = "Session UUID")),
    request_body = CartVisibilityRequest,
    responses(
        (status = 200, description = "Cart panel visibility", body = CartVisibilityResponse),
        (status = 404, description = "Session not found"),
    ),
    tag = "storefront"
)]
pub async fn set_cart_visibility(
    storefront: web::Data<Storefront>,
    path: web::Path<Uuid>,
    body: web::Json<CartVisibilityRequest>,
) -> Result<HttpResponse, AppError> {
    let visible = storefront.set_cart_visible(path.into_inner(), body.visible)?;
    Ok(HttpResponse::Ok().json(CartVisibilityResponse { visible }))
}

/// GET /sessions/{id}/cart
#[utoipa::path(
    get,
    path = "/sessions/{id}/cart",
    params(("id" = Uuid, Path, description = "Session UUID")),
    responses(
        (status = 200, description = "Cart contents and totals", body = CartResponse),
        (status = 404, description = "Session not found"),
    ),
    tag = "storefront"
)]
pub async fn get_cart(
    storefront: web::Data<Storefront>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let cart = storefront.cart(path.into_inner())?;
    Ok(HttpResponse::Ok().json(CartResponse::from(&cart)))
}

/// POST /sessions/{id}/cart/items
///
/// Adds one unit of the product. Out-of-stock products are refused with 409.
#[utoipa::path(
    post,
    path = "/sessions/{id}/cart/items",
    params(("id" = Uuid, Path, description = "Session UUID")),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Cart after the add", body = CartResponse),
        (status = 404, description = "Session or product not found"),
        (status = 409, description = "Product out of stock"),
    ),
    tag = "storefront"
)]
pub async fn add_to_cart(
    storefront: web::Data<Storefront>,
    path: web::Path<Uuid>,
    body: web::Json<AddToCartRequest>,
) -> Result<HttpResponse, AppError> {
    let cart = storefront.add_to_cart(path.into_inner(), body.product_id)?;
    Ok(HttpResponse::Ok().json(CartResponse::from(&cart)))
}

/// PUT /sessions/{id}/cart/items/{product_id}
///
/// Sets the quantity of a line already in the cart. Zero or less removes it;
/// products not in the cart are left alone.
#[utoipa::path(
    put,
    path = "/sessions/{id}/cart/items/{product_id}",
    params(
        ("id" = Uuid, Path, description = "Session UUID"),
        ("product_id" = i64, Path, description = "Product id"),
    ),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Cart after the update", body = CartResponse),
        (status = 404, description = "Session not found"),
    ),
    tag = "storefront"
)]
pub async fn set_quantity(
    storefront: web::Data<Storefront>,
    path: web::Path<(Uuid, ProductId)>,
    body: web::Json<SetQuantityRequest>,
) -> Result<HttpResponse, AppError> {
    let (session_id, product_id) = path.into_inner();
    let cart = storefront.set_quantity(session_id, product_id, body.quantity)?;
    Ok(HttpResponse::Ok().json(CartResponse::from(&cart)))
}

/// DELETE /sessions/{id}/cart/items/{product_id}
///
/// Idempotent: removing a product that is not in the cart still returns 204.
#[utoipa::path(
    delete,
    path = "/sessions/{id}/cart/items/{product_id}",
    params(
        ("id" = Uuid, Path, description = "Session UUID"),
        ("product_id" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 204, description = "Line removed or already absent"),
        (status = 404, description = "Session not found"),
    ),
    tag = "storefront"
)]
pub async fn remove_from_cart(
    storefront: web::Data<Storefront>,
    path: web::Path<(Uuid, ProductId)>,
) -> Result<HttpResponse, AppError> {
    let (session_id, product_id) = path.into_inner();
    storefront.remove_from_cart(session_id, product_id)?;
    Ok(HttpResponse::NoContent().finish())
}
