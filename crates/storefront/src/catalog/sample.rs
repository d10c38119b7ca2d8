//! Built-in demo catalog.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use mycart_core::{Category, CategoryId, CurrencyCode, Product, ProductId};

const IMAGE_BASE: &str = "https://images.unsplash.com";

/// Demo categories in display order.
#[must_use]
pub fn categories() -> Vec<Category> {
    [
        ("1", "Electronics", "photo-1498049794561-7780e7231661"),
        ("2", "Fashion", "photo-1445205170230-053b83016050"),
        ("3", "Home & Garden", "photo-1556911220-bff31c812dba"),
        ("4", "Sports", "photo-1461896836934-ffe607ba8211"),
        ("5", "Toys", "photo-1558060370-d644479cb6f7"),
        ("6", "Collectibles", "photo-1608889476561-6242cfdbf622"),
        ("7", "Books", "photo-1495446815901-a7297e633e8d"),
        ("8", "Automotive", "photo-1492144534655-ae79c964c9d7"),
    ]
    .into_iter()
    .map(|(id, name, photo)| Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        image: format!("{IMAGE_BASE}/{photo}?w=400&h=400&fit=crop"),
    })
    .collect()
}

/// Row layout: id, title, description, price in cents, category, brand,
/// rating in tenths, reviews, inventory, (year, month, day), photo.
type Row = (
    &'static str,
    &'static str,
    &'static str,
    i64,
    &'static str,
    &'static str,
    u8,
    u32,
    u32,
    (i32, u32, u32),
    &'static str,
);

const PRODUCTS: [Row; 8] = [
    (
        "1",
        "Premium Wireless Headphones with Active Noise Cancellation",
        "High-quality wireless headphones with superior sound",
        29_999,
        "Electronics",
        "AudioTech",
        48,
        342,
        45,
        (2024, 1, 15),
        "photo-1505740420928-5e560c06d30e",
    ),
    (
        "2",
        "Smart Watch Pro with Health Tracking",
        "Advanced smartwatch with comprehensive health monitoring",
        39_999,
        "Electronics",
        "TechWear",
        46,
        521,
        28,
        (2024, 2, 1),
        "photo-1523275335684-37898b6baf30",
    ),
    (
        "3",
        "Vintage Leather Backpack - Handcrafted",
        "Genuine leather backpack with vintage design",
        15_999,
        "Fashion",
        "LeatherCraft",
        49,
        189,
        15,
        (2024, 1, 20),
        "photo-1553062407-98eeb64c6a62",
    ),
    (
        "4",
        "Professional DSLR Camera Kit",
        "Complete camera kit for professional photography",
        129_999,
        "Electronics",
        "PhotoPro",
        47,
        234,
        12,
        (2024, 2, 10),
        "photo-1526170375885-4d8ecf77b99f",
    ),
    (
        "5",
        "Minimalist Designer Sneakers",
        "Comfortable and stylish everyday sneakers",
        8_999,
        "Fashion",
        "UrbanStep",
        45,
        678,
        67,
        (2024, 1, 25),
        "photo-1549298916-b41d501d3772",
    ),
    (
        "6",
        "Smart Home Security System",
        "Complete wireless security solution for your home",
        44_999,
        "Electronics",
        "SecureHome",
        44,
        156,
        34,
        (2024, 2, 5),
        "photo-1558002038-1055907df827",
    ),
    (
        "7",
        "Ergonomic Office Chair",
        "Premium ergonomic chair for maximum comfort",
        54_999,
        "Home & Garden",
        "ComfortSeating",
        48,
        423,
        19,
        (2024, 1, 30),
        "photo-1505843490538-5133c6c7d0e1",
    ),
    (
        "8",
        "Wireless Gaming Mouse RGB",
        "High-precision gaming mouse with customizable RGB",
        7_999,
        "Electronics",
        "GamerGear",
        46,
        891,
        142,
        (2024, 2, 12),
        "photo-1527864550417-7fd91fc51a46",
    ),
];

/// Demo products in catalog ("featured") order.
#[must_use]
pub fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(
            |&(id, title, description, cents, category, brand, rating, reviews, inventory, date, photo)| {
                let (year, month, day) = date;
                Product {
                    id: ProductId::new(id),
                    title: title.to_string(),
                    description: description.to_string(),
                    price: Decimal::new(cents, 2),
                    currency: CurrencyCode::USD,
                    images: vec![format!("{IMAGE_BASE}/{photo}?w=600&h=600&fit=crop")],
                    category: category.to_string(),
                    brand: Some(brand.to_string()),
                    rating: Some(f64::from(rating) / 10.0),
                    reviews: Some(reviews),
                    inventory,
                    created_at: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
                }
            },
        )
        .collect()
}
