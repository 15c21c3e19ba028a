//! Catalog module.
//!
//! Contains the product and category types and the catalog the shop sells from.

mod category;
mod product;

pub use category::Category;
pub use product::Product;

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::search::ProductFilter;

/// An ordered, read-only list of products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products. Later duplicates of an id are dropped.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let mut unique: Vec<Product> = Vec::new();
        for product in products {
            if !unique.iter().any(|p| p.id == product.id) {
                unique.push(product);
            }
        }
        Self { products: unique }
    }

    /// The IoT components sold in the TechKnot shop.
    pub fn iot_components() -> Self {
        let inr = |major| Money::from_major(major, Currency::INR);
        Self::new([
            Product::new(1, "Arduino Uno R3 Microcontroller", inr(699), Category::Microcontrollers)
                .with_description(
                    "The Arduino Uno is a microcontroller board based on the ATmega328P. \
                     Perfect for beginners and advanced projects.",
                )
                .with_rating(4.8)
                .with_stock(50)
                .with_image("https://images.unsplash.com/photo-1518770660439-4636190af475"),
            Product::new(2, "Raspberry Pi 4 Model B", inr(4500), Category::Microcontrollers)
                .with_description(
                    "The latest Raspberry Pi 4 with 4GB RAM, ideal for desktop computing \
                     and IoT projects.",
                )
                .with_rating(4.9)
                .with_stock(25)
                .with_image("https://images.unsplash.com/photo-1461749280684-dccba630e2f6"),
            Product::new(3, "DHT22 Temperature & Humidity Sensor", inr(349), Category::Sensors)
                .with_description(
                    "High-precision temperature and humidity sensor module for accurate \
                     environmental monitoring.",
                )
                .with_rating(4.7)
                .with_stock(100)
                .with_image("https://images.unsplash.com/photo-1488590528505-98d2b5aba04b"),
            Product::new(4, "HC-SR04 Ultrasonic Distance Sensor", inr(89), Category::Sensors)
                .with_description(
                    "Ultrasonic distance measuring module with 2cm-400cm range for \
                     robotics and automation.",
                )
                .with_rating(4.5)
                .with_stock(150)
                .with_image("https://images.unsplash.com/photo-1531297484001-80022131f5a1"),
            Product::new(5, "NodeMCU ESP8266 WiFi Module", inr(399), Category::Communication)
                .with_description(
                    "ESP8266 WiFi development board for IoT applications with built-in \
                     USB programming.",
                )
                .with_rating(4.6)
                .with_stock(75)
                .with_image("https://images.unsplash.com/photo-1487058792275-0ad4aaf24ca7"),
            Product::new(6, "Servo Motor SG90", inr(119), Category::Actuators)
                .with_description(
                    "Small lightweight servo motor for robotics, perfect for beginners \
                     and educational projects.",
                )
                .with_rating(4.4)
                .with_stock(200)
                .with_image("https://images.unsplash.com/photo-1581091226825-a6a2a5aee158"),
            Product::new(7, "RFID Reader Module RC522", inr(249), Category::Communication)
                .with_description(
                    "13.56MHz RFID reader/writer module for security and access \
                     control systems.",
                )
                .with_rating(4.3)
                .with_stock(60)
                .with_image("https://images.unsplash.com/photo-1581091226825-a6a2a5aee158"),
            Product::new(8, "Breadboard 830 Points", inr(149), Category::Accessories)
                .with_description(
                    "Solderless breadboard with 830 tie points for prototyping \
                     electronic circuits.",
                )
                .with_rating(4.7)
                .with_stock(120)
                .with_image("https://images.unsplash.com/photo-1461749280684-dccba630e2f6"),
            Product::new(9, "IoT Starter Kit", inr(1499), Category::Kits)
                .with_description(
                    "Complete IoT starter kit including NodeMCU, sensors, actuators, \
                     and connection cables.",
                )
                .with_rating(4.9)
                .with_stock(15)
                .with_image("https://images.unsplash.com/photo-1518770660439-4636190af475"),
        ])
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Categories that have at least one product, in display order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.products.iter().any(|p| p.category == *c))
            .collect()
    }

    /// Products matching every criterion of the filter, in catalog order.
    pub fn search(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Currency the catalog is priced in, taken from its first product.
    pub fn currency(&self) -> Currency {
        self.products
            .first()
            .map_or_else(Currency::default, |p| p.price.currency)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
