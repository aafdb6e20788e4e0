//! Queries answered by the order and product services over the broker.

pub mod fetch_customer_orders;
pub mod fetch_order_products;

/// Routing keys the sibling services consume from.
pub const CUSTOMER_ORDERS_TOPIC: &str = "customer.orders.request";
pub const ORDER_PRODUCTS_TOPIC: &str = "order.products.request";
pub const PRODUCT_DETAILS_TOPIC: &str = "product_details_queue";
